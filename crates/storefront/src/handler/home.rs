use crate::{handler::method_not_allowed, state::AppState};
use axum::{Extension, Json, http::StatusCode, response::IntoResponse, routing::get};
use shared::{abstract_trait::DynHomeService, domain::responses::HomeResponse};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/home",
    tag = "Home",
    responses(
        (status = 200, description = "Bestsellers, new arrivals and hot deals", body = HomeResponse)
    )
)]
pub async fn get_home(Extension(service): Extension<DynHomeService>) -> impl IntoResponse {
    (StatusCode::OK, Json(service.home().await))
}

pub fn home_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/home", get(get_home).fallback(method_not_allowed))
        .layer(Extension(app_state.di_container.home_service.clone()))
}
