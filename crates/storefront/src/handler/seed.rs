use crate::{handler::method_not_allowed, state::AppState};
use axum::{Extension, Json, http::StatusCode, response::IntoResponse, routing::post};
use shared::{
    abstract_trait::DynCatalogService, domain::responses::SeedResponse, errors::HttpError,
};
use std::sync::Arc;
use tracing::info;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/seed",
    tag = "Catalog",
    responses(
        (status = 200, description = "Sample products written", body = SeedResponse),
        (status = 500, description = "Seeding failed")
    )
)]
pub async fn seed_products(
    Extension(service): Extension<DynCatalogService>,
) -> Result<impl IntoResponse, HttpError> {
    info!("🌱 Seed requested");
    let response = service.seed_sample().await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn seed_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/seed", post(seed_products).fallback(method_not_allowed))
        .layer(Extension(app_state.di_container.catalog_service.clone()))
}
