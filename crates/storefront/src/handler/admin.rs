use crate::state::AppState;
use axum::{Extension, Json, http::StatusCode, response::IntoResponse, routing::get};
use shared::{
    abstract_trait::DynHomeService, config::Claims, domain::responses::CatalogSummary,
    errors::HttpError,
};
use std::sync::Arc;
use tracing::info;
use utoipa_axum::router::OpenApiRouter;

/// Catalog counts for the admin dashboard. Access is enforced by the route guard.
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Catalog summary", body = CatalogSummary),
        (status = 307, description = "Redirect to login")
    ),
    tag = "Admin"
)]
pub async fn dashboard(
    Extension(service): Extension<DynHomeService>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, HttpError> {
    info!("📊 Dashboard requested by {}", claims.sub);
    let summary = service.summary().await?;
    Ok((StatusCode::OK, Json(summary)))
}

pub fn admin_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/admin/dashboard", get(dashboard))
        .layer(Extension(app_state.di_container.home_service.clone()))
}
