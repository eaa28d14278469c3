use crate::{middleware::guard::LOGIN_PATH, state::AppState};
use axum::{
    Extension, Json,
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use shared::{abstract_trait::DynIdentityService, config::Claims, errors::HttpError};
use std::sync::Arc;
use utoipa::IntoParams;
use utoipa_axum::router::OpenApiRouter;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LoginPageQuery {
    pub callback_url: Option<String>,
}

/// Where the guard sends unauthenticated clients. Credentials go to `POST /api/auth/login`.
#[utoipa::path(
    get,
    path = "/account/login",
    params(LoginPageQuery),
    responses((status = 200, description = "Login instructions")),
    tag = "Account"
)]
pub async fn login_page(Query(query): Query<LoginPageQuery>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "Sign in with POST /api/auth/login",
            "callbackUrl": query.callback_url.unwrap_or_else(|| "/".to_string()),
        })),
    )
}

#[utoipa::path(
    get,
    path = "/account/profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Signed-in user"),
        (status = 307, description = "Redirect to login")
    ),
    tag = "Account"
)]
pub async fn profile(
    Extension(service): Extension<DynIdentityService>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_me(claims.sub).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn account_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(LOGIN_PATH, get(login_page))
        .route("/account/profile", get(profile))
        .layer(Extension(app_state.di_container.auth_service.identity.clone()))
}
