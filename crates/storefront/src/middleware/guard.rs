//! Page-level access control for `/admin` and `/account`.
//!
//! Unlike [`auth_middleware`](super::jwt::auth_middleware), a failed check is not
//! an error: the client is sent to the login page with a `callbackUrl` pointing
//! back at the original request.

use crate::{middleware::jwt::extract_token, state::AppState};
use axum::{
    body::Body,
    extract::State,
    http::{Request, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use shared::config::Claims;
use std::sync::Arc;
use tracing::{info, warn};

pub const LOGIN_PATH: &str = "/account/login";
const PUBLIC_ACCOUNT_PATHS: [&str; 2] = [LOGIN_PATH, "/account/register"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Admin,
    Session,
}

impl Access {
    /// The access a path demands, or `None` when it is public.
    pub fn required_for(path: &str) -> Option<Access> {
        if path.starts_with("/admin") {
            Some(Access::Admin)
        } else if path.starts_with("/account") && !PUBLIC_ACCOUNT_PATHS.contains(&path) {
            Some(Access::Session)
        } else {
            None
        }
    }

    pub fn allows(&self, claims: &Claims) -> bool {
        match self {
            Access::Admin => claims.is_admin(),
            Access::Session => true,
        }
    }
}

/// `/account/login?callbackUrl=<path and query, url-encoded>`.
pub fn login_redirect(uri: &Uri) -> Redirect {
    let callback = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    match serde_urlencoded::to_string([("callbackUrl", callback)]) {
        Ok(query) => Redirect::temporary(&format!("{LOGIN_PATH}?{query}")),
        Err(_) => Redirect::temporary(LOGIN_PATH),
    }
}

pub async fn route_guard(
    State(state): State<Arc<AppState>>,
    cookie_jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(access) = Access::required_for(req.uri().path()) else {
        return next.run(req).await;
    };

    let claims = extract_token(&cookie_jar, req.headers())
        .and_then(|token| state.jwt_config.verify_token(&token).ok());

    match claims {
        Some(claims) if access.allows(&claims) => {
            info!("🛂 Granted {:?} access to {} for {}", access, req.uri().path(), claims.sub);
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Some(claims) => {
            warn!("⛔ {} lacks {:?} access to {}", claims.sub, access, req.uri().path());
            login_redirect(req.uri()).into_response()
        }
        None => {
            info!("🔒 No valid session for {}, redirecting to login", req.uri().path());
            login_redirect(req.uri()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{StatusCode, header};

    #[test]
    fn access_by_path_prefix() {
        assert_eq!(Access::required_for("/admin"), Some(Access::Admin));
        assert_eq!(Access::required_for("/admin/dashboard"), Some(Access::Admin));
        assert_eq!(Access::required_for("/account/profile"), Some(Access::Session));
        assert_eq!(Access::required_for("/account/login"), None);
        assert_eq!(Access::required_for("/account/register"), None);
        assert_eq!(Access::required_for("/api/products"), None);
        assert_eq!(Access::required_for("/"), None);
    }

    #[test]
    fn redirect_carries_encoded_callback() {
        let uri: Uri = "/admin/dashboard?tab=sales".parse().unwrap();
        let response = login_redirect(&uri).into_response();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/account/login?callbackUrl=%2Fadmin%2Fdashboard%3Ftab%3Dsales"
        );
    }
}
