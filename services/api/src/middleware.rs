//! Middleware for authentication and role authorization
//!
//! `authenticate` turns a bearer credential into an [`AuthUser`] attached
//! to the request; `authorize_owner` then gates mutation routes on the
//! privileged role. The two layers are independent so public routes can
//! skip both and future read-only roles only need the first.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::error::ApiError;
use crate::jwt::TokenError;
use crate::models::owner::Role;
use crate::state::AppState;

/// Authenticated identity attached to the request context
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

/// Extract the credential from the request, in priority order: the
/// `token` cookie, then `Authorization: Bearer <token>`, then a raw
/// `Authorization` value.
fn extract_token(jar: &CookieJar, req: &Request<Body>) -> Option<String> {
    if let Some(cookie) = jar.get("token") {
        return Some(cookie.value().to_string());
    }

    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    Some(header.strip_prefix("Bearer ").unwrap_or(header).to_string())
}

/// Authentication middleware
///
/// Verifies the access token and loads the owner it names; an account
/// deleted after token issuance therefore fails here, not deeper in.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(req.headers());

    let token = extract_token(&jar, &req)
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    let claims = state.tokens.verify_access_token(&token).map_err(|e| {
        info!("Access token rejected: {}", e);
        match e {
            TokenError::Expired => ApiError::unauthorized("Token expired"),
            TokenError::Invalid => ApiError::unauthorized("Invalid token"),
        }
    })?;

    let owner = state
        .owners
        .find_by_id(claims.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User not found"))?;

    req.extensions_mut().insert(AuthUser {
        id: owner.id,
        email: owner.email,
        role: owner.role,
    });

    Ok(next.run(req).await)
}

/// Role authorization middleware; requires `authenticate` to have run
pub async fn authorize_owner(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    // Closed set today, but membership stays explicit so a future
    // non-privileged role cannot slip through.
    if !matches!(user.role, Role::Owner | Role::Admin) {
        return Err(ApiError::forbidden(
            "Access denied. Owner privileges required.",
        ));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    fn request_with_headers(headers: &[(axum::http::HeaderName, &str)]) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/v1/blogs");
        for (name, value) in headers {
            builder = builder.header(name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_cookie_takes_priority_over_header() {
        let req = request_with_headers(&[
            (COOKIE, "token=from-cookie"),
            (AUTHORIZATION, "Bearer from-header"),
        ]);
        let jar = CookieJar::from_headers(req.headers());
        assert_eq!(extract_token(&jar, &req).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_bearer_prefix_is_stripped() {
        let req = request_with_headers(&[(AUTHORIZATION, "Bearer abc.def.ghi")]);
        let jar = CookieJar::from_headers(req.headers());
        assert_eq!(extract_token(&jar, &req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_raw_authorization_value_is_accepted() {
        let req = request_with_headers(&[(AUTHORIZATION, "abc.def.ghi")]);
        let jar = CookieJar::from_headers(req.headers());
        assert_eq!(extract_token(&jar, &req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_no_credential_yields_none() {
        let req = request_with_headers(&[]);
        let jar = CookieJar::from_headers(req.headers());
        assert_eq!(extract_token(&jar, &req), None);
    }
}
