//! Authentication routes: login, refresh, logout, profile, password change

use anyhow::anyhow;
use axum::{
    Extension, Json, Router,
    extract::State,
    middleware,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::jwt::TokenError;
use crate::middleware::{AuthUser, authenticate, authorize_owner};
use crate::models::owner::{
    ChangePasswordRequest, LoginRequest, LoginResponse, OwnerProfile, RefreshTokenRequest,
    RefreshTokenResponse, UpdateProfileRequest,
};
use crate::password::{hash_password, verify_password};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation::{validate_email, validate_password};

/// Create the router for the auth module
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token));

    // Layers run outermost-last, so authenticate is added last to run first.
    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/change-password", post(change_password))
        .route("/profile", get(get_profile).patch(update_profile))
        .route_layer(middleware::from_fn(authorize_owner))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public.merge(protected).with_state(state)
}

/// Build an httpOnly auth cookie
fn auth_cookie(name: &'static str, value: String, max_age_secs: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs as i64))
        .build()
}

/// Build the removal counterpart of an auth cookie
fn expired_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}

fn issue_failure(e: TokenError) -> ApiError {
    ApiError::Internal(anyhow!("Failed to issue token: {e}"))
}

/// Log in with email and password
///
/// Unknown email and wrong password fail with the same message so the
/// endpoint cannot be used to enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<(CookieJar, ApiResponse<LoginResponse>)> {
    if payload.email.is_empty() || !validate_email(&payload.email) {
        return Err(ApiError::validation("Valid email is required"));
    }

    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let owner = state
        .owners
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let password_matches = verify_password(&payload.password, &owner.password_hash)?;
    if !password_matches {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let access_token = state
        .tokens
        .issue_access_token(&owner)
        .map_err(issue_failure)?;
    let refresh_token = state
        .tokens
        .issue_refresh_token(&owner)
        .map_err(issue_failure)?;

    info!("Login successful for owner: {}", owner.id);

    let secure = state.config.environment.is_production();
    let jar = jar
        .add(auth_cookie(
            "token",
            access_token.clone(),
            state.tokens.access_token_expiry(),
            secure,
        ))
        .add(auth_cookie(
            "refreshToken",
            refresh_token.clone(),
            state.tokens.refresh_token_expiry(),
            secure,
        ));

    let response = LoginResponse {
        access_token,
        refresh_token,
        user: OwnerProfile::from(owner),
    };

    Ok((jar, ApiResponse::ok(response, "Login successful")))
}

/// Exchange a refresh token for a new access token
///
/// The refresh token itself is not rotated. Expired and malformed tokens
/// are reported distinctly, matching the access-token path.
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Option<Json<RefreshTokenRequest>>,
) -> ApiResult<(CookieJar, ApiResponse<RefreshTokenResponse>)> {
    let token = jar
        .get("refreshToken")
        .map(|c| c.value().to_string())
        .or_else(|| payload.and_then(|Json(body)| body.refresh_token))
        .ok_or_else(|| ApiError::unauthorized("Refresh token is required"))?;

    let claims = state
        .tokens
        .verify_refresh_token(&token)
        .map_err(|e| match e {
            TokenError::Expired => ApiError::unauthorized("Refresh token expired"),
            TokenError::Invalid => ApiError::unauthorized("Invalid refresh token"),
        })?;

    // The account may have been deleted since the token was issued.
    let owner = state
        .owners
        .find_by_id(claims.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User not found"))?;

    let access_token = state
        .tokens
        .issue_access_token(&owner)
        .map_err(issue_failure)?;

    let secure = state.config.environment.is_production();
    let jar = jar.add(auth_cookie(
        "token",
        access_token.clone(),
        state.tokens.access_token_expiry(),
        secure,
    ));

    Ok((
        jar,
        ApiResponse::ok(
            RefreshTokenResponse { access_token },
            "Token refreshed successfully",
        ),
    ))
}

/// Clear the auth cookies
///
/// Tokens already handed out stay valid until natural expiry; there is
/// no server-side revocation list at this scale.
pub async fn logout(jar: CookieJar) -> ApiResult<(CookieJar, ApiResponse<Option<()>>)> {
    let jar = jar
        .remove(expired_cookie("token"))
        .remove(expired_cookie("refreshToken"));

    Ok((jar, ApiResponse::ok(None, "Logout successful")))
}

/// Change the owner's password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<ApiResponse<Option<()>>> {
    if payload.old_password.is_empty() || payload.new_password.is_empty() {
        return Err(ApiError::validation(
            "Both old and new passwords are required",
        ));
    }

    validate_password(&payload.new_password).map_err(ApiError::Validation)?;

    let owner = state
        .owners
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let old_matches = verify_password(&payload.old_password, &owner.password_hash)?;
    if !old_matches {
        return Err(ApiError::unauthorized("Current password is incorrect"));
    }

    let new_hash = hash_password(&payload.new_password)?;
    state.owners.update_password(owner.id, &new_hash).await?;

    Ok(ApiResponse::ok(None, "Password changed successfully"))
}

/// Fetch the owner profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<ApiResponse<OwnerProfile>> {
    let profile = state
        .owners
        .find_profile(user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::ok(profile, "Profile fetched successfully"))
}

/// Partially update the owner profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<ApiResponse<OwnerProfile>> {
    let profile = state
        .owners
        .update_profile(user.id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::ok(profile, "Profile updated successfully"))
}
