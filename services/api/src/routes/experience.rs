//! Experience routes

use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    routing::get,
};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::middleware::{authenticate, authorize_owner};
use crate::models::experience::{CreateExperienceRequest, Experience, UpdateExperienceRequest};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Create the router for the experience module
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(list_experiences))
        .route("/:id", get(get_experience_by_id));

    // Layers run outermost-last, so authenticate is added last to run first.
    let protected = Router::new()
        .route("/", axum::routing::post(create_experience))
        .route(
            "/:id",
            axum::routing::patch(update_experience).delete(delete_experience),
        )
        .route_layer(middleware::from_fn(authorize_owner))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public.merge(protected).with_state(state)
}

/// All experience entries, current first
pub async fn list_experiences(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<Experience>>> {
    let experiences = state.experiences.list().await?;

    Ok(ApiResponse::ok(
        experiences,
        "Experiences fetched successfully",
    ))
}

/// Fetch an experience entry by ID
pub async fn get_experience_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Experience>> {
    let experience = state
        .experiences
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Experience not found"))?;

    Ok(ApiResponse::ok(experience, "Experience fetched successfully"))
}

/// Create an experience entry
pub async fn create_experience(
    State(state): State<AppState>,
    Json(payload): Json<CreateExperienceRequest>,
) -> ApiResult<ApiResponse<Experience>> {
    let experience = state.experiences.create(&payload).await?;

    Ok(ApiResponse::created(
        experience,
        "Experience created successfully",
    ))
}

/// Update an experience entry
pub async fn update_experience(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateExperienceRequest>,
) -> ApiResult<ApiResponse<Experience>> {
    let experience = state
        .experiences
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Experience not found"))?;

    Ok(ApiResponse::ok(experience, "Experience updated successfully"))
}

/// Delete an experience entry
pub async fn delete_experience(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<serde_json::Value>> {
    let deleted = state.experiences.delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Experience not found"));
    }

    Ok(ApiResponse::ok(
        json!({"message": "Experience deleted successfully"}),
        "Experience deleted successfully",
    ))
}
