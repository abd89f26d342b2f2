//! Education routes

use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    routing::get,
};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::middleware::{authenticate, authorize_owner};
use crate::models::education::{CreateEducationRequest, Education, UpdateEducationRequest};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Create the router for the education module
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(list_educations))
        .route("/:id", get(get_education_by_id));

    // Layers run outermost-last, so authenticate is added last to run first.
    let protected = Router::new()
        .route("/", axum::routing::post(create_education))
        .route(
            "/:id",
            axum::routing::patch(update_education).delete(delete_education),
        )
        .route_layer(middleware::from_fn(authorize_owner))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public.merge(protected).with_state(state)
}

/// All education entries, current first
pub async fn list_educations(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<Education>>> {
    let educations = state.educations.list().await?;

    Ok(ApiResponse::ok(educations, "Educations fetched successfully"))
}

/// Fetch an education entry by ID
pub async fn get_education_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Education>> {
    let education = state
        .educations
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Education not found"))?;

    Ok(ApiResponse::ok(education, "Education fetched successfully"))
}

/// Create an education entry
pub async fn create_education(
    State(state): State<AppState>,
    Json(payload): Json<CreateEducationRequest>,
) -> ApiResult<ApiResponse<Education>> {
    let education = state.educations.create(&payload).await?;

    Ok(ApiResponse::created(
        education,
        "Education created successfully",
    ))
}

/// Update an education entry
pub async fn update_education(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEducationRequest>,
) -> ApiResult<ApiResponse<Education>> {
    let education = state
        .educations
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Education not found"))?;

    Ok(ApiResponse::ok(education, "Education updated successfully"))
}

/// Delete an education entry
pub async fn delete_education(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<serde_json::Value>> {
    let deleted = state.educations.delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Education not found"));
    }

    Ok(ApiResponse::ok(
        json!({"message": "Education deleted successfully"}),
        "Education deleted successfully",
    ))
}
