//! Skill routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    middleware,
    routing::get,
};
use serde_json::json;
use std::collections::BTreeMap;

use crate::error::{ApiError, ApiResult};
use crate::middleware::{authenticate, authorize_owner};
use crate::models::skill::{
    CreateSkillRequest, Skill, SkillCategory, SkillListQuery, UpdateSkillRequest,
};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Create the router for the skill module
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(list_skills))
        .route("/by-category", get(skills_by_category));

    // Layers run outermost-last, so authenticate is added last to run first.
    let protected = Router::new()
        .route("/", axum::routing::post(create_skill))
        .route("/:id", axum::routing::patch(update_skill).delete(delete_skill))
        .route_layer(middleware::from_fn(authorize_owner))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public.merge(protected).with_state(state)
}

/// List skills, optionally restricted to one category
pub async fn list_skills(
    State(state): State<AppState>,
    Query(query): Query<SkillListQuery>,
) -> ApiResult<ApiResponse<Vec<Skill>>> {
    let category = SkillCategory::parse(query.category.as_deref());
    let skills = state.skills.list(category).await?;

    Ok(ApiResponse::ok(skills, "Skills fetched successfully"))
}

/// Skills grouped by category
pub async fn skills_by_category(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<BTreeMap<String, Vec<Skill>>>> {
    let grouped = state.skills.by_category().await?;

    Ok(ApiResponse::ok(grouped, "Skills fetched successfully"))
}

/// Create a skill
pub async fn create_skill(
    State(state): State<AppState>,
    Json(payload): Json<CreateSkillRequest>,
) -> ApiResult<ApiResponse<Skill>> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("Name is required"));
    }

    let skill = state.skills.create(&payload).await?;

    Ok(ApiResponse::created(skill, "Skill created successfully"))
}

/// Update a skill
pub async fn update_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSkillRequest>,
) -> ApiResult<ApiResponse<Skill>> {
    let skill = state
        .skills
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Skill not found"))?;

    Ok(ApiResponse::ok(skill, "Skill updated successfully"))
}

/// Delete a skill
pub async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<serde_json::Value>> {
    let deleted = state.skills.delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Skill not found"));
    }

    Ok(ApiResponse::ok(
        json!({"message": "Skill deleted successfully"}),
        "Skill deleted successfully",
    ))
}
