//! Project routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    middleware,
    routing::get,
};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::middleware::{authenticate, authorize_owner};
use crate::models::NamedCount;
use crate::models::project::{
    CreateProjectRequest, Project, ProjectFilter, ProjectListQuery, ProjectStats,
    UpdateProjectRequest,
};
use crate::pagination::Paginated;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation::validate_project_input;

/// Query string for the featured endpoint
#[derive(Debug, Default, serde::Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<String>,
}

/// Create the router for the project module
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(list_projects))
        .route("/featured", get(featured_projects))
        .route("/categories", get(project_categories))
        .route("/technologies", get(project_technologies))
        .route("/slug/:slug", get(get_project_by_slug));

    // Layers run outermost-last, so authenticate is added last to run first.
    let protected = Router::new()
        .route("/", axum::routing::post(create_project))
        .route("/stats", get(project_stats))
        .route(
            "/:id",
            get(get_project_by_id)
                .patch(update_project)
                .delete(delete_project),
        )
        .route_layer(middleware::from_fn(authorize_owner))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public.merge(protected).with_state(state)
}

/// Create a project
pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> ApiResult<ApiResponse<Project>> {
    validate_project_input(&payload)?;

    let project = state.projects.create(&payload).await?;

    Ok(ApiResponse::created(project, "Project created successfully"))
}

/// List projects with filtering and pagination
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> ApiResult<ApiResponse<Paginated<Project>>> {
    let filter = ProjectFilter::from(query);
    let (projects, total) = state.projects.list(&filter).await?;

    Ok(ApiResponse::ok(
        Paginated::new(projects, filter.page, filter.limit, total),
        "Projects fetched successfully",
    ))
}

/// Fetch a project by slug
pub async fn get_project_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<ApiResponse<Project>> {
    let project = state
        .projects
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    Ok(ApiResponse::ok(project, "Project fetched successfully"))
}

/// Fetch a project by ID
pub async fn get_project_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Project>> {
    let project = state
        .projects
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    Ok(ApiResponse::ok(project, "Project fetched successfully"))
}

/// Update a project
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProjectRequest>,
) -> ApiResult<ApiResponse<Project>> {
    let project = state
        .projects
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    Ok(ApiResponse::ok(project, "Project updated successfully"))
}

/// Delete a project
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<serde_json::Value>> {
    let deleted = state.projects.delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Project not found"));
    }

    Ok(ApiResponse::ok(
        json!({"message": "Project deleted successfully"}),
        "Project deleted successfully",
    ))
}

/// Featured projects in display order
pub async fn featured_projects(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> ApiResult<ApiResponse<Vec<Project>>> {
    let limit = query
        .limit
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(6)
        .clamp(1, 50);
    let projects = state.projects.featured(limit).await?;

    Ok(ApiResponse::ok(
        projects,
        "Featured projects fetched successfully",
    ))
}

/// Project categories with counts
pub async fn project_categories(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<NamedCount>>> {
    let categories = state.projects.categories().await?;

    Ok(ApiResponse::ok(categories, "Categories fetched successfully"))
}

/// Technology frequencies across projects
pub async fn project_technologies(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<NamedCount>>> {
    let technologies = state.projects.technologies().await?;

    Ok(ApiResponse::ok(
        technologies,
        "Technologies fetched successfully",
    ))
}

/// Project aggregate statistics
pub async fn project_stats(State(state): State<AppState>) -> ApiResult<ApiResponse<ProjectStats>> {
    let stats = state.projects.stats().await?;

    Ok(ApiResponse::ok(stats, "Project stats fetched successfully"))
}
