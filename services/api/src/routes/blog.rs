//! Blog routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    middleware,
    routing::get,
};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::middleware::{AuthUser, authenticate, authorize_owner};
use crate::models::NamedCount;
use crate::models::blog::{
    Blog, BlogFilter, BlogListQuery, BlogStats, CreateBlogRequest, UpdateBlogRequest,
};
use crate::pagination::Paginated;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation::validate_blog_input;

/// Query string for the featured endpoint
#[derive(Debug, Default, serde::Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<String>,
}

/// Create the router for the blog module
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(list_blogs))
        .route("/featured", get(featured_blogs))
        .route("/categories", get(blog_categories))
        .route("/tags", get(blog_tags))
        .route("/slug/:slug", get(get_blog_by_slug));

    // Layers run outermost-last, so authenticate is added last to run first.
    let protected = Router::new()
        .route("/", axum::routing::post(create_blog))
        .route("/stats", get(blog_stats))
        .route(
            "/:id",
            get(get_blog_by_id).patch(update_blog).delete(delete_blog),
        )
        .route_layer(middleware::from_fn(authorize_owner))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public.merge(protected).with_state(state)
}

/// Create a blog post authored by the authenticated owner
pub async fn create_blog(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateBlogRequest>,
) -> ApiResult<ApiResponse<Blog>> {
    validate_blog_input(&payload)?;

    let blog = state.blogs.create(user.id, &payload).await?;

    Ok(ApiResponse::created(blog, "Blog created successfully"))
}

/// List blogs with filtering and pagination
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> ApiResult<ApiResponse<Paginated<Blog>>> {
    let filter = BlogFilter::from(query);
    let (blogs, total) = state.blogs.list(&filter).await?;

    Ok(ApiResponse::ok(
        Paginated::new(blogs, filter.page, filter.limit, total),
        "Blogs fetched successfully",
    ))
}

/// Fetch a blog by slug, counting the view
pub async fn get_blog_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<ApiResponse<Blog>> {
    let blog = state
        .blogs
        .find_by_slug(&slug, true)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog not found"))?;

    Ok(ApiResponse::ok(blog, "Blog fetched successfully"))
}

/// Fetch a blog by ID
pub async fn get_blog_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Blog>> {
    let blog = state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog not found"))?;

    Ok(ApiResponse::ok(blog, "Blog fetched successfully"))
}

/// Update a blog
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBlogRequest>,
) -> ApiResult<ApiResponse<Blog>> {
    let blog = state
        .blogs
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog not found"))?;

    Ok(ApiResponse::ok(blog, "Blog updated successfully"))
}

/// Delete a blog
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<serde_json::Value>> {
    let deleted = state.blogs.delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Blog not found"));
    }

    Ok(ApiResponse::ok(
        json!({"message": "Blog deleted successfully"}),
        "Blog deleted successfully",
    ))
}

/// Published + featured blogs, most viewed first
pub async fn featured_blogs(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> ApiResult<ApiResponse<Vec<Blog>>> {
    let limit = query
        .limit
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(5)
        .clamp(1, 50);
    let blogs = state.blogs.featured(limit).await?;

    Ok(ApiResponse::ok(blogs, "Featured blogs fetched successfully"))
}

/// Categories of published blogs
pub async fn blog_categories(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<NamedCount>>> {
    let categories = state.blogs.categories().await?;

    Ok(ApiResponse::ok(categories, "Categories fetched successfully"))
}

/// Tag frequencies of published blogs
pub async fn blog_tags(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<NamedCount>>> {
    let tags = state.blogs.tags().await?;

    Ok(ApiResponse::ok(tags, "Tags fetched successfully"))
}

/// Blog aggregate statistics
pub async fn blog_stats(State(state): State<AppState>) -> ApiResult<ApiResponse<BlogStats>> {
    let stats = state.blogs.stats().await?;

    Ok(ApiResponse::ok(stats, "Blog stats fetched successfully"))
}
