//! Contact routes
//!
//! Submitting a message is the one public write in the system; everything
//! else here is owner-only inbox management.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    middleware,
    routing::get,
};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::middleware::{authenticate, authorize_owner};
use crate::models::contact::{
    ContactFilter, ContactListQuery, ContactMessage, ContactStats, CreateContactRequest,
};
use crate::pagination::Paginated;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation::validate_contact_input;

/// Create the router for the contact module
pub fn router(state: AppState) -> Router {
    let public = Router::new().route("/", axum::routing::post(create_message));

    // Layers run outermost-last, so authenticate is added last to run first.
    let protected = Router::new()
        .route("/", get(list_messages))
        .route("/stats", get(message_stats))
        .route("/:id", get(get_message_by_id).delete(delete_message))
        .route("/:id/read", axum::routing::patch(mark_as_read))
        .route_layer(middleware::from_fn(authorize_owner))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public.merge(protected).with_state(state)
}

/// Store an incoming contact message
pub async fn create_message(
    State(state): State<AppState>,
    Json(payload): Json<CreateContactRequest>,
) -> ApiResult<ApiResponse<ContactMessage>> {
    validate_contact_input(&payload)?;

    let message = state.contacts.create(&payload).await?;

    Ok(ApiResponse::created(message, "Message sent successfully"))
}

/// List messages, newest first
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<ContactListQuery>,
) -> ApiResult<ApiResponse<Paginated<ContactMessage>>> {
    let filter = ContactFilter::from(query);
    let (messages, total) = state.contacts.list(&filter).await?;

    Ok(ApiResponse::ok(
        Paginated::new(messages, filter.page, filter.limit, total),
        "Messages fetched successfully",
    ))
}

/// Fetch a message by ID
pub async fn get_message_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<ContactMessage>> {
    let message = state
        .contacts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Message not found"))?;

    Ok(ApiResponse::ok(message, "Message fetched successfully"))
}

/// Mark a message as read
pub async fn mark_as_read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<ContactMessage>> {
    let message = state
        .contacts
        .mark_as_read(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Message not found"))?;

    Ok(ApiResponse::ok(message, "Message marked as read"))
}

/// Delete a message
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<serde_json::Value>> {
    let deleted = state.contacts.delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Message not found"));
    }

    Ok(ApiResponse::ok(
        json!({"message": "Contact message deleted successfully"}),
        "Contact message deleted successfully",
    ))
}

/// Message counts for the dashboard
pub async fn message_stats(State(state): State<AppState>) -> ApiResult<ApiResponse<ContactStats>> {
    let stats = state.contacts.stats().await?;

    Ok(ApiResponse::ok(stats, "Message stats fetched successfully"))
}
