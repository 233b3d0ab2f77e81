use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;
use uuid::Uuid;

use warbler_db::models::{LikeToggle, MessageDeletion};
use warbler_types::api::{Claims, CreateMessageRequest, LikeResponse, TimelineQuery};
use warbler_types::models::{MAX_MESSAGE_LEN, Message};

use crate::auth::AppState;
use crate::blocking;
use crate::error::ApiError;

/// Upper bound on how many messages a single timeline request returns.
const MAX_TIMELINE_LIMIT: u32 = 100;

pub async fn create_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let len = req.text.chars().count();
    if req.text.trim().is_empty() || len > MAX_MESSAGE_LEN {
        return Err(ApiError::Validation(format!(
            "message must be 1-{} characters",
            MAX_MESSAGE_LEN
        )));
    }

    let message = blocking(&state, move |db| Ok(db.create_message(claims.sub, &req.text)?)).await?;

    debug!("{} posted message {}", message.user_id, message.id);
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
) -> Result<Json<Message>, ApiError> {
    let message = blocking(&state, move |db| {
        db.get_message(message_id)?.ok_or(ApiError::NotFound)
    })
    .await?;
    Ok(Json(message))
}

/// Only the author may delete a message.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<StatusCode, ApiError> {
    let outcome = blocking(&state, move |db| Ok(db.delete_message(message_id, claims.sub)?)).await?;

    match outcome {
        MessageDeletion::Deleted => Ok(StatusCode::NO_CONTENT),
        MessageDeletion::NotFound => Err(ApiError::NotFound),
        MessageDeletion::NotOwner => Err(ApiError::Forbidden),
    }
}

/// Toggle the caller's like on a message. Users cannot like their own messages.
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<LikeResponse>, ApiError> {
    let outcome = blocking(&state, move |db| Ok(db.toggle_like(claims.sub, message_id)?)).await?;

    let liked = match outcome {
        LikeToggle::Liked => true,
        LikeToggle::Unliked => false,
        LikeToggle::NotFound => return Err(ApiError::NotFound),
        LikeToggle::OwnMessage => return Err(ApiError::Forbidden),
    };

    Ok(Json(LikeResponse { liked }))
}

/// Home feed for the caller.
pub async fn timeline(
    State(state): State<AppState>,
    Query(query): Query<TimelineQuery>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let limit = query.limit.min(MAX_TIMELINE_LIMIT);
    let messages = blocking(&state, move |db| Ok(db.timeline(claims.sub, limit)?)).await?;
    Ok(Json(messages))
}
