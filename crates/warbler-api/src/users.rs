use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use warbler_db::Database;
use warbler_types::api::{Claims, UpdateProfileRequest, UserSearchQuery};
use warbler_types::models::User;

use crate::accounts::{self, Authentication};
use crate::auth::{AppState, validate_email, validate_username};
use crate::blocking;
use crate::error::ApiError;

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = blocking(&state, move |db| Ok(db.search_users(query.q.as_deref())?)).await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let user = blocking(&state, move |db| require_user(db, user_id)).await?;
    Ok(Json(user))
}

pub async fn user_messages(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = blocking(&state, move |db| {
        require_user(db, user_id)?;
        Ok(db.messages_by_user(user_id)?)
    })
    .await?;
    Ok(Json(messages))
}

pub async fn user_following(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = blocking(&state, move |db| {
        require_user(db, user_id)?;
        Ok(db.following(user_id)?)
    })
    .await?;
    Ok(Json(users))
}

pub async fn user_followers(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = blocking(&state, move |db| {
        require_user(db, user_id)?;
        Ok(db.followers(user_id)?)
    })
    .await?;
    Ok(Json(users))
}

pub async fn user_likes(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let likes = blocking(&state, move |db| {
        require_user(db, user_id)?;
        Ok(db.likes(user_id)?)
    })
    .await?;
    Ok(Json(likes))
}

pub async fn follow(
    State(state): State<AppState>,
    Path(target_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    blocking(&state, move |db| {
        require_user(db, target_id)?;
        Ok(db.follow(claims.sub, target_id)?)
    })
    .await?;

    Ok(Json(serde_json::json!({ "following": true })))
}

pub async fn unfollow(
    State(state): State<AppState>,
    Path(target_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = blocking(&state, move |db| Ok(db.unfollow(claims.sub, target_id)?)).await?;
    if !removed {
        return Err(ApiError::NotFound);
    }

    Ok(Json(serde_json::json!({ "following": false })))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<User>, ApiError> {
    if let Some(username) = req.username.as_deref() {
        validate_username(username)?;
    }
    if let Some(email) = req.email.as_deref() {
        validate_email(email)?;
    }

    let auth = blocking(&state, move |db| accounts::update_profile(db, claims.sub, &req)).await?;

    match auth {
        Authentication::Authenticated(user) => Ok(Json(user)),
        Authentication::Rejected => Err(ApiError::Unauthorized),
    }
}

pub async fn delete_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<StatusCode, ApiError> {
    let user_id = claims.sub;
    let deleted = blocking(&state, move |db| Ok(db.delete_user(user_id)?)).await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    info!("User {} deleted their account", claims.username);
    Ok(StatusCode::NO_CONTENT)
}

fn require_user(db: &Database, user_id: Uuid) -> Result<User, ApiError> {
    db.get_user(user_id)?.ok_or(ApiError::NotFound)
}
