use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use warbler_db::Database;
use warbler_types::api::{AuthResponse, Claims, LoginRequest, SignupRequest};
use warbler_types::models::User;

use crate::accounts::{self, Authentication};
use crate::blocking;
use crate::error::ApiError;

/// Minimum accepted password length at signup.
const MIN_PASSWORD_LEN: usize = 6;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_signup(&req)?;

    let user = blocking(&state, move |db| accounts::signup(db, &req)).await?;
    let token = issue_token(&state, &user)?;

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let auth = blocking(&state, move |db| {
        accounts::authenticate(db, &req.username, &req.password)
    })
    .await?;

    let Authentication::Authenticated(user) = auth else {
        return Err(ApiError::Unauthorized);
    };

    let token = issue_token(&state, &user)?;
    Ok(Json(AuthResponse { user, token }))
}

/// Presence checks only. Uniqueness is left to the database.
fn validate_signup(req: &SignupRequest) -> Result<(), ApiError> {
    validate_username(req.username.as_deref().unwrap_or_default())?;
    validate_email(req.email.as_deref().unwrap_or_default())?;

    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    Ok(())
}

pub(crate) fn validate_username(username: &str) -> Result<(), ApiError> {
    if username.is_empty() || username.len() > 32 {
        return Err(ApiError::Validation("username must be 1-32 characters".into()));
    }
    Ok(())
}

pub(crate) fn validate_email(email: &str) -> Result<(), ApiError> {
    if !email.contains('@') {
        return Err(ApiError::Validation("invalid email address".into()));
    }
    Ok(())
}

fn issue_token(state: &AppState, user: &User) -> Result<String, ApiError> {
    create_token(&state.jwt_secret, user.id, &user.username)
        .map_err(|e| ApiError::Internal(format!("token signing failed: {}", e)))
}

pub fn create_token(secret: &str, user_id: Uuid, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn verify_token(secret: &str, token: &str) -> anyhow::Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let id = Uuid::new_v4();
        let token = create_token("secret", id, "test1").unwrap();

        let claims = verify_token("secret", &token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.username, "test1");

        assert!(verify_token("other-secret", &token).is_err());
    }

    #[test]
    fn test_validate_signup() {
        let ok = SignupRequest {
            username: Some("test1".into()),
            email: Some("test1@test.com".into()),
            password: "password".into(),
            image_url: None,
        };
        assert!(validate_signup(&ok).is_ok());

        let missing_username = SignupRequest {
            username: None,
            ..ok.clone()
        };
        assert!(matches!(
            validate_signup(&missing_username),
            Err(ApiError::Validation(_))
        ));

        let bad_email = SignupRequest {
            email: Some("nope".into()),
            ..ok.clone()
        };
        assert!(validate_signup(&bad_email).is_err());

        let short_password = SignupRequest {
            password: "12345".into(),
            ..ok
        };
        assert!(validate_signup(&short_password).is_err());
    }
}
