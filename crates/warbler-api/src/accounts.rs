//! Account operations shared by the HTTP handlers: signup, credential
//! checks and profile edits.
//!
//! Signup is a hard failure (a typed `ApiError` on constraint violations).
//! Authentication is a soft failure: bad credentials come back as
//! [`Authentication::Rejected`], never as an error.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use warbler_db::Database;
use warbler_db::models::{NewUser, ProfileChanges};
use warbler_types::api::{SignupRequest, UpdateProfileRequest};
use warbler_types::models::User;

use crate::error::ApiError;

/// Outcome of a credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    Authenticated(User),
    Rejected,
}

impl Authentication {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn into_user(self) -> Option<User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Rejected => None,
        }
    }
}

/// Hash the password with Argon2id and store the new user.
///
/// Missing or already-taken username/email fail with
/// `ApiError::Db(DbError::Integrity(_))`, raised by the schema itself.
pub fn signup(db: &Database, req: &SignupRequest) -> Result<User, ApiError> {
    let password_hash = hash_password(&req.password)?;

    let user = db.create_user(&NewUser {
        username: req.username.as_deref(),
        email: req.email.as_deref(),
        password_hash: &password_hash,
        image_url: req.image_url.as_deref(),
    })?;

    info!("User {} signed up", user.username);
    Ok(user)
}

pub fn authenticate(db: &Database, username: &str, password: &str) -> Result<Authentication, ApiError> {
    let Some(row) = db.get_user_row_by_username(username)? else {
        debug!("Login for unknown user {}", username);
        return Ok(Authentication::Rejected);
    };

    if !verify_password(&row.password, password)? {
        warn!("Bad password for {}", username);
        return Ok(Authentication::Rejected);
    }

    Ok(Authentication::Authenticated(row.into_user()?))
}

/// Apply profile edits after re-checking the current password.
pub fn update_profile(
    db: &Database,
    user_id: Uuid,
    req: &UpdateProfileRequest,
) -> Result<Authentication, ApiError> {
    let row = db.get_user_row(user_id)?.ok_or(ApiError::NotFound)?;

    if !verify_password(&row.password, &req.password)? {
        warn!("Bad password on profile edit for {}", row.username);
        return Ok(Authentication::Rejected);
    }

    let changes = ProfileChanges {
        username: req.username.clone(),
        email: req.email.clone(),
        image_url: req.image_url.clone(),
        header_image_url: req.header_image_url.clone(),
        bio: req.bio.clone(),
        location: req.location.clone(),
    };

    let user = db.update_user(user_id, &changes)?.ok_or(ApiError::NotFound)?;
    Ok(Authentication::Authenticated(user))
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// A wrong password is `Ok(false)`. An unparseable stored hash is corrupt
/// data and surfaces as an error.
fn verify_password(stored_hash: &str, password: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| ApiError::Internal(format!("unreadable password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
