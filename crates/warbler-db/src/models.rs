//! Database row types. These map directly to SQLite rows and are converted
//! into the `warbler-types` models before leaving the crate.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use warbler_types::models::{Message, User};

use crate::{DbError, Result};

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub created_at: String,
}

impl UserRow {
    pub fn into_user(self) -> Result<User> {
        Ok(User {
            id: parse_id(&self.id)?,
            created_at: parse_timestamp(&self.created_at)?,
            username: self.username,
            email: self.email,
            image_url: self.image_url,
            header_image_url: self.header_image_url,
            bio: self.bio,
            location: self.location,
        })
    }
}

pub struct MessageRow {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub created_at: String,
}

impl MessageRow {
    pub fn into_message(self) -> Result<Message> {
        Ok(Message {
            id: parse_id(&self.id)?,
            user_id: parse_id(&self.user_id)?,
            created_at: parse_timestamp(&self.created_at)?,
            text: self.text,
        })
    }
}

/// Insert payload for `users`. `None` for username or email is passed
/// through as SQL NULL and rejected by the schema.
pub struct NewUser<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password_hash: &'a str,
    pub image_url: Option<&'a str>,
}

/// Column updates for a profile edit. `None` leaves the column untouched.
#[derive(Debug, Default, Clone)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
    pub header_image_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

/// Result of deleting a message on behalf of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageDeletion {
    Deleted,
    NotFound,
    NotOwner,
}

/// Result of toggling a like. Authors cannot like their own messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    Liked,
    Unliked,
    NotFound,
    OwnMessage,
}

pub(crate) fn now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

fn parse_id(raw: &str) -> Result<Uuid> {
    raw.parse()
        .map_err(|e| DbError::Corrupt(format!("id '{}': {}", raw, e)))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::Corrupt(format!("timestamp '{}': {}", raw, e)))
}
