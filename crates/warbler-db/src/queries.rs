use rusqlite::{Connection, Params, Row, params};
use tracing::debug;
use uuid::Uuid;
use warbler_types::models::{DEFAULT_IMAGE_URL, Message, User};

use crate::models::{
    LikeToggle, MessageDeletion, MessageRow, NewUser, ProfileChanges, UserRow, now,
};
use crate::{Database, DbError, Result};

const USER_COLUMNS: &str = "u.id, u.username, u.email, u.password, u.image_url, \
     u.header_image_url, u.bio, u.location, u.created_at";

const MESSAGE_COLUMNS: &str = "m.id, m.user_id, m.text, m.created_at";

impl Database {
    // -- Users --

    /// Insert a user whose password is already hashed. Missing or duplicate
    /// username/email come back as `DbError::Integrity`.
    pub fn create_user(&self, new: &NewUser<'_>) -> Result<User> {
        let id = Uuid::new_v4().to_string();
        let image_url = new
            .image_url
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_IMAGE_URL);

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, email, password, image_url, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, new.username, new.email, new.password_hash, image_url, now()],
            )?;

            debug!("Created user {} ({:?})", id, new.username);
            query_user_row(conn, "id", &id)?
                .ok_or_else(|| DbError::Corrupt(format!("user {} missing after insert", id)))?
                .into_user()
        })
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.get_user_row(id)?.map(UserRow::into_user).transpose()
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_row_by_username(username)?
            .map(UserRow::into_user)
            .transpose()
    }

    /// Raw row including the password hash, for credential checks.
    pub fn get_user_row(&self, id: Uuid) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_row(conn, "id", &id.to_string()))
    }

    pub fn get_user_row_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_row(conn, "username", username))
    }

    /// All users, or those whose username contains `term`, ordered by username.
    pub fn search_users(&self, term: Option<&str>) -> Result<Vec<User>> {
        self.with_conn(|conn| match term.filter(|t| !t.is_empty()) {
            Some(term) => query_users(
                conn,
                &format!(
                    "SELECT {USER_COLUMNS} FROM users u
                     WHERE u.username LIKE ?1 ESCAPE '\\'
                     ORDER BY u.username"
                ),
                [like_pattern(term)],
            ),
            None => query_users(
                conn,
                &format!("SELECT {USER_COLUMNS} FROM users u ORDER BY u.username"),
                params![],
            ),
        })
    }

    /// Apply profile edits. Returns `None` if the user does not exist.
    /// An empty `bio` or `location` clears the column back to NULL.
    pub fn update_user(&self, id: Uuid, changes: &ProfileChanges) -> Result<Option<User>> {
        let id = id.to_string();
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE users SET
                    username         = COALESCE(?2, username),
                    email            = COALESCE(?3, email),
                    image_url        = COALESCE(?4, image_url),
                    header_image_url = COALESCE(?5, header_image_url),
                    bio              = CASE WHEN ?6 IS NULL THEN bio ELSE NULLIF(?6, '') END,
                    location         = CASE WHEN ?7 IS NULL THEN location ELSE NULLIF(?7, '') END
                 WHERE id = ?1",
                params![
                    id,
                    changes.username,
                    changes.email,
                    changes.image_url,
                    changes.header_image_url,
                    changes.bio,
                    changes.location,
                ],
            )?;
            if updated == 0 {
                return Ok(None);
            }
            query_user_row(conn, "id", &id)?
                .map(UserRow::into_user)
                .transpose()
        })
    }

    /// Delete a user. Messages, follows and likes go with it.
    pub fn delete_user(&self, id: Uuid) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM users WHERE id = ?1", [id.to_string()])?;
            Ok(deleted > 0)
        })
    }

    // -- Messages --

    pub fn create_message(&self, user_id: Uuid, text: &str) -> Result<Message> {
        let row = MessageRow {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            text: text.to_string(),
            created_at: now(),
        };

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (id, user_id, text, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![row.id, row.user_id, row.text, row.created_at],
            )?;
            Ok(())
        })?;

        row.into_message()
    }

    pub fn get_message(&self, id: Uuid) -> Result<Option<Message>> {
        self.with_conn(|conn| {
            let mut messages = query_messages(
                conn,
                &format!("SELECT {MESSAGE_COLUMNS} FROM messages m WHERE m.id = ?1"),
                [id.to_string()],
            )?;
            Ok(messages.pop())
        })
    }

    /// Messages authored by `user_id`, newest first.
    pub fn messages_by_user(&self, user_id: Uuid) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!(
                    "SELECT {MESSAGE_COLUMNS} FROM messages m
                     WHERE m.user_id = ?1
                     ORDER BY m.created_at DESC, m.rowid DESC"
                ),
                [user_id.to_string()],
            )
        })
    }

    /// Delete a message only if `owner_id` wrote it.
    pub fn delete_message(&self, id: Uuid, owner_id: Uuid) -> Result<MessageDeletion> {
        self.with_tx(|tx| match message_author(tx, id)? {
            None => Ok(MessageDeletion::NotFound),
            Some(author) if author != owner_id => Ok(MessageDeletion::NotOwner),
            Some(_) => {
                tx.execute("DELETE FROM messages WHERE id = ?1", [id.to_string()])?;
                Ok(MessageDeletion::Deleted)
            }
        })
    }

    /// Home feed: the user's own messages and those of everyone they follow,
    /// newest first.
    pub fn timeline(&self, user_id: Uuid, limit: u32) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!(
                    "SELECT {MESSAGE_COLUMNS} FROM messages m
                     WHERE m.user_id = ?1
                        OR m.user_id IN (SELECT followed_id FROM follows WHERE follower_id = ?1)
                     ORDER BY m.created_at DESC, m.rowid DESC
                     LIMIT ?2"
                ),
                params![user_id.to_string(), limit],
            )
        })
    }

    // -- Follows --

    pub fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO follows (follower_id, followed_id, created_at) VALUES (?1, ?2, ?3)",
                params![follower_id.to_string(), followed_id.to_string(), now()],
            )?;
            debug!("{} now follows {}", follower_id, followed_id);
            Ok(())
        })
    }

    pub fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM follows WHERE follower_id = ?1 AND followed_id = ?2",
                [follower_id.to_string(), followed_id.to_string()],
            )?;
            Ok(deleted > 0)
        })
    }

    /// Users that `user_id` follows.
    pub fn following(&self, user_id: Uuid) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            query_users(
                conn,
                &format!(
                    "SELECT {USER_COLUMNS} FROM follows f
                     JOIN users u ON u.id = f.followed_id
                     WHERE f.follower_id = ?1
                     ORDER BY u.username"
                ),
                [user_id.to_string()],
            )
        })
    }

    /// Users that follow `user_id`.
    pub fn followers(&self, user_id: Uuid) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            query_users(
                conn,
                &format!(
                    "SELECT {USER_COLUMNS} FROM follows f
                     JOIN users u ON u.id = f.follower_id
                     WHERE f.followed_id = ?1
                     ORDER BY u.username"
                ),
                [user_id.to_string()],
            )
        })
    }

    /// Does `user_id` follow `other_id`?
    pub fn is_following(&self, user_id: Uuid, other_id: Uuid) -> Result<bool> {
        self.with_conn(|conn| follow_exists(conn, user_id, other_id))
    }

    /// Is `user_id` followed by `other_id`?
    pub fn is_followed_by(&self, user_id: Uuid, other_id: Uuid) -> Result<bool> {
        self.with_conn(|conn| follow_exists(conn, other_id, user_id))
    }

    // -- Likes --

    pub fn like(&self, user_id: Uuid, message_id: Uuid) -> Result<()> {
        self.with_conn(|conn| insert_like(conn, user_id, message_id))
    }

    pub fn unlike(&self, user_id: Uuid, message_id: Uuid) -> Result<bool> {
        self.with_conn(|conn| delete_like(conn, user_id, message_id))
    }

    /// Toggle a like: removes it if present, adds it if not. The message
    /// lookup and the write share one transaction.
    pub fn toggle_like(&self, user_id: Uuid, message_id: Uuid) -> Result<LikeToggle> {
        self.with_tx(|tx| {
            match message_author(tx, message_id)? {
                None => return Ok(LikeToggle::NotFound),
                Some(author) if author == user_id => return Ok(LikeToggle::OwnMessage),
                Some(_) => {}
            }

            if delete_like(tx, user_id, message_id)? {
                Ok(LikeToggle::Unliked)
            } else {
                insert_like(tx, user_id, message_id)?;
                Ok(LikeToggle::Liked)
            }
        })
    }

    /// Messages `user_id` has liked, most recently liked first.
    pub fn likes(&self, user_id: Uuid) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!(
                    "SELECT {MESSAGE_COLUMNS} FROM likes l
                     JOIN messages m ON m.id = l.message_id
                     WHERE l.user_id = ?1
                     ORDER BY l.created_at DESC, l.rowid DESC"
                ),
                [user_id.to_string()],
            )
        })
    }

    pub fn is_liked(&self, user_id: Uuid, message_id: Uuid) -> Result<bool> {
        self.with_conn(|conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = ?1 AND message_id = ?2)",
                [user_id.to_string(), message_id.to_string()],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }
}

fn user_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        image_url: row.get(4)?,
        header_image_url: row.get(5)?,
        bio: row.get(6)?,
        location: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn message_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        text: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn query_user_row(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.{column} = ?1");
    conn.query_row(&sql, [value], user_row).optional()
}

fn query_users<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<User>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, user_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter().map(UserRow::into_user).collect()
}

fn query_messages<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Message>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, message_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter().map(MessageRow::into_message).collect()
}

fn follow_exists(conn: &Connection, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = ?1 AND followed_id = ?2)",
        [follower_id.to_string(), followed_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists)
}

fn message_author(conn: &Connection, message_id: Uuid) -> Result<Option<Uuid>> {
    let author: Option<String> = conn
        .query_row(
            "SELECT user_id FROM messages WHERE id = ?1",
            [message_id.to_string()],
            |row| row.get(0),
        )
        .optional()?;

    author
        .map(|raw| {
            raw.parse()
                .map_err(|e| DbError::Corrupt(format!("user_id '{}': {}", raw, e)))
        })
        .transpose()
}

fn insert_like(conn: &Connection, user_id: Uuid, message_id: Uuid) -> Result<()> {
    conn.execute(
        "INSERT INTO likes (id, user_id, message_id, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            Uuid::new_v4().to_string(),
            user_id.to_string(),
            message_id.to_string(),
            now()
        ],
    )?;
    debug!("{} liked message {}", user_id, message_id);
    Ok(())
}

fn delete_like(conn: &Connection, user_id: Uuid, message_id: Uuid) -> Result<bool> {
    let deleted = conn.execute(
        "DELETE FROM likes WHERE user_id = ?1 AND message_id = ?2",
        [user_id.to_string(), message_id.to_string()],
    )?;
    Ok(deleted > 0)
}

/// Escape LIKE wildcards so a search term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user<'a>(username: Option<&'a str>, email: Option<&'a str>) -> NewUser<'a> {
        NewUser {
            username,
            email,
            password_hash: "HASHED_PASSWORD",
            image_url: None,
        }
    }

    /// Fresh database with two users, test1 and test2.
    fn setup() -> (Database, User, User) {
        let db = Database::open_in_memory().unwrap();
        let u1 = db
            .create_user(&new_user(Some("test1"), Some("test1@test.com")))
            .unwrap();
        let u2 = db
            .create_user(&new_user(Some("test2"), Some("test2@test.com")))
            .unwrap();
        (db, u1, u2)
    }

    #[test]
    fn test_user_model() {
        let (db, _, _) = setup();
        let u = db
            .create_user(&new_user(Some("testuser"), Some("test@test.com")))
            .unwrap();

        assert_eq!(u.image_url, DEFAULT_IMAGE_URL);
        assert!(db.messages_by_user(u.id).unwrap().is_empty());
        assert!(db.followers(u.id).unwrap().is_empty());
    }

    #[test]
    fn test_unique_username() {
        let (db, _, _) = setup();
        let err = db
            .create_user(&new_user(Some("test1"), Some("other@test.com")))
            .unwrap_err();
        assert!(err.is_integrity(), "{err}");
    }

    #[test]
    fn test_unique_email() {
        let (db, _, _) = setup();
        let err = db
            .create_user(&new_user(Some("test3"), Some("test1@test.com")))
            .unwrap_err();
        assert!(err.is_integrity(), "{err}");
    }

    #[test]
    fn test_missing_username_and_email() {
        let (db, _, _) = setup();
        let err = db
            .create_user(&new_user(None, Some("test@test.com")))
            .unwrap_err();
        assert!(err.is_integrity(), "{err}");

        let err = db.create_user(&new_user(Some("test3"), None)).unwrap_err();
        assert!(err.is_integrity(), "{err}");
    }

    #[test]
    fn test_is_following() {
        let (db, u1, u2) = setup();
        db.follow(u1.id, u2.id).unwrap();

        assert!(db.is_following(u1.id, u2.id).unwrap());
        assert!(!db.is_following(u2.id, u1.id).unwrap());
        assert_eq!(db.following(u1.id).unwrap(), vec![u2.clone()]);
        assert_eq!(db.followers(u2.id).unwrap(), vec![u1]);
    }

    #[test]
    fn test_is_followed_by() {
        let (db, u1, u2) = setup();
        db.follow(u1.id, u2.id).unwrap();

        assert!(db.is_followed_by(u2.id, u1.id).unwrap());
        assert!(!db.is_followed_by(u1.id, u2.id).unwrap());
    }

    #[test]
    fn test_follow_constraints() {
        let (db, u1, u2) = setup();
        db.follow(u1.id, u2.id).unwrap();

        assert!(db.follow(u1.id, u2.id).unwrap_err().is_integrity());
        assert!(db.follow(u1.id, u1.id).unwrap_err().is_integrity());
        assert!(db.follow(u1.id, Uuid::new_v4()).unwrap_err().is_integrity());
    }

    #[test]
    fn test_unfollow() {
        let (db, u1, u2) = setup();
        db.follow(u1.id, u2.id).unwrap();

        assert!(db.unfollow(u1.id, u2.id).unwrap());
        assert!(!db.unfollow(u1.id, u2.id).unwrap());
        assert!(!db.is_following(u1.id, u2.id).unwrap());
    }

    #[test]
    fn test_message_model() {
        let (db, u1, _) = setup();
        let m = db.create_message(u1.id, "test@test.com").unwrap();

        let messages = db.messages_by_user(u1.id).unwrap();
        assert_eq!(messages, vec![m.clone()]);
        assert_eq!(db.get_message(m.id).unwrap(), Some(m));
    }

    #[test]
    fn test_message_constraints() {
        let (db, u1, _) = setup();

        // Unknown owner
        assert!(db.create_message(Uuid::new_v4(), "hello").unwrap_err().is_integrity());
        // Empty and over-long bodies
        assert!(db.create_message(u1.id, "").unwrap_err().is_integrity());
        let long = "a".repeat(141);
        assert!(db.create_message(u1.id, &long).unwrap_err().is_integrity());
        // 140 multi-byte characters still fit
        let wide = "é".repeat(140);
        assert!(db.create_message(u1.id, &wide).is_ok());
    }

    #[test]
    fn test_message_likes() {
        let (db, u1, u2) = setup();
        let m1 = db.create_message(u2.id, "abcdefg").unwrap();
        let m2 = db.create_message(u2.id, "hijklmn").unwrap();

        db.like(u1.id, m2.id).unwrap();

        let likes = db.likes(u1.id).unwrap();
        assert_eq!(likes.len(), 1);
        assert!(likes.contains(&m2));
        assert!(!likes.contains(&m1));
        assert!(db.is_liked(u1.id, m2.id).unwrap());
        assert!(!db.is_liked(u1.id, m1.id).unwrap());

        assert!(db.like(u1.id, m2.id).unwrap_err().is_integrity());
    }

    #[test]
    fn test_toggle_like() {
        let (db, u1, u2) = setup();
        let m = db.create_message(u2.id, "toggle me").unwrap();

        assert_eq!(db.toggle_like(u1.id, m.id).unwrap(), LikeToggle::Liked);
        assert!(db.is_liked(u1.id, m.id).unwrap());
        assert_eq!(db.toggle_like(u1.id, m.id).unwrap(), LikeToggle::Unliked);
        assert!(db.likes(u1.id).unwrap().is_empty());

        assert_eq!(db.toggle_like(u2.id, m.id).unwrap(), LikeToggle::OwnMessage);
        assert!(!db.is_liked(u2.id, m.id).unwrap());
    }

    #[test]
    fn test_toggle_like_on_deleted_message() {
        let (db, u1, u2) = setup();
        let m = db.create_message(u2.id, "short-lived").unwrap();
        assert_eq!(db.delete_message(m.id, u2.id).unwrap(), MessageDeletion::Deleted);

        assert_eq!(db.toggle_like(u1.id, m.id).unwrap(), LikeToggle::NotFound);
        assert!(db.likes(u1.id).unwrap().is_empty());
    }

    #[test]
    fn test_timeline() {
        let (db, u1, u2) = setup();
        let u3 = db
            .create_user(&new_user(Some("test3"), Some("test3@test.com")))
            .unwrap();
        db.follow(u1.id, u2.id).unwrap();

        let own = db.create_message(u1.id, "mine").unwrap();
        let followed = db.create_message(u2.id, "followed").unwrap();
        let stranger = db.create_message(u3.id, "stranger").unwrap();

        let timeline = db.timeline(u1.id, 100).unwrap();
        assert_eq!(timeline, vec![followed.clone(), own]);
        assert!(!timeline.contains(&stranger));

        assert_eq!(db.timeline(u1.id, 1).unwrap(), vec![followed]);
    }

    #[test]
    fn test_delete_message_owner_only() {
        let (db, u1, u2) = setup();
        let m = db.create_message(u1.id, "keep out").unwrap();

        assert_eq!(db.delete_message(m.id, u2.id).unwrap(), MessageDeletion::NotOwner);
        assert_eq!(db.delete_message(m.id, u1.id).unwrap(), MessageDeletion::Deleted);
        assert_eq!(db.get_message(m.id).unwrap(), None);
        assert_eq!(db.delete_message(m.id, u1.id).unwrap(), MessageDeletion::NotFound);
    }

    #[test]
    fn test_delete_user_cascades() {
        let (db, u1, u2) = setup();
        let m = db.create_message(u1.id, "bye").unwrap();
        db.follow(u2.id, u1.id).unwrap();
        db.like(u2.id, m.id).unwrap();

        assert!(db.delete_user(u1.id).unwrap());

        assert_eq!(db.get_user(u1.id).unwrap(), None);
        assert_eq!(db.get_message(m.id).unwrap(), None);
        assert!(db.following(u2.id).unwrap().is_empty());
        assert!(db.likes(u2.id).unwrap().is_empty());
    }

    #[test]
    fn test_search_users() {
        let (db, u1, u2) = setup();
        db.create_user(&new_user(Some("other_1"), Some("o@test.com")))
            .unwrap();

        assert_eq!(db.search_users(None).unwrap().len(), 3);
        assert_eq!(db.search_users(Some("test")).unwrap(), vec![u1, u2]);
        // Wildcards match literally
        assert_eq!(db.search_users(Some("_")).unwrap().len(), 1);
        assert!(db.search_users(Some("%zzz")).unwrap().is_empty());
    }

    #[test]
    fn test_update_user() {
        let (db, u1, _) = setup();
        let changes = ProfileChanges {
            bio: Some("hello".into()),
            location: Some("Berlin".into()),
            ..Default::default()
        };
        let updated = db.update_user(u1.id, &changes).unwrap().unwrap();
        assert_eq!(updated.username, "test1");
        assert_eq!(updated.bio.as_deref(), Some("hello"));
        assert_eq!(updated.location.as_deref(), Some("Berlin"));

        let clash = ProfileChanges {
            username: Some("test2".into()),
            ..Default::default()
        };
        assert!(db.update_user(u1.id, &clash).unwrap_err().is_integrity());
        assert_eq!(db.update_user(Uuid::new_v4(), &changes).unwrap(), None);
    }

    #[test]
    fn test_update_user_clears_optional_fields() {
        let (db, u1, _) = setup();
        let set = ProfileChanges {
            bio: Some("hello".into()),
            location: Some("Berlin".into()),
            ..Default::default()
        };
        db.update_user(u1.id, &set).unwrap();

        // Untouched fields keep their value
        let keep = ProfileChanges {
            image_url: Some("/me.png".into()),
            ..Default::default()
        };
        let kept = db.update_user(u1.id, &keep).unwrap().unwrap();
        assert_eq!(kept.bio.as_deref(), Some("hello"));

        let clear = ProfileChanges {
            bio: Some(String::new()),
            location: Some(String::new()),
            ..Default::default()
        };
        let cleared = db.update_user(u1.id, &clear).unwrap().unwrap();
        assert_eq!(cleared.bio, None);
        assert_eq!(cleared.location, None);
        assert_eq!(cleared.image_url, "/me.png");
    }
}
