use candymap_types::models::Role;
use tracing::info;

use crate::{Database, Result};

/// Title given to seeded moderator accounts.
pub const MODERATOR_TITLE: &str = "Moderator";

impl Database {
    /// Create a moderator account unless one with this username already
    /// exists. Check-then-insert; runs once at startup, before serving.
    /// Returns whether a row was inserted.
    pub fn seed_moderator(&self, username: &str, password_hash: &str) -> Result<bool> {
        if self.get_user_by_username(username)?.is_some() {
            return Ok(false);
        }

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password, title, role) VALUES (?1, ?2, ?3, ?4)",
                (username, password_hash, MODERATOR_TITLE, Role::Moderator.as_str()),
            )?;
            Ok(())
        })?;

        info!("Created moderator account: {}", username);
        Ok(true)
    }
}
