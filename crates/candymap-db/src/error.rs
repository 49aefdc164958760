use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("username already taken")]
    UsernameTaken,

    #[error("database lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("sqlite error: {0}")]
    Sqlite(rusqlite::Error),
}

impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        if is_unique_violation(&e) {
            DbError::UsernameTaken
        } else {
            DbError::Sqlite(e)
        }
    }
}

/// `users.username` is the only UNIQUE column in the schema, so any unique
/// violation is a duplicate username.
fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
