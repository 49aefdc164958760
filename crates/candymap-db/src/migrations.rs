use rusqlite::Connection;
use tracing::info;

use crate::Result;

/// Idempotent: every statement is guarded by IF NOT EXISTS.
///
/// Foreign keys are declared for documentation only. The bundled SQLite
/// enforces them by default, so the pragma is switched off here and
/// client-supplied ids insert even when they dangle.
pub fn run(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "OFF")?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT UNIQUE,
            password    TEXT,
            title       TEXT DEFAULT '',
            profile_pic TEXT DEFAULT '',
            role        TEXT DEFAULT 'user'
        );

        CREATE TABLE IF NOT EXISTS houses (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            lat         REAL,
            lng         REAL,
            rating      TEXT,
            glutenFree  INTEGER DEFAULT 0,
            sugarFree   INTEGER DEFAULT 0,
            lactoseFree INTEGER DEFAULT 0,
            other       TEXT,
            description TEXT,
            user_id     INTEGER,
            image       TEXT,
            FOREIGN KEY(user_id) REFERENCES users(id)
        );

        CREATE INDEX IF NOT EXISTS idx_houses_user
            ON houses(user_id);

        CREATE TABLE IF NOT EXISTS reviews (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            house_id    INTEGER,
            user_id     INTEGER,
            review      TEXT,
            FOREIGN KEY(house_id) REFERENCES houses(id),
            FOREIGN KEY(user_id) REFERENCES users(id)
        );

        CREATE INDEX IF NOT EXISTS idx_reviews_house
            ON reviews(house_id);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
