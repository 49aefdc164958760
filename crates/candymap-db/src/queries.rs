use candymap_types::models::Role;
use rusqlite::{Connection, Row};

use crate::models::{HouseRow, NewHouse, ReviewRow, UserField, UserRow};
use crate::{Database, DbError, Result};

const USER_COLUMNS: &str = "id, username, password, title, profile_pic, role";

impl Database {
    // -- Users --

    /// Fails with [`DbError::UsernameTaken`] when the username exists.
    pub fn create_user(&self, username: &str, password_hash: &str, role: Role) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password, role) VALUES (?1, ?2, ?3)",
                (username, password_hash, role.as_str()),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
            conn.query_row(&sql, [username], map_user).optional()
        })
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
            conn.query_row(&sql, [id], map_user).optional()
        })
    }

    /// Role of the given account, `None` if there is no such row.
    pub fn get_user_role(&self, id: i64) -> Result<Option<Role>> {
        self.with_conn(|conn| {
            conn.query_row("SELECT role FROM users WHERE id = ?1", [id], |row| {
                row.get::<_, Option<String>>(0)
            })
            .optional()
            .map(|role| role.map(|r| Role::parse(r.as_deref().unwrap_or_default())))
        })
    }

    /// Unconditional write. A missing id is a silent no-op.
    pub fn update_user_field(&self, id: i64, field: UserField, value: Option<&str>) -> Result<()> {
        self.with_conn(|conn| {
            let sql = format!("UPDATE users SET {} = ?1 WHERE id = ?2", field.column());
            conn.execute(&sql, rusqlite::params![value, id])?;
            Ok(())
        })
    }

    /// Matches by username, not id. No match is a silent no-op.
    pub fn update_user_title(&self, username: Option<&str>, title: Option<&str>) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE users SET title = ?1 WHERE username = ?2",
                rusqlite::params![title, username],
            )?;
            Ok(())
        })
    }

    // -- Houses --

    pub fn create_house(&self, house: &NewHouse) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO houses
                    (lat, lng, rating, glutenFree, sugarFree, lactoseFree, other, description, user_id, image)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                rusqlite::params![
                    house.lat,
                    house.lng,
                    house.rating,
                    house.gluten_free,
                    house.sugar_free,
                    house.lactose_free,
                    house.other,
                    house.description,
                    house.user_id,
                    house.image,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn list_houses(&self) -> Result<Vec<HouseRow>> {
        self.with_conn(query_houses)
    }

    // -- Reviews --

    pub fn create_review(
        &self,
        house_id: Option<i64>,
        user_id: Option<i64>,
        body: Option<&str>,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO reviews (house_id, user_id, review) VALUES (?1, ?2, ?3)",
                rusqlite::params![house_id, user_id, body],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn list_reviews_for_house(&self, house_id: i64) -> Result<Vec<ReviewRow>> {
        self.with_conn(|conn| query_reviews(conn, house_id))
    }

    /// Unconditional. Deleting an absent id is a no-op.
    pub fn delete_review(&self, id: Option<i64>) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM reviews WHERE id = ?1", [id])?;
            Ok(())
        })
    }
}

fn map_user(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        title: row.get(3)?,
        profile_pic: row.get(4)?,
        role: Role::parse(row.get::<_, Option<String>>(5)?.as_deref().unwrap_or_default()),
    })
}

fn query_houses(conn: &Connection) -> Result<Vec<HouseRow>> {
    // LEFT JOIN keeps houses whose owner row is missing
    let mut stmt = conn.prepare(
        "SELECT h.id, h.lat, h.lng, h.rating, h.glutenFree, h.sugarFree, h.lactoseFree,
                h.other, h.description, h.user_id, h.image,
                u.username, u.title, u.profile_pic
         FROM houses h
         LEFT JOIN users u ON h.user_id = u.id
         ORDER BY h.id",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(HouseRow {
                id: row.get(0)?,
                lat: row.get(1)?,
                lng: row.get(2)?,
                rating: row.get(3)?,
                gluten_free: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
                sugar_free: row.get::<_, Option<bool>>(5)?.unwrap_or(false),
                lactose_free: row.get::<_, Option<bool>>(6)?.unwrap_or(false),
                other: row.get(7)?,
                description: row.get(8)?,
                user_id: row.get(9)?,
                image: row.get(10)?,
                owner_username: row.get(11)?,
                owner_title: row.get(12)?,
                owner_profile_pic: row.get(13)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_reviews(conn: &Connection, house_id: i64) -> Result<Vec<ReviewRow>> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.house_id, r.user_id, r.review, u.username, u.title, u.profile_pic
         FROM reviews r
         LEFT JOIN users u ON r.user_id = u.id
         WHERE r.house_id = ?1
         ORDER BY r.id",
    )?;

    let rows = stmt
        .query_map([house_id], |row| {
            Ok(ReviewRow {
                id: row.get(0)?,
                house_id: row.get(1)?,
                user_id: row.get(2)?,
                review: row.get(3)?,
                author_username: row.get(4)?,
                author_title: row.get(5)?,
                author_profile_pic: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
pub(crate) trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DbError::from(e)),
        }
    }
}
