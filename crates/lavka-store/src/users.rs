// SPDX-License-Identifier: Apache-2.0

use crate::{Store, StoreError};
use lavka_model::{User, UserId, Username};
use rusqlite::{params, OptionalExtension, Row};
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum UserWriteError {
    UsernameTaken,
    Storage(StoreError),
}

impl Display for UserWriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UsernameTaken => f.write_str("username already taken"),
            Self::Storage(err) => write!(f, "user write failed: {err}"),
        }
    }
}

impl std::error::Error for UserWriteError {}

impl From<StoreError> for UserWriteError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err)
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let username: String = row.get(1)?;
    Ok(User {
        id: UserId(row.get(0)?),
        username: Username::parse(&username).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?,
        email: row.get(2)?,
        password_salt: row.get(3)?,
        password_hash: row.get(4)?,
    })
}

const USER_COLUMNS: &str = "id, username, email, password_salt, password_hash";

impl Store {
    pub async fn create_user(
        &self,
        username: Username,
        email: String,
        password_salt: String,
        password_hash: String,
    ) -> Result<User, UserWriteError> {
        self.with_conn(move |conn| {
            let inserted = conn.execute(
                "INSERT INTO users (username, email, password_salt, password_hash)
                 VALUES (?1, ?2, ?3, ?4)",
                params![username.as_str(), email, password_salt, password_hash],
            );
            match inserted {
                Ok(_) => Ok(Ok(User {
                    id: UserId(conn.last_insert_rowid()),
                    username,
                    email,
                    password_salt,
                    password_hash,
                })),
                Err(err)
                    if err.sqlite_error_code()
                        == Some(rusqlite::ErrorCode::ConstraintViolation) =>
                {
                    Ok(Err(()))
                }
                Err(err) => Err(err.into()),
            }
        })
        .await?
        .map_err(|()| UserWriteError::UsernameTaken)
    }

    pub async fn user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.with_conn(move |conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                    params![id.0],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    pub async fn user_by_username(&self, username: String) -> Result<Option<User>, StoreError> {
        self.with_conn(move |conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
                    params![username],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    /// Applies the provided fields; `None` leaves the column untouched.
    /// Returns the updated row, or `None` when the user does not exist.
    pub async fn update_user(
        &self,
        id: UserId,
        email: Option<String>,
        credentials: Option<(String, String)>,
    ) -> Result<Option<User>, StoreError> {
        self.with_conn(move |conn| {
            if let Some(email) = email {
                conn.execute(
                    "UPDATE users SET email = ?1 WHERE id = ?2",
                    params![email, id.0],
                )?;
            }
            if let Some((salt, hash)) = credentials {
                conn.execute(
                    "UPDATE users SET password_salt = ?1, password_hash = ?2 WHERE id = ?3",
                    params![salt, hash, id.0],
                )?;
            }
            let user = conn
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                    params![id.0],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    /// Returns false when no row matched.
    pub async fn delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        self.with_conn(move |conn| {
            let deleted = conn.execute("DELETE FROM users WHERE id = ?1", params![id.0])?;
            Ok(deleted > 0)
        })
        .await
    }
}
