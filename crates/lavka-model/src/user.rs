// SPDX-License-Identifier: Apache-2.0

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const USERNAME_MAX_LEN: usize = 64;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct Username(String);

impl Username {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("username"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("username"));
        }
        if input.len() > USERNAME_MAX_LEN {
            return Err(ParseError::TooLong("username", USERNAME_MAX_LEN));
        }
        if !input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' || c == '@')
        {
            return Err(ParseError::InvalidFormat(
                "username may contain only ascii alphanumerics and _ . - @",
            ));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A registered account. The password hash and salt never leave the
/// store layer; serialization skips them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_salt: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}
