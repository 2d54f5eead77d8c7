// SPDX-License-Identifier: Apache-2.0

use crate::UserId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recipient and shipping fields accepted at checkout, before an order
/// row exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderDraft {
    pub full_name: String,
    pub phone: String,
    pub settlement: String,
    pub warehouse_address: String,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub full_name: String,
    pub phone: String,
    pub settlement: String,
    pub warehouse_address: String,
    pub comment: Option<String>,
    pub created_at_unix: i64,
}
