// SPDX-License-Identifier: Apache-2.0

use crate::{ProductId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct BasketId(pub i64);

impl Display for BasketId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct BasketItemId(pub i64);

/// A user's in-progress cart. Created implicitly on first add-to-cart,
/// destroyed on successful checkout (items cascade).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Basket {
    pub id: BasketId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BasketItem {
    pub id: BasketItemId,
    pub basket_id: BasketId,
    pub product_id: ProductId,
    pub color: String,
    pub size: String,
    pub quantity: u32,
}
