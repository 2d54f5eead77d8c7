// SPDX-License-Identifier: Apache-2.0

use crate::serde_helpers::price_cents;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only catalog record. Checkout treats products as reference data;
/// only inventory-management flows outside this service mutate them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    #[serde(with = "price_cents")]
    pub price: i64,
    pub available: bool,
    pub image_urls: Vec<String>,
    pub color: String,
    pub size: String,
}
