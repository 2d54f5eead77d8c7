// SPDX-License-Identifier: Apache-2.0

use crate::{OrderId, ParseError, ProductId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct WarehouseItemId(pub i64);

impl Display for WarehouseItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of one unit of physical stock. Checkout only ever consumes
/// `InStock` and produces `Sold`; the other states belong to
/// inventory-management flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum StockStatus {
    InStock,
    Reserved,
    Sold,
    Returned,
}

impl StockStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "IN_STOCK",
            Self::Reserved => "RESERVED",
            Self::Sold => "SOLD",
            Self::Returned => "RETURNED",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        match input {
            "IN_STOCK" => Ok(Self::InStock),
            "RESERVED" => Ok(Self::Reserved),
            "SOLD" => Ok(Self::Sold),
            "RETURNED" => Ok(Self::Returned),
            _ => Err(ParseError::InvalidFormat("unknown stock status")),
        }
    }
}

impl Display for StockStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WarehouseItem {
    pub id: WarehouseItemId,
    pub product_id: ProductId,
    pub color: String,
    pub size: String,
    pub status: StockStatus,
    pub order_id: Option<OrderId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_status_round_trips_through_storage_form() {
        for status in [
            StockStatus::InStock,
            StockStatus::Reserved,
            StockStatus::Sold,
            StockStatus::Returned,
        ] {
            assert_eq!(StockStatus::parse(status.as_str()), Ok(status));
        }
        assert!(StockStatus::parse("in_stock").is_err());
    }
}
