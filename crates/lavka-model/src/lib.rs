#![forbid(unsafe_code)]
//! Shop domain model SSOT.

mod basket;
mod order;
mod product;
mod serde_helpers;
mod user;
mod warehouse;

pub use basket::{Basket, BasketId, BasketItem, BasketItemId};
pub use order::{Order, OrderDraft, OrderId};
pub use product::{Product, ProductId};
pub use user::{User, UserId, Username, USERNAME_MAX_LEN};
pub use warehouse::{StockStatus, WarehouseItem, WarehouseItemId};

pub const CRATE_NAME: &str = "lavka-model";

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    InvalidFormat(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidFormat(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ParseError {}
