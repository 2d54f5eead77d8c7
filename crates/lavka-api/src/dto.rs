// SPDX-License-Identifier: Apache-2.0

use lavka_model::{BasketId, OrderDraft, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MsgResponse {
    pub msg: String,
}

impl MsgResponse {
    #[must_use]
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Full-replace update (PUT). PATCH uses [`PatchUserRequest`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PatchUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AccessTokenResponse {
    pub access: String,
}

/// Checkout payload: the basket to convert plus the order draft fields,
/// flattened so the body reads `{basket_id, full_name, phone, ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateOrderRequest {
    pub basket_id: BasketId,
    #[serde(flatten)]
    pub draft: OrderDraft,
}

impl CreateOrderRequest {
    /// Field-level validation, applied after the basket existence and
    /// ownership checks so the error ordering matches the checkout
    /// contract.
    pub fn validate(&self) -> Result<(), String> {
        fn required(name: &str, value: &str) -> Result<(), String> {
            if value.trim().is_empty() {
                return Err(format!("{name} must not be empty"));
            }
            Ok(())
        }
        required("full_name", &self.draft.full_name)?;
        required("phone", &self.draft.phone)?;
        required("settlement", &self.draft.settlement)?;
        required("warehouse_address", &self.draft.warehouse_address)?;
        let phone = &self.draft.phone;
        if !phone
            .chars()
            .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ' || c == '(' || c == ')')
        {
            return Err("phone contains invalid characters".to_string());
        }
        Ok(())
    }
}
