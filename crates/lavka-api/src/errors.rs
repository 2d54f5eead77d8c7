// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable machine-readable error codes. The HTTP body carries only the
/// human-readable `{"msg": ...}` form; codes exist for logs and for
/// status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    InvalidQueryParameter,
    MissingQueryParameter,
    Unauthorized,
    Forbidden,
    NotFound,
    BasketNotFound,
    NotBasketOwner,
    EmptyBasket,
    UsernameTaken,
    CarrierUnavailable,
    Internal,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ValidationFailed
            | Self::InvalidQueryParameter
            | Self::MissingQueryParameter
            | Self::UsernameTaken => 400,
            Self::Unauthorized => 401,
            Self::Forbidden | Self::NotBasketOwner => 403,
            Self::NotFound | Self::BasketNotFound | Self::EmptyBasket => 404,
            Self::CarrierUnavailable => 502,
            Self::Internal => 500,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "validation_failed",
            Self::InvalidQueryParameter => "invalid_query_parameter",
            Self::MissingQueryParameter => "missing_query_parameter",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::BasketNotFound => "basket_not_found",
            Self::NotBasketOwner => "not_basket_owner",
            Self::EmptyBasket => "empty_basket",
            Self::UsernameTaken => "username_taken",
            Self::CarrierUnavailable => "carrier_unavailable",
            Self::Internal => "internal",
        }
    }
}

impl Display for ApiErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub msg: String,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("invalid query parameter {name}: {value}"),
        )
    }

    #[must_use]
    pub fn missing_param(name: &str) -> Self {
        Self::new(
            ApiErrorCode::MissingQueryParameter,
            format!("missing query parameter: {name}"),
        )
    }

    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::ValidationFailed, msg)
    }

    #[must_use]
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Unauthorized, msg)
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.msg)
    }
}

impl std::error::Error for ApiError {}
