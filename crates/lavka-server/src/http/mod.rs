// SPDX-License-Identifier: Apache-2.0

//! Route handlers. Every failure leaves the server as a `{"msg": ...}`
//! JSON body with the status taken from the error code.

pub(crate) mod catalog;
pub(crate) mod delivery;
pub(crate) mod meta;
pub(crate) mod orders;
pub(crate) mod tokens;
pub(crate) mod users;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lavka_api::dto::MsgResponse;
use lavka_api::{ApiError, ApiErrorCode};
use lavka_store::StoreError;
use tracing::error;

/// Handler-level error wrapper so `?` works inside handlers while the
/// wire shape stays `{"msg": ...}`.
pub(crate) struct HttpError(pub ApiError);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(code = %self.0.code, msg = %self.0.msg, "request failed");
        }
        (status, Json(MsgResponse::new(self.0.msg))).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        error!(error = %err, "storage failure");
        Self(ApiError::new(ApiErrorCode::Internal, "internal error"))
    }
}

/// Malformed or missing JSON bodies surface as a 400 instead of the
/// framework's plain-text rejection.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, HttpError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(HttpError(ApiError::validation(format!(
            "invalid request body: {rejection}"
        )))),
    }
}

pub(crate) fn created(msg: impl Into<String>) -> (StatusCode, Json<MsgResponse>) {
    (StatusCode::CREATED, Json(MsgResponse::new(msg)))
}
