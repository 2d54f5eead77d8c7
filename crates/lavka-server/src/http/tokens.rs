// SPDX-License-Identifier: Apache-2.0

//! Token issuance. Unknown users and wrong passwords get the same 401
//! so the endpoint does not leak which usernames exist.

use crate::auth::{self, TokenKind};
use crate::http::{json_body, HttpError};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use lavka_api::dto::{AccessTokenResponse, RefreshRequest, TokenPairResponse, TokenRequest};
use lavka_api::ApiError;
use tracing::info;

pub(crate) async fn obtain_token_handler(
    State(state): State<AppState>,
    body: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenPairResponse>, HttpError> {
    let req = json_body(body)?;
    let user = state
        .store
        .user_by_username(req.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("invalid credentials"))?;
    let presented = auth::hash_password(&user.password_salt, &req.password);
    if presented != user.password_hash {
        return Err(HttpError(ApiError::unauthorized("invalid credentials")));
    }
    let access = auth::sign_token(
        &state.api.token_secret,
        user.id,
        TokenKind::Access,
        state.api.access_token_ttl,
    )?;
    let refresh = auth::sign_token(
        &state.api.token_secret,
        user.id,
        TokenKind::Refresh,
        state.api.refresh_token_ttl,
    )?;
    info!(user_id = user.id.0, "token pair issued");
    Ok(Json(TokenPairResponse { access, refresh }))
}

pub(crate) async fn refresh_token_handler(
    State(state): State<AppState>,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<AccessTokenResponse>, HttpError> {
    let req = json_body(body)?;
    let user_id = auth::verify_token(
        &state.api.token_secret,
        &req.refresh,
        TokenKind::Refresh,
        auth::now_unix(),
    )?;
    // The account may have been deleted since the pair was issued.
    if state.store.user(user_id).await?.is_none() {
        return Err(HttpError(ApiError::unauthorized("invalid credentials")));
    }
    let access = auth::sign_token(
        &state.api.token_secret,
        user_id,
        TokenKind::Access,
        state.api.access_token_ttl,
    )?;
    Ok(Json(AccessTokenResponse { access }))
}
