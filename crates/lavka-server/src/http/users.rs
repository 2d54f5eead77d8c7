// SPDX-License-Identifier: Apache-2.0

//! Account management. Bearer callers may only touch their own record.

use crate::auth;
use crate::http::{json_body, HttpError};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use lavka_api::dto::{CreateUserRequest, PatchUserRequest, UpdateUserRequest, UserResponse};
use lavka_api::{ApiError, ApiErrorCode};
use lavka_model::{User, UserId, Username};
use lavka_store::UserWriteError;
use tracing::info;

fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.as_str().to_string(),
        email: user.email,
    }
}

fn own_record(headers: &HeaderMap, state: &AppState, id: i64) -> Result<UserId, HttpError> {
    let caller = auth::bearer_user(headers, &state.api)?;
    if caller.0 != id {
        return Err(HttpError(ApiError::new(
            ApiErrorCode::Forbidden,
            "you can only manage your own account",
        )));
    }
    Ok(caller)
}

pub(crate) async fn create_user_handler(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), HttpError> {
    let req = json_body(body)?;
    let username = Username::parse(&req.username)
        .map_err(|err| ApiError::validation(format!("invalid username: {err}")))?;
    if req.email.trim().is_empty() {
        return Err(HttpError(ApiError::validation("email must not be empty")));
    }
    if req.password.is_empty() {
        return Err(HttpError(ApiError::validation(
            "password must not be empty",
        )));
    }
    let salt = auth::generate_salt(&state.salt_seed);
    let hash = auth::hash_password(&salt, &req.password);
    let user = state
        .store
        .create_user(username, req.email, salt, hash)
        .await
        .map_err(|err| match err {
            UserWriteError::UsernameTaken => HttpError(ApiError::new(
                ApiErrorCode::UsernameTaken,
                "username is already taken",
            )),
            UserWriteError::Storage(inner) => HttpError::from(inner),
        })?;
    info!(user_id = user.id.0, "user created");
    Ok((StatusCode::CREATED, Json(user_response(user))))
}

pub(crate) async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, HttpError> {
    let caller = own_record(&headers, &state, id)?;
    let user = state
        .store
        .user(caller)
        .await?
        .ok_or_else(|| ApiError::new(ApiErrorCode::NotFound, "user not found"))?;
    Ok(Json(user_response(user)))
}

pub(crate) async fn put_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, HttpError> {
    let caller = own_record(&headers, &state, id)?;
    let req = json_body(body)?;
    if req.email.trim().is_empty() {
        return Err(HttpError(ApiError::validation("email must not be empty")));
    }
    let credentials = match req.password {
        Some(password) if password.is_empty() => {
            return Err(HttpError(ApiError::validation(
                "password must not be empty",
            )))
        }
        Some(password) => {
            let salt = auth::generate_salt(&state.salt_seed);
            let hash = auth::hash_password(&salt, &password);
            Some((salt, hash))
        }
        None => None,
    };
    let user = state
        .store
        .update_user(caller, Some(req.email), credentials)
        .await?
        .ok_or_else(|| ApiError::new(ApiErrorCode::NotFound, "user not found"))?;
    Ok(Json(user_response(user)))
}

pub(crate) async fn patch_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Result<Json<PatchUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, HttpError> {
    let caller = own_record(&headers, &state, id)?;
    let req = json_body(body)?;
    if let Some(email) = &req.email {
        if email.trim().is_empty() {
            return Err(HttpError(ApiError::validation("email must not be empty")));
        }
    }
    let credentials = match req.password {
        Some(password) if password.is_empty() => {
            return Err(HttpError(ApiError::validation(
                "password must not be empty",
            )))
        }
        Some(password) => {
            let salt = auth::generate_salt(&state.salt_seed);
            let hash = auth::hash_password(&salt, &password);
            Some((salt, hash))
        }
        None => None,
    };
    let user = state
        .store
        .update_user(caller, req.email, credentials)
        .await?
        .ok_or_else(|| ApiError::new(ApiErrorCode::NotFound, "user not found"))?;
    Ok(Json(user_response(user)))
}

pub(crate) async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    let caller = own_record(&headers, &state, id)?;
    let removed = state.store.delete_user(caller).await?;
    if !removed {
        return Err(HttpError(ApiError::new(
            ApiErrorCode::NotFound,
            "user not found",
        )));
    }
    info!(user_id = caller.0, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
