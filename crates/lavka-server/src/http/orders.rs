// SPDX-License-Identifier: Apache-2.0

//! Checkout endpoint. The error ordering is part of the external
//! contract: basket existence, then ownership, then emptiness, and only
//! then field validation. The store re-checks all three inside its
//! transaction, so a racing checkout still cannot double-sell.

use crate::auth;
use crate::http::{created, json_body, HttpError};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use lavka_api::dto::{CreateOrderRequest, MsgResponse};
use lavka_api::{ApiError, ApiErrorCode};
use lavka_model::BasketId;
use lavka_store::CheckoutError;
use serde_json::Value;
use tracing::info;

const MSG_BASKET_MISSING: &str = "Basket does not exist!";
const MSG_NOT_OWNER: &str = "You cannot place an order from someone else's basket";
const MSG_BASKET_EMPTY: &str = "Your basket is empty. Please add items to cart before checkout.";
const MSG_ORDER_CREATED: &str = "Congratulations, your order has been successfully created!";

fn checkout_error(err: CheckoutError) -> HttpError {
    match err {
        CheckoutError::BasketNotFound => {
            HttpError(ApiError::new(ApiErrorCode::BasketNotFound, MSG_BASKET_MISSING))
        }
        CheckoutError::NotBasketOwner => {
            HttpError(ApiError::new(ApiErrorCode::NotBasketOwner, MSG_NOT_OWNER))
        }
        CheckoutError::EmptyBasket => {
            HttpError(ApiError::new(ApiErrorCode::EmptyBasket, MSG_BASKET_EMPTY))
        }
        CheckoutError::Storage(inner) => HttpError::from(inner),
        other => {
            HttpError(ApiError::new(ApiErrorCode::Internal, other.to_string()))
        }
    }
}

pub(crate) async fn create_order_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MsgResponse>), HttpError> {
    let caller = auth::bearer_user(&headers, &state.api)?;
    let raw = json_body(body)?;

    // The basket checks read only `basket_id`; the draft fields are not
    // deserialized until the basket has passed. A body without a usable
    // basket id therefore reports a missing basket, not a 400.
    let basket_id = raw
        .get("basket_id")
        .and_then(Value::as_i64)
        .map(BasketId)
        .ok_or_else(|| ApiError::new(ApiErrorCode::BasketNotFound, MSG_BASKET_MISSING))?;

    let basket = state
        .store
        .basket(basket_id)
        .await?
        .ok_or_else(|| ApiError::new(ApiErrorCode::BasketNotFound, MSG_BASKET_MISSING))?;
    if basket.user_id != caller {
        return Err(HttpError(ApiError::new(
            ApiErrorCode::NotBasketOwner,
            MSG_NOT_OWNER,
        )));
    }
    if state.store.basket_items(basket_id).await?.is_empty() {
        return Err(HttpError(ApiError::new(
            ApiErrorCode::EmptyBasket,
            MSG_BASKET_EMPTY,
        )));
    }

    let req: CreateOrderRequest = serde_json::from_value(raw)
        .map_err(|err| ApiError::validation(format!("invalid order payload: {err}")))?;
    req.validate().map_err(ApiError::validation)?;

    let order_id = state
        .store
        .checkout(basket_id, caller, req.draft)
        .await
        .map_err(checkout_error)?;
    info!(order_id = order_id.0, user_id = caller.0, "order created");
    Ok(created(MSG_ORDER_CREATED))
}
