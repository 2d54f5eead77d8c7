// SPDX-License-Identifier: Apache-2.0

//! Thin proxy over the shipping carrier. Query parameters are validated
//! locally; the upstream body is relayed verbatim. Each upstream call is
//! bounded by the configured request timeout.

use crate::carrier::CarrierError;
use crate::http::HttpError;
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use lavka_api::params::required_filter;
use lavka_api::{parse_page_params, ApiError, ApiErrorCode};
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use tokio::time::timeout;
use tracing::warn;

fn carrier_failure(err: CarrierError) -> HttpError {
    warn!(error = %err, "carrier proxy failed");
    HttpError(ApiError::new(
        ApiErrorCode::CarrierUnavailable,
        "carrier lookup failed",
    ))
}

async fn bounded<F>(state: &AppState, lookup: F) -> Result<Json<Value>, HttpError>
where
    F: Future<Output = Result<Value, CarrierError>>,
{
    match timeout(state.api.request_timeout, lookup).await {
        Ok(result) => result.map(Json).map_err(carrier_failure),
        Err(_) => Err(carrier_failure(CarrierError(
            "carrier lookup timed out".to_string(),
        ))),
    }
}

pub(crate) async fn settlements_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<Value>, HttpError> {
    let page = parse_page_params(&query)?;
    let name = required_filter(&query, "settlement_name")?;
    bounded(&state, state.carrier.settlements(name, page)).await
}

pub(crate) async fn warehouses_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<Value>, HttpError> {
    let page = parse_page_params(&query)?;
    let name = required_filter(&query, "settlement_name")?;
    bounded(&state, state.carrier.warehouses(name, page)).await
}

pub(crate) async fn warehouse_types_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, HttpError> {
    bounded(&state, state.carrier.warehouse_types()).await
}

pub(crate) async fn addresses_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<Value>, HttpError> {
    let page = parse_page_params(&query)?;
    let street = required_filter(&query, "street_name")?;
    let settlement_ref = required_filter(&query, "ref")?;
    bounded(
        &state,
        state.carrier.settlement_streets(street, settlement_ref, page),
    )
    .await
}
