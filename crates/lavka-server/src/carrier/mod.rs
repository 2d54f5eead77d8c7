// SPDX-License-Identifier: Apache-2.0

//! Shipping-carrier lookups. The HTTP client speaks the carrier's JSON
//! envelope and the server relays the body verbatim; a fake client backs
//! the tests.

use async_trait::async_trait;
use lavka_api::PageParams;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierError(pub String);

impl fmt::Display for CarrierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "carrier error: {}", self.0)
    }
}

impl Error for CarrierError {}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_backoff_ms: 120,
        }
    }
}

/// One upstream call: the carrier model and method plus its string
/// properties, page and limit included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierCall {
    pub model: &'static str,
    pub method: &'static str,
    pub properties: BTreeMap<String, String>,
}

impl CarrierCall {
    fn new(model: &'static str, method: &'static str) -> Self {
        Self {
            model,
            method,
            properties: BTreeMap::new(),
        }
    }

    fn property(mut self, key: &str, value: impl ToString) -> Self {
        self.properties.insert(key.to_string(), value.to_string());
        self
    }

    fn paged(self, page: PageParams) -> Self {
        self.property("Page", page.page).property("Limit", page.limit)
    }
}

fn settlements_call(name: &str, page: PageParams) -> CarrierCall {
    CarrierCall::new("Address", "searchSettlements")
        .property("CityName", name)
        .paged(page)
}

fn warehouses_call(settlement_name: &str, page: PageParams) -> CarrierCall {
    CarrierCall::new("AddressGeneral", "getWarehouses")
        .property("CityName", settlement_name)
        .paged(page)
}

fn warehouse_types_call() -> CarrierCall {
    CarrierCall::new("AddressGeneral", "getWarehouseTypes")
}

fn settlement_streets_call(
    street_name: &str,
    settlement_ref: &str,
    page: PageParams,
) -> CarrierCall {
    CarrierCall::new("Address", "searchSettlementStreets")
        .property("StreetName", street_name)
        .property("SettlementRef", settlement_ref)
        .paged(page)
}

#[async_trait]
pub trait CarrierClient: Send + Sync + 'static {
    async fn settlements(&self, name: &str, page: PageParams) -> Result<Value, CarrierError>;

    async fn warehouses(
        &self,
        settlement_name: &str,
        page: PageParams,
    ) -> Result<Value, CarrierError>;

    async fn warehouse_types(&self) -> Result<Value, CarrierError>;

    async fn settlement_streets(
        &self,
        street_name: &str,
        settlement_ref: &str,
        page: PageParams,
    ) -> Result<Value, CarrierError>;
}

/// Real client for the carrier's JSON POST API.
pub struct HttpCarrierClient {
    base_url: String,
    api_key: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl HttpCarrierClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn envelope(&self, call: &CarrierCall) -> Value {
        let mut properties = serde_json::Map::new();
        for (key, value) in &call.properties {
            properties.insert(key.clone(), Value::String(value.clone()));
        }
        json!({
            "apiKey": self.api_key,
            "modelName": call.model,
            "calledMethod": call.method,
            "methodProperties": Value::Object(properties),
        })
    }

    async fn post_once(&self, body: &Value) -> Result<Value, CarrierError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| CarrierError(format!("client build failed: {e}")))?;
        let resp = client
            .post(&self.base_url)
            .json(body)
            .send()
            .await
            .map_err(|e| CarrierError(format!("request failed: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CarrierError(format!("upstream status {status}")));
        }
        resp.json::<Value>()
            .await
            .map_err(|e| CarrierError(format!("invalid upstream body: {e}")))
    }

    async fn post_with_retry(&self, call: CarrierCall) -> Result<Value, CarrierError> {
        let body = self.envelope(&call);
        let mut last_err = CarrierError("no attempts made".to_string());
        for attempt in 1..=self.retry.max_attempts {
            match self.post_once(&body).await {
                Ok(value) => {
                    debug!(method = call.method, attempt, "carrier lookup succeeded");
                    return Ok(value);
                }
                Err(err) => {
                    warn!(method = call.method, attempt, error = %err, "carrier lookup failed");
                    last_err = err;
                    if attempt < self.retry.max_attempts {
                        let backoff = self.retry.base_backoff_ms * u64::from(attempt);
                        tokio::time::sleep(Duration::from_millis(backoff)).await;
                    }
                }
            }
        }
        Err(last_err)
    }
}

#[async_trait]
impl CarrierClient for HttpCarrierClient {
    async fn settlements(&self, name: &str, page: PageParams) -> Result<Value, CarrierError> {
        self.post_with_retry(settlements_call(name, page)).await
    }

    async fn warehouses(
        &self,
        settlement_name: &str,
        page: PageParams,
    ) -> Result<Value, CarrierError> {
        self.post_with_retry(warehouses_call(settlement_name, page))
            .await
    }

    async fn warehouse_types(&self) -> Result<Value, CarrierError> {
        self.post_with_retry(warehouse_types_call()).await
    }

    async fn settlement_streets(
        &self,
        street_name: &str,
        settlement_ref: &str,
        page: PageParams,
    ) -> Result<Value, CarrierError> {
        self.post_with_retry(settlement_streets_call(street_name, settlement_ref, page))
            .await
    }
}

/// Records calls and replays a canned response. Used by the HTTP tests
/// so no network is involved.
pub struct FakeCarrierClient {
    pub calls: Mutex<Vec<CarrierCall>>,
    pub response: Mutex<Result<Value, CarrierError>>,
}

impl FakeCarrierClient {
    #[must_use]
    pub fn returning(value: Value) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: Mutex::new(Ok(value)),
        }
    }

    #[must_use]
    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: Mutex::new(Err(CarrierError(msg.into()))),
        }
    }

    #[must_use]
    pub fn recorded_calls(&self) -> Vec<CarrierCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: CarrierCall) -> Result<Value, CarrierError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        self.response
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|_| Err(CarrierError("fake poisoned".to_string())))
    }
}

impl Default for FakeCarrierClient {
    fn default() -> Self {
        Self::returning(Value::Null)
    }
}

#[async_trait]
impl CarrierClient for FakeCarrierClient {
    async fn settlements(&self, name: &str, page: PageParams) -> Result<Value, CarrierError> {
        self.record(settlements_call(name, page))
    }

    async fn warehouses(
        &self,
        settlement_name: &str,
        page: PageParams,
    ) -> Result<Value, CarrierError> {
        self.record(warehouses_call(settlement_name, page))
    }

    async fn warehouse_types(&self) -> Result<Value, CarrierError> {
        self.record(warehouse_types_call())
    }

    async fn settlement_streets(
        &self,
        street_name: &str,
        settlement_ref: &str,
        page: PageParams,
    ) -> Result<Value, CarrierError> {
        self.record(settlement_streets_call(street_name, settlement_ref, page))
    }
}
