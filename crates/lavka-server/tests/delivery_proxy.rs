// SPDX-License-Identifier: Apache-2.0

mod support;

use lavka_server::FakeCarrierClient;
use serde_json::json;
use support::{request, spawn_server};

#[tokio::test]
async fn settlements_forward_filters_and_pagination() {
    let upstream = json!({"success": true, "data": [{"Description": "Kyiv"}]});
    let server = spawn_server(FakeCarrierClient::returning(upstream.clone())).await;

    let resp = request(
        server.addr,
        "GET",
        "/delivery/settlements/?settlement_name=Kyiv&page=2&limit=50",
        None,
        None,
    )
    .await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.json(), upstream);

    let calls = server.carrier.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "searchSettlements");
    assert_eq!(calls[0].properties["CityName"], "Kyiv");
    assert_eq!(calls[0].properties["Page"], "2");
    assert_eq!(calls[0].properties["Limit"], "50");
}

#[tokio::test]
async fn pagination_defaults_to_page_one_limit_twenty_five() {
    let server = spawn_server(FakeCarrierClient::returning(json!({"success": true}))).await;
    let resp = request(
        server.addr,
        "GET",
        "/delivery/warehouses/?settlement_name=Lviv",
        None,
        None,
    )
    .await;
    assert_eq!(resp.status, 200);

    let calls = server.carrier.recorded_calls();
    assert_eq!(calls[0].method, "getWarehouses");
    assert_eq!(calls[0].properties["Page"], "1");
    assert_eq!(calls[0].properties["Limit"], "25");
}

#[tokio::test]
async fn missing_required_filter_is_a_400() {
    let server = spawn_server(FakeCarrierClient::returning(json!({"success": true}))).await;
    let resp = request(server.addr, "GET", "/delivery/settlements/", None, None).await;
    assert_eq!(resp.status, 400);
    assert!(resp.msg().contains("settlement_name"));
    assert!(server.carrier.recorded_calls().is_empty());
}

#[tokio::test]
async fn garbage_pagination_is_a_400() {
    let server = spawn_server(FakeCarrierClient::returning(json!({"success": true}))).await;
    for path in [
        "/delivery/settlements/?settlement_name=Kyiv&page=0",
        "/delivery/settlements/?settlement_name=Kyiv&limit=nope",
    ] {
        let resp = request(server.addr, "GET", path, None, None).await;
        assert_eq!(resp.status, 400, "expected 400 for {path}");
    }
    assert!(server.carrier.recorded_calls().is_empty());
}

#[tokio::test]
async fn large_limits_are_forwarded_not_clamped() {
    let server = spawn_server(FakeCarrierClient::returning(json!({"success": true}))).await;
    let resp = request(
        server.addr,
        "GET",
        "/delivery/settlements/?settlement_name=Kyiv&limit=1000",
        None,
        None,
    )
    .await;
    assert_eq!(resp.status, 200);
    assert_eq!(server.carrier.recorded_calls()[0].properties["Limit"], "1000");
}

#[tokio::test]
async fn warehouse_types_need_no_filters() {
    let server = spawn_server(FakeCarrierClient::returning(json!({"success": true}))).await;
    let resp = request(server.addr, "GET", "/delivery/warehouse-types/", None, None).await;
    assert_eq!(resp.status, 200);
    assert_eq!(server.carrier.recorded_calls()[0].method, "getWarehouseTypes");
}

#[tokio::test]
async fn addresses_require_street_and_ref() {
    let server = spawn_server(FakeCarrierClient::returning(json!({"success": true}))).await;

    let missing_ref = request(
        server.addr,
        "GET",
        "/delivery/addresses/?street_name=Khreshchatyk",
        None,
        None,
    )
    .await;
    assert_eq!(missing_ref.status, 400);

    let resp = request(
        server.addr,
        "GET",
        "/delivery/addresses/?street_name=Khreshchatyk&ref=abc-123",
        None,
        None,
    )
    .await;
    assert_eq!(resp.status, 200);
    let calls = server.carrier.recorded_calls();
    assert_eq!(calls[0].method, "searchSettlementStreets");
    assert_eq!(calls[0].properties["StreetName"], "Khreshchatyk");
    assert_eq!(calls[0].properties["SettlementRef"], "abc-123");
}

#[tokio::test]
async fn carrier_failure_maps_to_502() {
    let server = spawn_server(FakeCarrierClient::failing("upstream down")).await;
    let resp = request(
        server.addr,
        "GET",
        "/delivery/settlements/?settlement_name=Kyiv",
        None,
        None,
    )
    .await;
    assert_eq!(resp.status, 502);
    assert_eq!(resp.msg(), "carrier lookup failed");
}
