// SPDX-License-Identifier: Apache-2.0

mod support;

use lavka_model::{Product, ProductId, StockStatus};
use lavka_server::FakeCarrierClient;
use serde_json::json;
use support::{register_and_login, request, spawn_server};

fn shirt(available: bool) -> Product {
    Product {
        id: ProductId(0),
        name: "Linen shirt".to_string(),
        description: "Loose fit".to_string(),
        price: 14990,
        available,
        image_urls: vec!["https://cdn.example.com/shirt.jpg".to_string()],
        color: "white".to_string(),
        size: "M".to_string(),
    }
}

#[tokio::test]
async fn ping_answers_pong() {
    let server = spawn_server(FakeCarrierClient::default()).await;
    let resp = request(server.addr, "GET", "/ping/", None, None).await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.msg(), "pong");
    assert!(resp.headers.contains("x-request-id"));
}

#[tokio::test]
async fn schema_lists_every_route() {
    let server = spawn_server(FakeCarrierClient::default()).await;
    let resp = request(server.addr, "GET", "/api/schema/", None, None).await;
    assert_eq!(resp.status, 200);
    let paths = &resp.json()["paths"];
    for route in [
        "/ping/",
        "/user/",
        "/token/",
        "/product/",
        "/order/",
        "/delivery/settlements/",
    ] {
        assert!(paths.get(route).is_some(), "schema missing {route}");
    }
}

#[tokio::test]
async fn user_lifecycle_over_http() {
    let server = spawn_server(FakeCarrierClient::default()).await;
    let (user_id, access) = register_and_login(server.addr, "marta", "hunter22").await;

    let me = request(
        server.addr,
        "GET",
        &format!("/user/{user_id}"),
        Some(&access),
        None,
    )
    .await;
    assert_eq!(me.status, 200);
    assert_eq!(me.json()["username"], "marta");
    assert!(me.json().get("password_hash").is_none());

    let patched = request(
        server.addr,
        "PATCH",
        &format!("/user/{user_id}"),
        Some(&access),
        Some(&json!({"email": "marta@new.example"})),
    )
    .await;
    assert_eq!(patched.status, 200);
    assert_eq!(patched.json()["email"], "marta@new.example");

    let deleted = request(
        server.addr,
        "DELETE",
        &format!("/user/{user_id}"),
        Some(&access),
        None,
    )
    .await;
    assert_eq!(deleted.status, 204);

    let gone = request(
        server.addr,
        "GET",
        &format!("/user/{user_id}"),
        Some(&access),
        None,
    )
    .await;
    assert_eq!(gone.status, 404);
}

#[tokio::test]
async fn users_cannot_touch_other_accounts() {
    let server = spawn_server(FakeCarrierClient::default()).await;
    let (marta_id, _) = register_and_login(server.addr, "marta", "hunter22").await;
    let (_, ivan_access) = register_and_login(server.addr, "ivan", "hunter33").await;

    let resp = request(
        server.addr,
        "GET",
        &format!("/user/{marta_id}"),
        Some(&ivan_access),
        None,
    )
    .await;
    assert_eq!(resp.status, 403);

    let anon = request(server.addr, "GET", &format!("/user/{marta_id}"), None, None).await;
    assert_eq!(anon.status, 401);
}

#[tokio::test]
async fn duplicate_usernames_are_rejected() {
    let server = spawn_server(FakeCarrierClient::default()).await;
    let _ = register_and_login(server.addr, "marta", "hunter22").await;
    let resp = request(
        server.addr,
        "POST",
        "/user/",
        None,
        Some(&json!({"username": "marta", "email": "m2@example.com", "password": "pw"})),
    )
    .await;
    assert_eq!(resp.status, 400);
    assert_eq!(resp.msg(), "username is already taken");
}

#[tokio::test]
async fn wrong_credentials_get_the_same_401() {
    let server = spawn_server(FakeCarrierClient::default()).await;
    let _ = register_and_login(server.addr, "marta", "hunter22").await;

    let wrong_password = request(
        server.addr,
        "POST",
        "/token/",
        None,
        Some(&json!({"username": "marta", "password": "nope"})),
    )
    .await;
    let unknown_user = request(
        server.addr,
        "POST",
        "/token/",
        None,
        Some(&json!({"username": "ghost", "password": "nope"})),
    )
    .await;
    assert_eq!(wrong_password.status, 401);
    assert_eq!(unknown_user.status, 401);
    assert_eq!(wrong_password.msg(), unknown_user.msg());
}

#[tokio::test]
async fn refresh_issues_a_new_access_token() {
    let server = spawn_server(FakeCarrierClient::default()).await;
    let (user_id, _) = register_and_login(server.addr, "marta", "hunter22").await;

    let tokens = request(
        server.addr,
        "POST",
        "/token/",
        None,
        Some(&json!({"username": "marta", "password": "hunter22"})),
    )
    .await;
    let refresh = tokens.json()["refresh"].as_str().expect("refresh").to_string();

    let refreshed = request(
        server.addr,
        "POST",
        "/token/refresh/",
        None,
        Some(&json!({"refresh": refresh})),
    )
    .await;
    assert_eq!(refreshed.status, 200);
    let access = refreshed.json()["access"].as_str().expect("access").to_string();

    let me = request(
        server.addr,
        "GET",
        &format!("/user/{user_id}"),
        Some(&access),
        None,
    )
    .await;
    assert_eq!(me.status, 200);

    // An access token must not be accepted as a refresh token.
    let misused = request(
        server.addr,
        "POST",
        "/token/refresh/",
        None,
        Some(&json!({"refresh": access})),
    )
    .await;
    assert_eq!(misused.status, 401);
}

#[tokio::test]
async fn product_listing_hides_unavailable_items() {
    let server = spawn_server(FakeCarrierClient::default()).await;
    let visible = server.store.insert_product(shirt(true)).await.expect("insert");
    let hidden = server.store.insert_product(shirt(false)).await.expect("insert");

    let listing = request(server.addr, "GET", "/product/", None, None).await;
    assert_eq!(listing.status, 200);
    let items = listing.json();
    let items = items.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], visible.0);
    assert_eq!(items[0]["price"], "149.90");

    let direct = request(server.addr, "GET", &format!("/product/{}", hidden.0), None, None).await;
    assert_eq!(direct.status, 200);

    let missing = request(server.addr, "GET", "/product/99999", None, None).await;
    assert_eq!(missing.status, 404);
}

#[tokio::test]
async fn checkout_follows_the_message_contract() {
    let server = spawn_server(FakeCarrierClient::default()).await;
    let (marta_id, marta) = register_and_login(server.addr, "marta", "hunter22").await;
    let (_, ivan) = register_and_login(server.addr, "ivan", "hunter33").await;

    let product_id = server.store.insert_product(shirt(true)).await.expect("product");
    let unit = server
        .store
        .insert_warehouse_item(
            product_id,
            "white".to_string(),
            "M".to_string(),
            StockStatus::InStock,
        )
        .await
        .expect("unit");
    let basket = server
        .store
        .create_basket(lavka_model::UserId(marta_id))
        .await
        .expect("basket");
    server
        .store
        .add_basket_item(basket.id, product_id, "white".to_string(), "M".to_string(), 1)
        .await
        .expect("basket item");

    let draft = json!({
        "basket_id": basket.id.0,
        "full_name": "Marta K",
        "phone": "+380501112233",
        "settlement": "Kyiv",
        "warehouse_address": "Branch 12",
    });

    let missing_basket = request(
        server.addr,
        "POST",
        "/order/",
        Some(&marta),
        Some(&json!({"basket_id": 777, "full_name": "Marta K", "phone": "+380501112233",
                     "settlement": "Kyiv", "warehouse_address": "Branch 12"})),
    )
    .await;
    assert_eq!(missing_basket.status, 404);
    assert_eq!(missing_basket.msg(), "Basket does not exist!");

    let foreign = request(server.addr, "POST", "/order/", Some(&ivan), Some(&draft)).await;
    assert_eq!(foreign.status, 403);
    assert_eq!(
        foreign.msg(),
        "You cannot place an order from someone else's basket"
    );

    let mut invalid = draft.clone();
    invalid["phone"] = json!("call me maybe");
    let bad_payload = request(server.addr, "POST", "/order/", Some(&marta), Some(&invalid)).await;
    assert_eq!(bad_payload.status, 400);

    let success = request(server.addr, "POST", "/order/", Some(&marta), Some(&draft)).await;
    assert_eq!(success.status, 201);
    assert_eq!(
        success.msg(),
        "Congratulations, your order has been successfully created!"
    );

    let sold = server.store.warehouse_item(unit).await.expect("query").expect("unit row");
    assert_eq!(sold.status, StockStatus::Sold);
    assert!(sold.order_id.is_some());

    // The basket is gone, so a second checkout reports it missing.
    let again = request(server.addr, "POST", "/order/", Some(&marta), Some(&draft)).await;
    assert_eq!(again.status, 404);
    assert_eq!(again.msg(), "Basket does not exist!");
}

#[tokio::test]
async fn basket_checks_run_before_payload_validation() {
    let server = spawn_server(FakeCarrierClient::default()).await;
    let (marta_id, marta) = register_and_login(server.addr, "marta", "hunter22").await;

    // Draft fields are missing in both requests. When the basket does
    // not exist that wins; only a passing basket reaches validation.
    let no_basket = request(
        server.addr,
        "POST",
        "/order/",
        Some(&marta),
        Some(&json!({"basket_id": 777})),
    )
    .await;
    assert_eq!(no_basket.status, 404);
    assert_eq!(no_basket.msg(), "Basket does not exist!");

    let no_basket_id = request(server.addr, "POST", "/order/", Some(&marta), Some(&json!({}))).await;
    assert_eq!(no_basket_id.status, 404);
    assert_eq!(no_basket_id.msg(), "Basket does not exist!");

    let product_id = server.store.insert_product(shirt(true)).await.expect("product");
    let basket = server
        .store
        .create_basket(lavka_model::UserId(marta_id))
        .await
        .expect("basket");
    server
        .store
        .add_basket_item(basket.id, product_id, "white".to_string(), "M".to_string(), 1)
        .await
        .expect("basket item");

    let bad_draft = request(
        server.addr,
        "POST",
        "/order/",
        Some(&marta),
        Some(&json!({"basket_id": basket.id.0})),
    )
    .await;
    assert_eq!(bad_draft.status, 400);
    assert!(store_basket_still_exists(&server, basket.id).await);
}

async fn store_basket_still_exists(
    server: &support::TestServer,
    basket_id: lavka_model::BasketId,
) -> bool {
    server
        .store
        .basket(basket_id)
        .await
        .expect("basket query")
        .is_some()
}

#[tokio::test]
async fn checkout_on_emptied_basket_reports_404() {
    let server = spawn_server(FakeCarrierClient::default()).await;
    let (marta_id, marta) = register_and_login(server.addr, "marta", "hunter22").await;
    let basket = server
        .store
        .create_basket(lavka_model::UserId(marta_id))
        .await
        .expect("basket");

    let resp = request(
        server.addr,
        "POST",
        "/order/",
        Some(&marta),
        Some(&json!({"basket_id": basket.id.0, "full_name": "Marta K",
                     "phone": "+380501112233", "settlement": "Kyiv",
                     "warehouse_address": "Branch 12"})),
    )
    .await;
    assert_eq!(resp.status, 404);
    assert_eq!(
        resp.msg(),
        "Your basket is empty. Please add items to cart before checkout."
    );
}
