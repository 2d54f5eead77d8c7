// SPDX-License-Identifier: Apache-2.0

use axum::response::Html;
use axum::Json;
use lavka_api::dto::MsgResponse;
use lavka_api::openapi;
use serde_json::Value;

pub(crate) async fn ping_handler() -> Json<MsgResponse> {
    Json(MsgResponse::new("pong"))
}

pub(crate) async fn schema_handler() -> Json<Value> {
    Json(openapi::openapi_spec())
}

/// Minimal Swagger UI page pointed at the schema route.
pub(crate) async fn docs_handler() -> Html<&'static str> {
    Html(
        r##"<!DOCTYPE html>
<html>
<head>
  <title>Lavka API</title>
  <meta charset="utf-8"/>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css"/>
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      SwaggerUIBundle({ url: "/api/schema/", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>"##,
    )
}
