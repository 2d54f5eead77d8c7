// SPDX-License-Identifier: Apache-2.0

//! Hand-maintained OpenAPI document served at `/api/schema/`. Kept in
//! lockstep with the router by the server's endpoint tests.

use serde_json::{json, Value};

#[must_use]
pub fn openapi_spec() -> Value {
    json!({
      "openapi": "3.0.3",
      "info": {
        "title": "lavka API",
        "version": "v1"
      },
      "paths": {
        "/ping/": {
          "get": {"responses": {"200": {"description": "liveness"}}}
        },
        "/api/schema/": {
          "get": {"responses": {"200": {"description": "this document"}}}
        },
        "/api/docs/": {
          "get": {"responses": {"200": {"description": "interactive docs"}}}
        },
        "/user/": {
          "post": {
            "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/CreateUser"}}}},
            "responses": {
              "201": {"description": "user created", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/User"}}}},
              "400": {"description": "validation failed", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Msg"}}}}
            }
          }
        },
        "/user/{id}": {
          "get": {
            "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}],
            "responses": {
              "200": {"description": "user", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/User"}}}},
              "401": {"description": "missing or invalid token"},
              "403": {"description": "not the record owner"},
              "404": {"description": "no such user"}
            }
          },
          "put": {
            "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}],
            "responses": {"200": {"description": "updated user"}}
          },
          "patch": {
            "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}],
            "responses": {"200": {"description": "updated user"}}
          },
          "delete": {
            "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}],
            "responses": {"204": {"description": "deleted"}}
          }
        },
        "/token/": {
          "post": {
            "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/TokenRequest"}}}},
            "responses": {
              "200": {"description": "token pair", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/TokenPair"}}}},
              "401": {"description": "bad credentials"}
            }
          }
        },
        "/token/refresh/": {
          "post": {
            "responses": {
              "200": {"description": "fresh access token"},
              "401": {"description": "expired or invalid refresh token"}
            }
          }
        },
        "/product/": {
          "get": {"responses": {"200": {"description": "available products", "content": {"application/json": {"schema": {"type": "array", "items": {"$ref": "#/components/schemas/Product"}}}}}}}
        },
        "/product/{id}": {
          "get": {
            "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}],
            "responses": {
              "200": {"description": "product"},
              "404": {"description": "no such product"}
            }
          }
        },
        "/order/": {
          "post": {
            "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/CreateOrder"}}}},
            "responses": {
              "201": {"description": "order created", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Msg"}}}},
              "400": {"description": "payload validation failed"},
              "403": {"description": "basket belongs to another user"},
              "404": {"description": "basket missing or empty"}
            }
          }
        },
        "/delivery/settlements/": {
          "get": {
            "parameters": [
              {"name": "settlement_name", "in": "query", "required": true, "schema": {"type": "string"}},
              {"name": "page", "in": "query", "schema": {"type": "integer", "default": 1}},
              {"name": "limit", "in": "query", "schema": {"type": "integer", "default": 25}}
            ],
            "responses": {"200": {"description": "carrier settlements, verbatim"}, "502": {"description": "carrier unavailable"}}
          }
        },
        "/delivery/warehouses/": {
          "get": {
            "parameters": [
              {"name": "settlement_name", "in": "query", "required": true, "schema": {"type": "string"}},
              {"name": "page", "in": "query", "schema": {"type": "integer", "default": 1}},
              {"name": "limit", "in": "query", "schema": {"type": "integer", "default": 25}}
            ],
            "responses": {"200": {"description": "carrier warehouses, verbatim"}}
          }
        },
        "/delivery/warehouse-types/": {
          "get": {"responses": {"200": {"description": "carrier warehouse types, verbatim"}}}
        },
        "/delivery/addresses/": {
          "get": {
            "parameters": [
              {"name": "street_name", "in": "query", "required": true, "schema": {"type": "string"}},
              {"name": "ref", "in": "query", "required": true, "schema": {"type": "string"}},
              {"name": "page", "in": "query", "schema": {"type": "integer", "default": 1}},
              {"name": "limit", "in": "query", "schema": {"type": "integer", "default": 25}}
            ],
            "responses": {"200": {"description": "carrier street search, verbatim"}}
          }
        }
      },
      "components": {
        "schemas": {
          "Msg": {
            "type": "object",
            "required": ["msg"],
            "properties": {"msg": {"type": "string"}}
          },
          "CreateUser": {
            "type": "object",
            "required": ["username", "email", "password"],
            "properties": {
              "username": {"type": "string"},
              "email": {"type": "string"},
              "password": {"type": "string"}
            }
          },
          "User": {
            "type": "object",
            "required": ["id", "username", "email"],
            "properties": {
              "id": {"type": "integer"},
              "username": {"type": "string"},
              "email": {"type": "string"}
            }
          },
          "TokenRequest": {
            "type": "object",
            "required": ["username", "password"],
            "properties": {
              "username": {"type": "string"},
              "password": {"type": "string"}
            }
          },
          "TokenPair": {
            "type": "object",
            "required": ["access", "refresh"],
            "properties": {
              "access": {"type": "string"},
              "refresh": {"type": "string"}
            }
          },
          "Product": {
            "type": "object",
            "required": ["id", "name", "description", "price", "available", "image_urls", "color", "size"],
            "properties": {
              "id": {"type": "integer"},
              "name": {"type": "string"},
              "description": {"type": "string"},
              "price": {"type": "string", "example": "149.90"},
              "available": {"type": "boolean"},
              "image_urls": {"type": "array", "items": {"type": "string"}},
              "color": {"type": "string"},
              "size": {"type": "string"}
            }
          },
          "CreateOrder": {
            "type": "object",
            "required": ["basket_id", "full_name", "phone", "settlement", "warehouse_address"],
            "properties": {
              "basket_id": {"type": "integer"},
              "full_name": {"type": "string"},
              "phone": {"type": "string"},
              "settlement": {"type": "string"},
              "warehouse_address": {"type": "string"},
              "comment": {"type": "string"}
            }
          }
        }
      }
    })
}
