#![forbid(unsafe_code)]
//! Wire surface shared between the server and its tests: error codes,
//! request/response DTOs, query-parameter parsing, and the OpenAPI
//! document.

pub mod dto;
pub mod errors;
pub mod openapi;
pub mod params;

pub use errors::{ApiError, ApiErrorCode};
pub use params::{parse_page_params, PageParams, DEFAULT_LIMIT, DEFAULT_PAGE};

pub const CRATE_NAME: &str = "lavka-api";
