// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use std::collections::BTreeMap;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 25;

/// Pagination forwarded to the carrier API. Defaults match the upstream
/// contract: page 1, 25 rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

pub fn parse_page_params(query: &BTreeMap<String, String>) -> Result<PageParams, ApiError> {
    let page = match query.get("page") {
        None => DEFAULT_PAGE,
        Some(raw) => {
            let value = raw
                .parse::<u32>()
                .map_err(|_| ApiError::invalid_param("page", raw))?;
            if value == 0 {
                return Err(ApiError::invalid_param("page", raw));
            }
            value
        }
    };
    let limit = match query.get("limit") {
        None => DEFAULT_LIMIT,
        Some(raw) => {
            let value = raw
                .parse::<u32>()
                .map_err(|_| ApiError::invalid_param("limit", raw))?;
            if value == 0 {
                return Err(ApiError::invalid_param("limit", raw));
            }
            value
        }
    };
    Ok(PageParams { page, limit })
}

/// Pulls a required lookup filter (settlement name, street name, ref)
/// out of the query string.
pub fn required_filter<'a>(
    query: &'a BTreeMap<String, String>,
    name: &str,
) -> Result<&'a str, ApiError> {
    let value = query
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| ApiError::missing_param(name))?;
    if value.trim().is_empty() {
        return Err(ApiError::invalid_param(name, value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn page_params_default_to_one_and_twenty_five() {
        let params = parse_page_params(&BTreeMap::new()).expect("defaults");
        assert_eq!(params, PageParams { page: 1, limit: 25 });
    }

    #[test]
    fn page_params_accept_explicit_values() {
        let params = parse_page_params(&query(&[("page", "3"), ("limit", "50")])).expect("params");
        assert_eq!(params, PageParams { page: 3, limit: 50 });
    }

    #[test]
    fn page_params_reject_zero_and_garbage() {
        assert!(parse_page_params(&query(&[("page", "0")])).is_err());
        assert!(parse_page_params(&query(&[("limit", "0")])).is_err());
        assert!(parse_page_params(&query(&[("limit", "many")])).is_err());
    }

    #[test]
    fn any_positive_limit_is_forwarded_verbatim() {
        let params = parse_page_params(&query(&[("limit", "1000")])).expect("large limit");
        assert_eq!(params.limit, 1000);
    }

    #[test]
    fn required_filter_rejects_missing_and_blank() {
        assert!(required_filter(&BTreeMap::new(), "settlement_name").is_err());
        assert!(required_filter(&query(&[("settlement_name", " ")]), "settlement_name").is_err());
        assert_eq!(
            required_filter(&query(&[("settlement_name", "Kyiv")]), "settlement_name")
                .expect("filter"),
            "Kyiv"
        );
    }
}
