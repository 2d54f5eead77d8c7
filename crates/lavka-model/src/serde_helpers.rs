// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer, Serializer};

/// Prices are stored as integer cents and rendered on the wire as a
/// decimal string ("149.90"), matching the catalog contract.
pub mod price_cents {
    use super::*;

    pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let sign = if *value < 0 { "-" } else { "" };
        let abs = value.unsigned_abs();
        serializer.serialize_str(&format!("{sign}{}.{:02}", abs / 100, abs % 100))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_decimal_cents(&raw).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn parse_decimal_cents(raw: &str) -> Result<i64, String> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid price: {raw}"));
    }
    if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid price fraction: {raw}"));
    }
    let whole: i64 = whole
        .parse()
        .map_err(|_| format!("price out of range: {raw}"))?;
    let frac_cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| "bad fraction".to_string())? * 10,
        _ => frac.parse().map_err(|_| "bad fraction".to_string())?,
    };
    let cents = whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac_cents))
        .ok_or_else(|| format!("price out of range: {raw}"))?;
    Ok(if negative { -cents } else { cents })
}
