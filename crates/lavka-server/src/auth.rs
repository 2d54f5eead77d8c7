// SPDX-License-Identifier: Apache-2.0

//! Bearer tokens and password hashing. Tokens are HMAC-SHA256 signed:
//! `base64url(claims json) "." hex(hmac(secret, base64 payload))`, with
//! an expiry and a kind tag so a refresh token cannot be replayed as an
//! access token.

use crate::config::ApiConfig;
use axum::http::HeaderMap;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use lavka_api::ApiError;
use lavka_model::UserId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    pub sub: i64,
    pub exp: i64,
    pub kind: TokenKind,
}

pub(crate) fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() as i64)
}

fn signature(secret: &str, payload_b64: &str) -> Result<String, ApiError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|_| ApiError::unauthorized("token signing unavailable"))?;
    mac.update(payload_b64.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

pub(crate) fn sign_token(
    secret: &str,
    user_id: UserId,
    kind: TokenKind,
    ttl: Duration,
) -> Result<String, ApiError> {
    let claims = TokenClaims {
        sub: user_id.0,
        exp: now_unix().saturating_add(ttl.as_secs() as i64),
        kind,
    };
    let payload = serde_json::to_vec(&claims)
        .map_err(|_| ApiError::unauthorized("token signing unavailable"))?;
    let payload_b64 = URL_SAFE_NO_PAD.encode(payload);
    let sig = signature(secret, &payload_b64)?;
    Ok(format!("{payload_b64}.{sig}"))
}

pub(crate) fn verify_token(
    secret: &str,
    token: &str,
    expected: TokenKind,
    now: i64,
) -> Result<UserId, ApiError> {
    let (payload_b64, sig) = token
        .split_once('.')
        .ok_or_else(|| ApiError::unauthorized("malformed token"))?;
    let expected_sig = signature(secret, payload_b64)?;
    if sig != expected_sig {
        return Err(ApiError::unauthorized("token signature mismatch"));
    }
    let payload = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| ApiError::unauthorized("malformed token payload"))?;
    let claims: TokenClaims = serde_json::from_slice(&payload)
        .map_err(|_| ApiError::unauthorized("malformed token claims"))?;
    if claims.kind != expected {
        return Err(ApiError::unauthorized("wrong token kind"));
    }
    if claims.exp <= now {
        return Err(ApiError::unauthorized("token expired"));
    }
    Ok(UserId(claims.sub))
}

/// Resolves the caller from an `Authorization: Bearer ...` header.
pub(crate) fn bearer_user(headers: &HeaderMap, api: &ApiConfig) -> Result<UserId, ApiError> {
    let raw = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("missing authorization header"))?;
    let token = raw
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("authorization header is not a bearer token"))?;
    verify_token(&api.token_secret, token, TokenKind::Access, now_unix())
}

pub(crate) fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Per-process salt: a seeded counter mixed with the clock, hashed. Not
/// a KDF; credential hardening is out of scope here.
pub(crate) fn generate_salt(seed: &AtomicU64) -> String {
    let n = seed.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    let mut hasher = Sha256::new();
    hasher.update(n.to_le_bytes());
    hasher.update(nanos.to_le_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..16])
}
