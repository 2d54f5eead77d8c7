use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
    pub token_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub carrier_base_url: String,
    pub carrier_api_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024,
            request_timeout: Duration::from_secs(5),
            token_secret: String::new(),
            access_token_ttl: Duration::from_secs(300),
            refresh_token_ttl: Duration::from_secs(24 * 60 * 60),
            carrier_base_url: "https://api.novaposhta.ua/v2.0/json/".to_string(),
            carrier_api_key: String::new(),
        }
    }
}

pub fn validate_startup_config_contract(api: &ApiConfig) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("max_body_bytes must be > 0".to_string());
    }
    if api.request_timeout.is_zero() {
        return Err("request_timeout must be > 0".to_string());
    }
    if api.token_secret.trim().is_empty() {
        return Err("token_secret must not be empty".to_string());
    }
    if api.access_token_ttl.is_zero() || api.refresh_token_ttl.is_zero() {
        return Err("token ttls must be > 0".to_string());
    }
    if api.refresh_token_ttl < api.access_token_ttl {
        return Err("refresh_token_ttl must be >= access_token_ttl".to_string());
    }
    if api.carrier_base_url.trim().is_empty() {
        return Err("carrier_base_url must not be empty".to_string());
    }
    Ok(())
}
