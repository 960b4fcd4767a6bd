use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub long_url: String,
    /// Empty string is treated the same as absent.
    pub custom_alias: Option<String>,
    /// Zero means "use the server default".
    pub ttl_seconds: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub alias: String,
    pub long_url: String,
    pub access_count: u64,
    /// RFC 3339 timestamps, most recent first, at most ten.
    pub access_times: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub custom_alias: Option<String>,
    pub ttl_seconds: Option<u32>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
