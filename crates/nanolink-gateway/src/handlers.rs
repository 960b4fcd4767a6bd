use crate::error::Result;
use crate::model::{
    AnalyticsResponse, HealthResponse, ShortenRequest, ShortenResponse, UpdateRequest,
};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use jiff::SignedDuration;
use nanolink_core::{Alias, CreateParams, UpdateParams};
use tracing::info;

/// POST /shorten
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(request): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>> {
    let alias = state.store().create(CreateParams {
        long_url: request.long_url,
        custom_alias: parse_alias(request.custom_alias)?,
        ttl: ttl_from_seconds(request.ttl_seconds),
    })?;

    info!(alias = %alias, "created alias");

    Ok(Json(ShortenResponse {
        short_url: alias.to_url(state.base_url()),
    }))
}

/// GET /{alias}
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let long_url = state.store().resolve(&alias)?;
    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]))
}

/// GET /analytics/{alias}
pub async fn analytics_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResponse>> {
    let analytics = state.store().analytics(&alias)?;

    Ok(Json(AnalyticsResponse {
        alias: analytics.alias,
        long_url: analytics.long_url,
        access_count: analytics.access_count,
        access_times: analytics
            .access_times
            .iter()
            .map(|timestamp| timestamp.to_string())
            .collect(),
    }))
}

/// PUT /update/{alias}
pub async fn update_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateRequest>,
) -> Result<impl IntoResponse> {
    state.store().update(
        &alias,
        UpdateParams {
            new_alias: parse_alias(request.custom_alias)?,
            ttl: ttl_from_seconds(request.ttl_seconds),
        },
    )?;

    info!(alias = %alias, "updated alias");
    Ok((StatusCode::OK, "URL updated\n"))
}

/// DELETE /delete/{alias}
pub async fn delete_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    state.store().delete(&alias)?;

    info!(alias = %alias, "deleted alias");
    Ok((StatusCode::OK, "URL deleted\n"))
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

fn parse_alias(alias: Option<String>) -> Result<Option<Alias>> {
    match alias.as_deref() {
        Some(s) if !s.is_empty() => Ok(Some(Alias::new(s)?)),
        _ => Ok(None),
    }
}

fn ttl_from_seconds(seconds: Option<u32>) -> Option<SignedDuration> {
    match seconds {
        None | Some(0) => None,
        Some(seconds) => Some(SignedDuration::from_secs(i64::from(seconds))),
    }
}
