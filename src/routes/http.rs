// JSON handlers. Response shapes match what the dashboard page consumes.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::StatusError;
use crate::models::{DailyStatus, ServiceDescriptor, ServiceStatus};
use crate::version::{NAME, SERVICE_NAME, VERSION};

impl IntoResponse for StatusError {
    fn into_response(self) -> Response {
        match self {
            StatusError::UnknownService(_) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "Service not found" })),
            )
                .into_response(),
        }
    }
}

/// GET /health — liveness only; does not touch the metrics source.
pub(super) async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVICE_NAME,
    }))
}

/// GET /version — returns package name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceView {
    pub id: String,
    pub name: String,
    pub selector: String,
}

impl From<&ServiceDescriptor> for ServiceView {
    fn from(s: &ServiceDescriptor) -> Self {
        Self {
            id: s.id.clone(),
            name: s.display_name().to_string(),
            selector: s.selector.clone(),
        }
    }
}

/// GET /api/services
pub(super) async fn services_handler(State(state): State<AppState>) -> Json<Vec<ServiceView>> {
    Json(state.aggregator.services().iter().map(ServiceView::from).collect())
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub status: ServiceStatus,
    /// Always null; kept for the dashboard's response shape.
    pub response_time: Option<u64>,
    pub observed_at: DateTime<Utc>,
}

/// GET /api/check/{service}
pub(super) async fn check_handler(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> Result<Json<CheckResponse>, StatusError> {
    let instant = state.aggregator.instant_status(&service).await?;
    Ok(Json(CheckResponse {
        status: instant.status,
        response_time: None,
        observed_at: instant.observed_at,
    }))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOverview {
    pub id: String,
    pub name: String,
    pub status: ServiceStatus,
    pub observed_at: DateTime<Utc>,
}

/// GET /api/status — instant status of every registered service, queried concurrently.
pub(super) async fn overview_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceOverview>>, StatusError> {
    let aggregator = &state.aggregator;
    let checks = aggregator
        .services()
        .iter()
        .map(|s| async move { (s, aggregator.instant_status(&s.id).await) });
    let mut out = Vec::with_capacity(aggregator.services().len());
    for (service, result) in join_all(checks).await {
        let instant = result?;
        out.push(ServiceOverview {
            id: service.id.clone(),
            name: service.display_name().to_string(),
            status: instant.status,
            observed_at: instant.observed_at,
        });
    }
    Ok(Json(out))
}

#[derive(Debug, Deserialize)]
pub(super) struct UptimeParams {
    days: Option<String>,
}

impl UptimeParams {
    /// Leading digits of `days` ("30d" reads as 30). Anything without a positive
    /// number in front (absent, "0", "-5", "abc") yields `None`, i.e. the default window.
    fn days(&self) -> Option<u32> {
        self.days.as_deref().and_then(leading_days)
    }
}

fn leading_days(raw: &str) -> Option<u32> {
    let s = raw.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    // Digit runs too long for u32 saturate; the aggregator clamps to max_days anyway.
    let days = s[..len].parse::<u32>().unwrap_or(u32::MAX);
    (days > 0).then_some(days)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyUptimeView {
    pub date: NaiveDate,
    /// Percentage formatted with two decimals, e.g. "99.50".
    pub uptime: String,
    pub status: ServiceStatus,
}

impl From<&DailyStatus> for DailyUptimeView {
    fn from(d: &DailyStatus) -> Self {
        Self {
            date: d.date,
            uptime: format!("{:.2}", d.uptime_percent),
            status: d.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UptimeResponse {
    pub history: Vec<DailyUptimeView>,
}

/// GET /api/uptime/{service}?days=N
pub(super) async fn uptime_handler(
    State(state): State<AppState>,
    Path(service): Path<String>,
    Query(params): Query<UptimeParams>,
) -> Result<Json<UptimeResponse>, StatusError> {
    let history = state.aggregator.history(&service, params.days()).await?;
    Ok(Json(UptimeResponse {
        history: history.iter().map(DailyUptimeView::from).collect(),
    }))
}
