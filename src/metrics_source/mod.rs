// Time-series backend the aggregator reads from.
// Any failure is an `Err`; callers decide how to degrade.

mod prometheus;

pub use prometheus::{ApiData, ApiResponse, PrometheusSource};

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Sample;

/// Series labels, e.g. `{job="redis", instance="10.0.0.3:9121"}`.
pub type Labels = BTreeMap<String, String>;

/// One series' value at the instant a query was evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct InstantPoint {
    pub labels: Labels,
    pub sample: Sample,
}

/// One series over a range query window.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSeries {
    pub labels: Labels,
    pub samples: Vec<Sample>,
}

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metrics source unreachable: {0}")]
    Transport(String),

    #[error("metrics source timed out")]
    Timeout,

    #[error("metrics source returned HTTP {0}")]
    HttpStatus(u16),

    #[error("query failed ({error_type}): {error}")]
    Query { error_type: String, error: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for MetricsError {
    fn from(e: serde_json::Error) -> Self {
        MetricsError::Decode(e.to_string())
    }
}

#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Evaluates `expr` at the current time.
    async fn instant_query(&self, expr: &str) -> Result<Vec<InstantPoint>, MetricsError>;

    /// Evaluates `expr` over `[start, end]` (epoch seconds) at `step` (e.g. "1h").
    async fn range_query(
        &self,
        expr: &str,
        start: i64,
        end: i64,
        step: &str,
    ) -> Result<Vec<RangeSeries>, MetricsError>;
}
