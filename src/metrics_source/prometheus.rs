// Prometheus HTTP API client (/api/v1/query, /api/v1/query_range).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use super::{InstantPoint, Labels, MetricsError, MetricsSource, RangeSeries};
use crate::models::Sample;

/// `[<unix seconds>, "<value>"]` as Prometheus encodes every point.
type WireValue = (f64, String);

/// Response envelope shared by all query endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<ApiData>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "resultType", content = "result", rename_all = "lowercase")]
pub enum ApiData {
    Vector(Vec<VectorItem>),
    Matrix(Vec<MatrixItem>),
    Scalar(WireValue),
    String(WireValue),
}

#[derive(Debug, Deserialize)]
pub struct VectorItem {
    #[serde(default)]
    pub metric: Labels,
    pub value: WireValue,
}

#[derive(Debug, Deserialize)]
pub struct MatrixItem {
    #[serde(default)]
    pub metric: Labels,
    #[serde(default)]
    pub values: Vec<WireValue>,
}

impl From<reqwest::Error> for MetricsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            MetricsError::Timeout
        } else {
            MetricsError::Transport(e.to_string())
        }
    }
}

fn to_sample((ts, raw): &WireValue) -> Sample {
    let timestamp = ts.floor() as i64;
    match raw.parse::<f64>() {
        Ok(v) => Sample::new(timestamp, v),
        Err(_) => Sample::absent(timestamp),
    }
}

impl ApiResponse {
    fn into_data(self) -> Result<ApiData, MetricsError> {
        if self.status != "success" {
            return Err(MetricsError::Query {
                error_type: self.error_type.unwrap_or_else(|| "unknown".into()),
                error: self.error.unwrap_or_else(|| format!("status {}", self.status)),
            });
        }
        self.data
            .ok_or_else(|| MetricsError::Decode("success response without data".into()))
    }

    /// Points of an instant query. A scalar result becomes one unlabeled point.
    pub fn into_instant(self) -> Result<Vec<InstantPoint>, MetricsError> {
        match self.into_data()? {
            ApiData::Vector(items) => Ok(items
                .iter()
                .map(|i| InstantPoint {
                    labels: i.metric.clone(),
                    sample: to_sample(&i.value),
                })
                .collect()),
            ApiData::Scalar(v) => Ok(vec![InstantPoint {
                labels: Labels::new(),
                sample: to_sample(&v),
            }]),
            other => Err(MetricsError::Decode(format!(
                "expected vector result, got {}",
                other.kind()
            ))),
        }
    }

    /// Series of a range query.
    pub fn into_range(self) -> Result<Vec<RangeSeries>, MetricsError> {
        match self.into_data()? {
            ApiData::Matrix(items) => Ok(items
                .into_iter()
                .map(|i| RangeSeries {
                    samples: i.values.iter().map(to_sample).collect(),
                    labels: i.metric,
                })
                .collect()),
            other => Err(MetricsError::Decode(format!(
                "expected matrix result, got {}",
                other.kind()
            ))),
        }
    }
}

impl ApiData {
    fn kind(&self) -> &'static str {
        match self {
            ApiData::Vector(_) => "vector",
            ApiData::Matrix(_) => "matrix",
            ApiData::Scalar(_) => "scalar",
            ApiData::String(_) => "string",
        }
    }
}

pub struct PrometheusSource {
    client: Client,
    base_url: String,
}

impl PrometheusSource {
    /// `timeout` bounds each request end to end; an expired request is `MetricsError::Timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<ApiResponse, MetricsError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(params)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            // Prometheus puts errorType/error in the body of 400/422/503 replies.
            return Err(match serde_json::from_slice::<ApiResponse>(&body) {
                Ok(r) if r.status != "success" => MetricsError::Query {
                    error_type: r.error_type.unwrap_or_else(|| "unknown".into()),
                    error: r
                        .error
                        .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
                },
                _ => MetricsError::HttpStatus(status.as_u16()),
            });
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MetricsSource for PrometheusSource {
    #[instrument(skip(self), fields(source = "prometheus"))]
    async fn instant_query(&self, expr: &str) -> Result<Vec<InstantPoint>, MetricsError> {
        self.get("/api/v1/query", &[("query", expr.to_string())])
            .await?
            .into_instant()
    }

    #[instrument(skip(self), fields(source = "prometheus"))]
    async fn range_query(
        &self,
        expr: &str,
        start: i64,
        end: i64,
        step: &str,
    ) -> Result<Vec<RangeSeries>, MetricsError> {
        self.get(
            "/api/v1/query_range",
            &[
                ("query", expr.to_string()),
                ("start", start.to_string()),
                ("end", end.to_string()),
                ("step", step.to_string()),
            ],
        )
        .await?
        .into_range()
    }
}
