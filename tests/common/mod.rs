// Shared test helpers: scripted metrics source, fixed clock, registry fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use statuspage::aggregator::{HistoryWindow, UptimeAggregator};
use statuspage::metrics_source::{
    InstantPoint, Labels, MetricsError, MetricsSource, RangeSeries,
};
use statuspage::models::{Sample, ServiceDescriptor};
use statuspage::registry::ServiceRegistry;
use std::sync::{Arc, Mutex};

/// A query the aggregator issued, as seen by the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Instant(String),
    Range {
        expr: String,
        start: i64,
        end: i64,
        step: String,
    },
}

/// Replies with canned data; `None` means the source is unreachable.
#[derive(Default)]
pub struct ScriptedSource {
    pub instant: Option<Vec<InstantPoint>>,
    pub range: Option<Vec<RangeSeries>>,
    pub calls: Mutex<Vec<Call>>,
}

impl ScriptedSource {
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn with_instant(points: Vec<InstantPoint>) -> Self {
        Self {
            instant: Some(points),
            ..Default::default()
        }
    }

    pub fn with_range(series: Vec<RangeSeries>) -> Self {
        Self {
            range: Some(series),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetricsSource for ScriptedSource {
    async fn instant_query(&self, expr: &str) -> Result<Vec<InstantPoint>, MetricsError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Instant(expr.to_string()));
        self.instant
            .clone()
            .ok_or_else(|| MetricsError::Decode("scripted outage".into()))
    }

    async fn range_query(
        &self,
        expr: &str,
        start: i64,
        end: i64,
        step: &str,
    ) -> Result<Vec<RangeSeries>, MetricsError> {
        self.calls.lock().unwrap().push(Call::Range {
            expr: expr.to_string(),
            start,
            end,
            step: step.to_string(),
        });
        self.range
            .clone()
            .ok_or_else(|| MetricsError::HttpStatus(503))
    }
}

/// 2024-03-03T12:00:00Z
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap()
}

/// Midnight UTC of the given March 2024 day, as epoch seconds.
pub fn march_day_start(day: u32) -> i64 {
    Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0)
        .unwrap()
        .timestamp()
}

pub fn labels(pairs: &[(&str, &str)]) -> Labels {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn point(job: &str, value: f64) -> InstantPoint {
    InstantPoint {
        labels: labels(&[("job", job)]),
        sample: Sample::new(fixed_now().timestamp(), value),
    }
}

/// 24 hourly samples starting at `day_start`, values taken from `value_at(hour)`.
pub fn hourly_day(day_start: i64, value_at: impl Fn(i64) -> f64) -> Vec<Sample> {
    (0..24)
        .map(|h| Sample::new(day_start + h * 3600, value_at(h)))
        .collect()
}

pub fn series(job: &str, samples: Vec<Sample>) -> RangeSeries {
    RangeSeries {
        labels: labels(&[("job", job)]),
        samples,
    }
}

pub fn test_registry() -> Arc<ServiceRegistry> {
    Arc::new(
        ServiceRegistry::new(vec![
            ServiceDescriptor::new("redis", r#"job="redis""#),
            ServiceDescriptor {
                id: "postgresql".into(),
                selector: r#"job="postgresql""#.into(),
                name: Some("PostgreSQL".into()),
            },
        ])
        .unwrap(),
    )
}

pub fn test_aggregator(source: Arc<ScriptedSource>) -> UptimeAggregator {
    UptimeAggregator::new(test_registry(), source, HistoryWindow::default())
        .with_clock(Arc::new(fixed_now))
}
