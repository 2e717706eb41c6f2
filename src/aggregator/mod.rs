// Uptime aggregator: service id -> metrics queries -> status views.
// Metrics failures never escape; they degrade to Down / empty history.

pub mod daily;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use crate::error::StatusError;
use crate::metrics_source::{InstantPoint, MetricsSource};
use crate::models::{DailyStatus, InstantStatus, ServiceDescriptor};
use crate::registry::ServiceRegistry;

/// Range query step and averaging window.
pub const HISTORY_STEP_SECS: u64 = 3600;
pub const SECS_PER_DAY: i64 = 86_400;

pub const DEFAULT_HISTORY_DAYS: u32 = 90;
pub const DEFAULT_MAX_HISTORY_DAYS: u32 = 365;

/// Source of "now"; swapped out in tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// History window sizes, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    pub default_days: u32,
    pub max_days: u32,
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self {
            default_days: DEFAULT_HISTORY_DAYS,
            max_days: DEFAULT_MAX_HISTORY_DAYS,
        }
    }
}

impl HistoryWindow {
    /// Caller-supplied window clamped to `max_days`; absent or 0 means the default.
    pub fn resolve(&self, days: Option<u32>) -> u32 {
        match days {
            Some(d) if d > 0 => d.min(self.max_days),
            _ => self.default_days,
        }
    }
}

pub struct UptimeAggregator {
    registry: Arc<ServiceRegistry>,
    source: Arc<dyn MetricsSource>,
    window: HistoryWindow,
    clock: Clock,
}

impl UptimeAggregator {
    pub fn new(
        registry: Arc<ServiceRegistry>,
        source: Arc<dyn MetricsSource>,
        window: HistoryWindow,
    ) -> Self {
        Self {
            registry,
            source,
            window,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn services(&self) -> &[ServiceDescriptor] {
        self.registry.services()
    }

    /// Current up/down state. Missing data or an unreachable source reads as Down.
    #[instrument(skip(self), fields(operation = "instant_status"))]
    pub async fn instant_status(&self, service_id: &str) -> Result<InstantStatus, StatusError> {
        let service = self.registry.resolve(service_id)?;
        let observed_at = (self.clock)();
        let points = match self.source.instant_query(&service.up_expr()).await {
            Ok(p) => p,
            Err(e) => {
                warn!(service = %service.id, error = %e, "instant query failed; reporting down");
                return Ok(InstantStatus::down(observed_at));
            }
        };
        if points_all_up(&points) {
            Ok(InstantStatus::up(observed_at))
        } else {
            debug!(service = %service.id, points = points.len(), "target not reporting up");
            Ok(InstantStatus::down(observed_at))
        }
    }

    /// Daily uptime over the last `window_days` (default window when `None`).
    pub async fn history(
        &self,
        service_id: &str,
        window_days: Option<u32>,
    ) -> Result<Vec<DailyStatus>, StatusError> {
        let now = (self.clock)();
        self.history_until(service_id, window_days, now).await
    }

    /// Same as [`history`](Self::history) with an explicit end of window.
    #[instrument(skip(self), fields(operation = "history"))]
    pub async fn history_until(
        &self,
        service_id: &str,
        window_days: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<Vec<DailyStatus>, StatusError> {
        let service = self.registry.resolve(service_id)?;
        let days = self.window.resolve(window_days);

        let end = now.timestamp();
        let start = end - i64::from(days) * SECS_PER_DAY;
        let step = crate::models::duration_str(HISTORY_STEP_SECS);
        let expr = service.avg_up_expr(HISTORY_STEP_SECS);

        let series = match self.source.range_query(&expr, start, end, &step).await {
            Ok(s) => s,
            Err(e) => {
                warn!(service = %service.id, error = %e, "range query failed; empty history");
                return Ok(Vec::new());
            }
        };
        let history = daily::daily_history(series.into_iter().flat_map(|s| s.samples));
        debug!(service = %service.id, days, entries = history.len(), "history computed");
        Ok(history)
    }
}

/// Up only if at least one point came back and every point reads exactly 1.
pub fn points_all_up(points: &[InstantPoint]) -> bool {
    !points.is_empty() && points.iter().all(|p| p.sample.value == Some(1.0))
}
