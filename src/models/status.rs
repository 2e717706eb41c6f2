// Status views handed to callers (HTTP layer, CLI, tests).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Service health; serializes to lowercase JSON (e.g. "degraded").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Up,
    Degraded,
    Down,
}

impl ServiceStatus {
    /// Daily classification of a rounded uptime percentage.
    /// Above 99 is up, anything else above 0 is degraded, 0 is down.
    pub fn from_uptime_percent(percent: f64) -> Self {
        if percent > 99.0 {
            ServiceStatus::Up
        } else if percent > 0.0 {
            ServiceStatus::Degraded
        } else {
            ServiceStatus::Down
        }
    }
}

/// Current state of a service. Never `Degraded`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantStatus {
    pub status: ServiceStatus,
    pub observed_at: DateTime<Utc>,
}

impl InstantStatus {
    pub fn up(observed_at: DateTime<Utc>) -> Self {
        Self {
            status: ServiceStatus::Up,
            observed_at,
        }
    }

    pub fn down(observed_at: DateTime<Utc>) -> Self {
        Self {
            status: ServiceStatus::Down,
            observed_at,
        }
    }
}

/// Uptime for one UTC day, percent rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatus {
    pub date: NaiveDate,
    pub uptime_percent: f64,
    pub status: ServiceStatus,
}
