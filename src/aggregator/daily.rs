// Daily rollup: pure bucketing + classification, no I/O.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};

use crate::models::{DailyStatus, DayBucket, Sample, ServiceStatus};

/// Groups samples by UTC calendar day. Buckets come back in ascending date order;
/// samples keep their input order within a bucket.
pub fn group_by_day(samples: impl IntoIterator<Item = Sample>) -> Vec<DayBucket> {
    let mut by_day: BTreeMap<NaiveDate, Vec<Sample>> = BTreeMap::new();
    for s in samples {
        let Some(ts) = DateTime::from_timestamp(s.timestamp, 0) else {
            continue;
        };
        by_day.entry(ts.date_naive()).or_default().push(s);
    }
    by_day
        .into_iter()
        .map(|(date, samples)| DayBucket { date, samples })
        .collect()
}

/// Mean uptime of a bucket as a percentage, rounded to 2 dp.
/// `None` when no sample in the bucket carries a value.
pub fn uptime_percent(bucket: &DayBucket) -> Option<f64> {
    let values: Vec<f64> = bucket.samples.iter().filter_map(|s| s.value).collect();
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(round2(mean * 100.0))
}

pub fn summarize_day(bucket: &DayBucket) -> Option<DailyStatus> {
    let uptime_percent = uptime_percent(bucket)?;
    Some(DailyStatus {
        date: bucket.date,
        uptime_percent,
        status: ServiceStatus::from_uptime_percent(uptime_percent),
    })
}

/// Full pipeline from raw samples to a date-ordered history.
pub fn daily_history(samples: impl IntoIterator<Item = Sample>) -> Vec<DailyStatus> {
    group_by_day(samples)
        .iter()
        .filter_map(summarize_day)
        .collect()
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
