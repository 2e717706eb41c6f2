// Raw time-series points as returned by the metrics source.

use chrono::NaiveDate;

/// One point of an availability series. `value` is `None` when the source
/// reported something that is not a finite number (e.g. "NaN").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: i64,
    pub value: Option<f64>,
}

impl Sample {
    /// Builds a sample, clamping the value into [0, 1] and dropping non-finite values.
    pub fn new(timestamp: i64, value: f64) -> Self {
        let value = value.is_finite().then(|| value.clamp(0.0, 1.0));
        Self { timestamp, value }
    }

    pub fn absent(timestamp: i64) -> Self {
        Self {
            timestamp,
            value: None,
        }
    }
}

/// Samples falling on one UTC calendar day, in the order they were received.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub samples: Vec<Sample>,
}
