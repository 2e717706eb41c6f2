use serde::{Deserialize, Serialize};

/// A monitored target: public id plus the label selector that finds its `up` series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub id: String,
    /// Label-matching expression placed inside `up{...}`, e.g. `job="redis"`.
    pub selector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ServiceDescriptor {
    pub fn new(id: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            selector: selector.into(),
            name: None,
        }
    }

    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Instant query expression: is the target currently reporting.
    pub fn up_expr(&self) -> String {
        format!("up{{{}}}", self.selector)
    }

    /// Range query expression: mean of `up` over each window of `window_secs`.
    pub fn avg_up_expr(&self, window_secs: u64) -> String {
        format!("avg_over_time(up{{{}}}[{}])", self.selector, duration_str(window_secs))
    }
}

/// Prometheus duration literal; whole hours render as `1h`, anything else in seconds.
pub(crate) fn duration_str(secs: u64) -> String {
    if secs > 0 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}s", secs)
    }
}
