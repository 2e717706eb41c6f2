// Config loading and validation tests

use statuspage::aggregator::HistoryWindow;
use statuspage::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 3000
host = "0.0.0.0"

[prometheus]
url = "http://prometheus.monitoring.svc.cluster.local:9090"
timeout_ms = 3000

[history]
default_days = 90
max_days = 180

[[services]]
id = "redis"
selector = 'job="redis"'
name = "Redis"

[[services]]
id = "kafka"
selector = 'job="kafka"'
"#;

const MINIMAL_CONFIG: &str = r#"
[server]
port = 3000
host = "0.0.0.0"

[prometheus]
url = "http://localhost:9090"

[[services]]
id = "redis"
selector = 'job="redis"'
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert!(config.server.static_dir.is_none());
    assert_eq!(config.prometheus.timeout_ms, 3000);
    assert_eq!(config.history.max_days, 180);
    assert_eq!(config.services.len(), 2);
    assert_eq!(config.services[0].selector, r#"job="redis""#);
    assert_eq!(config.services[0].display_name(), "Redis");
    assert_eq!(config.services[1].display_name(), "kafka");
}

#[test]
fn test_config_defaults_when_omitted() {
    let config = AppConfig::load_from_str(MINIMAL_CONFIG).expect("valid");
    assert_eq!(config.prometheus.timeout_ms, 5000);
    assert_eq!(config.history.default_days, 90);
    assert_eq!(config.history.max_days, 365);
    assert_eq!(HistoryWindow::from(&config.history), HistoryWindow::default());
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 3000", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_non_http_url() {
    let bad = VALID_CONFIG.replace(
        "http://prometheus.monitoring.svc.cluster.local:9090",
        "prometheus:9090",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("prometheus.url"));
}

#[test]
fn test_config_validation_rejects_timeout_zero() {
    let bad = VALID_CONFIG.replace("timeout_ms = 3000", "timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("timeout_ms"));
}

#[test]
fn test_config_validation_rejects_default_days_zero() {
    let bad = VALID_CONFIG.replace("default_days = 90", "default_days = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("default_days"));
}

#[test]
fn test_config_validation_rejects_max_below_default() {
    let bad = VALID_CONFIG.replace("max_days = 180", "max_days = 30");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_days"));
}

#[test]
fn test_config_validation_rejects_no_services() {
    let bad = r#"
[server]
port = 3000
host = "0.0.0.0"

[prometheus]
url = "http://localhost:9090"
"#;
    let err = AppConfig::load_from_str(bad).unwrap_err();
    assert!(err.to_string().contains("services"));
}

#[test]
fn test_config_validation_rejects_empty_selector() {
    let bad = VALID_CONFIG.replace(r#"selector = 'job="kafka"'"#, "selector = ''");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("selector"));
}

#[test]
fn test_config_validation_rejects_duplicate_ids() {
    let bad = VALID_CONFIG.replace(r#"id = "kafka""#, r#"id = "redis""#);
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("unique"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_overrides_port_and_url() {
    let mut config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    config
        .apply_overrides(|key| match key {
            "PORT" => Some("8080".into()),
            "PROMETHEUS_URL" => Some("http://127.0.0.1:9090".into()),
            _ => None,
        })
        .unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.prometheus.url, "http://127.0.0.1:9090");
}

#[test]
fn test_config_override_rejects_bad_port() {
    let mut config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    let err = config
        .apply_overrides(|key| (key == "PORT").then(|| "eighty".to_string()))
        .unwrap_err();
    assert!(err.to_string().contains("PORT"));
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();

    // Pin the override variables so the ambient environment cannot leak in.
    let saved: Vec<(&str, Option<String>)> = ["PORT", "PROMETHEUS_URL"]
        .into_iter()
        .map(|k| (k, std::env::var(k).ok()))
        .collect();
    unsafe {
        std::env::set_var("CONFIG_FILE", path.to_str().unwrap());
        std::env::set_var("PORT", "4000");
        std::env::remove_var("PROMETHEUS_URL");
    }
    let result = AppConfig::load();
    unsafe {
        std::env::remove_var("CONFIG_FILE");
        for (key, value) in &saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }

    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.services.len(), 2);
    assert_eq!(config.history.default_days, 90);
    assert_eq!(config.server.port, 4000);
    assert_eq!(
        config.prometheus.url,
        "http://prometheus.monitoring.svc.cluster.local:9090"
    );
}
