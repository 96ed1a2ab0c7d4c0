use std::path::Path;
use std::time::Duration;

use stock_pulse::config::Config;
use stock_pulse::notify::NotificationPermission;
use stock_pulse::poller::DEFAULT_POLL_INTERVAL;

#[test]
fn shipped_default_config_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/default.toml");
    let config = Config::from_path(&path).unwrap();
    assert_eq!(config.finnhub.default_symbol(), "DIS");
    assert_eq!(config.polling.interval(), DEFAULT_POLL_INTERVAL);
    assert_eq!(config.finnhub.request_timeout(), Duration::from_secs(10));
    assert_eq!(config.ui.refresh_rate_ms, 100);
    assert_eq!(
        config.notifications.permission,
        NotificationPermission::Default
    );
}

#[test]
fn missing_file_is_an_error() {
    let err = Config::from_path(Path::new("does/not/exist.toml")).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to read"));
}

#[test]
fn unknown_permission_is_rejected() {
    let toml_str = r#"
[finnhub]
rest_base_url = "https://finnhub.io"
default_symbol = "DIS"

[polling]
interval_secs = 30

[notifications]
permission = "maybe"

[ui]
refresh_rate_ms = 100

[logging]
level = "info"
"#;
    assert!(Config::from_toml(toml_str).is_err());
}

#[test]
fn history_size_is_not_configurable() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/default.toml");
    let shipped = std::fs::read_to_string(path).unwrap();
    assert!(!shipped.contains("history_len"));
}
