// Settings resolution from the environment.

use serial_test::serial;
use sitebay_mcp::config::{
    API_URL_ENV, DEFAULT_API_URL, DEFAULT_HTTP_PORT, HTTP_PORT_ENV, TIMEOUT_ENV, http_bind_from_env,
};
use sitebay_mcp::{ConfigError, Settings};
use std::env;
use std::time::Duration;

#[test]
#[serial]
fn defaults_apply_when_nothing_is_set() {
    unsafe {
        env::remove_var(API_URL_ENV);
        env::remove_var(TIMEOUT_ENV);
    }
    let settings = Settings::from_env().expect("settings resolved");
    assert_eq!(settings.api_url, DEFAULT_API_URL);
    assert_eq!(settings.timeout, Duration::from_secs(30));
}

#[test]
#[serial]
fn api_url_and_timeout_are_overridable() {
    unsafe {
        env::set_var(API_URL_ENV, "https://staging.sitebay.org");
        env::set_var(TIMEOUT_ENV, "60");
    }
    let settings = Settings::from_env().expect("settings resolved");
    assert_eq!(settings.api_url, "https://staging.sitebay.org");
    assert_eq!(settings.timeout, Duration::from_secs(60));
    unsafe {
        env::remove_var(API_URL_ENV);
        env::remove_var(TIMEOUT_ENV);
    }
}

#[test]
#[serial]
fn non_numeric_timeout_is_a_configuration_error() {
    unsafe { env::set_var(TIMEOUT_ENV, "soon") };
    let result = Settings::from_env();
    assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
    unsafe { env::remove_var(TIMEOUT_ENV) };
}

#[test]
#[serial]
fn http_bind_defaults_and_rejects_bad_ports() {
    unsafe {
        env::remove_var(HTTP_PORT_ENV);
        env::remove_var("PORT");
    }
    let (host, port) = http_bind_from_env().expect("bind resolved");
    assert_eq!(host, "127.0.0.1");
    assert_eq!(port, DEFAULT_HTTP_PORT);

    unsafe { env::set_var(HTTP_PORT_ENV, "not-a-port") };
    assert!(matches!(
        http_bind_from_env(),
        Err(ConfigError::InvalidPort { .. })
    ));
    unsafe { env::remove_var(HTTP_PORT_ENV) };
}
