//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = ParleyConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_zero_context_window() {
    let mut config = ParleyConfig::default();
    config.session.context_window = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("session.context_window"));
}

#[test]
fn catches_too_many_tool_rounds() {
    let mut config = ParleyConfig::default();
    config.session.max_tool_rounds = 50;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("session.max_tool_rounds"));
}

#[test]
fn catches_bad_base_url() {
    let mut config = ParleyConfig::default();
    config.models.gemini.base_url = "generativelanguage.googleapis.com".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("models.gemini.base_url"));
}

#[test]
fn catches_blank_credential_env() {
    let mut config = ParleyConfig::default();
    config.models.openai.credential_env = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("models.openai.credential_env"));
}

#[test]
fn catches_temperature_out_of_range() {
    let mut config = ParleyConfig::default();
    config.models.openai.temperature = 3.5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("models.openai.temperature"));
}

#[test]
fn catches_zero_timeouts() {
    let mut config = ParleyConfig::default();
    config.timeouts.backend_secs = 0;
    config.timeouts.tool_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("timeouts.backend_secs"));
    assert!(err.contains("timeouts.tool_secs"));
}

#[test]
fn disabled_tool_url_is_not_checked() {
    let mut config = ParleyConfig::default();
    config.tools.weather.enabled = false;
    config.tools.weather.base_url = String::new();
    assert!(validate(&config).is_ok());
}

#[test]
fn collects_multiple_errors() {
    let mut config = ParleyConfig::default();
    config.session.context_window = 0;
    config.tools.quote.base_url = "ftp://quotes".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("; "), "errors should be joined: {err}");
}
