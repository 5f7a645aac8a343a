//! Validation for each config section.

use parley_common::BackendKind;

use crate::schema::ParleyConfig;

use super::helpers::{validate_http_url, validate_not_blank, validate_range, validate_range_f64};

/// Validate session constraints.
pub(crate) fn validate_session(errors: &mut Vec<String>, config: &ParleyConfig) {
    validate_range(
        errors,
        "session.context_window",
        config.session.context_window,
        1,
        200,
    );
    validate_range(
        errors,
        "session.max_tool_rounds",
        config.session.max_tool_rounds,
        1,
        20,
    );
}

/// Validate every backend section, not only the active one.
pub(crate) fn validate_models(errors: &mut Vec<String>, config: &ParleyConfig) {
    for kind in BackendKind::ALL {
        let section = match kind {
            BackendKind::Gpt4o => "models.openai",
            BackendKind::GeminiFlash => "models.gemini",
        };
        let settings = config.models.settings(kind);
        validate_not_blank(errors, &format!("{section}.model"), &settings.model);
        validate_not_blank(
            errors,
            &format!("{section}.credential_env"),
            &settings.credential_env,
        );
        validate_http_url(errors, &format!("{section}.base_url"), &settings.base_url);
        validate_range(
            errors,
            &format!("{section}.max_tokens"),
            settings.max_tokens,
            1,
            65536,
        );
        validate_range_f64(
            errors,
            &format!("{section}.temperature"),
            settings.temperature,
            0.0,
            2.0,
        );
    }
}

/// Validate timeout constraints.
pub(crate) fn validate_timeouts(errors: &mut Vec<String>, config: &ParleyConfig) {
    validate_range(
        errors,
        "timeouts.backend_secs",
        config.timeouts.backend_secs,
        1,
        300,
    );
    validate_range(errors, "timeouts.tool_secs", config.timeouts.tool_secs, 1, 300);
}

/// Validate tool endpoints.
pub(crate) fn validate_tools(errors: &mut Vec<String>, config: &ParleyConfig) {
    if config.tools.weather.enabled {
        validate_http_url(errors, "tools.weather.base_url", &config.tools.weather.base_url);
    }
    if config.tools.quote.enabled {
        validate_http_url(errors, "tools.quote.base_url", &config.tools.quote.base_url);
    }
}
