//! UI configuration, optionally embedded in the page as JSON.
//!
//! The page may carry `<script id="ui-config" type="application/json">` with
//! any subset of the fields below; everything else falls back to defaults.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UiError;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const CONFIG_ELEMENT_ID: &str = "ui-config";

pub const DEFAULT_STORAGE_KEY: &str = "theme";
pub const DEFAULT_TOGGLE_ID: &str = "theme-toggle";
pub const DEFAULT_THEME_ATTRIBUTE: &str = "data-theme";
pub const DEFAULT_TRANSITION: &str = "background-color 0.3s ease, color 0.3s ease";

pub const DEFAULT_FEEDBACK_MS: u32 = 2000;
pub const DEFAULT_FEEDBACK_HTML: &str = r#"<i class="bi bi-check-circle"></i> Copied!"#;
pub const DEFAULT_SUCCESS_CLASS: &str = "btn-success";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to copy to clipboard";

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// `localStorage` key holding the preference.
    pub storage_key: String,
    /// Element id of the toggle control.
    pub toggle_id: String,
    /// Attribute set on `<html>`.
    pub attribute: String,
    /// CSS applied to `<body>` on toggle.
    pub transition: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            toggle_id: DEFAULT_TOGGLE_ID.to_string(),
            attribute: DEFAULT_THEME_ATTRIBUTE.to_string(),
            transition: DEFAULT_TRANSITION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClipboardConfig {
    /// Delay before the button is restored.
    pub feedback_ms: u32,
    pub feedback_html: String,
    pub success_class: String,
    /// Alert text when every copy path fails.
    pub failure_message: String,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            feedback_ms: DEFAULT_FEEDBACK_MS,
            feedback_html: DEFAULT_FEEDBACK_HTML.to_string(),
            success_class: DEFAULT_SUCCESS_CLASS.to_string(),
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    pub theme: ThemeConfig,
    pub clipboard: ClipboardConfig,
    /// Console log level: `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeConfig::default(),
            clipboard: ClipboardConfig::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl UiConfig {
    /// Parse and validate a JSON config blob.
    pub fn from_json(raw: &str) -> Result<Self, UiError> {
        let config: Self = serde_json::from_str(raw).map_err(|e| UiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that would break the DOM contract.
    pub fn validate(&self) -> Result<(), UiError> {
        require_non_empty("theme.storage_key", &self.theme.storage_key)?;
        require_non_empty("theme.toggle_id", &self.theme.toggle_id)?;
        require_non_empty("theme.attribute", &self.theme.attribute)?;
        self.level()?;
        Ok(())
    }

    /// The configured console log level.
    pub fn level(&self) -> Result<log::Level, UiError> {
        log::Level::from_str(self.log_level.trim())
            .map_err(|_| UiError::Config(format!("unknown log_level: {}", self.log_level)))
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), UiError> {
    if value.trim().is_empty() {
        return Err(UiError::Config(format!("{field} must not be empty")));
    }
    Ok(())
}
