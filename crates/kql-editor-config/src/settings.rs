//! Activation-time settings snapshot.
//!
//! The host editor exposes its settings as a JSON document under the `kql`
//! namespace. [`Settings::from_store`] reads that document once; the snapshot
//! is immutable afterwards, so a changed setting only takes effect on the
//! next activation.

use serde::Deserialize;
use thiserror::Error;

/// Immutable snapshot of the editor settings consumed by the integration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Language server settings.
    pub lsp: LspSettings,
    /// Formatting feature toggle, consumed by the formatting provider.
    pub format: FeatureToggle,
    /// Diagnostics feature toggle, consumed by the diagnostics collaborator.
    pub diagnostics: FeatureToggle,
}

/// Settings governing whether and how the language server is launched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LspSettings {
    /// Whether the language server connection is attempted at all.
    pub enabled: bool,
    /// Explicit server executable path; empty means auto-detect.
    pub path: String,
}

/// A simple on/off feature flag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeatureToggle {
    /// Whether the feature is enabled.
    pub enabled: bool,
}

impl Default for LspSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            path: String::new(),
        }
    }
}

impl Default for FeatureToggle {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lsp: LspSettings::default(),
            format: FeatureToggle::default(),
            diagnostics: FeatureToggle::default(),
        }
    }
}

impl Settings {
    /// Reads a snapshot from the host's settings document.
    ///
    /// Unknown keys are ignored and absent keys take their defaults, so a
    /// partially populated store still yields a usable snapshot.
    pub fn from_store(store: &serde_json::Value) -> Result<Self, SettingsError> {
        Self::deserialize(store).map_err(|source| SettingsError::Malformed { source })
    }
}

/// Errors raised while reading the settings snapshot.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings document contained a value of the wrong shape.
    #[error("malformed settings document: {source}")]
    Malformed {
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}
