//! Configuration surface for the KQL editor integration.
#![deny(missing_docs)]
//!
//! The crate owns the activation-time settings snapshot and the shared
//! constants (server binary stem, language identifier, watch glob) that the
//! controller crate consumes. Settings are read once per activation from the
//! host editor's settings store; configuration changes take effect on the
//! next activation only.

mod defaults;
mod settings;

pub use defaults::{
    DEBUG_INSPECT_PORT, FILE_EXTENSION, FILE_WATCH_GLOB, LANGUAGE_ID, SERVER_BINARY,
};
pub use settings::{Settings, SettingsError};
