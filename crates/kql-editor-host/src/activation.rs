//! Activation and deactivation entry points.
//!
//! `activate` runs once per host-process session: it reads the settings
//! snapshot, resolves the server binary, and — only when a usable path
//! exists — builds and starts the language client before registering the
//! command surface. The session handle is an explicit [`ControllerState`]
//! value owned by the host's activation/deactivation calls, so the
//! one-session-per-activation invariant is carried by the type rather than
//! by a module-level global.

use tracing::{info, warn};

use kql_editor_config::Settings;

use crate::client::{DocumentSelector, LanguageClient, WatchPattern};
use crate::commands;
use crate::connection::ConnectionFactory;
use crate::host::EditorHost;
use crate::launch::build_launch_set;
use crate::resolver::{PathProbe, Platform, SearchRoots, resolve};

const ACTIVATION_TARGET: &str = "kql_editor_host::activation";

/// Lifecycle of the controller across one activation.
#[derive(Debug)]
pub enum ControllerState {
    /// No session was created (disabled, or no usable server).
    Idle,
    /// A session is live.
    Running(LanguageClient),
    /// The session was stopped during deactivation.
    Stopped,
}

impl ControllerState {
    /// Whether a session is currently live.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }
}

/// Activates the integration and returns the resulting controller state.
///
/// Failures are reported through the host surface rather than propagated:
/// a missing server yields exactly one dismissible warning, and a client
/// start failure yields one error notification. In both cases the result is
/// [`ControllerState::Idle`] and no commands are registered. Activation
/// returning does not imply the server finished its handshake-side work;
/// callers must not order document events against readiness.
pub fn activate<H: EditorHost>(
    settings: &Settings,
    roots: &SearchRoots,
    platform: Platform,
    probe: &dyn PathProbe,
    factory: &dyn ConnectionFactory,
    host: &mut H,
) -> ControllerState {
    if !settings.lsp.enabled {
        info!(
            target: ACTIVATION_TARGET,
            "language server disabled by configuration"
        );
        return ControllerState::Idle;
    }

    let resolved = resolve(&settings.lsp.path, roots, platform, probe);

    // Single uniform existence check for both the override and the fallback.
    let server_path = match resolved {
        Some(path) if probe.exists(&path) => path,
        Some(_) | None => {
            host.show_warning(
                "kql-lsp server not found. Install it with `cargo install kql-lsp`, \
                 or point the kql.lsp.path setting at an existing binary.",
            );
            return ControllerState::Idle;
        }
    };

    info!(
        target: ACTIVATION_TARGET,
        path = %server_path,
        "starting KQL language server"
    );

    let launch = build_launch_set(&server_path);
    let connection = factory.connect(&launch.normal);
    let mut client = LanguageClient::new(connection, DocumentSelector::kql(), WatchPattern::kql());

    if let Err(error) = client.start() {
        host.show_error(&format!("failed to start the KQL language server: {error}"));
        return ControllerState::Idle;
    }

    commands::register_all(host);
    ControllerState::Running(client)
}

/// Tears down the activation, stopping the session only if one is live.
///
/// Idle and already-stopped states pass through unchanged, so the call site
/// never needs its own existence check.
pub fn deactivate(state: ControllerState) -> ControllerState {
    match state {
        ControllerState::Running(mut client) => {
            if let Err(error) = client.stop() {
                warn!(
                    target: ACTIVATION_TARGET,
                    error = %error,
                    "language client shutdown failed"
                );
            }
            ControllerState::Stopped
        }
        other => other,
    }
}
