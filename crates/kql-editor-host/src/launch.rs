//! Launch parameter construction for the language server process.
//!
//! A pure mapping from a resolved executable path to the two spawn
//! configurations the controller knows about: the normal run and the
//! debug-attached run. Both speak the same length-prefixed protocol over
//! stdio; the debug variant only adds the fixed inspection flag.

use camino::{Utf8Path, Utf8PathBuf};

use kql_editor_config::DEBUG_INSPECT_PORT;

/// Transport used to reach the spawned server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Length-prefixed messages over the child's standard input/output.
    Stdio,
}

/// Everything needed to spawn the server process one way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchParams {
    /// Resolved executable path.
    pub command: Utf8PathBuf,
    /// Arguments passed to the executable.
    pub args: Vec<String>,
    /// Transport the channel is built on.
    pub transport: TransportKind,
}

/// The normal and debug spawn configurations for one resolved server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSet {
    /// Parameters for a regular run.
    pub normal: LaunchParams,
    /// Parameters for a debug-attached run.
    pub debug: LaunchParams,
}

/// Builds both launch parameter sets for the given server executable.
#[must_use]
pub fn build_launch_set(server_path: &Utf8Path) -> LaunchSet {
    LaunchSet {
        normal: LaunchParams {
            command: server_path.to_path_buf(),
            args: Vec::new(),
            transport: TransportKind::Stdio,
        },
        debug: LaunchParams {
            command: server_path.to_path_buf(),
            args: vec![format!("--inspect={DEBUG_INSPECT_PORT}")],
            transport: TransportKind::Stdio,
        },
    }
}
