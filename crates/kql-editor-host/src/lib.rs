//! Language client lifecycle controller for the KQL editor integration.
#![deny(missing_docs)]
//!
//! The crate locates the separately-built `kql-lsp` executable, launches it
//! as a child process speaking JSON-RPC over stdio, and owns the one client
//! session an activation may create. Editor specifics stay behind the
//! [`EditorHost`] trait and process specifics behind [`ServerConnection`],
//! so higher layers and tests can inject lightweight implementations
//! without spawning real servers.

mod activation;
mod client;
mod commands;
mod connection;
mod errors;
mod host;
mod jsonrpc;
mod launch;
mod resolver;
mod transport;

#[cfg(test)]
mod tests;

pub use activation::{ControllerState, activate, deactivate};
pub use client::{ClientState, DocumentScheme, DocumentSelector, LanguageClient, WatchPattern};
pub use commands::{CommandId, execute, register_all};
pub use connection::{
    ConnectionFactory, ProcessConnection, ProcessConnectionFactory, ServerConnection,
};
pub use errors::{ClientError, ConnectionError, TransportError};
pub use host::{ActiveDocument, EditorHost};
pub use launch::{LaunchParams, LaunchSet, TransportKind, build_launch_set};
pub use resolver::{FileSystemProbe, PathProbe, Platform, SearchRoots, candidate_paths, resolve};
