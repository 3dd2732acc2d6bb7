//! Shared constants for the KQL editor integration.

/// Binary stem of the language server executable, without platform extension.
pub const SERVER_BINARY: &str = "kql-lsp";

/// Language identifier declared by KQL documents in the host editor.
pub const LANGUAGE_ID: &str = "kql";

/// File extension of KQL source files.
pub const FILE_EXTENSION: &str = "kql";

/// Recursive glob watched for out-of-editor edits to KQL files.
pub const FILE_WATCH_GLOB: &str = "**/*.kql";

/// Port attached to the server's inspection flag in debug launches.
pub const DEBUG_INSPECT_PORT: u16 = 6009;
