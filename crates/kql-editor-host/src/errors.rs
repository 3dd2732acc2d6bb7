//! Error types surfaced by the client lifecycle controller.

use std::io;

use thiserror::Error;

use crate::jsonrpc::JsonRpcError;

/// Transport-layer errors on the server's stdio channel.
#[derive(Debug, Error)]
pub enum TransportError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Missing Content-Length header.
    #[error("missing Content-Length header")]
    MissingContentLength,

    /// Invalid header format.
    #[error("invalid header format")]
    InvalidHeader,
}

/// Errors raised while managing the language server process and session.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The language server binary was not found at spawn time.
    #[error("language server binary not found: {command}")]
    BinaryNotFound {
        /// The command that was not found.
        command: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to spawn the language server process.
    #[error("failed to spawn language server process: {message}")]
    SpawnFailed {
        /// Description of the spawn failure.
        message: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Transport-level I/O error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// JSON serialization/deserialization error.
    #[error("JSON codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The server returned an error response.
    #[error("server returned error: {message} (code: {code})")]
    ServerError {
        /// The JSON-RPC error code.
        code: i64,
        /// The error message from the server.
        message: String,
    },

    /// The initialize handshake failed.
    #[error("handshake failed: {message}")]
    HandshakeFailed {
        /// Description of the handshake failure.
        message: String,
    },

    /// No matching response arrived within the bounded message window.
    #[error("no response for request {request_id} within the message window")]
    ResponseNotReceived {
        /// Identifier of the request that went unanswered.
        request_id: i64,
    },
}

impl ConnectionError {
    /// Creates a server error from a JSON-RPC error object.
    #[must_use]
    pub fn from_jsonrpc(error: JsonRpcError) -> Self {
        Self::ServerError {
            code: error.code,
            message: error.message,
        }
    }
}

/// Errors raised by the [`crate::LanguageClient`] lifecycle operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// `start` was called on a client that is already started.
    #[error("language client is already started")]
    AlreadyStarted,

    /// `stop` was called on a client that was never started.
    #[error("language client was never started")]
    NotStarted,

    /// The client has already been stopped; there is no restart transition.
    #[error("language client is stopped and cannot be restarted")]
    Stopped,

    /// The underlying connection failed.
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}
