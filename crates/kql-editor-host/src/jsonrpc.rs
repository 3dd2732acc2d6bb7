//! JSON-RPC 2.0 message types for the server channel.
//!
//! The controller only needs the lifecycle methods (`initialize`,
//! `initialized`, `shutdown`, `exit`); semantic protocol messages stay with
//! the server side, so the types here carry raw [`serde_json::Value`]
//! payloads rather than typed parameters.

use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

static REQUEST_ID: AtomicI64 = AtomicI64::new(1);

/// Returns the next process-wide request identifier.
///
/// Identifiers are monotonically increasing and thread-safe.
#[must_use]
pub fn next_request_id() -> i64 {
    REQUEST_ID.fetch_add(1, Ordering::SeqCst)
}

/// An outgoing JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// Protocol version, always "2.0".
    pub jsonrpc: &'static str,
    /// Unique request identifier.
    pub id: i64,
    /// The method to invoke.
    pub method: String,
    /// Optional parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl Request {
    /// Builds a request with an auto-generated identifier.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id: next_request_id(),
            method: method.into(),
            params,
        }
    }
}

/// An outgoing JSON-RPC 2.0 notification (no response expected).
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Protocol version, always "2.0".
    pub jsonrpc: &'static str,
    /// The method to invoke.
    pub method: String,
    /// Optional parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl Notification {
    /// Builds a notification.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
        }
    }
}

/// An incoming JSON-RPC 2.0 response.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// Request identifier this response corresponds to.
    pub id: Option<i64>,
    /// The result on success.
    #[serde(default)]
    pub result: Option<Value>,
    /// The error on failure.
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional data.
    #[serde(default)]
    pub data: Option<Value>,
}

/// Classification of a message read from the server.
#[derive(Debug)]
pub enum Incoming {
    /// A response to a client request.
    Response(Response),
    /// A server-initiated request (carries an id and a method).
    ServerRequest {
        /// Request identifier chosen by the server.
        id: i64,
        /// Requested method.
        method: String,
    },
    /// A server notification (method without an id).
    Notification {
        /// Notification method.
        method: String,
    },
}

impl Incoming {
    /// Classifies raw message bytes into a response, server request, or
    /// notification.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(default)]
            id: Option<i64>,
            #[serde(default)]
            method: Option<String>,
        }

        let probe: Probe = serde_json::from_slice(bytes)?;
        match (probe.id, probe.method) {
            (Some(id), Some(method)) => Ok(Self::ServerRequest { id, method }),
            (None, Some(method)) => Ok(Self::Notification { method }),
            (_, None) => serde_json::from_slice(bytes).map(Self::Response),
        }
    }
}
