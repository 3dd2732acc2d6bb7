//! Process-backed server connection.
//!
//! [`ProcessConnection`] spawns the resolved `kql-lsp` executable, runs the
//! `initialize`/`initialized` handshake over the stdio transport, and tears
//! the session down with `shutdown` + `exit` followed by a bounded grace
//! period before the child is killed. The [`ServerConnection`] and
//! [`ConnectionFactory`] traits are the seams the activation controller and
//! the tests plug into.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread;
use std::time::Duration;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::errors::ConnectionError;
use crate::jsonrpc::{Incoming, Notification, Request, Response};
use crate::launch::LaunchParams;
use crate::transport::StdioTransport;

const CONNECTION_TARGET: &str = "kql_editor_host::connection";

/// Upper bound on interleaved messages scanned while waiting for a response.
const MAX_MESSAGE_WINDOW: usize = 100;

/// Grace period granted before a lingering child is killed.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// Transport over the child's stdio pipes.
type ProcessTransport = StdioTransport<BufReader<ChildStdout>, BufWriter<ChildStdin>>;

/// One bidirectional session with the language server.
pub trait ServerConnection {
    /// Spawns the server and completes the protocol handshake.
    fn open(&mut self) -> Result<(), ConnectionError>;

    /// Requests graceful shutdown and releases the subprocess.
    fn close(&mut self) -> Result<(), ConnectionError>;
}

/// Builds connections from launch parameters.
pub trait ConnectionFactory {
    /// Creates an unopened connection for the given launch parameters.
    fn connect(&self, params: &LaunchParams) -> Box<dyn ServerConnection>;
}

/// Factory producing real process-backed connections.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessConnectionFactory;

impl ConnectionFactory for ProcessConnectionFactory {
    fn connect(&self, params: &LaunchParams) -> Box<dyn ServerConnection> {
        Box::new(ProcessConnection::new(params.clone()))
    }
}

enum ChannelState {
    Closed,
    Open {
        child: Child,
        transport: ProcessTransport,
    },
    Shut,
}

/// Connection backed by a spawned `kql-lsp` child process.
pub struct ProcessConnection {
    params: LaunchParams,
    state: ChannelState,
}

impl ProcessConnection {
    /// Creates an unopened connection for the given launch parameters.
    #[must_use]
    pub const fn new(params: LaunchParams) -> Self {
        Self {
            params,
            state: ChannelState::Closed,
        }
    }

    fn spawn(&self) -> Result<(Child, ProcessTransport), ConnectionError> {
        debug!(
            target: CONNECTION_TARGET,
            command = %self.params.command,
            args = ?self.params.args,
            "spawning language server process"
        );

        let mut command = Command::new(self.params.command.as_std_path());
        command
            .args(&self.params.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        let mut child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConnectionError::BinaryNotFound {
                    command: self.params.command.to_string(),
                    source: e,
                }
            } else {
                ConnectionError::SpawnFailed {
                    message: format!("failed to start {}", self.params.command),
                    source: e,
                }
            }
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ConnectionError::SpawnFailed {
                message: "failed to capture stdin".to_string(),
                source: std::io::Error::other("no stdin"),
            })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ConnectionError::SpawnFailed {
                message: "failed to capture stdout".to_string(),
                source: std::io::Error::other("no stdout"),
            })?;

        debug!(
            target: CONNECTION_TARGET,
            pid = child.id(),
            "language server process spawned"
        );

        let transport = StdioTransport::new(BufReader::new(stdout), BufWriter::new(stdin));
        Ok((child, transport))
    }

    fn handshake(transport: &mut ProcessTransport) -> Result<(), ConnectionError> {
        let params = json!({
            "processId": std::process::id(),
            "clientInfo": {
                "name": "kql-editor",
                "version": env!("CARGO_PKG_VERSION"),
            },
            "capabilities": {},
        });

        let response = send_request(transport, "initialize", params)?;
        if response.result.is_none() {
            return Err(ConnectionError::HandshakeFailed {
                message: "initialize returned an empty result".to_string(),
            });
        }

        send_notification(transport, "initialized", json!({}))?;
        debug!(target: CONNECTION_TARGET, "handshake completed");
        Ok(())
    }
}

impl ServerConnection for ProcessConnection {
    fn open(&mut self) -> Result<(), ConnectionError> {
        let (mut child, mut transport) = self.spawn()?;
        // The child is not in `state` yet, so a handshake failure must reap
        // it here; nothing else holds a handle to it.
        if let Err(error) = Self::handshake(&mut transport) {
            reap_child(&mut child);
            return Err(error);
        }
        self.state = ChannelState::Open { child, transport };
        Ok(())
    }

    fn close(&mut self) -> Result<(), ConnectionError> {
        let ChannelState::Open {
            mut child,
            mut transport,
        } = std::mem::replace(&mut self.state, ChannelState::Shut)
        else {
            debug!(
                target: CONNECTION_TARGET,
                "close requested on a connection that is not open"
            );
            return Ok(());
        };

        if let Err(e) = send_request(&mut transport, "shutdown", Value::Null) {
            debug!(
                target: CONNECTION_TARGET,
                error = ?e,
                "shutdown request failed"
            );
        }
        if let Err(e) = send_notification(&mut transport, "exit", Value::Null) {
            debug!(
                target: CONNECTION_TARGET,
                error = ?e,
                "exit notification failed"
            );
        }

        terminate_child(&mut child);
        Ok(())
    }
}

impl Drop for ProcessConnection {
    fn drop(&mut self) {
        if let ChannelState::Open { mut child, .. } =
            std::mem::replace(&mut self.state, ChannelState::Shut)
        {
            reap_child(&mut child);
        }
    }
}

/// Kills and waits on a child that will never be closed gracefully.
fn reap_child(child: &mut Child) {
    if let Err(e) = child.kill() {
        warn!(
            target: CONNECTION_TARGET,
            error = %e,
            "failed to kill language server process"
        );
    }
    let _ = child.wait();
}

impl std::fmt::Debug for ProcessConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            ChannelState::Closed => "closed".to_string(),
            ChannelState::Open { child, .. } => format!("open (pid: {})", child.id()),
            ChannelState::Shut => "shut".to_string(),
        };
        f.debug_struct("ProcessConnection")
            .field("command", &self.params.command)
            .field("state", &state)
            .finish()
    }
}

fn send_request<R: BufRead, W: Write>(
    transport: &mut StdioTransport<R, W>,
    method: &str,
    params: Value,
) -> Result<Response, ConnectionError> {
    let request = Request::new(method, Some(params));
    let request_id = request.id;
    let payload = serde_json::to_vec(&request)?;

    debug!(
        target: CONNECTION_TARGET,
        method,
        id = request_id,
        "sending request"
    );

    transport.send(&payload)?;
    let response = receive_response_for(transport, request_id)?;

    if let Some(error) = response.error {
        return Err(ConnectionError::from_jsonrpc(error));
    }
    Ok(response)
}

fn send_notification<R: BufRead, W: Write>(
    transport: &mut StdioTransport<R, W>,
    method: &str,
    params: Value,
) -> Result<(), ConnectionError> {
    let notification = Notification::new(method, Some(params));
    let payload = serde_json::to_vec(&notification)?;

    debug!(target: CONNECTION_TARGET, method, "sending notification");

    transport.send(&payload)?;
    Ok(())
}

/// Reads messages until the response matching `request_id` arrives.
///
/// Interleaved server notifications and server-initiated requests are skipped
/// with a log line; the scan is bounded so a chatty server cannot stall the
/// handshake forever.
fn receive_response_for<R: BufRead, W: Write>(
    transport: &mut StdioTransport<R, W>,
    request_id: i64,
) -> Result<Response, ConnectionError> {
    for _ in 0..MAX_MESSAGE_WINDOW {
        let bytes = transport.receive()?;
        match Incoming::from_bytes(&bytes)? {
            Incoming::Response(response) => {
                if response.id == Some(request_id) {
                    return Ok(response);
                }
                warn!(
                    target: CONNECTION_TARGET,
                    expected = request_id,
                    received = ?response.id,
                    "skipping response with non-matching id"
                );
            }
            Incoming::ServerRequest { id, method } => {
                warn!(
                    target: CONNECTION_TARGET,
                    method = %method,
                    id,
                    "ignoring server-initiated request"
                );
            }
            Incoming::Notification { method } => {
                debug!(
                    target: CONNECTION_TARGET,
                    method = %method,
                    "skipping server notification"
                );
            }
        }
    }

    warn!(
        target: CONNECTION_TARGET,
        request_id,
        window = MAX_MESSAGE_WINDOW,
        "giving up on response after exhausting the message window"
    );
    Err(ConnectionError::ResponseNotReceived { request_id })
}

/// Waits for the child to exit, killing it after the grace period.
fn terminate_child(child: &mut Child) {
    match child.try_wait() {
        Ok(Some(status)) => {
            debug!(target: CONNECTION_TARGET, ?status, "language server exited");
        }
        Ok(None) => {
            warn!(
                target: CONNECTION_TARGET,
                "language server did not exit, waiting before killing"
            );
            wait_then_kill(child);
        }
        Err(e) => {
            warn!(
                target: CONNECTION_TARGET,
                error = %e,
                "failed to check process status, waiting before killing"
            );
            wait_then_kill(child);
        }
    }
}

fn wait_then_kill(child: &mut Child) {
    thread::sleep(SHUTDOWN_GRACE);
    match child.try_wait() {
        Ok(Some(status)) => {
            debug!(
                target: CONNECTION_TARGET,
                ?status,
                "language server exited during grace period"
            );
        }
        Ok(None) | Err(_) => {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
