//! Language client wrapper around a server connection.
//!
//! The client pairs a [`ServerConnection`] with the document selector and
//! file watch that scope protocol participation to KQL documents. Its state
//! machine is one-directional: `NotStarted -> Started -> Stopped`, with no
//! restart transition. Calling `start` twice, or `stop` before `start`, is
//! an explicit error rather than undefined behaviour.

use tracing::{debug, info};

use kql_editor_config::{FILE_WATCH_GLOB, LANGUAGE_ID};

use crate::connection::ServerConnection;
use crate::errors::ClientError;

const CLIENT_TARGET: &str = "kql_editor_host::client";

/// Source a document was opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentScheme {
    /// A document persisted on disk.
    File,
    /// An unsaved, untitled buffer.
    Untitled,
}

/// Predicate deciding which open documents participate in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSelector {
    language_id: String,
    schemes: Vec<DocumentScheme>,
}

impl DocumentSelector {
    /// Selector for KQL documents from both saved and untitled sources.
    #[must_use]
    pub fn kql() -> Self {
        Self {
            language_id: LANGUAGE_ID.to_string(),
            schemes: vec![DocumentScheme::File, DocumentScheme::Untitled],
        }
    }

    /// The language identifier this selector accepts.
    #[must_use]
    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    /// Whether a document with the given language id and scheme participates.
    #[must_use]
    pub fn matches(&self, language_id: &str, scheme: DocumentScheme) -> bool {
        self.language_id == language_id && self.schemes.contains(&scheme)
    }
}

/// Recursive glob watched so out-of-editor edits still reach the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchPattern(String);

impl WatchPattern {
    /// The watch pattern covering KQL source files.
    #[must_use]
    pub fn kql() -> Self {
        Self(FILE_WATCH_GLOB.to_string())
    }

    /// The glob expression.
    #[must_use]
    pub fn glob(&self) -> &str {
        &self.0
    }
}

/// Lifecycle state of the client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// `start` has not been called.
    NotStarted,
    /// The subprocess and protocol session are live.
    Started,
    /// The session has been shut down; no restart is possible.
    Stopped,
}

/// Owns the subprocess handle and protocol session for one activation.
pub struct LanguageClient {
    connection: Box<dyn ServerConnection>,
    selector: DocumentSelector,
    watch: WatchPattern,
    state: ClientState,
}

impl LanguageClient {
    /// Builds a client over an unopened connection.
    #[must_use]
    pub fn new(
        connection: Box<dyn ServerConnection>,
        selector: DocumentSelector,
        watch: WatchPattern,
    ) -> Self {
        Self {
            connection,
            selector,
            watch,
            state: ClientState::NotStarted,
        }
    }

    /// Begins the subprocess and protocol handshake.
    ///
    /// Fails with [`ClientError::AlreadyStarted`] on a second call and with
    /// [`ClientError::Stopped`] after `stop`; the session state machine has
    /// no transitions for either.
    pub fn start(&mut self) -> Result<(), ClientError> {
        match self.state {
            ClientState::Started => return Err(ClientError::AlreadyStarted),
            ClientState::Stopped => return Err(ClientError::Stopped),
            ClientState::NotStarted => {}
        }

        self.connection.open()?;
        self.state = ClientState::Started;
        info!(
            target: CLIENT_TARGET,
            watch = self.watch.glob(),
            language = self.selector.language_id(),
            "language client started"
        );
        Ok(())
    }

    /// Requests graceful shutdown of the session and subprocess.
    pub fn stop(&mut self) -> Result<(), ClientError> {
        match self.state {
            ClientState::NotStarted => return Err(ClientError::NotStarted),
            ClientState::Stopped => return Err(ClientError::Stopped),
            ClientState::Started => {}
        }

        self.connection.close()?;
        self.state = ClientState::Stopped;
        debug!(target: CLIENT_TARGET, "language client stopped");
        Ok(())
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ClientState {
        self.state
    }

    /// The selector scoping protocol participation.
    #[must_use]
    pub const fn selector(&self) -> &DocumentSelector {
        &self.selector
    }

    /// The file watch registered for out-of-editor edits.
    #[must_use]
    pub const fn watch(&self) -> &WatchPattern {
        &self.watch
    }
}

impl std::fmt::Debug for LanguageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageClient")
            .field("state", &self.state)
            .field("selector", &self.selector)
            .field("watch", &self.watch)
            .finish_non_exhaustive()
    }
}
