//! Recording connection factory used in tests.

use std::sync::{Arc, Mutex};

use crate::connection::{ConnectionFactory, ServerConnection};
use crate::errors::ConnectionError;
use crate::launch::LaunchParams;

/// One lifecycle event observed on a recorded connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// `open` completed.
    Opened,
    /// `close` completed.
    Closed,
}

#[derive(Debug, Default)]
struct FactoryState {
    params: Vec<LaunchParams>,
    events: Vec<ConnectionEvent>,
    fail_open: Option<String>,
}

/// Factory handing out connections that record instead of spawning.
#[derive(Debug, Default, Clone)]
pub struct RecordingConnectionFactory {
    shared: Arc<Mutex<FactoryState>>,
}

impl RecordingConnectionFactory {
    /// Factory whose connections open successfully.
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory whose connections fail to open with the given message.
    pub fn failing_open(message: impl Into<String>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(FactoryState {
                fail_open: Some(message.into()),
                ..FactoryState::default()
            })),
        }
    }

    /// Launch parameters each built connection was given, in order.
    pub fn connected_params(&self) -> Vec<LaunchParams> {
        with_state(&self.shared, |state| state.params.clone())
    }

    /// Lifecycle events observed across all connections, in order.
    pub fn events(&self) -> Vec<ConnectionEvent> {
        with_state(&self.shared, |state| state.events.clone())
    }
}

impl ConnectionFactory for RecordingConnectionFactory {
    fn connect(&self, params: &LaunchParams) -> Box<dyn ServerConnection> {
        with_state(&self.shared, |state| state.params.push(params.clone()));
        Box::new(RecordingConnection {
            shared: Arc::clone(&self.shared),
        })
    }
}

struct RecordingConnection {
    shared: Arc<Mutex<FactoryState>>,
}

impl ServerConnection for RecordingConnection {
    fn open(&mut self) -> Result<(), ConnectionError> {
        with_state(&self.shared, |state| {
            if let Some(message) = &state.fail_open {
                return Err(ConnectionError::HandshakeFailed {
                    message: message.clone(),
                });
            }
            state.events.push(ConnectionEvent::Opened);
            Ok(())
        })
    }

    fn close(&mut self) -> Result<(), ConnectionError> {
        with_state(&self.shared, |state| {
            state.events.push(ConnectionEvent::Closed);
            Ok(())
        })
    }
}

fn with_state<R>(
    shared: &Arc<Mutex<FactoryState>>,
    action: impl FnOnce(&mut FactoryState) -> R,
) -> R {
    let mut guard = shared.lock().unwrap_or_else(|poison| poison.into_inner());
    action(&mut guard)
}
