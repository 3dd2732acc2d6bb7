//! Recording editor host used in tests.

use crate::commands::CommandId;
use crate::host::{ActiveDocument, EditorHost};

/// One observable side effect routed through the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// An informational message was shown.
    Information(String),
    /// A warning was shown.
    Warning(String),
    /// An error notification was shown.
    Error(String),
    /// A command was registered in the palette.
    CommandRegistered(CommandId),
    /// The generic format operation was invoked.
    FormatRequested,
}

/// Test double that records every host interaction in order.
#[derive(Debug, Default)]
pub struct RecordingHost {
    active_document: Option<ActiveDocument>,
    /// Every event the controller produced, in order.
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    /// Host with no focused document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose active document declares the given language id.
    pub fn with_active_document(language_id: &str, length: usize) -> Self {
        Self {
            active_document: Some(ActiveDocument {
                language_id: language_id.to_string(),
                length,
            }),
            events: Vec::new(),
        }
    }

    /// Warnings shown so far.
    pub fn warnings(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Warning(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Informational messages shown so far.
    pub fn information(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Information(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Error notifications shown so far.
    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Error(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Commands registered so far, in order.
    pub fn registered_commands(&self) -> Vec<CommandId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::CommandRegistered(command) => Some(*command),
                _ => None,
            })
            .collect()
    }

    /// How many times the format operation was invoked.
    pub fn format_requests(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, HostEvent::FormatRequested))
            .count()
    }
}

impl EditorHost for RecordingHost {
    fn active_document(&self) -> Option<ActiveDocument> {
        self.active_document.clone()
    }

    fn show_information(&mut self, message: &str) {
        self.events.push(HostEvent::Information(message.to_string()));
    }

    fn show_warning(&mut self, message: &str) {
        self.events.push(HostEvent::Warning(message.to_string()));
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(HostEvent::Error(message.to_string()));
    }

    fn register_command(&mut self, command: CommandId) {
        self.events.push(HostEvent::CommandRegistered(command));
    }

    fn format_active_document(&mut self) {
        self.events.push(HostEvent::FormatRequested);
    }
}
