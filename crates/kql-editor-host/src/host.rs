//! Seam to the host editor process.
//!
//! The controller never talks to editor internals directly; everything it
//! needs — notifications, command registration, the active document, the
//! generic format operation — goes through [`EditorHost`] so tests can
//! inject a recording implementation.

use crate::commands::CommandId;

/// The document currently focused in the editor, as far as the controller
/// cares about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDocument {
    /// Language identifier declared by the document.
    pub language_id: String,
    /// Character length of the document content.
    pub length: usize,
}

/// Editor operations the controller depends on.
pub trait EditorHost {
    /// The currently focused document, if any.
    fn active_document(&self) -> Option<ActiveDocument>;

    /// Shows a dismissible informational message.
    fn show_information(&mut self, message: &str);

    /// Shows a dismissible, non-fatal warning.
    fn show_warning(&mut self, message: &str);

    /// Shows an error notification.
    fn show_error(&mut self, message: &str);

    /// Registers a command in the editor's command palette.
    fn register_command(&mut self, command: CommandId);

    /// Invokes the editor's generic format operation on the active document.
    fn format_active_document(&mut self);
}
