//! Editor command surface.
//!
//! Three stably-named commands are registered once per activation. Each is
//! stateless and uniformly guarded: it only acts when the active document
//! declares the KQL language id, and silently no-ops otherwise.

use tracing::debug;

use kql_editor_config::LANGUAGE_ID;

use crate::host::EditorHost;

const COMMANDS_TARGET: &str = "kql_editor_host::commands";

/// Commands exposed to the editor's command palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandId {
    /// Forwards to the editor's generic formatting operation.
    FormatDocument,
    /// Placeholder reporting the active document's character length.
    ShowSyntaxTree,
    /// Placeholder reporting that SQL generation is not available yet.
    GenerateSql,
}

impl CommandId {
    /// All commands, in registration order.
    pub const ALL: [Self; 3] = [Self::FormatDocument, Self::ShowSyntaxTree, Self::GenerateSql];

    /// The stable identifier the editor invokes the command by.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::FormatDocument => "kql.formatDocument",
            Self::ShowSyntaxTree => "kql.showSyntaxTree",
            Self::GenerateSql => "kql.generateSQL",
        }
    }
}

/// Registers every command with the host, in a fixed order.
pub fn register_all<H: EditorHost>(host: &mut H) {
    for command in CommandId::ALL {
        host.register_command(command);
    }
}

/// Executes a command against the host.
///
/// The guard is uniform: without an active KQL document the command does
/// nothing observable.
pub fn execute<H: EditorHost>(command: CommandId, host: &mut H) {
    let Some(document) = host.active_document() else {
        debug!(
            target: COMMANDS_TARGET,
            command = command.identifier(),
            "no active document, ignoring command"
        );
        return;
    };
    if document.language_id != LANGUAGE_ID {
        debug!(
            target: COMMANDS_TARGET,
            command = command.identifier(),
            language = %document.language_id,
            "active document is not KQL, ignoring command"
        );
        return;
    }

    match command {
        CommandId::FormatDocument => host.format_active_document(),
        CommandId::ShowSyntaxTree => {
            // Placeholder until the server exposes a syntax tree view.
            host.show_information(&format!(
                "KQL document contains {} characters",
                document.length
            ));
        }
        CommandId::GenerateSql => {
            host.show_information("KQL to SQL generation is not available yet");
        }
    }
}
