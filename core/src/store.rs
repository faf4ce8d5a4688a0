//! The store seam: command strings out, response text back.
//!
//! # Design
//! The store is an external text-protocol backend. The engine only ever
//! builds two commands and hands them to a `StoreClient`; how the command
//! reaches the store (in-process, HTTP, a host callback across FFI) is the
//! implementor's business. Calls are blocking and run to completion.

use std::fmt;

use crate::error::BoardError;

/// Commands the engine sends to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCommand {
    /// List a list's cards, natural order, as tab-separated rows.
    ShowCards { list_id: i64 },
    /// Move a card to `new_index` in its list's natural order.
    ShiftCard { card_id: i64, new_index: usize },
}

impl fmt::Display for StoreCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreCommand::ShowCards { list_id } => write!(f, "show-cards {list_id}"),
            StoreCommand::ShiftCard { card_id, new_index } => {
                write!(f, "shift-card {card_id} to {new_index}")
            }
        }
    }
}

/// Synchronous access to the store.
///
/// Failures of any kind, including timeouts, are reported as
/// `BoardError::StoreUnavailable`.
pub trait StoreClient {
    fn run_command(&mut self, command: &str) -> Result<String, BoardError>;

    fn send(&mut self, command: StoreCommand) -> Result<String, BoardError> {
        let command = command.to_string();
        tracing::debug!(%command, "sending store command");
        self.run_command(&command)
    }
}

impl<F> StoreClient for F
where
    F: FnMut(&str) -> Result<String, BoardError>,
{
    fn run_command(&mut self, command: &str) -> Result<String, BoardError> {
        self(command)
    }
}
