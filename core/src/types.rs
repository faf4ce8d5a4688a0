//! Domain entities for a single card list.
//!
//! # Design
//! `Card` is plain data. It knows nothing about the store's wire format or
//! the drag payload; both live in `codec`. Cards are never edited in place:
//! a change goes through the store and shows up on the next refresh.

use serde::{Deserialize, Serialize};

/// List id meaning "no list selected". A collection showing it is empty.
pub const NO_LIST: i64 = -1;

/// Due date value meaning "unset".
pub const NO_DUE_DATE: i64 = -1;

/// A single kanban card as parsed from a `show-cards` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    /// Store-assigned id, unique within the owning list.
    pub id: i64,
    pub title: String,
    /// Content with real newlines restored.
    pub content: String,
    pub due_date: i64,
    /// Row index in the store's natural order at parse time. Not the
    /// on-screen row: display order is the reverse of this.
    pub position: usize,
}

impl Card {
    /// Text shown for the card's row.
    pub fn display_text(&self) -> &str {
        &self.title
    }

    pub fn due(&self) -> Option<i64> {
        (self.due_date != NO_DUE_DATE).then_some(self.due_date)
    }

    /// Snapshot handed to the external editor.
    pub fn edit_draft(&self) -> CardEdit {
        CardEdit {
            id: self.id,
            title: self.title.clone(),
            content: self.content.clone(),
            due_date: self.due_date,
        }
    }
}

/// Fields an external editor works on for one card.
///
/// Nothing in this crate commits a `CardEdit` back to the store; the save
/// path is owned by whoever drives the editor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardEdit {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub due_date: i64,
}
