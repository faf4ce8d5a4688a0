//! Entity codec: `show-cards` responses in, drag payloads in and out.
//!
//! # Design
//! The codec is stateless. `parse_cards` turns the store's tab-separated,
//! header-driven response into `Card`s, numbering rows in response order.
//! The transfer functions carry a single card's identity across a drag as
//! `CARD::{id}::{position}::{title}`.
//!
//! The payload delimiter is not escaped. A title containing `::` produces a
//! payload that decodes as malformed, so such cards cannot be dragged.

use crate::error::BoardError;
use crate::types::Card;

/// Token the store writes in place of a literal newline inside `content`.
pub const NEWLINE_TOKEN: &str = "<|NEWLINE|>";

/// Field separator of the drag payload.
pub const TRANSFER_DELIMITER: &str = "::";

/// Kind tag of a card payload.
pub const CARD_KIND: &str = "CARD";

const REQUIRED_COLUMNS: [&str; 4] = ["title", "id", "content", "due"];

/// Restore literal newlines in a stored `content` field.
pub fn unescape_content(raw: &str) -> String {
    raw.replace(NEWLINE_TOKEN, "\n")
}

/// Inverse of [`unescape_content`].
pub fn escape_content(content: &str) -> String {
    content.replace('\n', NEWLINE_TOKEN)
}

/// Parse a `show-cards` response.
///
/// The first non-blank line is the header; `title`, `id`, `content` and
/// `due` must all be present, in any order. Each following row becomes a
/// card whose `position` is its 0-based row index. Empty input yields no
/// cards.
pub fn parse_cards(response: &str) -> Result<Vec<Card>, BoardError> {
    let mut lines = response.lines().filter(|line| !line.is_empty());

    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };
    let layout = ColumnLayout::from_header(header)?;

    lines
        .enumerate()
        .map(|(position, line)| layout.parse_row(position, line))
        .collect()
}

/// Column indices resolved from the response header.
struct ColumnLayout {
    width: usize,
    title: usize,
    id: usize,
    content: usize,
    due: usize,
}

impl ColumnLayout {
    fn from_header(header: &str) -> Result<Self, BoardError> {
        let names: Vec<&str> = header.split('\t').map(str::trim).collect();
        let index_of = |column: &str| {
            names.iter().position(|name| *name == column).ok_or_else(|| {
                BoardError::MalformedResponse(format!("missing column {column:?} in header"))
            })
        };
        let [title, id, content, due] = REQUIRED_COLUMNS;
        Ok(Self {
            width: names.len(),
            title: index_of(title)?,
            id: index_of(id)?,
            content: index_of(content)?,
            due: index_of(due)?,
        })
    }

    fn parse_row(&self, position: usize, line: &str) -> Result<Card, BoardError> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < self.width {
            return Err(BoardError::MalformedResponse(format!(
                "row {position}: expected {} fields, found {}",
                self.width,
                fields.len()
            )));
        }
        Ok(Card {
            id: parse_int(fields[self.id], "id", position)?,
            title: fields[self.title].to_string(),
            content: unescape_content(fields[self.content]),
            due_date: parse_int(fields[self.due], "due", position)?,
            position,
        })
    }
}

fn parse_int(field: &str, column: &str, position: usize) -> Result<i64, BoardError> {
    field.trim().parse::<i64>().map_err(|_| {
        BoardError::MalformedResponse(format!("row {position}: {column} {field:?} is not an integer"))
    })
}

/// A decoded drag payload. `kind` is whatever tag the payload carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub kind: String,
    pub id: i64,
    pub position: usize,
    /// Carried for display and debugging only.
    pub title: String,
}

/// The part of a card payload the reorder math needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRef {
    pub id: i64,
    pub position: usize,
}

impl Transfer {
    /// Accept the payload only if it describes a card.
    pub fn card_ref(&self) -> Result<CardRef, BoardError> {
        if self.kind != CARD_KIND {
            return Err(BoardError::UnrecognizedTransferKind(self.kind.clone()));
        }
        Ok(CardRef {
            id: self.id,
            position: self.position,
        })
    }
}

/// Build the drag payload for one card.
pub fn encode_transfer(card: &Card) -> String {
    format!("{CARD_KIND}::{}::{}::{}", card.id, card.position, card.title)
}

/// Split a drag payload into its four fields.
pub fn decode_transfer(payload: &str) -> Result<Transfer, BoardError> {
    let fields: Vec<&str> = payload.split(TRANSFER_DELIMITER).collect();
    let [kind, id, position, title] = fields.as_slice() else {
        return Err(BoardError::MalformedTransferPayload(format!(
            "expected 4 fields, found {}",
            fields.len()
        )));
    };
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| BoardError::MalformedTransferPayload(format!("id {id:?} is not an integer")))?;
    let position = position.trim().parse::<usize>().map_err(|_| {
        BoardError::MalformedTransferPayload(format!("position {position:?} is not a row index"))
    })?;
    Ok(Transfer {
        kind: (*kind).to_string(),
        id,
        position,
        title: (*title).to_string(),
    })
}
