//! Drop-position translation from view coordinates to store coordinates.
//!
//! The view shows cards in reverse `position` order, so a drop row counted
//! from the top of the view has to be flipped before it means anything to
//! the store. Dropping a card right above or right below itself is a no-op.

/// Result of translating a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reorder {
    /// Move the card to this index in the store's natural order.
    NewIndex(usize),
    /// The drop lands on the card's own slot; nothing to send.
    NoOp,
}

/// Convert a drop row (gap index in display order, `0..=size`) to a gap
/// index in position order. Rows past the end clamp to the bottom.
pub fn display_to_position(drop_row: usize, size: usize) -> usize {
    size.saturating_sub(drop_row)
}

/// Translate a drop of the card at `card_position` onto display row `drop_row`.
///
/// A card moving toward higher positions lands one index lower than the gap,
/// since removing it from its old slot shifts the later cards down first.
pub fn translate(drop_row: usize, card_position: usize, size: usize) -> Reorder {
    let row = display_to_position(drop_row, size);
    if row == card_position || row.checked_sub(1) == Some(card_position) {
        return Reorder::NoOp;
    }
    if card_position > row {
        Reorder::NewIndex(row)
    } else {
        Reorder::NewIndex(row - 1)
    }
}
