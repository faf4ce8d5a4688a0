//! The ordered card collection behind one list panel.
//!
//! # Design
//! `CardCollection` owns the cards of the selected list in display order,
//! which is the reverse of their parse `position`. Every refresh rebuilds the
//! whole vector from the store; a failed refresh leaves the previous cards in
//! place. Drops are decoded, translated with `reorder::translate` and turned
//! into a single `shift-card` command followed by a refresh.

use crate::codec::{decode_transfer, encode_transfer, parse_cards};
use crate::error::BoardError;
use crate::reorder::{translate, Reorder};
use crate::store::{StoreClient, StoreCommand};
use crate::types::{Card, CardEdit, NO_LIST};

/// Cards of the currently selected list, in display order.
#[derive(Debug)]
pub struct CardCollection<S> {
    store: S,
    list_id: i64,
    cards: Vec<Card>,
}

impl<S: StoreClient> CardCollection<S> {
    /// An empty collection with no list selected.
    pub fn new(store: S) -> Self {
        Self {
            store,
            list_id: NO_LIST,
            cards: Vec::new(),
        }
    }

    /// Select `list_id` and load its cards.
    ///
    /// If loading fails the previous list stays selected, so the list id
    /// and the cards always describe the same list.
    pub fn show_list_cards(&mut self, list_id: i64) -> Result<(), BoardError> {
        let previous = std::mem::replace(&mut self.list_id, list_id);
        self.refresh().inspect_err(|_| self.list_id = previous)
    }

    /// Reload the selected list from the store.
    pub fn refresh(&mut self) -> Result<(), BoardError> {
        if self.list_id == NO_LIST {
            self.cards.clear();
            return Ok(());
        }
        let response = self.store.send(StoreCommand::ShowCards { list_id: self.list_id })?;
        let mut cards = parse_cards(&response)?;
        cards.reverse();
        tracing::debug!(list_id = self.list_id, cards = cards.len(), "refreshed card list");
        self.cards = cards;
        Ok(())
    }

    /// Handle a drop of `payload` at display row `drop_row`.
    ///
    /// Returns `Ok(false)` when the payload is not a card, `Ok(true)` when
    /// the drop was consumed (moved or a no-op). Store failures propagate.
    pub fn accept_drop(&mut self, payload: &str, drop_row: usize) -> Result<bool, BoardError> {
        let card = match decode_transfer(payload).and_then(|transfer| transfer.card_ref()) {
            Ok(card) => card,
            Err(err) => {
                tracing::warn!(%err, payload, "rejected drop");
                return Ok(false);
            }
        };

        match translate(drop_row, card.position, self.cards.len()) {
            Reorder::NoOp => {
                tracing::debug!(card_id = card.id, drop_row, "drop onto own slot, nothing to move");
                Ok(true)
            }
            Reorder::NewIndex(new_index) => {
                self.store.send(StoreCommand::ShiftCard {
                    card_id: card.id,
                    new_index,
                })?;
                self.refresh()?;
                Ok(true)
            }
        }
    }

    /// Drag payload for the first selected row. Other rows are ignored.
    pub fn produce_transfer_payload(&self, selection: &[usize]) -> Option<String> {
        let row = *selection.first()?;
        self.cards.get(row).map(encode_transfer)
    }

    /// Ids of every selected row, in selection order. Rows out of range are skipped.
    pub fn selected_card_ids(&self, selection: &[usize]) -> Vec<i64> {
        selection
            .iter()
            .filter_map(|row| self.cards.get(*row))
            .map(|card| card.id)
            .collect()
    }

    /// Draft for the external editor, for the card shown at `row`.
    pub fn edit_draft(&self, row: usize) -> Option<CardEdit> {
        self.cards.get(row).map(Card::edit_draft)
    }
}

impl<S> CardCollection<S> {
    pub fn current_list_id(&self) -> i64 {
        self.list_id
    }

    /// Cards in display order: highest `position` first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_at(&self, row: usize) -> Option<&Card> {
        self.cards.get(row)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
