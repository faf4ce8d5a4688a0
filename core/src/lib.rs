//! Card list reconciliation and reordering engine.
//!
//! # Overview
//! Loads one kanban list's cards from a text-protocol store, keeps them in
//! display order, and turns a drag-and-drop in the view into a single
//! `shift-card` command against the store. The core does no I/O of its own:
//! the caller supplies a `StoreClient`, either directly or through
//! `HttpStore` with a host transport.
//!
//! # Design
//! - `codec` is stateless: TSV responses to `Card`s, and the
//!   `CARD::{id}::{position}::{title}` drag payload.
//! - `reorder` is a pure function from a display-space drop row to a
//!   store-space index, or a no-op.
//! - `CardCollection` owns the cards and is rebuilt wholesale on refresh.

pub mod codec;
pub mod collection;
pub mod error;
pub mod http;
pub mod reorder;
pub mod store;
pub mod types;

pub use codec::{decode_transfer, encode_transfer, parse_cards, CardRef, Transfer};
pub use collection::CardCollection;
pub use error::BoardError;
pub use http::{HttpStore, StoreConfig, StoreRequest, StoreResponse};
pub use reorder::{translate, Reorder};
pub use store::{StoreClient, StoreCommand};
pub use types::{Card, CardEdit, NO_DUE_DATE, NO_LIST};
