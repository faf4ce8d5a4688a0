//! Error types for the card list engine.
//!
//! # Design
//! Store failures and malformed responses are fatal for the operation that
//! hit them and propagate to the caller. The two transfer-payload kinds are
//! produced by the codec but never escape `CardCollection::accept_drop`,
//! which turns them into a rejected drop.

/// Errors produced by the codec, the store seam and the collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The store call failed, timed out, or answered with a non-success status.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store response does not follow the header/column contract.
    #[error("malformed store response: {0}")]
    MalformedResponse(String),

    /// A drag payload with the wrong field count or non-integer fields.
    #[error("malformed transfer payload: {0}")]
    MalformedTransferPayload(String),

    /// A well-formed drag payload whose kind tag is not `CARD`.
    #[error("unrecognized transfer kind: {0:?}")]
    UnrecognizedTransferKind(String),
}
