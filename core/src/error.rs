//! Error types for the content store and the todo handler.
//!
//! # Design
//! `HandlerError::NotFound` and `HandlerError::Protected` are the two outcomes
//! a client is expected to see. Anything the store itself reports lands in
//! `HandlerError::Store` and is treated as an internal failure by callers.

use thiserror::Error;
use uuid::Uuid;

use crate::types::ContentId;

/// Errors reported by a `ContentStore` implementation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The node does not exist (for example it was deleted concurrently).
    #[error("content {0} not found")]
    NotFound(ContentId),

    /// `create` was given a parent key no node carries.
    #[error("parent content with key {0} not found")]
    ParentNotFound(Uuid),

    /// The backing storage failed. Only stores over real storage report
    /// this; `InMemoryContentStore` never does.
    #[error("content store unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by `TodoHandler` operations.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The id does not resolve to existing content.
    #[error("content not found")]
    NotFound,

    /// Deletion of a protected todo was attempted.
    #[error("{message}")]
    Protected { message: String },

    /// The content store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
