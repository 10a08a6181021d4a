//! Todo lifecycle core for an htmx-driven todo list.
//!
//! # Overview
//! A thin orchestration layer between HTTP requests and a content store. The
//! handler turns four user intents (count, delete, mark/unmark complete, add)
//! into store calls and returns structured view data plus client events. No
//! markup is rendered and no I/O is performed here.
//!
//! # Design
//! - `ContentStore` is the only seam to storage; `InMemoryContentStore` is the
//!   bundled implementation.
//! - `TodoHandler` is stateless and cheap to clone; it holds an `Arc` to the
//!   store.
//! - `Outcome` carries the view to render and the events (`todoCountUpdated`)
//!   the transport layer should signal to the client.

pub mod error;
pub mod handler;
pub mod seed;
pub mod store;
pub mod types;
pub mod view;

pub use error::{HandlerError, StoreError};
pub use handler::{TodoHandler, PROTECTED_DELETE_MESSAGE};
pub use seed::seed_demo;
pub use store::{root_by_type, ContentStore, InMemoryContentStore};
pub use types::{Content, ContentId, Todo, TodoList};
pub use view::{ClientEvent, Outcome, Page, View};
