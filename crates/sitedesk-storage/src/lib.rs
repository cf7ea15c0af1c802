//! Storage abstractions for contact-form submissions.
//!
//! Defines the [`ContactRequestStorage`] trait and an in-memory backend.
//! Handlers depend only on the trait, so a persistent backend can be swapped
//! in without touching the HTTP layer.

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use memory::InMemoryContactRequestStorage;
pub use traits::ContactRequestStorage;
pub use types::{ContactRequest, NewContactRequest};
