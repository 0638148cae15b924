//! Keeps an in-memory draft of the Deprocast new-project form synchronized
//! with a durable key-value backend, so a partially filled form survives a
//! restart, and tracks whether the creation modal should be open.

mod form;
mod storage;
mod store;

pub use form::{FormData, ProjectCategory, DEFAULT_PERCEIVED_DIFFICULTY};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{FormDraftStore, FORM_DRAFT_KEY, MODAL_STATE_KEY};
