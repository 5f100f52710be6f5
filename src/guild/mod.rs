//! Guild data model and the record store that edits it.
//!
//! [`GuildStore`] is the only thing that mutates a [`Document`]; the console
//! front-ends and the web renderer go through it.

pub mod errors;
pub mod store;
pub mod types;

pub use errors::{GuildError, PersistenceError, RecordKind};
pub use store::{GuildStore, GuildSummary, InfoUpdate, ItemOutcome, ResourceReport};
pub use types::*;
