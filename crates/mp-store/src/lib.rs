//! # mp-store
//!
//! The state store abstraction for Milepost.
//!
//! Persistence is an external collaborator: the core defines only the
//! [`StateStore`] trait (get/put/delete over string keys and JSON
//! document values) and the [`keys`] schema, never storage internals.
//! Two backends ship with the workspace:
//!
//! - [`MemoryStore`] — `BTreeMap`-backed; for tests and for hosts that
//!   supply their own durability around the tracker.
//! - [`JsonFileStore`] — a single human-inspectable JSON file, rewritten
//!   on each mutation.
//!
//! Both provide read-your-writes consistency within an operation, which
//! is all the tracker assumes.

pub mod error;
pub mod file;
pub mod keys;
pub mod store;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use store::{MemoryStore, StateStore};
