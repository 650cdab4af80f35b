//! # mp-tracker
//!
//! The Milepost entry points: a goal registry and a milestone ledger in
//! front of a pluggable state store.
//!
//! Every operation takes the authenticated caller [`mp_model::Principal`]
//! as its first argument — identity is explicit, never ambient — and is
//! authorized by `mp-access` before any state change or disclosure.
//! Each call is one atomic unit against the store: validate fully, then
//! commit fully.
//!
//! ## Quick example
//!
//! ```rust
//! use mp_model::{Principal, Visibility};
//! use mp_store::MemoryStore;
//! use mp_tracker::Tracker;
//!
//! let mut tracker = Tracker::new(MemoryStore::new()).unwrap();
//! let alice = Principal::new("alice");
//!
//! let goal = tracker
//!     .create_goal(&alice, "Learn Rust", Visibility::Private)
//!     .unwrap();
//! let milestone = tracker
//!     .add_milestone(&alice, goal.id, "Read the book")
//!     .unwrap();
//! tracker
//!     .complete_milestone(&alice, goal.id, milestone.index)
//!     .unwrap();
//! ```

pub mod config;
pub mod error;
pub mod ledger;
pub mod registry;
pub mod tracker;

pub use config::TrackerConfig;
pub use error::TrackerError;
pub use tracker::Tracker;
