//! JSON-file persistence for the policy collection.
//!
//! The whole collection lives in one pretty-printed JSON file and is
//! rewritten wholesale after every mutation. Single writer, single reader;
//! last writer wins.

mod store;
pub use store::{Derive, ImportError, PersistenceError, Store, UpdateError};
