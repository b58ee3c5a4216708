//! Per-user state for Skycast.
//!
//! `UserStore` is the durable side: current location and favorites, written
//! through to a JSON snapshot on every mutation. `SearchCache` is the
//! ephemeral side: the last search's candidates per user, process-lifetime
//! only.

pub mod search_cache;
pub mod user_store;

pub use search_cache::SearchCache;
pub use user_store::{UserId, UserRecord, UserStore};
