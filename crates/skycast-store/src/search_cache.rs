//! Ephemeral per-user candidate cache.
//!
//! Holds the last name search's candidates so a later selection event can
//! be resolved unambiguously. Entries live for the process lifetime and
//! are superseded only by the user's next search; a miss is the normal
//! "stale selection" outcome, never an error.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::user_store::UserId;
use skycast_geo::Location;

#[derive(Default)]
pub struct SearchCache {
    entries: Mutex<HashMap<UserId, HashMap<String, Location>>>,
}

impl SearchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the user's cached candidates wholesale.
    pub fn put(&self, user: UserId, candidates: &[Location]) {
        let mapping = candidates
            .iter()
            .map(|c| (c.id.clone(), c.clone()))
            .collect();
        self.entries.lock().insert(user, mapping);
    }

    /// Resolve a candidate id from the user's latest search.
    ///
    /// `None` means the id belongs to a superseded search (or no search
    /// happened): a stale reference.
    pub fn resolve(&self, user: UserId, candidate_id: &str) -> Option<Location> {
        self.entries
            .lock()
            .get(&user)
            .and_then(|mapping| mapping.get(candidate_id))
            .cloned()
    }
}
