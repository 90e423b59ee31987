use std::collections::BTreeMap;

use uuid::Uuid;

use crate::error::StoreError;

/// Maximum identifier generation attempts before giving up.
///
/// A v4 UUID carries 122 random bits, so a collision against any
/// realistic key set is negligible and a second attempt essentially
/// never happens. The cap turns an unbounded regenerate-on-collision
/// search into a loop that fails with
/// [`StoreError::IdSpaceExhausted`] if the randomness source is broken.
pub const MAX_ALLOC_ATTEMPTS: u32 = 16;

/// Allocate a fresh identifier that does not collide with any key in
/// `existing`.
///
/// Identifiers are hyphenated lowercase UUID v4 strings
/// (`xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`). The check-then-use sequence
/// here races with concurrent allocation against the same store, which is
/// why [`BlobStore`](crate::BlobStore) only calls this while holding its
/// write lock over a freshly loaded snapshot.
///
/// # Errors
///
/// Returns [`StoreError::IdSpaceExhausted`] if every attempt up to
/// [`MAX_ALLOC_ATTEMPTS`] collided with an existing key.
pub fn allocate(existing: &BTreeMap<String, String>) -> Result<String, StoreError> {
    for _ in 0..MAX_ALLOC_ATTEMPTS {
        let candidate = Uuid::new_v4().to_string();
        if !existing.contains_key(&candidate) {
            return Ok(candidate);
        }
    }
    Err(StoreError::IdSpaceExhausted {
        attempts: MAX_ALLOC_ATTEMPTS,
    })
}
