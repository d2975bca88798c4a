//! Claim store
//!
//! Owns the claim collection. Each claim sits behind its own mutex, which is
//! the serialization point for every mutation of that claim; the index lock
//! is only taken for writing when a claim is added.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::info;

use core_kernel::ClaimId;
use crate::claim::Claim;
use crate::error::ClaimError;

type Slot = Arc<Mutex<Claim>>;

#[derive(Debug)]
struct Index {
    /// Insertion order
    order: Vec<Slot>,
    by_id: HashMap<ClaimId, Slot>,
    next_sequence: u64,
}

/// In-memory claim collection
///
/// Reads are open to everyone. Writes go through the crate-private
/// [`create`](Self::create) and [`apply`](Self::apply), which only the
/// workflow engine calls.
#[derive(Debug)]
pub struct ClaimStore {
    index: RwLock<Index>,
}

impl Default for ClaimStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimStore {
    pub fn new() -> Self {
        Self {
            index: RwLock::new(Index {
                order: Vec::new(),
                by_id: HashMap::new(),
                next_sequence: 1,
            }),
        }
    }

    /// Loads externally supplied claims, e.g. demonstration data
    ///
    /// Every claim must satisfy the status/workflow invariants and carry an
    /// unused id. Nothing is loaded if any claim fails.
    pub fn seed(&self, claims: Vec<Claim>) -> Result<(), ClaimError> {
        let mut index = self.index.write();
        let mut incoming: Vec<ClaimId> = Vec::with_capacity(claims.len());
        for claim in &claims {
            claim.check_invariants()?;
            if index.by_id.contains_key(&claim.id) || incoming.contains(&claim.id) {
                return Err(ClaimError::Validation(format!("duplicate claim id {}", claim.id)));
            }
            incoming.push(claim.id);
        }

        let count = claims.len();
        for claim in claims {
            index.next_sequence = index.next_sequence.max(claim.id.sequence() + 1);
            let id = claim.id;
            let slot = Arc::new(Mutex::new(claim));
            index.order.push(slot.clone());
            index.by_id.insert(id, slot);
        }
        info!(count, next = index.next_sequence, "Seeded claim store");
        Ok(())
    }

    /// Returns a copy of one claim
    pub fn get(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        let slot = self.slot(id)?;
        let claim = slot.lock().clone();
        Ok(claim)
    }

    /// Returns copies of all claims in insertion order
    pub fn list(&self) -> Vec<Claim> {
        let index = self.index.read();
        index.order.iter().map(|slot| slot.lock().clone()).collect()
    }

    /// Ids of all claims in insertion order
    pub fn ids(&self) -> Vec<ClaimId> {
        let index = self.index.read();
        index.order.iter().map(|slot| slot.lock().id).collect()
    }

    pub fn len(&self) -> usize {
        self.index.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, id: ClaimId) -> Result<Slot, ClaimError> {
        self.index
            .read()
            .by_id
            .get(&id)
            .cloned()
            .ok_or(ClaimError::NotFound(id))
    }

    /// Adds a new claim under the next unused id
    ///
    /// `build` receives the id and returns the claim to insert plus a value
    /// for the caller. If it fails the id is not consumed and nothing is
    /// inserted.
    pub(crate) fn create<T, F>(&self, build: F) -> Result<T, ClaimError>
    where
        F: FnOnce(ClaimId) -> Result<(Claim, T), ClaimError>,
    {
        let mut index = self.index.write();
        let id = ClaimId::from_sequence(index.next_sequence);
        let (claim, output) = build(id)?;
        debug_assert_eq!(claim.id, id);

        index.next_sequence += 1;
        let slot = Arc::new(Mutex::new(claim));
        index.order.push(slot.clone());
        index.by_id.insert(id, slot);
        Ok(output)
    }

    /// Replaces one claim with the state computed by `transition`
    ///
    /// The claim's lock is held for the whole call, so transitions on the
    /// same claim never interleave. On error the stored claim is untouched.
    pub(crate) fn apply<T, F>(&self, id: ClaimId, transition: F) -> Result<T, ClaimError>
    where
        F: FnOnce(&Claim) -> Result<(Claim, T), ClaimError>,
    {
        let slot = self.slot(id)?;
        let mut current = slot.lock();
        let (next, output) = transition(&current)?;
        debug_assert_eq!(next.id, current.id);
        *current = next;
        Ok(output)
    }
}
