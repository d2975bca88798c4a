//! The append-only audit log

use parking_lot::RwLock;
use tracing::debug;

use core_kernel::{AuditEntryId, ClaimId, SharedClock};
use crate::entry::{AuditLogEntry, NewAuditEntry};
use crate::error::AuditError;

#[derive(Debug)]
struct LogState {
    entries: Vec<AuditLogEntry>,
    next_sequence: u64,
}

/// Ordered, append-only audit trail
///
/// The log only grows. `next_sequence` never goes backwards, so an id is
/// never handed out twice even if a persistence layer later prunes entries.
#[derive(Debug)]
pub struct AuditLog {
    state: RwLock<LogState>,
    clock: SharedClock,
}

impl AuditLog {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            state: RwLock::new(LogState {
                entries: Vec::new(),
                next_sequence: 1,
            }),
            clock,
        }
    }

    /// Appends an entry, assigning the next id and the current timestamp
    pub fn append(&self, draft: NewAuditEntry) -> Result<AuditLogEntry, AuditError> {
        draft.validate()?;

        let mut state = self.state.write();
        let entry = AuditLogEntry {
            id: AuditEntryId::from_sequence(state.next_sequence),
            timestamp: self.clock.now(),
            user: draft.user,
            action: draft.action,
            details: draft.details,
            related_id: draft.related_id,
        };
        state.next_sequence += 1;
        state.entries.push(entry.clone());

        debug!(id = %entry.id, action = %entry.action, related = ?entry.related_id, "Audit entry appended");
        Ok(entry)
    }

    /// Loads historical entries as-is, preserving their ids
    ///
    /// The counter moves past the highest imported id. Fails without
    /// importing anything if an id is already present.
    pub fn import(&self, entries: Vec<AuditLogEntry>) -> Result<(), AuditError> {
        let mut state = self.state.write();
        let mut seen: Vec<AuditEntryId> = state.entries.iter().map(|e| e.id).collect();
        for entry in &entries {
            if seen.contains(&entry.id) {
                return Err(AuditError::DuplicateId(entry.id.to_string()));
            }
            if entry.user.trim().is_empty() || entry.details.trim().is_empty() {
                return Err(AuditError::Validation(format!("entry {} is incomplete", entry.id)));
            }
            seen.push(entry.id);
        }

        if let Some(max) = entries.iter().map(|e| e.id.sequence()).max() {
            state.next_sequence = state.next_sequence.max(max + 1);
        }
        state.entries.extend(entries);
        Ok(())
    }

    /// Every entry in insertion order
    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.state.read().entries.clone()
    }

    /// Entries for one claim in insertion order
    pub fn query_by_related_id(&self, claim_id: ClaimId) -> Vec<AuditLogEntry> {
        self.state
            .read()
            .entries
            .iter()
            .filter(|e| e.related_id == Some(claim_id))
            .cloned()
            .collect()
    }

    /// The `limit` most recently appended entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<AuditLogEntry> {
        self.state
            .read()
            .entries
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
