//! Hash-linked blocks of audit events.
//!
//! A block is an ordered batch of events plus chain-linkage metadata. Its
//! `merkle_root` summarizes the event list; its `block_hash` commits to
//! the header (id, number, timestamp, previous_hash, merkle_root, event
//! count) and never directly encodes event content. Both summary fields
//! are recomputed on every mutation, so a block is always internally
//! consistent between API calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::canonical;
use crate::event::AuditEvent;
use crate::merkle;

/// One sealed (or still-filling) batch of events in the chain.
///
/// Fields are crate-visible rather than public so the only mutation paths
/// are `add_event` and the trail's rotation; integrity tests tamper with
/// them directly to simulate an out-of-API attacker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub(crate) id: Uuid,
    pub(crate) block_number: u64,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) previous_hash: String,
    pub(crate) events: Vec<AuditEvent>,
    pub(crate) merkle_root: String,
    pub(crate) block_hash: String,
}

impl Block {
    /// Create an empty block linked to `previous_hash`.
    ///
    /// The summary fields are consistent immediately: the merkle_root of
    /// an empty event list is the hash of empty input.
    pub fn new(block_number: u64, previous_hash: impl Into<String>) -> Self {
        let mut block = Self {
            id: Uuid::new_v4(),
            block_number,
            timestamp: Utc::now(),
            previous_hash: previous_hash.into(),
            events: Vec::new(),
            merkle_root: String::new(),
            block_hash: String::new(),
        };
        block.recompute();
        block
    }

    /// Append one event, then bring merkle_root and block_hash back in
    /// line with the new event list. O(k) hash operations for k events.
    pub fn add_event(&mut self, event: AuditEvent) {
        self.events.push(event);
        self.recompute();
    }

    /// Recompute both summary fields from current state.
    fn recompute(&mut self) {
        let leaves: Vec<String> = self.events.iter().map(|e| e.hash()).collect();
        self.merkle_root = merkle::merkle_root(&leaves);
        self.block_hash = canonical::block_digest(
            &self.id,
            self.block_number,
            &self.timestamp,
            &self.previous_hash,
            &self.merkle_root,
            self.events.len(),
        );
    }

    /// Recompute both digests from current state and compare with the
    /// stored values. Returns false on any mismatch — an integrity
    /// failure is a detectable security signal, not a program fault, so
    /// this never panics or errors.
    pub fn verify_integrity(&self) -> bool {
        let leaves: Vec<String> = self.events.iter().map(|e| e.hash()).collect();
        let expected_root = merkle::merkle_root(&leaves);
        if self.merkle_root != expected_root {
            return false;
        }

        let expected_hash = canonical::block_digest(
            &self.id,
            self.block_number,
            &self.timestamp,
            &self.previous_hash,
            &self.merkle_root,
            self.events.len(),
        );
        self.block_hash == expected_hash
    }

    // ── Read accessors ────────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    pub fn merkle_root(&self) -> &str {
        &self.merkle_root
    }

    pub fn block_hash(&self) -> &str {
        &self.block_hash
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
