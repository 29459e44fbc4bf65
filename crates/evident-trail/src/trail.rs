//! The trail coordinator: an arena of blocks plus the active-block index.
//!
//! The trail owns the ordered block sequence, rotates to a fresh block
//! when the active one reaches capacity, and exposes the read side:
//! filtered queries, the chain summary, and chain-wide integrity
//! verification. It never deletes or rewrites — the chain only grows.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use evident_contracts::{AttrMap, AttrValue, EventType, EvidentError, EvidentResult, Severity};

use crate::block::Block;
use crate::canonical::GENESIS_HASH;
use crate::event::AuditEvent;

/// Conjunctive filter for [`Trail::events`]. Every set field must match;
/// unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub event_type: Option<EventType>,
    pub severity: Option<Severity>,
    pub actor: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl EventFilter {
    pub fn with_type(mut self, event_type: EventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, event: &AuditEvent) -> bool {
        if let Some(ty) = self.event_type {
            if event.event_type != ty {
                return false;
            }
        }
        if let Some(sev) = self.severity {
            if event.severity != sev {
                return false;
            }
        }
        if let Some(actor) = &self.actor {
            if &event.actor != actor {
                return false;
            }
        }
        if let Some(since) = self.since {
            if event.timestamp < since {
                return false;
            }
        }
        true
    }
}

/// A point-in-time rollup of the whole chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSummary {
    pub total_blocks: u64,
    pub total_events: u64,
    /// Creation time of the genesis block.
    pub earliest_block_timestamp: DateTime<Utc>,
    /// Creation time of the newest block.
    pub latest_block_timestamp: DateTime<Utc>,
    pub events_by_type: BTreeMap<EventType, u64>,
    pub events_by_severity: BTreeMap<Severity, u64>,
    /// Result of a full chain verification at summary time.
    pub chain_integrity: bool,
    pub latest_block_hash: String,
}

/// The append-only, tamper-evident audit trail.
///
/// Construct one per hosting service and pass it to every producer and
/// consumer — there is deliberately no global instance. Writers must be
/// externally serialized; see [`SharedTrail`](crate::SharedTrail) for a
/// ready-made reader-writer-locked handle.
#[derive(Debug)]
pub struct Trail {
    blocks: Vec<Block>,
    /// Index of the currently writable block.
    active: usize,
    max_events_per_block: usize,
    total_events: u64,
}

impl Trail {
    /// Create a trail seeded with a genesis block holding one bootstrap
    /// event. Rejects a zero capacity with `InvalidCapacity`.
    pub fn new(max_events_per_block: usize) -> EvidentResult<Self> {
        if max_events_per_block == 0 {
            return Err(EvidentError::InvalidCapacity {
                capacity: max_events_per_block,
            });
        }

        let mut genesis = Block::new(0, GENESIS_HASH);
        genesis.add_event(Self::bootstrap_event(max_events_per_block)?);

        info!(
            block_hash = %genesis.block_hash(),
            max_events_per_block,
            "audit trail initialized with genesis block"
        );

        Ok(Self {
            blocks: vec![genesis],
            active: 0,
            max_events_per_block,
            total_events: 1,
        })
    }

    /// The event every chain starts with, recording its own construction.
    fn bootstrap_event(max_events_per_block: usize) -> EvidentResult<AuditEvent> {
        let mut details = AttrMap::new();
        details.insert(
            "max_events_per_block".to_string(),
            AttrValue::Int(max_events_per_block as i64),
        );
        AuditEvent::new(
            EventType::TrailInitialized,
            Severity::Info,
            "system",
            "audit-trail",
            "genesis block created",
            details,
        )
    }

    /// Append one event, rotating to a fresh block first when the active
    /// block is sealed.
    ///
    /// This is a compound operation (possible rotation, append, two hash
    /// recomputations) with no internal locking — concurrent writers must
    /// be serialized by the caller or by [`SharedTrail`](crate::SharedTrail).
    pub fn add_event(&mut self, event: AuditEvent) {
        if self.active_block_sealed() {
            let previous_hash = self.blocks[self.active].block_hash().to_string();
            let block = Block::new(self.blocks.len() as u64, previous_hash);
            info!(
                block_number = block.block_number(),
                previous_hash = %block.previous_hash(),
                "opened new block"
            );
            self.blocks.push(block);
            self.active = self.blocks.len() - 1;
        }

        debug!(
            event_id = %event.id,
            event_type = %event.event_type,
            block_number = self.blocks[self.active].block_number(),
            "event appended"
        );
        self.blocks[self.active].add_event(event);
        self.total_events += 1;
    }

    /// The genesis block is sealed by its bootstrap event and never takes
    /// caller events; every later block seals when it reaches capacity.
    fn active_block_sealed(&self) -> bool {
        self.active == 0 || self.blocks[self.active].len() >= self.max_events_per_block
    }

    /// Walk the chain and verify it end to end.
    ///
    /// False if the genesis block's previous_hash is not the all-zero
    /// sentinel, if any block fails its own integrity check, or if any
    /// non-first block's previous_hash does not equal its predecessor's
    /// block_hash. Read-only and idempotent; returns a single boolean
    /// with no positional diagnostics — callers who need the location of
    /// tampering re-walk the blocks themselves.
    pub fn verify_chain_integrity(&self) -> bool {
        let mut expected_prev = GENESIS_HASH;

        for block in &self.blocks {
            if block.previous_hash() != expected_prev {
                return false;
            }
            if !block.verify_integrity() {
                return false;
            }
            expected_prev = block.block_hash();
        }

        true
    }

    /// Filtered scan across the chain: blocks in chain order, in-block
    /// order preserved, filters ANDed, stopping as soon as `limit`
    /// results are collected. Never reorders.
    pub fn events(&self, filter: &EventFilter) -> Vec<&AuditEvent> {
        let limit = filter.limit.unwrap_or(usize::MAX);
        let mut matched = Vec::new();

        'blocks: for block in &self.blocks {
            for event in block.events() {
                if matched.len() >= limit {
                    break 'blocks;
                }
                if filter.matches(event) {
                    matched.push(event);
                }
            }
        }

        matched
    }

    /// Roll up the chain: counts, timestamp bounds, per-type and
    /// per-severity breakdowns, and a live integrity verification.
    pub fn summary(&self) -> ChainSummary {
        let mut events_by_type: BTreeMap<EventType, u64> = BTreeMap::new();
        let mut events_by_severity: BTreeMap<Severity, u64> = BTreeMap::new();

        for block in &self.blocks {
            for event in block.events() {
                *events_by_type.entry(event.event_type).or_insert(0) += 1;
                *events_by_severity.entry(event.severity).or_insert(0) += 1;
            }
        }

        // The chain always holds at least the genesis block.
        let first = &self.blocks[0];
        let last = &self.blocks[self.blocks.len() - 1];

        ChainSummary {
            total_blocks: self.blocks.len() as u64,
            total_events: self.total_events,
            earliest_block_timestamp: first.timestamp(),
            latest_block_timestamp: last.timestamp(),
            events_by_type,
            events_by_severity,
            chain_integrity: self.verify_chain_integrity(),
            latest_block_hash: last.block_hash().to_string(),
        }
    }

    // ── Read accessors ────────────────────────────────────────────────────────

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn total_events(&self) -> u64 {
        self.total_events
    }

    pub fn max_events_per_block(&self) -> usize {
        self.max_events_per_block
    }

    /// Test-only mutable access, used to simulate out-of-API tampering.
    #[cfg(test)]
    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}
