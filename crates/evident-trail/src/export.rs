//! Chain export: the only on-disk/on-wire contract this core defines.
//!
//! `ChainExport` is a read-only serialization of the whole chain, with or
//! without nested event detail, stamped with the export time and the
//! integrity status computed at export time. `verify_export` re-derives
//! every digest from the exported fields alone, so an independently-built
//! verifier holding only the JSON can confirm the chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use evident_contracts::{AttrMap, EventType, Severity};

use crate::canonical::{self, GENESIS_HASH};
use crate::event::AuditEvent;
use crate::merkle;
use crate::trail::Trail;

/// One exported event. Field names are part of the export contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventExport {
    pub event_id: Uuid,
    pub event_type: EventType,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub resource: String,
    pub action: String,
    pub details: AttrMap,
    pub metadata: AttrMap,
}

impl EventExport {
    fn from_event(event: &AuditEvent) -> Self {
        Self {
            event_id: event.id,
            event_type: event.event_type,
            severity: event.severity,
            timestamp: event.timestamp,
            actor: event.actor.clone(),
            resource: event.resource.clone(),
            action: event.action.clone(),
            details: event.details.clone(),
            metadata: event.metadata.clone(),
        }
    }

    /// Recompute this event's digest from the exported fields.
    pub fn digest(&self) -> String {
        canonical::event_digest(
            &self.event_id,
            self.event_type,
            self.severity,
            &self.timestamp,
            &self.actor,
            &self.resource,
            &self.action,
            &self.details,
        )
    }
}

/// One exported block header, optionally with its events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockExport {
    pub block_id: Uuid,
    pub block_number: u64,
    pub timestamp: DateTime<Utc>,
    pub previous_hash: String,
    pub merkle_root: String,
    pub block_hash: String,
    pub event_count: u64,
    /// Present only when the export included event detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventExport>>,
}

/// A read-only serialization of the whole chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainExport {
    pub export_timestamp: DateTime<Utc>,
    pub total_blocks: u64,
    pub total_events: u64,
    /// Integrity status computed at export time.
    pub chain_integrity: bool,
    pub blocks: Vec<BlockExport>,
}

impl Trail {
    /// Serialize the whole chain. Never mutates state.
    ///
    /// With `include_events = false` only block headers are exported; the
    /// merkle_root still attests to the content each block held.
    pub fn export(&self, include_events: bool) -> ChainExport {
        let blocks = self
            .blocks()
            .iter()
            .map(|block| BlockExport {
                block_id: block.id(),
                block_number: block.block_number(),
                timestamp: block.timestamp(),
                previous_hash: block.previous_hash().to_string(),
                merkle_root: block.merkle_root().to_string(),
                block_hash: block.block_hash().to_string(),
                event_count: block.len() as u64,
                events: include_events
                    .then(|| block.events().iter().map(EventExport::from_event).collect()),
            })
            .collect();

        ChainExport {
            export_timestamp: Utc::now(),
            total_blocks: self.blocks().len() as u64,
            total_events: self.total_events(),
            chain_integrity: self.verify_chain_integrity(),
            blocks,
        }
    }
}

/// Verify a serialized chain from the exported fields alone.
///
/// Checks, per block: the recomputed Merkle root over the exported events
/// (when present) matches `merkle_root`, the recomputed header digest
/// matches `block_hash`, and the declared `event_count` matches the event
/// list. Across blocks: the genesis sentinel and prev-hash linkage.
/// Header-only exports skip the Merkle recomputation — `block_hash` still
/// commits to the stored root.
pub fn verify_export(export: &ChainExport) -> bool {
    let mut expected_prev = GENESIS_HASH.to_string();

    for block in &export.blocks {
        if block.previous_hash != expected_prev {
            return false;
        }

        if let Some(events) = &block.events {
            if events.len() as u64 != block.event_count {
                return false;
            }
            let leaves: Vec<String> = events.iter().map(|e| e.digest()).collect();
            if merkle::merkle_root(&leaves) != block.merkle_root {
                return false;
            }
        }

        let expected_hash = canonical::block_digest(
            &block.block_id,
            block.block_number,
            &block.timestamp,
            &block.previous_hash,
            &block.merkle_root,
            block.event_count as usize,
        );
        if block.block_hash != expected_hash {
            return false;
        }

        expected_prev = block.block_hash.clone();
    }

    true
}
