//! A cloneable, reader-writer-locked handle to one trail.
//!
//! There is deliberately no process-wide singleton: the hosting service
//! constructs one `SharedTrail` and injects it into every producer and
//! consumer. The whole block-list/active-index structure sits behind a
//! single `RwLock`, so appends are serialized while readers run
//! concurrently and never observe a half-finished rotation.

use std::sync::{Arc, RwLock};

use evident_contracts::{EvidentError, EvidentResult};

use crate::event::AuditEvent;
use crate::export::ChainExport;
use crate::trail::{ChainSummary, EventFilter, Trail};

/// Thread-safe handle to a [`Trail`]. Cloning is cheap and every clone
/// observes the same chain.
#[derive(Clone)]
pub struct SharedTrail {
    inner: Arc<RwLock<Trail>>,
}

impl SharedTrail {
    /// Create a trail with the given block capacity and wrap it.
    pub fn new(max_events_per_block: usize) -> EvidentResult<Self> {
        Ok(Self {
            inner: Arc::new(RwLock::new(Trail::new(max_events_per_block)?)),
        })
    }

    /// Append one event under the write lock, making the compound
    /// rotation-plus-append atomic to every reader.
    ///
    /// Fails only if the lock is poisoned, which cannot happen under
    /// normal operation.
    pub fn append(&self, event: AuditEvent) -> EvidentResult<()> {
        let mut trail = self.inner.write().map_err(|e| EvidentError::TrailWriteFailed {
            reason: format!("trail lock poisoned: {}", e),
        })?;
        trail.add_event(event);
        Ok(())
    }

    /// Verify the whole chain under a read lock.
    pub fn verify(&self) -> bool {
        self.read().verify_chain_integrity()
    }

    /// Roll up the chain under a read lock.
    pub fn summary(&self) -> ChainSummary {
        self.read().summary()
    }

    /// Export the chain under a read lock.
    pub fn export(&self, include_events: bool) -> ChainExport {
        self.read().export(include_events)
    }

    /// Filtered query. Events are cloned out because references cannot
    /// outlive the lock guard.
    pub fn events(&self, filter: &EventFilter) -> Vec<AuditEvent> {
        self.read()
            .events(filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Total events including the genesis bootstrap event.
    pub fn total_events(&self) -> u64 {
        self.read().total_events()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Trail> {
        self.inner.read().expect("trail lock poisoned")
    }
}
