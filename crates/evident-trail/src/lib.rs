//! # evident-trail
//!
//! A blockchain-inspired, tamper-evident audit trail: an append-only log
//! of security events, grouped into hash-linked blocks whose contents are
//! summarized by a Merkle root, with chain-wide integrity verification.
//!
//! ## Overview
//!
//! Events flow through [`Trail::add_event`]: the active block takes the
//! append (rotating to a fresh block first when full), then recomputes its
//! Merkle root and block hash. Altering any committed event — even a
//! single byte of a hashed field — breaks the corresponding digests, which
//! [`Trail::verify_chain_integrity`] detects. This is detection, not
//! prevention: integrity findings are booleans, never errors.
//!
//! Single-process and in-memory by design. No persistence, replication,
//! consensus, or mining — any transport or storage wrapping the
//! [`ChainExport`] contract belongs to the hosting system.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use evident_contracts::{AttrMap, EventType, Severity};
//! use evident_trail::{AuditEvent, EventFilter, Trail};
//!
//! let mut trail = Trail::new(1000)?;
//! let event = AuditEvent::new(
//!     EventType::LoginFailed,
//!     Severity::Warning,
//!     "alice",
//!     "auth-service",
//!     "failed password login",
//!     AttrMap::new(),
//! )?;
//! trail.add_event(event);
//!
//! assert!(trail.verify_chain_integrity());
//! let failures = trail.events(&EventFilter::default().with_type(EventType::LoginFailed));
//! let export = trail.export(true);
//! ```

pub mod block;
pub mod canonical;
pub mod event;
pub mod export;
pub mod merkle;
pub mod shared;
pub mod trail;

pub use block::Block;
pub use canonical::GENESIS_HASH;
pub use event::AuditEvent;
pub use export::{verify_export, BlockExport, ChainExport, EventExport};
pub use merkle::{merkle_root, pair_hash};
pub use shared::SharedTrail;
pub use trail::{ChainSummary, EventFilter, Trail};

// ── Tests ─────────────────────────────────────────────────────────────────────
