//! The audit event record.
//!
//! `AuditEvent` is the immutable leaf of the trail: created by a caller,
//! appended to exactly one block, never mutated or deleted afterward.
//! Its digest covers every field EXCEPT `metadata`, which exists for
//! operational annotation rather than evidentiary content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use evident_contracts::{AttrMap, AttrValue, EventType, EvidentError, EvidentResult, Severity};

use crate::canonical;

/// One security-relevant action, as recorded in the trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique event identifier, generated at construction.
    pub id: Uuid,

    /// What kind of action this records.
    pub event_type: EventType,

    /// How serious the action is.
    pub severity: Severity,

    /// Wall-clock time (UTC) the event was created.
    pub timestamp: DateTime<Utc>,

    /// Who performed the action (user, service, or system identity).
    pub actor: String,

    /// What the action targeted.
    pub resource: String,

    /// Free-text description of the action taken.
    pub action: String,

    /// Typed evidentiary payload. Part of the event digest.
    pub details: AttrMap,

    /// Operational annotation. Explicitly excluded from the digest, so it
    /// may vary without invalidating the chain.
    pub metadata: AttrMap,
}

impl AuditEvent {
    /// Create a new event with a fresh id and the current UTC timestamp.
    ///
    /// Fails with `MissingField` when `actor`, `resource`, or `action` is
    /// empty — these are the minimum an auditor needs to attribute an
    /// action — and with `NonFiniteNumber` when `details` contains a NaN
    /// or infinite float, which JSON cannot represent and would make the
    /// chain unexportable. Well-formed input has no failure modes.
    pub fn new(
        event_type: EventType,
        severity: Severity,
        actor: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
        details: AttrMap,
    ) -> EvidentResult<Self> {
        let actor = actor.into();
        let resource = resource.into();
        let action = action.into();

        if actor.is_empty() {
            return Err(EvidentError::MissingField { field: "actor" });
        }
        if resource.is_empty() {
            return Err(EvidentError::MissingField { field: "resource" });
        }
        if action.is_empty() {
            return Err(EvidentError::MissingField { field: "action" });
        }
        if details.values().any(AttrValue::has_non_finite) {
            return Err(EvidentError::NonFiniteNumber { field: "details" });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            event_type,
            severity,
            timestamp: Utc::now(),
            actor,
            resource,
            action,
            details,
            metadata: AttrMap::new(),
        })
    }

    /// Attach operational metadata. Never contributes to `hash()`.
    ///
    /// Metadata appears in exports, so it carries the same finite-float
    /// requirement as `details`.
    pub fn with_metadata(mut self, metadata: AttrMap) -> EvidentResult<Self> {
        if metadata.values().any(AttrValue::has_non_finite) {
            return Err(EvidentError::NonFiniteNumber { field: "metadata" });
        }
        self.metadata = metadata;
        Ok(self)
    }

    /// The event's SHA-256 digest (lowercase hex).
    ///
    /// Pure function of {id, type, severity, timestamp, actor, resource,
    /// action, details}; see the canonical module for the exact byte
    /// layout shared with external verifiers.
    pub fn hash(&self) -> String {
        canonical::event_digest(
            &self.id,
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

#[cfg(test)]
mod tests {
    use super::*;
    use evident_contracts::AttrValue;

    fn sample() -> AuditEvent {
        let mut details = AttrMap::new();
        details.insert("source_ip".to_string(), AttrValue::from("10.0.0.7"));
        details.insert("attempts".to_string(), AttrValue::Int(3));

        AuditEvent::new(
            EventType::LoginFailed,
            Severity::Warning,
            "alice",
            "auth-service",
            "failed password login",
            details,
        )
        .unwrap()
    }

    #[test]
    fn construction_rejects_empty_required_fields() {
        let err = AuditEvent::new(
            EventType::LoginFailed,
            Severity::Warning,
            "",
            "auth-service",
            "login",
            AttrMap::new(),
        )
        .unwrap_err();
        assert!(matches!(err, EvidentError::MissingField { field: "actor" }));

        let err = AuditEvent::new(
            EventType::LoginFailed,
            Severity::Warning,
            "alice",
            "auth-service",
            "",
            AttrMap::new(),
        )
        .unwrap_err();
        assert!(matches!(err, EvidentError::MissingField { field: "action" }));
    }

    #[test]
    fn non_finite_details_are_rejected() {
        let mut details = AttrMap::new();
        details.insert("score".to_string(), AttrValue::Float(f64::NAN));
        let err = AuditEvent::new(
            EventType::ThreatPredicted,
            Severity::Critical,
            "model",
            "scoring-engine",
            "threat score computed",
            details,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EvidentError::NonFiniteNumber { field: "details" }
        ));

        // Nested occurrences are caught too.
        let mut details = AttrMap::new();
        details.insert(
            "scores".to_string(),
            AttrValue::List(vec![AttrValue::Float(0.5), AttrValue::Float(f64::INFINITY)]),
        );
        let err = AuditEvent::new(
            EventType::ThreatPredicted,
            Severity::Critical,
            "model",
            "scoring-engine",
            "threat score computed",
            details,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EvidentError::NonFiniteNumber { field: "details" }
        ));
    }

    #[test]
    fn non_finite_metadata_is_rejected() {
        let mut metadata = AttrMap::new();
        metadata.insert("drift".to_string(), AttrValue::Float(f64::NEG_INFINITY));
        let err = sample().with_metadata(metadata).unwrap_err();
        assert!(matches!(
            err,
            EvidentError::NonFiniteNumber { field: "metadata" }
        ));
    }

    #[test]
    fn hash_is_stable_across_calls() {
        let event = sample();
        assert_eq!(event.hash(), event.hash());
        assert_eq!(event.hash().len(), 64);
    }

    #[test]
    fn metadata_never_changes_the_hash() {
        let event = sample();
        let before = event.hash();

        let mut metadata = AttrMap::new();
        metadata.insert("ingest_node".to_string(), AttrValue::from("collector-3"));
        let annotated = event.with_metadata(metadata).unwrap();

        assert_eq!(
            annotated.hash(),
            before,
            "metadata is operational annotation, not evidentiary content"
        );
    }

    #[test]
    fn any_hashed_field_changes_the_hash() {
        let event = sample();
        let baseline = event.hash();

        let mut changed = event.clone();
        changed.actor = "mallory".to_string();
        assert_ne!(changed.hash(), baseline);

        let mut changed = event.clone();
        changed.severity = Severity::Critical;
        assert_ne!(changed.hash(), baseline);

        let mut changed = event;
        changed
            .details
            .insert("attempts".to_string(), AttrValue::Int(4));
        assert_ne!(changed.hash(), baseline);
    }

    #[test]
    fn events_get_unique_ids() {
        let a = sample();
        let b = sample();
        assert_ne!(a.id, b.id);
        assert_ne!(a.hash(), b.hash());
    }
}
