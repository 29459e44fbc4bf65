//! # evident-contracts
//!
//! Shared types for the evident tamper-evident audit trail.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only the event vocabulary, the attribute-value union, and
//! the error type.

pub mod error;
pub mod event;
pub mod value;

pub use error::{EvidentError, EvidentResult};
pub use event::{EventType, Severity};
pub use value::{AttrMap, AttrValue};

#[cfg(test)]
mod tests {
    use super::*;

    // ── EventType / Severity serde forms ─────────────────────────────────────

    #[test]
    fn event_type_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&EventType::LoginFailed).unwrap();
        assert_eq!(json, "\"LOGIN_FAILED\"");

        let decoded: EventType = serde_json::from_str("\"VULNERABILITY_DETECTED\"").unwrap();
        assert_eq!(decoded, EventType::VulnerabilityDetected);
    }

    #[test]
    fn event_type_as_str_matches_serde_form() {
        // The canonical encoder uses as_str(); serde uses the rename attribute.
        // They must agree for every variant or hashes and exports drift apart.
        let all = [
            EventType::TrailInitialized,
            EventType::ScanInitiated,
            EventType::ScanCompleted,
            EventType::VulnerabilityDetected,
            EventType::ThreatPredicted,
            EventType::LoginSuccess,
            EventType::LoginFailed,
            EventType::AccessGranted,
            EventType::AccessDenied,
            EventType::ConfigChanged,
            EventType::DataExported,
            EventType::ComplianceCheck,
            EventType::IncidentReported,
        ];
        for ty in all {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");

        let decoded: Severity = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(decoded, Severity::Warning);
    }

    #[test]
    fn severity_as_str_matches_serde_form() {
        for sev in [
            Severity::Info,
            Severity::Warning,
            Severity::Error,
            Severity::Critical,
        ] {
            let json = serde_json::to_string(&sev).unwrap();
            assert_eq!(json, format!("\"{}\"", sev.as_str()));
        }
    }

    // ── AttrValue serde round-trips ──────────────────────────────────────────

    #[test]
    fn attr_value_round_trips_as_plain_json() {
        let mut map = AttrMap::new();
        map.insert("port".to_string(), AttrValue::Int(443));
        map.insert("tls".to_string(), AttrValue::Bool(true));
        map.insert("host".to_string(), AttrValue::from("db-01"));
        map.insert(
            "scores".to_string(),
            AttrValue::List(vec![AttrValue::Float(0.5), AttrValue::Float(0.9)]),
        );

        let json = serde_json::to_string(&map).unwrap();
        // Untagged: values appear as native JSON scalars, not tagged objects.
        assert!(json.contains("\"port\":443"));
        assert!(json.contains("\"tls\":true"));

        let decoded: AttrMap = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, map);
    }

    #[test]
    fn has_non_finite_sees_through_nesting() {
        assert!(!AttrValue::Float(2.0).has_non_finite());
        assert!(!AttrValue::Int(7).has_non_finite());
        assert!(AttrValue::Float(f64::NAN).has_non_finite());
        assert!(AttrValue::Float(f64::INFINITY).has_non_finite());
        assert!(AttrValue::Float(f64::NEG_INFINITY).has_non_finite());

        let nested_list = AttrValue::List(vec![
            AttrValue::Int(1),
            AttrValue::List(vec![AttrValue::Float(f64::NAN)]),
        ]);
        assert!(nested_list.has_non_finite());

        let mut inner = AttrMap::new();
        inner.insert("rate".to_string(), AttrValue::Float(f64::INFINITY));
        let nested_map = AttrValue::Map(inner);
        assert!(nested_map.has_non_finite());
    }

    #[test]
    fn attr_map_iterates_in_sorted_key_order() {
        let mut map = AttrMap::new();
        map.insert("zeta".to_string(), AttrValue::Int(1));
        map.insert("alpha".to_string(), AttrValue::Int(2));
        map.insert("mid".to_string(), AttrValue::Int(3));

        let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    // ── Error display messages ───────────────────────────────────────────────

    #[test]
    fn error_missing_field_display() {
        let err = EvidentError::MissingField { field: "actor" };
        let msg = err.to_string();
        assert!(msg.contains("missing required event field"));
        assert!(msg.contains("actor"));
    }

    #[test]
    fn error_invalid_capacity_display() {
        let err = EvidentError::InvalidCapacity { capacity: 0 };
        let msg = err.to_string();
        assert!(msg.contains("invalid block capacity 0"));
    }

    #[test]
    fn error_non_finite_number_display() {
        let err = EvidentError::NonFiniteNumber { field: "details" };
        let msg = err.to_string();
        assert!(msg.contains("non-finite number"));
        assert!(msg.contains("details"));
    }

    #[test]
    fn error_trail_write_failed_display() {
        let err = EvidentError::TrailWriteFailed {
            reason: "lock poisoned".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("trail write failed"));
        assert!(msg.contains("lock poisoned"));
    }
}
