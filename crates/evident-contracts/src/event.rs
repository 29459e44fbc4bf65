//! Event vocabulary: the type and severity enumerations.
//!
//! Both enums serialize to the exact strings used by the canonical hash
//! encoding (`as_str()`), so the serde form and the hashed form can never
//! drift apart.

use serde::{Deserialize, Serialize};

/// The kind of security-relevant action an event records.
///
/// The vocabulary is open but bounded: callers pick from this list rather
/// than supplying free text, so summary breakdowns and policy filters stay
/// stable. Serialized SCREAMING_SNAKE_CASE (e.g. `"LOGIN_FAILED"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Bootstrap event written into the genesis block at trail construction.
    TrailInitialized,
    ScanInitiated,
    ScanCompleted,
    VulnerabilityDetected,
    ThreatPredicted,
    LoginSuccess,
    LoginFailed,
    AccessGranted,
    AccessDenied,
    ConfigChanged,
    DataExported,
    ComplianceCheck,
    IncidentReported,
}

impl EventType {
    /// The canonical string form, identical to the serde representation.
    ///
    /// This exact string is what enters the event digest — see the
    /// canonical encoding in evident-trail.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::TrailInitialized => "TRAIL_INITIALIZED",
            EventType::ScanInitiated => "SCAN_INITIATED",
            EventType::ScanCompleted => "SCAN_COMPLETED",
            EventType::VulnerabilityDetected => "VULNERABILITY_DETECTED",
            EventType::ThreatPredicted => "THREAT_PREDICTED",
            EventType::LoginSuccess => "LOGIN_SUCCESS",
            EventType::LoginFailed => "LOGIN_FAILED",
            EventType::AccessGranted => "ACCESS_GRANTED",
            EventType::AccessDenied => "ACCESS_DENIED",
            EventType::ConfigChanged => "CONFIG_CHANGED",
            EventType::DataExported => "DATA_EXPORTED",
            EventType::ComplianceCheck => "COMPLIANCE_CHECK",
            EventType::IncidentReported => "INCIDENT_REPORTED",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How serious an event is, from routine (`Info`) to incident-grade
/// (`Critical`). Serialized lowercase (e.g. `"warning"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// The canonical string form, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
