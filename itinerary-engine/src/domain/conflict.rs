//! Scheduling conflict types.
//!
//! Conflicts are domain results, not failures: a timeline is always
//! produced, and conflicts ride alongside it for the UI to surface.
//! Severity is advisory; it never aborts computation.

use serde::{Deserialize, Serialize};

/// The kind of scheduling problem detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    /// Arrival before the declared opening time.
    LateArrival,
    /// Arrival at or after the declared closing time.
    Closed,
    /// The visit runs past the declared closing time.
    Overlap,
    /// The day's running clock has passed the rush threshold.
    Rush,
}

impl ConflictKind {
    /// The severity this kind of conflict carries.
    pub fn severity(self) -> Severity {
        match self {
            ConflictKind::Closed => Severity::Error,
            ConflictKind::LateArrival | ConflictKind::Overlap | ConflictKind::Rush => {
                Severity::Warning
            }
        }
    }
}

/// How serious a conflict is, for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A detected scheduling problem attached to one stop.
///
/// Multiple conflicts may attach to the same stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// Id of the stop the conflict concerns.
    pub stop_id: String,

    /// Conflict kind.
    pub kind: ConflictKind,

    /// Human-readable description.
    pub message: String,

    /// Advisory severity.
    pub severity: Severity,
}

impl Conflict {
    /// Create a conflict with the severity implied by its kind.
    pub fn new(stop_id: impl Into<String>, kind: ConflictKind, message: impl Into<String>) -> Self {
        Self {
            stop_id: stop_id.into(),
            kind,
            message: message.into(),
            severity: kind.severity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_kind() {
        assert_eq!(ConflictKind::Closed.severity(), Severity::Error);
        assert_eq!(ConflictKind::LateArrival.severity(), Severity::Warning);
        assert_eq!(ConflictKind::Overlap.severity(), Severity::Warning);
        assert_eq!(ConflictKind::Rush.severity(), Severity::Warning);

        let c = Conflict::new("s1", ConflictKind::Closed, "already closed");
        assert_eq!(c.severity, Severity::Error);
    }

    #[test]
    fn serde_kind_tags() {
        let c = Conflict::new("s1", ConflictKind::LateArrival, "too early");
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["kind"], "late-arrival");
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["stopId"], "s1");
    }
}
