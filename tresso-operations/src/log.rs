//! Log entry types for operation tracking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A log entry recording one mutating operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique ID for this log entry (ULID format)
    pub id: String,

    /// When the operation occurred
    pub timestamp: DateTime<Utc>,

    /// Canonical op string (e.g., "create card", "move card")
    pub op: String,

    /// The normalized input parameters (as JSON)
    pub input: Value,

    /// The result value or error (as JSON)
    pub output: Value,

    /// Who performed the operation, usually "user:<id>"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    /// How long the operation took (milliseconds)
    pub duration_ms: u64,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(
        op: impl Into<String>,
        input: Value,
        output: Value,
        actor: Option<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            timestamp: Utc::now(),
            op: op.into(),
            input,
            output,
            actor,
            duration_ms,
        }
    }

    /// Set the actor
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Whether this entry records a failed operation
    pub fn is_failure(&self) -> bool {
        self.output.get("error").is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_ids_are_unique() {
        let a = LogEntry::new("create card", json!({}), json!({}), None, 1);
        let b = LogEntry::new("create card", json!({}), json!({}), None, 1);
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 26);
    }

    #[test]
    fn test_with_actor_and_failure() {
        let entry = LogEntry::new("delete card", json!({"id": 4}), json!({"error": "nope"}), None, 0)
            .with_actor("user:1");
        assert_eq!(entry.actor.as_deref(), Some("user:1"));
        assert!(entry.is_failure());
    }

    #[test]
    fn test_actor_skipped_when_absent() {
        let entry = LogEntry::new("move card", json!({}), json!({"id": 1}), None, 3);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("actor"));
        assert!(!entry.is_failure());
    }
}
