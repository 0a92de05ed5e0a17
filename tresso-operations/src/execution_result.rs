//! Execution result types for operations

use crate::{LogEntry, Operation};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::Display;
use std::time::Instant;

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: Operations that mutate state and should be audited
/// - Unlogged: Read-only operations with no side effects
/// - Failed: Errors (optionally logged)
#[derive(Debug)]
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but no logging needed (read-only)
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }

    /// Wrap a read: successes are unlogged, failures carry no entry.
    pub fn unlogged(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Unlogged { value },
            Err(error) => Self::Failed {
                error,
                log_entry: None,
            },
        }
    }
}

impl<T: Serialize, E: Display> ExecutionResult<T, E> {
    /// Wrap a write: both outcomes get a log entry timed from `started`.
    pub fn logged(op: String, input: Value, started: Instant, result: Result<T, E>) -> Self {
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(value) => {
                let output = serde_json::to_value(&value).unwrap_or(Value::Null);
                Self::Logged {
                    value,
                    log_entry: LogEntry::new(op, input, output, None, duration_ms),
                }
            }
            Err(error) => {
                let output = json!({ "error": error.to_string() });
                Self::Failed {
                    log_entry: Some(LogEntry::new(op, input, output, None, duration_ms)),
                    error,
                }
            }
        }
    }

    /// Wrap a write performed by `operation`, recording its request as input.
    pub fn logged_for<O>(operation: &O, started: Instant, result: Result<T, E>) -> Self
    where
        O: Operation + Serialize + ?Sized,
    {
        let input = serde_json::to_value(operation).unwrap_or(Value::Null);
        Self::logged(operation.op_string(), input, started, result)
    }
}
