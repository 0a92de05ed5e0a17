//! Processor that runs board commands and records their activity

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use async_trait::async_trait;
use tresso_operations::{Execute, LogEntry, Operation, OperationProcessor};

/// Runs commands, attributes their log entries and appends them to the
/// store's activity log.
///
/// Reads produce no entry. Failed writes are recorded too, with the error
/// text as output.
#[derive(Debug, Clone, Default)]
pub struct TressoOperationProcessor {
    actor: Option<String>,
}

impl TressoOperationProcessor {
    /// Processor that records entries with the context user as actor
    pub fn new() -> Self {
        Self::default()
    }

    /// Processor that records entries under a fixed actor name
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    fn actor_for(&self, ctx: &TressoContext) -> String {
        self.actor
            .clone()
            .unwrap_or_else(|| format!("user:{}", ctx.user()))
    }

    async fn record(&self, ctx: &TressoContext, entry: LogEntry) {
        let entry = entry.with_actor(self.actor_for(ctx));
        if entry.is_failure() {
            tracing::warn!(op = %entry.op, actor = ?entry.actor, output = %entry.output, "operation failed");
        } else {
            tracing::info!(op = %entry.op, actor = ?entry.actor, duration_ms = entry.duration_ms, "operation applied");
        }
        // The write itself already happened; a lost audit row must not turn it into a failure
        if let Err(e) = ctx.store().append_activity(&entry).await {
            tracing::warn!(op = %entry.op, error = %e, "failed to append activity");
        }
    }
}

#[async_trait]
impl OperationProcessor<TressoContext, TressoError> for TressoOperationProcessor {
    async fn process<O>(&self, operation: &O, ctx: &TressoContext) -> Result<O::Output>
    where
        O: Execute<TressoContext, TressoError>,
    {
        tracing::debug!(op = %operation.op_string(), "processing operation");
        let (result, entry) = operation.execute(ctx).await.split();
        if let Some(entry) = entry {
            self.record(ctx, entry).await;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CreateBoard, ListBoards};
    use crate::types::UserId;

    #[tokio::test]
    async fn test_writes_are_recorded_reads_are_not() {
        let ctx = TressoContext::in_memory(UserId::new(7));
        let processor = TressoOperationProcessor::new();

        processor
            .process(&CreateBoard::new("Roadmap"), &ctx)
            .await
            .unwrap();
        processor.process(&ListBoards, &ctx).await.unwrap();

        let entries = ctx.store().read_activity(10).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].op, "create board");
        assert_eq!(entries[0].actor.as_deref(), Some("user:7"));
    }

    #[tokio::test]
    async fn test_failures_are_recorded() {
        let ctx = TressoContext::in_memory(UserId::new(1));
        let processor = TressoOperationProcessor::with_actor("cli");

        let err = processor
            .process(&CreateBoard::new("   "), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required field: name");

        let entries = ctx.store().read_activity(10).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_failure());
        assert_eq!(entries[0].actor.as_deref(), Some("cli"));
    }
}
