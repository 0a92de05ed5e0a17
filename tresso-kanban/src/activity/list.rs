//! ListActivity command

use crate::context::TressoContext;
use crate::error::TressoError;
use serde::{Deserialize, Serialize};
use tresso_operations::{async_trait, operation, Execute, ExecutionResult, LogEntry};

const DEFAULT_LIMIT: usize = 50;

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// Read the most recent activity entries, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListActivity {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

operation!(ListActivity, verb = "list", noun = "activity", description = "Show recent board activity");

impl Default for ListActivity {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListActivity {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for ListActivity {
    type Output = Vec<LogEntry>;

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<Vec<LogEntry>, TressoError> {
        ExecutionResult::unlogged(ctx.store().read_activity(self.limit).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::processor::TressoOperationProcessor;
    use crate::types::UserId;
    use tresso_operations::OperationProcessor;

    #[tokio::test]
    async fn test_list_activity_limit() {
        let ctx = TressoContext::in_memory(UserId::new(1));
        let processor = TressoOperationProcessor::new();
        for name in ["a", "b", "c"] {
            processor
                .process(&CreateBoard::new(name), &ctx)
                .await
                .unwrap();
        }

        let entries = processor
            .process(&ListActivity::new(2), &ctx)
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].output["name"], "c");
        assert_eq!(entries[1].output["name"], "b");
    }
}
