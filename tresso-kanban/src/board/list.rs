//! ListBoards command

use crate::context::TressoContext;
use crate::error::TressoError;
use crate::types::Board;
use serde::{Deserialize, Serialize};
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// List the current user's boards, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBoards;

operation!(ListBoards, verb = "list", noun = "boards", description = "List your boards");

#[async_trait]
impl Execute<TressoContext, TressoError> for ListBoards {
    type Output = Vec<Board>;

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<Vec<Board>, TressoError> {
        ExecutionResult::unlogged(ctx.store().list_boards(ctx.user()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::types::UserId;

    #[tokio::test]
    async fn test_list_boards_newest_first_and_scoped() {
        let ctx = TressoContext::in_memory(UserId::new(1));
        for name in ["First", "Second"] {
            CreateBoard::new(name).execute(&ctx).await.into_result().unwrap();
        }
        CreateBoard::new("Not mine")
            .execute(&ctx.for_user(UserId::new(2)))
            .await
            .into_result()
            .unwrap();

        let result = ListBoards.execute(&ctx).await;
        assert!(!result.should_log());
        let names: Vec<String> = result
            .into_result()
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }
}
