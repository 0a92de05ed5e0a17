//! DeleteBoard command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::types::BoardId;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Delete a board together with its columns, cards and labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBoard {
    pub id: BoardId,
}

operation!(DeleteBoard, verb = "delete", noun = "board", description = "Delete a board and everything on it");

impl DeleteBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<()> {
        if !ctx.store().delete_board(ctx.user(), self.id).await? {
            return Err(TressoError::not_found("board", self.id));
        }
        Ok(())
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for DeleteBoard {
    type Output = ();

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<(), TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CreateBoard, ListBoards};
    use crate::types::UserId;

    #[tokio::test]
    async fn test_delete_board() {
        let ctx = TressoContext::in_memory(UserId::new(1));
        let board = CreateBoard::new("Roadmap").execute(&ctx).await.into_result().unwrap();

        DeleteBoard::new(board.id).execute(&ctx).await.into_result().unwrap();
        assert!(ListBoards.execute(&ctx).await.into_result().unwrap().is_empty());

        // Second delete finds nothing
        assert!(DeleteBoard::new(board.id)
            .execute(&ctx)
            .await
            .into_result()
            .is_err());
    }
}
