//! DeleteColumn command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::types::{BoardId, ColumnId};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Delete a column and every card in it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteColumn {
    pub id: ColumnId,
    pub board_id: BoardId,
}

operation!(DeleteColumn, verb = "delete", noun = "column", description = "Delete a column and its cards");

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>, board_id: impl Into<BoardId>) -> Self {
        Self {
            id: id.into(),
            board_id: board_id.into(),
        }
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<()> {
        ctx.require_column_on(self.id, self.board_id).await?;
        if !ctx.store().delete_column(ctx.user(), self.id).await? {
            return Err(TressoError::not_found("column", self.id));
        }
        Ok(())
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for DeleteColumn {
    type Output = ();

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<(), TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CreateBoard, GetBoard};
    use crate::card::CreateCard;
    use crate::column::CreateColumn;
    use crate::types::UserId;

    #[tokio::test]
    async fn test_delete_column_cascades_cards() {
        let ctx = TressoContext::in_memory(UserId::new(1));
        let board = CreateBoard::new("Roadmap").execute(&ctx).await.into_result().unwrap();
        let todo = CreateColumn::new(board.id, "To Do")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let done = CreateColumn::new(board.id, "Done")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        for title in ["a", "b"] {
            CreateCard::new(board.id, todo.id, title)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
        }
        let kept = CreateCard::new(board.id, done.id, "c")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        DeleteColumn::new(todo.id, board.id)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let snapshot = GetBoard::new(board.id).execute(&ctx).await.into_result().unwrap();
        assert_eq!(snapshot.columns.len(), 1);
        assert_eq!(snapshot.cards.len(), 1);
        assert_eq!(snapshot.cards[0].id, kept.id);
    }
}
