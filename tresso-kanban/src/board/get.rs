//! GetBoard command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::types::{BoardId, BoardSnapshot};
use serde::{Deserialize, Serialize};
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Fetch a full board snapshot: columns, cards with labels, labels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBoard {
    pub board_id: BoardId,
}

operation!(GetBoard, verb = "get", noun = "board", description = "Fetch a board with its columns, cards and labels");

impl GetBoard {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
        }
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<BoardSnapshot> {
        ctx.store()
            .board_snapshot(ctx.user(), self.board_id)
            .await?
            .ok_or_else(|| TressoError::not_found("board", self.board_id))
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for GetBoard {
    type Output = BoardSnapshot;

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<BoardSnapshot, TressoError> {
        ExecutionResult::unlogged(self.apply(ctx).await)
    }
}
