//! CreateColumn command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::store::NewColumn;
use crate::types::{BoardId, Column};
use crate::validate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Append a column to the right end of a board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumn {
    pub board_id: BoardId,
    pub name: String,
}

operation!(CreateColumn, verb = "create", noun = "column", description = "Add a column to a board");

impl CreateColumn {
    pub fn new(board_id: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            name: name.into(),
        }
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<Column> {
        let name = validate::required_text("name", &self.name)?;
        let board = ctx.require_board(self.board_id).await?;

        // New columns go last: order is the column count plus one
        let count = ctx.store().column_count(board.id).await?;
        ctx.store()
            .insert_column(NewColumn {
                board_id: board.id,
                name,
                order: (count + 1) as f64,
            })
            .await
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for CreateColumn {
    type Output = Column;

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<Column, TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}
