//! DeleteLabel command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::types::{BoardId, LabelId};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Delete a label, detaching it from every card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLabel {
    pub id: LabelId,
    pub board_id: BoardId,
}

operation!(DeleteLabel, verb = "delete", noun = "label", description = "Delete a label and detach it from cards");

impl DeleteLabel {
    pub fn new(id: impl Into<LabelId>, board_id: impl Into<BoardId>) -> Self {
        Self {
            id: id.into(),
            board_id: board_id.into(),
        }
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<()> {
        let label = ctx.require_label(self.id).await?;
        if label.board_id != self.board_id
            || !ctx.store().delete_label(ctx.user(), self.id).await?
        {
            return Err(TressoError::not_found("label", self.id));
        }
        Ok(())
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for DeleteLabel {
    type Output = ();

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<(), TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}
