//! CreateLabel command

use crate::auto_color::auto_color;
use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::store::NewLabel;
use crate::types::{BoardId, Label};
use crate::validate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Create a label on a board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabel {
    pub board_id: BoardId,
    pub name: String,
    /// Hex color; derived from the name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

operation!(CreateLabel, verb = "create", noun = "label", description = "Create a label on a board");

impl CreateLabel {
    pub fn new(board_id: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<Label> {
        let name = validate::required_text("name", &self.name)?;
        let color = match &self.color {
            Some(color) => validate::color(color)?,
            None => auto_color(&name).to_string(),
        };
        let board = ctx.require_board(self.board_id).await?;

        ctx.store()
            .insert_label(NewLabel {
                board_id: board.id,
                name,
                color,
            })
            .await
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for CreateLabel {
    type Output = Label;

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<Label, TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}
