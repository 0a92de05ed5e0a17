//! UpdateBoard command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::store::BoardPatch;
use crate::types::{Board, BoardId};
use crate::validate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Rename or recolor a board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoard {
    pub id: BoardId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

operation!(UpdateBoard, verb = "update", noun = "board", description = "Change a board's name or color");

impl UpdateBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            color: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<Board> {
        validate::has_changes(self.name.is_some() || self.color.is_some())?;
        let patch = BoardPatch {
            name: self
                .name
                .as_deref()
                .map(|n| validate::required_text("name", n))
                .transpose()?,
            color: self.color.as_deref().map(validate::color).transpose()?,
        };

        ctx.store()
            .update_board(ctx.user(), self.id, patch)
            .await?
            .ok_or_else(|| TressoError::not_found("board", self.id))
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for UpdateBoard {
    type Output = Board;

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<Board, TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}
