//! UpdateColumn command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::store::ColumnPatch;
use crate::types::{BoardId, ColumnId};
use crate::validate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Rename, reorder or archive a column
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateColumn {
    pub id: ColumnId,
    pub board_id: BoardId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New fractional position among the board's columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

operation!(UpdateColumn, verb = "update", noun = "column", description = "Update a column's name, order or archived flag");

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>, board_id: impl Into<BoardId>) -> Self {
        Self {
            id: id.into(),
            board_id: board_id.into(),
            name: None,
            order: None,
            archived: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_order(mut self, order: f64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<()> {
        validate::has_changes(
            self.name.is_some() || self.order.is_some() || self.archived.is_some(),
        )?;
        let patch = ColumnPatch {
            name: self
                .name
                .as_deref()
                .map(|n| validate::required_text("name", n))
                .transpose()?,
            order: self.order.map(validate::finite_order).transpose()?,
            archived: self.archived,
        };

        ctx.require_column_on(self.id, self.board_id).await?;
        ctx.store()
            .update_column(ctx.user(), self.id, patch)
            .await?
            .ok_or_else(|| TressoError::not_found("column", self.id))?;
        Ok(())
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for UpdateColumn {
    type Output = ();

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<(), TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}
