//! UpdateLabel command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::store::LabelPatch;
use crate::types::{Label, LabelId};
use crate::validate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Rename or recolor a label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLabel {
    pub id: LabelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

operation!(UpdateLabel, verb = "update", noun = "label", description = "Change a label's name or color");

impl UpdateLabel {
    pub fn new(id: impl Into<LabelId>) -> Self {
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

    async fn apply(&self, ctx: &TressoContext) -> Result<Label> {
        validate::has_changes(self.name.is_some() || self.color.is_some())?;
        let patch = LabelPatch {
            name: self
                .name
                .as_deref()
                .map(|n| validate::required_text("name", n))
                .transpose()?,
            color: self.color.as_deref().map(validate::color).transpose()?,
        };

        ctx.store()
            .update_label(ctx.user(), self.id, patch)
            .await?
            .ok_or_else(|| TressoError::not_found("label", self.id))
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for UpdateLabel {
    type Output = Label;

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<Label, TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::label::CreateLabel;
    use crate::types::UserId;

    #[tokio::test]
    async fn test_update_label() {
        let ctx = TressoContext::in_memory(UserId::new(1));
        let board = CreateBoard::new("Roadmap").execute(&ctx).await.into_result().unwrap();
        let label = CreateLabel::new(board.id, "bug")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let updated = UpdateLabel::new(label.id)
            .with_name("defect")
            .with_color("00ff00")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(updated.name, "defect");
        assert_eq!(updated.color, "00ff00");
        assert_eq!(updated.board_id, board.id);
    }
}
