//! AddLabelToCard command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::types::{CardId, Label, LabelId};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Attach a label to a card. Attaching twice is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLabelToCard {
    pub card_id: CardId,
    pub label_id: LabelId,
}

operation!(AddLabelToCard, verb = "attach", noun = "label", description = "Attach a label to a card");

impl AddLabelToCard {
    pub fn new(card_id: impl Into<CardId>, label_id: impl Into<LabelId>) -> Self {
        Self {
            card_id: card_id.into(),
            label_id: label_id.into(),
        }
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<Label> {
        let card = ctx.require_card(self.card_id).await?;
        let label = ctx.require_label(self.label_id).await?;
        if label.board_id != card.board_id {
            return Err(TressoError::invalid_value(
                "labelId",
                "label belongs to a different board than the card",
            ));
        }

        if !ctx.store().attach_label(card.id, label.id).await? {
            tracing::debug!(card = %card.id, label = %label.id, "label already attached");
        }
        Ok(label)
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for AddLabelToCard {
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
    use crate::card::test_support::board_with_columns;
    use crate::card::CreateCard;
    use crate::error::ErrorKind;
    use crate::label::CreateLabel;

    #[tokio::test]
    async fn test_attach_is_idempotent() {
        let (ctx, board, todo, _) = board_with_columns().await;
        let card = CreateCard::new(board.id, todo.id, "Fix login")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let label = CreateLabel::new(board.id, "bug")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        for _ in 0..2 {
            let attached = AddLabelToCard::new(card.id, label.id)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
            assert_eq!(attached, label);
        }

        let card = ctx.require_card(card.id).await.unwrap();
        assert_eq!(card.labels, vec![label]);
    }

    #[tokio::test]
    async fn test_label_from_other_board_rejected() {
        let (ctx, board, todo, _) = board_with_columns().await;
        let card = CreateCard::new(board.id, todo.id, "Fix login")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let other = CreateBoard::new("Other").execute(&ctx).await.into_result().unwrap();
        let label = CreateLabel::new(other.id, "bug")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let err = AddLabelToCard::new(card.id, label.id)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
