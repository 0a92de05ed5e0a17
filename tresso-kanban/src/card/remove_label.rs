//! RemoveLabelFromCard command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::types::{CardId, LabelId};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Detach a label from a card. Detaching a label that isn't attached is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveLabelFromCard {
    pub card_id: CardId,
    pub label_id: LabelId,
}

operation!(RemoveLabelFromCard, verb = "detach", noun = "label", description = "Detach a label from a card");

impl RemoveLabelFromCard {
    pub fn new(card_id: impl Into<CardId>, label_id: impl Into<LabelId>) -> Self {
        Self {
            card_id: card_id.into(),
            label_id: label_id.into(),
        }
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<()> {
        let card = ctx.require_card(self.card_id).await?;
        if !ctx.store().detach_label(card.id, self.label_id).await? {
            tracing::debug!(card = %card.id, label = %self.label_id, "label was not attached");
        }
        Ok(())
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for RemoveLabelFromCard {
    type Output = ();

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<(), TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::test_support::board_with_columns;
    use crate::card::{AddLabelToCard, CreateCard};
    use crate::label::CreateLabel;

    #[tokio::test]
    async fn test_detach_twice_succeeds() {
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
        AddLabelToCard::new(card.id, label.id)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        for _ in 0..2 {
            RemoveLabelFromCard::new(card.id, label.id)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
        }
        assert!(ctx.require_card(card.id).await.unwrap().labels.is_empty());
    }
}
