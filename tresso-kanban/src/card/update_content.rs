//! UpdateCardContent command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::store::CardPatch;
use crate::types::CardId;
use crate::validate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Replace a card's free-text content; blank or absent content clears it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCardContent {
    pub id: CardId,
    #[serde(default)]
    pub content: Option<String>,
}

operation!(UpdateCardContent, verb = "edit", noun = "card", description = "Change a card's content");

impl UpdateCardContent {
    pub fn new(id: impl Into<CardId>, content: Option<String>) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<()> {
        ctx.store()
            .update_card(
                ctx.user(),
                self.id,
                CardPatch {
                    content: Some(validate::content(self.content.as_deref())),
                    ..CardPatch::default()
                },
            )
            .await?
            .ok_or_else(|| TressoError::not_found("card", self.id))?;
        Ok(())
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for UpdateCardContent {
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
    use crate::card::CreateCard;

    #[tokio::test]
    async fn test_set_and_clear_content() {
        let (ctx, board, todo, _) = board_with_columns().await;
        let card = CreateCard::new(board.id, todo.id, "Draft")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        UpdateCardContent::new(card.id, Some("details".into()))
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(
            ctx.require_card(card.id).await.unwrap().content.as_deref(),
            Some("details")
        );

        UpdateCardContent::new(card.id, Some("   ".into()))
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert!(ctx.require_card(card.id).await.unwrap().content.is_none());
    }
}
