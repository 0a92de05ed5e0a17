//! UpdateCardTitle command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::store::CardPatch;
use crate::types::CardId;
use crate::validate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Retitle a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCardTitle {
    pub id: CardId,
    pub title: String,
}

operation!(UpdateCardTitle, verb = "retitle", noun = "card", description = "Change a card's title");

impl UpdateCardTitle {
    pub fn new(id: impl Into<CardId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<()> {
        let title = validate::required_text("title", &self.title)?;
        ctx.store()
            .update_card(
                ctx.user(),
                self.id,
                CardPatch {
                    title: Some(title),
                    ..CardPatch::default()
                },
            )
            .await?
            .ok_or_else(|| TressoError::not_found("card", self.id))?;
        Ok(())
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for UpdateCardTitle {
    type Output = ();

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<(), TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}
