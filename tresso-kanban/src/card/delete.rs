//! DeleteCard command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::types::CardId;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Delete a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCard {
    pub id: CardId,
}

operation!(DeleteCard, verb = "delete", noun = "card", description = "Delete a card");

impl DeleteCard {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self { id: id.into() }
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<()> {
        if !ctx.store().delete_card(ctx.user(), self.id).await? {
            return Err(TressoError::not_found("card", self.id));
        }
        Ok(())
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for DeleteCard {
    type Output = ();

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<(), TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}
