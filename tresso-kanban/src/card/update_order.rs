//! UpdateCardOrder command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::store::CardPatch;
use crate::types::{Card, CardId, ColumnId};
use crate::validate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Move a card to a position, possibly in another column of the same board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardOrder {
    pub id: CardId,
    pub column_id: ColumnId,
    pub order: f64,
}

operation!(UpdateCardOrder, verb = "move", noun = "card", description = "Move a card to a new column and position");

impl UpdateCardOrder {
    pub fn new(id: impl Into<CardId>, column_id: impl Into<ColumnId>, order: f64) -> Self {
        Self {
            id: id.into(),
            column_id: column_id.into(),
            order,
        }
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<Card> {
        let order = validate::finite_order(self.order)?;
        let card = ctx.require_card(self.id).await?;
        ctx.require_column_on(self.column_id, card.board_id).await?;

        ctx.store()
            .update_card(
                ctx.user(),
                self.id,
                CardPatch {
                    column_id: Some(self.column_id),
                    order: Some(order),
                    ..CardPatch::default()
                },
            )
            .await?
            .ok_or_else(|| TressoError::not_found("card", self.id))
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for UpdateCardOrder {
    type Output = Card;

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<Card, TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CreateBoard, GetBoard};
    use crate::card::test_support::board_with_columns;
    use crate::card::CreateCard;
    use crate::column::CreateColumn;
    use crate::error::ErrorKind;
    use crate::ordering::compute_drop_order;

    #[tokio::test]
    async fn test_drop_between_two_cards() {
        let (ctx, board, todo, done) = board_with_columns().await;
        let mut cards = Vec::new();
        for title in ["A", "B", "C"] {
            cards.push(
                CreateCard::new(board.id, todo.id, title)
                    .execute(&ctx)
                    .await
                    .into_result()
                    .unwrap(),
            );
        }
        let d = CreateCard::new(board.id, done.id, "D")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        // Drop D below B: midpoint of 2 and 3
        let moved = UpdateCardOrder::new(d.id, todo.id, compute_drop_order(2.0, 3.0))
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(moved.order, 2.5);
        assert_eq!(moved.column_id, todo.id);

        let snapshot = GetBoard::new(board.id).execute(&ctx).await.into_result().unwrap();
        let titles: Vec<&str> = snapshot.cards_in(todo.id).map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "D", "C"]);
    }

    #[tokio::test]
    async fn test_cannot_move_to_other_board() {
        let (ctx, board, todo, _) = board_with_columns().await;
        let card = CreateCard::new(board.id, todo.id, "A")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let other = CreateBoard::new("Other").execute(&ctx).await.into_result().unwrap();
        let foreign = CreateColumn::new(other.id, "Elsewhere")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let err = UpdateCardOrder::new(card.id, foreign.id, 1.0)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFoundOrForbidden);
    }
}
