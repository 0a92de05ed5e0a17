//! CreateCard command

use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::ordering::append_order;
use crate::store::NewCard;
use crate::types::{BoardId, Card, ColumnId};
use crate::validate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Create a card in a column
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCard {
    pub board_id: BoardId,
    pub column_id: ColumnId,
    /// The card title (required)
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Explicit position; defaults to after the column's last card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
}

operation!(CreateCard, verb = "create", noun = "card", description = "Create a card in a column");

impl CreateCard {
    pub fn new(
        board_id: impl Into<BoardId>,
        column_id: impl Into<ColumnId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            column_id: column_id.into(),
            title: title.into(),
            content: None,
            order: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_order(mut self, order: f64) -> Self {
        self.order = Some(order);
        self
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<Card> {
        let title = validate::required_text("title", &self.title)?;
        let order = self.order.map(validate::finite_order).transpose()?;

        let board = ctx.require_board(self.board_id).await?;
        let column = ctx.require_column_on(self.column_id, board.id).await?;
        let order = match order {
            Some(order) => order,
            None => append_order(ctx.store().max_card_order(column.id).await?),
        };

        ctx.store()
            .insert_card(NewCard {
                board_id: board.id,
                column_id: column.id,
                title,
                content: validate::content(self.content.as_deref()),
                order,
            })
            .await
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for CreateCard {
    type Output = Card;

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<Card, TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::test_support::board_with_columns;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_first_card_gets_order_one() {
        let (ctx, board, todo, _) = board_with_columns().await;
        let card = CreateCard::new(board.id, todo.id, "Write docs")
            .with_content("  the README ")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(card.order, 1.0);
        assert_eq!(card.content.as_deref(), Some("the README"));
        assert!(card.labels.is_empty());
    }

    #[tokio::test]
    async fn test_cards_append_after_max() {
        let (ctx, board, todo, _) = board_with_columns().await;
        CreateCard::new(board.id, todo.id, "a")
            .with_order(2.5)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let card = CreateCard::new(board.id, todo.id, "b")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(card.order, 3.5);
    }

    #[tokio::test]
    async fn test_blank_title_rejected() {
        let (ctx, board, todo, _) = board_with_columns().await;
        let err = CreateCard::new(board.id, todo.id, "  ")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_column_must_belong_to_board() {
        let (ctx, _, todo, _) = board_with_columns().await;
        let other = crate::board::CreateBoard::new("Other")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let err = CreateCard::new(other.id, todo.id, "misplaced")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFoundOrForbidden);
    }
}
