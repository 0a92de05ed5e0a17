//! The server side as seen by a board session

use crate::mutation::{Mutation, MutationOutcome};
use async_trait::async_trait;
use tresso_kanban::board::GetBoard;
use tresso_kanban::card::{
    AddLabelToCard, CreateCard, DeleteCard, RemoveLabelFromCard, UpdateCardContent,
    UpdateCardOrder, UpdateCardTitle,
};
use tresso_kanban::column::{CreateColumn, DeleteColumn, UpdateColumn};
use tresso_kanban::label::{CreateLabel, DeleteLabel, UpdateLabel};
use tresso_kanban::{
    BoardId, BoardSnapshot, OperationProcessor, TressoContext, TressoError,
    TressoOperationProcessor,
};

/// Fetches boards and performs mutations
#[async_trait]
pub trait BoardGateway: Send + Sync {
    async fn fetch_board(&self, board: BoardId) -> Result<BoardSnapshot, TressoError>;

    async fn apply(&self, mutation: &Mutation) -> Result<MutationOutcome, TressoError>;
}

/// Gateway running the board commands in-process
#[derive(Clone)]
pub struct LocalGateway {
    ctx: TressoContext,
    processor: TressoOperationProcessor,
}

impl LocalGateway {
    pub fn new(ctx: TressoContext) -> Self {
        Self {
            ctx,
            processor: TressoOperationProcessor::new(),
        }
    }

    pub fn with_processor(mut self, processor: TressoOperationProcessor) -> Self {
        self.processor = processor;
        self
    }

    pub fn context(&self) -> &TressoContext {
        &self.ctx
    }
}

#[async_trait]
impl BoardGateway for LocalGateway {
    async fn fetch_board(&self, board: BoardId) -> Result<BoardSnapshot, TressoError> {
        self.processor.process(&GetBoard::new(board), &self.ctx).await
    }

    async fn apply(&self, mutation: &Mutation) -> Result<MutationOutcome, TressoError> {
        let p = &self.processor;
        let ctx = &self.ctx;
        let outcome = match mutation.clone() {
            Mutation::CreateColumn { board_id, name, .. } => {
                MutationOutcome::Column(p.process(&CreateColumn::new(board_id, name), ctx).await?)
            }
            Mutation::UpdateColumn {
                id,
                board_id,
                name,
                order,
                archived,
            } => {
                let cmd = UpdateColumn {
                    id,
                    board_id,
                    name,
                    order,
                    archived,
                };
                p.process(&cmd, ctx).await?;
                MutationOutcome::Done
            }
            Mutation::DeleteColumn { id, board_id } => {
                p.process(&DeleteColumn::new(id, board_id), ctx).await?;
                MutationOutcome::Done
            }
            Mutation::CreateCard {
                board_id,
                column_id,
                title,
                content,
                order,
                ..
            } => {
                let cmd = CreateCard {
                    board_id,
                    column_id,
                    title,
                    content,
                    order: Some(order),
                };
                MutationOutcome::Card(p.process(&cmd, ctx).await?)
            }
            Mutation::MoveCard {
                id,
                column_id,
                order,
            } => MutationOutcome::Card(
                p.process(&UpdateCardOrder::new(id, column_id, order), ctx)
                    .await?,
            ),
            Mutation::UpdateCardTitle { id, title } => {
                p.process(&UpdateCardTitle::new(id, title), ctx).await?;
                MutationOutcome::Done
            }
            Mutation::UpdateCardContent { id, content } => {
                p.process(&UpdateCardContent::new(id, content), ctx).await?;
                MutationOutcome::Done
            }
            Mutation::DeleteCard { id } => {
                p.process(&DeleteCard::new(id), ctx).await?;
                MutationOutcome::Done
            }
            Mutation::AttachLabel { card_id, label_id } => MutationOutcome::Label(
                p.process(&AddLabelToCard::new(card_id, label_id), ctx)
                    .await?,
            ),
            Mutation::DetachLabel { card_id, label_id } => {
                p.process(&RemoveLabelFromCard::new(card_id, label_id), ctx)
                    .await?;
                MutationOutcome::Done
            }
            Mutation::CreateLabel {
                board_id,
                name,
                color,
                ..
            } => {
                let cmd = CreateLabel {
                    board_id,
                    name,
                    color,
                };
                MutationOutcome::Label(p.process(&cmd, ctx).await?)
            }
            Mutation::UpdateLabel { id, name, color } => {
                MutationOutcome::Label(p.process(&UpdateLabel { id, name, color }, ctx).await?)
            }
            Mutation::DeleteLabel { id, board_id } => {
                p.process(&DeleteLabel::new(id, board_id), ctx).await?;
                MutationOutcome::Done
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tresso_kanban::board::CreateBoard;
    use tresso_kanban::{CardId, ColumnId, UserId};

    #[tokio::test]
    async fn test_local_gateway_round_trip() {
        let ctx = TressoContext::in_memory(UserId::new(1));
        let gateway = LocalGateway::new(ctx.clone());
        let board = gateway
            .processor
            .process(&CreateBoard::new("Roadmap"), &ctx)
            .await
            .unwrap();

        let MutationOutcome::Column(column) = gateway
            .apply(&Mutation::CreateColumn {
                provisional_id: ColumnId::new(-1),
                board_id: board.id,
                name: "To Do".into(),
            })
            .await
            .unwrap()
        else {
            panic!("expected a column");
        };
        assert_eq!(column.order, 1.0);

        let MutationOutcome::Card(card) = gateway
            .apply(&Mutation::CreateCard {
                provisional_id: CardId::new(-2),
                board_id: board.id,
                column_id: column.id,
                title: "Write docs".into(),
                content: None,
                order: 1.0,
            })
            .await
            .unwrap()
        else {
            panic!("expected a card");
        };
        assert!(!card.id.is_provisional());

        let snapshot = gateway.fetch_board(board.id).await.unwrap();
        assert_eq!(snapshot.cards.len(), 1);
        assert_eq!(
            gateway
                .apply(&Mutation::DeleteCard { id: card.id })
                .await
                .unwrap(),
            MutationOutcome::Done
        );
    }
}
