//! Dispatch of parsed commands onto the board operations

use crate::cli::{
    BoardAction, CardAction, CardPosition, ColumnAction, ColumnPosition, Commands, LabelAction,
    OutputFormat,
};
use crate::error::Result;
use crate::output;
use crate::placement::{order_for, Placement};
use std::path::PathBuf;
use tresso_config::TressoConfig;
use tresso_kanban::{
    activity::ListActivity,
    board::{CreateBoard, DeleteBoard, GetBoard, ListBoards, UpdateBoard},
    card::{
        AddLabelToCard, CreateCard, DeleteCard, RemoveLabelFromCard, UpdateCardContent,
        UpdateCardOrder, UpdateCardTitle,
    },
    column::{CreateColumn, DeleteColumn, UpdateColumn},
    label::{CreateLabel, DeleteLabel},
    BoardId, BoardSnapshot, Card, CardId, ColumnId, OperationProcessor, TressoContext,
    TressoOperationProcessor, UserId,
};

/// Everything a command needs: where the data lives, who is acting, how to print
pub struct App {
    ctx: TressoContext,
    processor: TressoOperationProcessor,
    format: OutputFormat,
}

impl App {
    pub fn new(ctx: TressoContext, processor: TressoOperationProcessor, format: OutputFormat) -> Self {
        Self {
            ctx,
            processor,
            format,
        }
    }

    /// Open the configured database, or `database` when given
    pub fn open(
        config: &TressoConfig,
        database: Option<PathBuf>,
        format: OutputFormat,
    ) -> Result<Self> {
        let path = database.unwrap_or_else(|| config.database.path.clone());
        tracing::debug!(path = %path.display(), user = config.user.id, "opening database");
        let ctx = TressoContext::open_sqlite(&path, UserId::new(config.user.id))?;
        let processor = TressoOperationProcessor::with_actor(config.user.actor_name());
        Ok(Self::new(ctx, processor, format))
    }

    pub fn context(&self) -> &TressoContext {
        &self.ctx
    }

    /// Run one command and return what should be printed
    pub async fn run(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Board { action } => self.board(action).await,
            Commands::Column { action } => self.column(action).await,
            Commands::Card { action } => self.card(action).await,
            Commands::Label { action } => self.label(action).await,
            Commands::Activity { limit } => {
                let entries = self
                    .processor
                    .process(&ListActivity::new(limit), &self.ctx)
                    .await?;
                output::activity(self.format, &entries)
            }
        }
    }

    async fn snapshot(&self, board: BoardId) -> Result<BoardSnapshot> {
        Ok(self.processor.process(&GetBoard::new(board), &self.ctx).await?)
    }

    async fn board(&self, action: BoardAction) -> Result<String> {
        let p = &self.processor;
        let ctx = &self.ctx;
        match action {
            BoardAction::Create { name, color } => {
                let mut cmd = CreateBoard::new(name);
                cmd.color = color;
                let board = p.process(&cmd, ctx).await?;
                output::record(
                    self.format,
                    format!("Created board {} \"{}\"", board.id, board.name),
                    &board,
                )
            }
            BoardAction::List => {
                let boards = p.process(&ListBoards, ctx).await?;
                output::boards(self.format, &boards)
            }
            BoardAction::Show { board } => {
                let snapshot = self.snapshot(BoardId::new(board)).await?;
                output::snapshot(self.format, &snapshot)
            }
            BoardAction::Rename { board, name } => {
                let board = p
                    .process(&UpdateBoard::new(board).with_name(name), ctx)
                    .await?;
                output::record(
                    self.format,
                    format!("Renamed board {} to \"{}\"", board.id, board.name),
                    &board,
                )
            }
            BoardAction::Delete { board } => {
                p.process(&DeleteBoard::new(board), ctx).await?;
                output::done(self.format, format!("Deleted board {board}"))
            }
        }
    }

    async fn column(&self, action: ColumnAction) -> Result<String> {
        let p = &self.processor;
        let ctx = &self.ctx;
        match action {
            ColumnAction::Add { board, name } => {
                let column = p.process(&CreateColumn::new(board, name), ctx).await?;
                output::record(
                    self.format,
                    format!("Added column {} \"{}\"", column.id, column.name),
                    &column,
                )
            }
            ColumnAction::Rename {
                board,
                column,
                name,
            } => {
                p.process(&UpdateColumn::new(column, board).with_name(name), ctx)
                    .await?;
                output::done(self.format, format!("Renamed column {column}"))
            }
            ColumnAction::Move {
                board,
                column,
                position,
            } => {
                let snapshot = self.snapshot(BoardId::new(board)).await?;
                let id = ColumnId::new(column);
                let order = order_for(&snapshot.columns, id, column_placement(position))?;
                p.process(&UpdateColumn::new(id, board).with_order(order), ctx)
                    .await?;
                output::done(self.format, format!("Moved column {column} to order {order}"))
            }
            ColumnAction::Delete { board, column } => {
                p.process(&DeleteColumn::new(column, board), ctx).await?;
                output::done(self.format, format!("Deleted column {column}"))
            }
        }
    }

    async fn card(&self, action: CardAction) -> Result<String> {
        let p = &self.processor;
        let ctx = &self.ctx;
        match action {
            CardAction::Add {
                board,
                column,
                title,
                content,
            } => {
                let mut cmd = CreateCard::new(board, column, title);
                cmd.content = content;
                let card = p.process(&cmd, ctx).await?;
                output::record(
                    self.format,
                    format!("Added card {} \"{}\"", card.id, card.title),
                    &card,
                )
            }
            CardAction::Move { card, position } => {
                let moved = self.move_card(CardId::new(card), position).await?;
                output::record(
                    self.format,
                    format!(
                        "Moved card {} to column {} at order {}",
                        moved.id, moved.column_id, moved.order
                    ),
                    &moved,
                )
            }
            CardAction::Title { card, title } => {
                p.process(&UpdateCardTitle::new(card, title), ctx).await?;
                output::done(self.format, format!("Retitled card {card}"))
            }
            CardAction::Content { card, content } => {
                let cleared = content.is_none();
                p.process(&UpdateCardContent::new(card, content), ctx)
                    .await?;
                let verb = if cleared { "Cleared" } else { "Updated" };
                output::done(self.format, format!("{verb} content of card {card}"))
            }
            CardAction::Delete { card } => {
                p.process(&DeleteCard::new(card), ctx).await?;
                output::done(self.format, format!("Deleted card {card}"))
            }
        }
    }

    /// Resolve the target column and order from the current board, then move
    async fn move_card(&self, id: CardId, position: CardPosition) -> Result<Card> {
        let card = self.ctx.require_card(id).await?;
        let (column, placement) = match (position.before, position.after, position.end) {
            (Some(anchor), _, _) => {
                let anchor = self.ctx.require_card(CardId::new(anchor)).await?;
                (anchor.column_id, Placement::Before(anchor.id))
            }
            (None, Some(anchor), _) => {
                let anchor = self.ctx.require_card(CardId::new(anchor)).await?;
                (anchor.column_id, Placement::After(anchor.id))
            }
            (None, None, Some(column)) => (ColumnId::new(column), Placement::End),
            (None, None, None) => {
                return Err(tresso_kanban::TressoError::missing_field("position").into())
            }
        };

        let snapshot = self.snapshot(card.board_id).await?;
        let siblings: Vec<Card> = snapshot.cards_in(column).cloned().collect();
        let order = order_for(&siblings, id, placement)?;
        tracing::debug!(card = %id, column = %column, order, "resolved card placement");
        Ok(self
            .processor
            .process(&UpdateCardOrder::new(id, column, order), &self.ctx)
            .await?)
    }

    async fn label(&self, action: LabelAction) -> Result<String> {
        let p = &self.processor;
        let ctx = &self.ctx;
        match action {
            LabelAction::Add { board, name, color } => {
                let mut cmd = CreateLabel::new(board, name);
                cmd.color = color;
                let label = p.process(&cmd, ctx).await?;
                output::record(
                    self.format,
                    format!("Added label {} \"{}\" ({})", label.id, label.name, label.color),
                    &label,
                )
            }
            LabelAction::Delete { board, label } => {
                p.process(&DeleteLabel::new(label, board), ctx).await?;
                output::done(self.format, format!("Deleted label {label}"))
            }
            LabelAction::Attach { card, label } => {
                let label = p.process(&AddLabelToCard::new(card, label), ctx).await?;
                output::record(
                    self.format,
                    format!("Attached label \"{}\" to card {card}", label.name),
                    &label,
                )
            }
            LabelAction::Detach { card, label } => {
                p.process(&RemoveLabelFromCard::new(card, label), ctx)
                    .await?;
                output::done(self.format, format!("Detached label {label} from card {card}"))
            }
        }
    }
}

fn column_placement(position: ColumnPosition) -> Placement<ColumnId> {
    match (position.before, position.after) {
        (Some(anchor), _) => Placement::Before(ColumnId::new(anchor)),
        (None, Some(anchor)) => Placement::After(ColumnId::new(anchor)),
        (None, None) => Placement::End,
    }
}
