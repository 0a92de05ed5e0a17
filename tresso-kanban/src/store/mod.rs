//! Persistence for boards, columns, cards, labels and the activity log.
//!
//! Every read and write that takes an `owner` is scoped to boards that user
//! owns: a record on someone else's board behaves exactly like a missing one.
//! Writes are single-record; cascades (board → columns/cards/labels, column →
//! cards, card/label → associations) are the store's job.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::{
    Board, BoardId, BoardSnapshot, Card, CardId, Column, ColumnId, Label, LabelId, UserId,
};
use async_trait::async_trait;
use tresso_operations::LogEntry;

/// Fields of a board about to be created
#[derive(Debug, Clone)]
pub struct NewBoard {
    pub owner: UserId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct NewColumn {
    pub board_id: BoardId,
    pub name: String,
    pub order: f64,
}

#[derive(Debug, Clone)]
pub struct NewCard {
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub title: String,
    pub content: Option<String>,
    pub order: f64,
}

#[derive(Debug, Clone)]
pub struct NewLabel {
    pub board_id: BoardId,
    pub name: String,
    pub color: String,
}

/// Partial board update; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct BoardPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ColumnPatch {
    pub name: Option<String>,
    pub order: Option<f64>,
    pub archived: Option<bool>,
}

/// Partial card update. `content: Some(None)` clears the content.
#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub column_id: Option<ColumnId>,
    pub order: Option<f64>,
    pub title: Option<String>,
    pub content: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct LabelPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Storage back end used by the board commands
#[async_trait]
pub trait EntityStore: Send + Sync {
    // Boards
    async fn insert_board(&self, new: NewBoard) -> Result<Board>;
    async fn get_board(&self, owner: UserId, id: BoardId) -> Result<Option<Board>>;
    /// Boards of one owner, newest first
    async fn list_boards(&self, owner: UserId) -> Result<Vec<Board>>;
    async fn update_board(
        &self,
        owner: UserId,
        id: BoardId,
        patch: BoardPatch,
    ) -> Result<Option<Board>>;
    /// Returns false when nothing was deleted
    async fn delete_board(&self, owner: UserId, id: BoardId) -> Result<bool>;
    /// Columns and cards in ascending order, cards with labels, labels by name
    async fn board_snapshot(&self, owner: UserId, id: BoardId) -> Result<Option<BoardSnapshot>>;

    // Columns
    async fn insert_column(&self, new: NewColumn) -> Result<Column>;
    async fn get_column(&self, owner: UserId, id: ColumnId) -> Result<Option<Column>>;
    async fn update_column(
        &self,
        owner: UserId,
        id: ColumnId,
        patch: ColumnPatch,
    ) -> Result<Option<Column>>;
    async fn delete_column(&self, owner: UserId, id: ColumnId) -> Result<bool>;
    async fn column_count(&self, board: BoardId) -> Result<usize>;

    // Cards
    async fn insert_card(&self, new: NewCard) -> Result<Card>;
    async fn get_card(&self, owner: UserId, id: CardId) -> Result<Option<Card>>;
    async fn update_card(
        &self,
        owner: UserId,
        id: CardId,
        patch: CardPatch,
    ) -> Result<Option<Card>>;
    async fn delete_card(&self, owner: UserId, id: CardId) -> Result<bool>;
    /// Highest card order in a column, `None` when it is empty
    async fn max_card_order(&self, column: ColumnId) -> Result<Option<f64>>;

    // Labels
    async fn insert_label(&self, new: NewLabel) -> Result<Label>;
    async fn get_label(&self, owner: UserId, id: LabelId) -> Result<Option<Label>>;
    async fn update_label(
        &self,
        owner: UserId,
        id: LabelId,
        patch: LabelPatch,
    ) -> Result<Option<Label>>;
    async fn delete_label(&self, owner: UserId, id: LabelId) -> Result<bool>;

    /// Returns false when the pair already existed
    async fn attach_label(&self, card: CardId, label: LabelId) -> Result<bool>;
    /// Returns false when the pair did not exist
    async fn detach_label(&self, card: CardId, label: LabelId) -> Result<bool>;

    // Activity
    async fn append_activity(&self, entry: &LogEntry) -> Result<()>;
    /// Most recent entries first
    async fn read_activity(&self, limit: usize) -> Result<Vec<LogEntry>>;
}
