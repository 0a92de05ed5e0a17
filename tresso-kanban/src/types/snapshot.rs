//! Full board snapshot returned by a board fetch

use super::board::{Board, Column, Label};
use super::card::Card;
use super::ids::{BoardId, ColumnId};
use serde::{Deserialize, Serialize};

/// `{id, name, color, columns, cards (with labels), labels}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub id: BoardId,
    pub name: String,
    pub color: String,
    pub columns: Vec<Column>,
    pub cards: Vec<Card>,
    pub labels: Vec<Label>,
}

impl BoardSnapshot {
    /// An empty snapshot for the given board
    pub fn empty(board: &Board) -> Self {
        Self {
            id: board.id,
            name: board.name.clone(),
            color: board.color.clone(),
            columns: Vec::new(),
            cards: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Cards of one column, in the order they appear in the snapshot
    pub fn cards_in(&self, column: ColumnId) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.column_id == column)
    }
}
