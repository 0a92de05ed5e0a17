//! Display-ready projection of the cached board

use serde::Serialize;
use tresso_kanban::{BoardId, Card, CardId, Column, ColumnId, Label};

/// A column with its cards, both in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    pub column: Column,
    pub cards: Vec<Card>,
}

impl ColumnView {
    pub fn last_order(&self) -> Option<f64> {
        self.cards.last().map(|c| c.order)
    }
}

/// What the board screen renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub id: BoardId,
    pub name: String,
    pub color: String,
    pub columns: Vec<ColumnView>,
    pub labels: Vec<Label>,
}

impl BoardView {
    pub fn column(&self, id: ColumnId) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.column.id == id)
    }

    /// The card and the column view holding it
    pub fn find_card(&self, id: CardId) -> Option<(&ColumnView, &Card)> {
        self.columns
            .iter()
            .find_map(|col| col.cards.iter().find(|c| c.id == id).map(|card| (col, card)))
    }

    /// Card titles per column, handy for asserting layouts
    pub fn titles(&self) -> Vec<Vec<&str>> {
        self.columns
            .iter()
            .map(|col| col.cards.iter().map(|c| c.title.as_str()).collect())
            .collect()
    }
}
