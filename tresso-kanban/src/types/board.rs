//! Board-level types: Board, Column, Label

use super::ids::{BoardId, ColumnId, LabelId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level container for one Kanban workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    /// 6-character hex color code without #
    pub color: String,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
}

/// An ordered lane within a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub board_id: BoardId,
    pub name: String,
    pub order: f64,
    #[serde(default)]
    pub archived: bool,
}

impl Column {
    /// A fresh, non-archived column
    pub fn new(id: ColumnId, board_id: BoardId, name: impl Into<String>, order: f64) -> Self {
        Self {
            id,
            board_id,
            name: name.into(),
            order,
            archived: false,
        }
    }
}

/// A board-scoped tag, many-to-many with cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: LabelId,
    pub board_id: BoardId,
    pub name: String,
    /// 6-character hex color code without #
    pub color: String,
}
