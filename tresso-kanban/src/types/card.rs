//! Card type

use super::board::Label;
use super::ids::{BoardId, CardId, ColumnId};
use serde::{Deserialize, Serialize};

/// A task unit living in exactly one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub order: f64,
    /// Attached labels; filled in on reads, empty on freshly created cards
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Card {
    /// A card with no content and no labels
    pub fn new(
        id: CardId,
        board_id: BoardId,
        column_id: ColumnId,
        title: impl Into<String>,
        order: f64,
    ) -> Self {
        Self {
            id,
            board_id,
            column_id,
            title: title.into(),
            content: None,
            order,
            labels: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Whether the label is attached
    pub fn has_label(&self, label: super::ids::LabelId) -> bool {
        self.labels.iter().any(|l| l.id == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LabelId;

    #[test]
    fn test_card_defaults() {
        let card: Card = serde_json::from_str(
            r#"{"id": 9, "boardId": 1, "columnId": 2, "title": "Write docs", "order": 1.5}"#,
        )
        .unwrap();
        assert!(card.content.is_none());
        assert!(card.labels.is_empty());
        assert!(!card.has_label(LabelId::new(1)));
    }
}
