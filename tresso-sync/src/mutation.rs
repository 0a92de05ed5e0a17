//! Client-issued mutations and their confirmed outcomes

use serde::{Deserialize, Serialize};
use tresso_kanban::{BoardId, Card, CardId, Column, ColumnId, Label, LabelId};

/// The cached entity collections a mutation can touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Columns,
    Cards,
    Labels,
}

/// One change requested by the client.
///
/// Creates carry a provisional (negative) id handed out by the cache so the
/// optimistic record can be found again when the server answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    CreateColumn {
        provisional_id: ColumnId,
        board_id: BoardId,
        name: String,
    },
    UpdateColumn {
        id: ColumnId,
        board_id: BoardId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        archived: Option<bool>,
    },
    DeleteColumn {
        id: ColumnId,
        board_id: BoardId,
    },
    CreateCard {
        provisional_id: CardId,
        board_id: BoardId,
        column_id: ColumnId,
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        order: f64,
    },
    MoveCard {
        id: CardId,
        column_id: ColumnId,
        order: f64,
    },
    UpdateCardTitle {
        id: CardId,
        title: String,
    },
    UpdateCardContent {
        id: CardId,
        #[serde(default)]
        content: Option<String>,
    },
    DeleteCard {
        id: CardId,
    },
    AttachLabel {
        card_id: CardId,
        label_id: LabelId,
    },
    DetachLabel {
        card_id: CardId,
        label_id: LabelId,
    },
    CreateLabel {
        provisional_id: LabelId,
        board_id: BoardId,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    UpdateLabel {
        id: LabelId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    DeleteLabel {
        id: LabelId,
        board_id: BoardId,
    },
}

impl Mutation {
    /// Reorder of a column
    pub fn reorder_column(id: ColumnId, board_id: BoardId, order: f64) -> Self {
        Self::UpdateColumn {
            id,
            board_id,
            name: None,
            order: Some(order),
            archived: None,
        }
    }

    /// The collection whose sequence this mutation advances
    pub fn collection(&self) -> Collection {
        match self {
            Self::CreateColumn { .. } | Self::UpdateColumn { .. } | Self::DeleteColumn { .. } => {
                Collection::Columns
            }
            Self::CreateCard { .. }
            | Self::MoveCard { .. }
            | Self::UpdateCardTitle { .. }
            | Self::UpdateCardContent { .. }
            | Self::DeleteCard { .. }
            | Self::AttachLabel { .. }
            | Self::DetachLabel { .. } => Collection::Cards,
            Self::CreateLabel { .. } | Self::UpdateLabel { .. } | Self::DeleteLabel { .. } => {
                Collection::Labels
            }
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateColumn { .. } => "create column",
            Self::UpdateColumn { .. } => "update column",
            Self::DeleteColumn { .. } => "delete column",
            Self::CreateCard { .. } => "create card",
            Self::MoveCard { .. } => "move card",
            Self::UpdateCardTitle { .. } => "retitle card",
            Self::UpdateCardContent { .. } => "edit card",
            Self::DeleteCard { .. } => "delete card",
            Self::AttachLabel { .. } => "attach label",
            Self::DetachLabel { .. } => "detach label",
            Self::CreateLabel { .. } => "create label",
            Self::UpdateLabel { .. } => "update label",
            Self::DeleteLabel { .. } => "delete label",
        }
    }

    /// Creates carry a provisional id that is swapped when they settle
    pub fn is_create(&self) -> bool {
        matches!(
            self,
            Self::CreateColumn { .. } | Self::CreateCard { .. } | Self::CreateLabel { .. }
        )
    }

    /// Whether the mutation targets a record the server doesn't know yet.
    ///
    /// The provisional id of a create is not a target; everything else is.
    pub fn targets_provisional(&self) -> bool {
        match self {
            Self::CreateColumn { board_id, .. } => board_id.is_provisional(),
            Self::UpdateColumn { id, board_id, .. } | Self::DeleteColumn { id, board_id } => {
                id.is_provisional() || board_id.is_provisional()
            }
            Self::CreateCard {
                board_id,
                column_id,
                ..
            } => board_id.is_provisional() || column_id.is_provisional(),
            Self::MoveCard { id, column_id, .. } => {
                id.is_provisional() || column_id.is_provisional()
            }
            Self::UpdateCardTitle { id, .. }
            | Self::UpdateCardContent { id, .. }
            | Self::DeleteCard { id } => id.is_provisional(),
            Self::AttachLabel { card_id, label_id } | Self::DetachLabel { card_id, label_id } => {
                card_id.is_provisional() || label_id.is_provisional()
            }
            Self::CreateLabel { board_id, .. } => board_id.is_provisional(),
            Self::UpdateLabel { id, .. } => id.is_provisional(),
            Self::DeleteLabel { id, board_id } => {
                id.is_provisional() || board_id.is_provisional()
            }
        }
    }
}

/// Authoritative result of a confirmed mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "camelCase")]
pub enum MutationOutcome {
    Column(Column),
    Card(Card),
    Label(Label),
    /// Operations that return nothing
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collections() {
        let attach = Mutation::AttachLabel {
            card_id: CardId::new(1),
            label_id: LabelId::new(2),
        };
        assert_eq!(attach.collection(), Collection::Cards);
        assert_eq!(
            Mutation::reorder_column(ColumnId::new(1), BoardId::new(1), 1.5).collection(),
            Collection::Columns
        );
    }

    #[test]
    fn test_targets_provisional() {
        let create = Mutation::CreateCard {
            provisional_id: CardId::new(-1),
            board_id: BoardId::new(1),
            column_id: ColumnId::new(2),
            title: "new".into(),
            content: None,
            order: 1.0,
        };
        assert!(!create.targets_provisional());
        assert!(create.is_create());

        let into_new_column = Mutation::MoveCard {
            id: CardId::new(4),
            column_id: ColumnId::new(-3),
            order: 1.0,
        };
        assert!(into_new_column.targets_provisional());
        assert!(!into_new_column.is_create());
    }

    #[test]
    fn test_wire_shape() {
        let mutation = Mutation::MoveCard {
            id: CardId::new(4),
            column_id: ColumnId::new(2),
            order: 2.5,
        };
        let json = serde_json::to_value(&mutation).unwrap();
        assert_eq!(json["kind"], "moveCard");
        assert_eq!(json["columnId"], 2);
    }
}
