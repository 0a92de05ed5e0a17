//! Drag-and-drop decision logic, independent of any UI toolkit.
//!
//! The controller is fed plain events: a drag start, hovers over targets with
//! the target's bounding box and the pointer position, and a drop carrying
//! the transfer data written at drag start. A drop turns into at most one
//! [`Mutation`]; everything else (missing or malformed data, dropping an
//! item onto itself, a card dropped on a column header) is a silent no-op.

use crate::mutation::Mutation;
use crate::view::BoardView;
use serde::{Deserialize, Serialize};
use tresso_kanban::ordering::{append_order, order_beside, Side};
use tresso_kanban::{CardId, ColumnId};

/// What is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    Column,
    Card,
}

/// Transfer payload written at drag start and read back on drop.
///
/// `source_container_id` is the board id for columns and the column id for
/// cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub kind: DragKind,
    pub source_id: i64,
    pub source_container_id: i64,
}

impl DragPayload {
    pub fn column(id: ColumnId, board: tresso_kanban::BoardId) -> Self {
        Self {
            kind: DragKind::Column,
            source_id: id.get(),
            source_container_id: board.get(),
        }
    }

    pub fn card(id: CardId, column: ColumnId) -> Self {
        Self {
            kind: DragKind::Card,
            source_id: id.get(),
            source_container_id: column.get(),
        }
    }

    /// Serialized form placed in the drag event
    pub fn encode(&self) -> String {
        // A struct of plain numbers and a unit enum always serializes
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Read back transfer data; `None` when it is missing or malformed
    pub fn decode(data: Option<&str>) -> Option<Self> {
        let data = data?;
        match serde_json::from_str(data) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring malformed drag payload");
                None
            }
        }
    }
}

/// Side of the target the item will land on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Left of a column, above a card
    Before,
    /// Right of a column, below a card
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of a drop target
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Where the pointer is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A column, for column drops
    ColumnHeader(ColumnId),
    /// A card, for card drops
    Card(CardId),
    /// Empty space in a column: cards dropped here go to the end
    ColumnBody(ColumnId),
}

impl DropTarget {
    fn accepts(&self, kind: DragKind) -> bool {
        matches!(
            (self, kind),
            (Self::ColumnHeader(_), DragKind::Column)
                | (Self::Card(_), DragKind::Card)
                | (Self::ColumnBody(_), DragKind::Card)
        )
    }

    /// Columns split left/right on x, cards split top/bottom on y.
    /// A pointer exactly on the midpoint counts as `Before`.
    pub fn resolve_edge(&self, bounds: &Rect, pointer: Point) -> Edge {
        let before = match self {
            Self::ColumnHeader(_) => pointer.x <= bounds.mid_x(),
            Self::Card(_) | Self::ColumnBody(_) => pointer.y <= bounds.mid_y(),
        };
        if before {
            Edge::Before
        } else {
            Edge::After
        }
    }
}

/// A drop as delivered by the UI
#[derive(Debug, Clone, PartialEq)]
pub struct DropEvent {
    /// Transfer data, exactly as read back from the drag event
    pub data: Option<String>,
    pub target: DropTarget,
    pub bounds: Rect,
    pub pointer: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragPayload),
    Hovering {
        payload: DragPayload,
        target: DropTarget,
        edge: Edge,
    },
}

/// Tracks one drag gesture and turns its drop into a reorder
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// `idle -> dragging`; returns the transfer data to attach to the event
    pub fn start(&mut self, payload: DragPayload) -> String {
        self.state = DragState::Dragging(payload);
        payload.encode()
    }

    /// `dragging -> hovering` over a target that accepts the dragged kind.
    ///
    /// Returns the edge the item would land on, for drawing the indicator.
    pub fn hover(&mut self, target: DropTarget, bounds: Rect, pointer: Point) -> Option<Edge> {
        let payload = match self.state {
            DragState::Idle => return None,
            DragState::Dragging(payload) | DragState::Hovering { payload, .. } => payload,
        };
        if !target.accepts(payload.kind) {
            self.state = DragState::Dragging(payload);
            return None;
        }
        let edge = target.resolve_edge(&bounds, pointer);
        self.state = DragState::Hovering {
            payload,
            target,
            edge,
        };
        Some(edge)
    }

    /// Drag end, leave or escape
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Finish the gesture. Always returns to idle.
    ///
    /// A drop that arrives without a preceding [`start`](Self::start) is
    /// ignored, as is one whose neighbours have no room left between them.
    pub fn drop(&mut self, event: &DropEvent, view: &BoardView) -> Option<Mutation> {
        if matches!(self.state, DragState::Idle) {
            tracing::debug!(target = ?event.target, "drop without an active drag");
            return None;
        }
        self.state = DragState::Idle;

        let payload = DragPayload::decode(event.data.as_deref())?;
        if !event.target.accepts(payload.kind) {
            tracing::debug!(?payload, target = ?event.target, "drop target does not accept payload");
            return None;
        }
        let edge = event.target.resolve_edge(&event.bounds, event.pointer);

        let mutation = match (payload.kind, event.target) {
            (DragKind::Column, DropTarget::ColumnHeader(target)) => {
                Self::drop_column(ColumnId::new(payload.source_id), target, edge, view)
            }
            (DragKind::Card, DropTarget::Card(target)) => {
                Self::drop_card_on_card(CardId::new(payload.source_id), target, edge, view)
            }
            (DragKind::Card, DropTarget::ColumnBody(column)) => {
                Self::drop_card_in_column(CardId::new(payload.source_id), column, view)
            }
            _ => None,
        };
        if let Some(mutation) = &mutation {
            tracing::debug!(?edge, mutation = mutation.name(), "drop resolved");
        }
        mutation
    }

    fn drop_column(
        dragged: ColumnId,
        target: ColumnId,
        edge: Edge,
        view: &BoardView,
    ) -> Option<Mutation> {
        if dragged == target {
            return None;
        }
        view.column(dragged)?;
        let siblings: Vec<f64> = view
            .columns
            .iter()
            .filter(|c| c.column.id != dragged)
            .map(|c| c.column.order)
            .collect();
        let index = view
            .columns
            .iter()
            .filter(|c| c.column.id != dragged)
            .position(|c| c.column.id == target)?;

        let order = order_beside(&siblings, index, edge.into())?;
        Some(Mutation::reorder_column(dragged, view.id, order))
    }

    fn drop_card_on_card(
        dragged: CardId,
        target: CardId,
        edge: Edge,
        view: &BoardView,
    ) -> Option<Mutation> {
        if dragged == target {
            return None;
        }
        view.find_card(dragged)?;
        let (column, _) = view.find_card(target)?;
        let siblings: Vec<&tresso_kanban::Card> =
            column.cards.iter().filter(|c| c.id != dragged).collect();
        let index = siblings.iter().position(|c| c.id == target)?;
        let orders: Vec<f64> = siblings.iter().map(|c| c.order).collect();
        let order = order_beside(&orders, index, edge.into())?;

        Some(Mutation::MoveCard {
            id: dragged,
            column_id: column.column.id,
            order,
        })
    }

    fn drop_card_in_column(
        dragged: CardId,
        column: ColumnId,
        view: &BoardView,
    ) -> Option<Mutation> {
        view.find_card(dragged)?;
        let column = view.column(column)?;
        let last = column
            .cards
            .iter()
            .filter(|c| c.id != dragged)
            .map(|c| c.order)
            .last();

        Some(Mutation::MoveCard {
            id: dragged,
            column_id: column.column.id,
            order: append_order(last),
        })
    }
}

impl From<Edge> for Side {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Before => Side::Before,
            Edge::After => Side::After,
        }
    }
}
