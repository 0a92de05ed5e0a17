//! Core types for the board engine

mod board;
mod card;
mod ids;
mod snapshot;

// Re-export all types
pub use board::{Board, Column, Label};
pub use card::Card;
pub use ids::{BoardId, CardId, ColumnId, LabelId, UserId};
pub use snapshot::BoardSnapshot;
