//! Kanban board engine for Tresso
//!
//! Boards own columns, columns own cards, cards carry board-scoped labels.
//! Every change goes through a command struct that validates its input,
//! checks that the acting user owns what it touches and performs a single
//! storage write.
//!
//! ## Ordering
//!
//! Columns and cards are positioned by fractional `f64` orders. Moving an item
//! gives it the midpoint of its new neighbours and leaves every sibling alone;
//! see [`ordering`].
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use tresso_kanban::{board::CreateBoard, column::CreateColumn, card::CreateCard};
//! use tresso_kanban::{Execute, TressoContext, UserId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = TressoContext::open_sqlite("tresso.db", UserId::new(1))?;
//!
//! let board = CreateBoard::new("Roadmap").execute(&ctx).await.into_result()?;
//! let todo = CreateColumn::new(board.id, "To Do").execute(&ctx).await.into_result()?;
//! let card = CreateCard::new(board.id, todo.id, "Write docs")
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//!
//! println!("created card {} at order {}", card.id, card.order);
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage
//!
//! [`store::EntityStore`] has two implementations: [`store::MemoryStore`] for
//! tests and embedding, [`store::SqliteStore`] for real use. Both cascade
//! deletes from boards to columns, cards and labels, and from columns to cards.

pub mod auto_color;
mod context;
mod error;
pub mod ordering;
mod processor;
pub mod store;
pub mod types;
pub mod validate;

// Command modules
pub mod activity;
pub mod board;
pub mod card;
pub mod column;
pub mod label;

// Re-export Execute trait and types from operations crate
pub use tresso_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};

pub use context::TressoContext;
pub use error::{ErrorKind, Result, TressoError};
pub use processor::TressoOperationProcessor;

// Re-export commonly used types
pub use types::{
    Board, BoardId, BoardSnapshot, Card, CardId, Column, ColumnId, Label, LabelId, UserId,
};
