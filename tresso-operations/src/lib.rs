//! # Tresso Operations
//!
//! This crate provides the `Operation` and `Execute` traits used by every
//! Tresso command. Operations are structs where the fields ARE the request
//! parameters, so the request shape is defined exactly once.
//!
//! ## Example
//!
//! ```ignore
//! use tresso_operations::*;
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! pub struct CreateColumn {
//!     pub board_id: BoardId,
//!     pub name: String,
//! }
//!
//! operation!(CreateColumn, verb = "create", noun = "column", description = "Add a column");
//!
//! #[async_trait]
//! impl Execute<TressoContext, TressoError> for CreateColumn {
//!     type Output = Column;
//!
//!     async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<Column, TressoError> {
//!         // returns ExecutionResult::Logged for writes, Unlogged for reads
//!     }
//! }
//! ```

mod execution_result;
mod log;
mod operation;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use processor::OperationProcessor;

// Re-export for use in implementations
pub use async_trait::async_trait;
pub use serde_json::Value;
