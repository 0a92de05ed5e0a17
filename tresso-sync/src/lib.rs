//! # Tresso Sync
//!
//! Client-side state for one open board.
//!
//! - [`ClientCache`] holds the board and applies mutations optimistically,
//!   reconciling server answers that may arrive out of order.
//! - [`DragController`] turns drag-and-drop gestures into reorder mutations
//!   using fractional midpoints.
//! - [`BoardSession`] ties a cache to a [`BoardGateway`] and drives the
//!   submit, reconcile, refetch cycle.
//!
//! ```rust,no_run
//! use tresso_config::OrderingConfig;
//! use tresso_kanban::{BoardId, TressoContext, UserId};
//! use tresso_sync::{BoardSession, LocalGateway};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = TressoContext::open_sqlite("tresso.db", UserId::new(1))?;
//! let (session, mut notifications) =
//!     BoardSession::new(BoardId::new(1), LocalGateway::new(ctx), OrderingConfig::default());
//!
//! session.load().await?;
//! if let Some(view) = session.view().await {
//!     println!("{} columns", view.columns.len());
//! }
//! while let Ok(notification) = notifications.try_recv() {
//!     println!("{notification:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod cache;
mod drag;
mod gateway;
mod mutation;
mod session;
mod view;

pub use cache::{
    ClientCache, CollectionData, FetchToken, MutationStatus, MutationTicket, Settlement,
};
pub use drag::{
    DragController, DragKind, DragPayload, DragState, DropEvent, DropTarget, Edge, Point, Rect,
};
pub use gateway::{BoardGateway, LocalGateway};
pub use mutation::{Collection, Mutation, MutationOutcome};
pub use session::{BoardSession, Notification};
pub use view::{BoardView, ColumnView};
