//! A board screen's lifecycle: load, optimistic submits, refetches

use crate::cache::{ClientCache, Settlement};
use crate::drag::{DragController, DropEvent};
use crate::gateway::BoardGateway;
use crate::mutation::{Mutation, MutationOutcome};
use crate::view::BoardView;
use tokio::sync::{mpsc, Mutex};
use tresso_config::OrderingConfig;
use tresso_kanban::ordering::append_order;
use tresso_kanban::{BoardId, CardId, ColumnId, LabelId, TressoError};

/// Refetches that raced a settlement are restarted at most this many times
const MAX_FETCH_ATTEMPTS: usize = 5;

/// Things the UI should tell the user about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A mutation was rejected; `message` is safe to display
    MutationFailed {
        mutation: &'static str,
        message: String,
    },
    /// Reloading the board failed
    RefreshFailed { message: String },
    /// The board was refetched and the display reseeded
    Refreshed,
}

/// One open board: the cache, the gateway behind it and a notification feed
pub struct BoardSession<G> {
    board: BoardId,
    gateway: G,
    cache: Mutex<ClientCache>,
    notifications: mpsc::UnboundedSender<Notification>,
    ordering: OrderingConfig,
}

impl<G: BoardGateway> BoardSession<G> {
    /// Create a session and the receiving end of its notifications
    pub fn new(
        board: BoardId,
        gateway: G,
        ordering: OrderingConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            board,
            gateway,
            cache: Mutex::new(ClientCache::new()),
            notifications: tx,
            ordering,
        };
        (session, rx)
    }

    pub fn board_id(&self) -> BoardId {
        self.board
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Current display state, `None` before the first load
    pub async fn view(&self) -> Option<BoardView> {
        self.cache.lock().await.view()
    }

    /// Mutations still waiting for the server
    pub async fn pending_count(&self) -> usize {
        self.cache.lock().await.pending_count()
    }

    fn notify(&self, notification: Notification) {
        // Nobody listening is fine
        let _ = self.notifications.send(notification);
    }

    /// Initial fetch, followed by a compaction pass when enabled
    pub async fn load(&self) -> Result<(), TressoError> {
        self.refresh().await?;
        if !self.ordering.compact_on_fetch {
            return Ok(());
        }

        let plan = self
            .cache
            .lock()
            .await
            .compaction_plan(self.ordering.min_gap);
        for mutation in plan {
            self.submit(mutation).await?;
        }
        Ok(())
    }

    /// Refetch the board and reseed the cache.
    ///
    /// A fetch that was overtaken by a settling mutation is thrown away and
    /// started again. While a create is in flight the fetch is dropped
    /// instead; the create's own settlement refetches.
    pub async fn refresh(&self) -> Result<(), TressoError> {
        for attempt in 1..=MAX_FETCH_ATTEMPTS {
            let token = self.cache.lock().await.begin_fetch();
            let snapshot = self.gateway.fetch_board(self.board).await?;
            {
                let mut cache = self.cache.lock().await;
                if cache.seed_fetched(token, snapshot) {
                    drop(cache);
                    self.notify(Notification::Refreshed);
                    return Ok(());
                }
                if cache.has_pending_create() {
                    tracing::debug!(board = %self.board, "refresh deferred until pending creates settle");
                    return Ok(());
                }
            }
            tracing::debug!(attempt, board = %self.board, "fetch overtaken by a settlement, restarting");
        }
        // A later settlement will ask for another refetch
        tracing::warn!(board = %self.board, "giving up on refresh after repeated stale fetches");
        Ok(())
    }

    /// Apply a mutation optimistically, send it, and reconcile the answer.
    ///
    /// The server's result is returned as-is; failures are also reported on
    /// the notification channel. Mutations aimed at records that only exist
    /// provisionally are refused until the create has been confirmed.
    pub async fn submit(&self, mutation: Mutation) -> Result<MutationOutcome, TressoError> {
        if mutation.targets_provisional() {
            let error = TressoError::invalid_value("id", "the item is still being created");
            tracing::debug!(mutation = mutation.name(), "refusing mutation of a provisional record");
            self.notify(Notification::MutationFailed {
                mutation: mutation.name(),
                message: error.user_message(),
            });
            return Err(error);
        }

        let ticket = self.cache.lock().await.begin(mutation.clone());
        let result = self.gateway.apply(&mutation).await;
        let settlement = self.cache.lock().await.reconcile(ticket, &result);

        if let Some(Settlement::Failed { message, .. }) = &settlement {
            self.notify(Notification::MutationFailed {
                mutation: mutation.name(),
                message: message.clone(),
            });
        }
        if settlement.as_ref().is_some_and(Settlement::refetch) {
            if let Err(e) = self.refresh().await {
                tracing::warn!(error = %e, "refetch after settlement failed");
                self.notify(Notification::RefreshFailed {
                    message: e.user_message(),
                });
            }
        }
        result
    }

    /// Add a column at the right end
    pub async fn create_column(&self, name: impl Into<String>) -> Result<MutationOutcome, TressoError> {
        let provisional_id = ColumnId::new(self.cache.lock().await.next_provisional_id());
        self.submit(Mutation::CreateColumn {
            provisional_id,
            board_id: self.board,
            name: name.into(),
        })
        .await
    }

    /// Add a card at the bottom of a column
    pub async fn create_card(
        &self,
        column_id: ColumnId,
        title: impl Into<String>,
    ) -> Result<MutationOutcome, TressoError> {
        let mutation = {
            let mut cache = self.cache.lock().await;
            let last = cache
                .view()
                .and_then(|view| view.column(column_id).and_then(|c| c.last_order()));
            Mutation::CreateCard {
                provisional_id: CardId::new(cache.next_provisional_id()),
                board_id: self.board,
                column_id,
                title: title.into(),
                content: None,
                order: append_order(last),
            }
        };
        self.submit(mutation).await
    }

    pub async fn create_label(
        &self,
        name: impl Into<String>,
        color: Option<String>,
    ) -> Result<MutationOutcome, TressoError> {
        let provisional_id = LabelId::new(self.cache.lock().await.next_provisional_id());
        self.submit(Mutation::CreateLabel {
            provisional_id,
            board_id: self.board,
            name: name.into(),
            color,
        })
        .await
    }

    /// Resolve a drop against the current display and submit the reorder.
    ///
    /// `Ok(None)` when the drop was a no-op.
    pub async fn drop_with(
        &self,
        controller: &mut DragController,
        event: &DropEvent,
    ) -> Result<Option<MutationOutcome>, TressoError> {
        let Some(view) = self.view().await else {
            controller.cancel();
            return Ok(None);
        };
        match controller.drop(event, &view) {
            Some(mutation) => self.submit(mutation).await.map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::{DragPayload, DropTarget, Point, Rect};
    use crate::gateway::LocalGateway;
    use tracing_test::traced_test;
    use tresso_kanban::board::CreateBoard;
    use tresso_kanban::column::CreateColumn;
    use tresso_kanban::{OperationProcessor, TressoContext, TressoOperationProcessor, UserId};

    async fn session() -> (
        BoardSession<LocalGateway>,
        mpsc::UnboundedReceiver<Notification>,
        ColumnId,
    ) {
        let ctx = TressoContext::in_memory(UserId::new(1));
        let p = TressoOperationProcessor::new();
        let board = p.process(&CreateBoard::new("Home"), &ctx).await.unwrap();
        let column = p
            .process(&CreateColumn::new(board.id, "Chores"), &ctx)
            .await
            .unwrap();
        let (session, rx) =
            BoardSession::new(board.id, LocalGateway::new(ctx), OrderingConfig::default());
        (session, rx, column.id)
    }

    #[tokio::test]
    async fn test_view_is_empty_before_load() {
        let (session, _rx, column) = session().await;
        assert!(session.view().await.is_none());

        let mut drag = DragController::new();
        let data = drag.start(DragPayload::card(CardId::new(5), column));
        let event = DropEvent {
            data: Some(data),
            target: DropTarget::ColumnBody(column),
            bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
            pointer: Point::new(1.0, 1.0),
        };
        assert!(session.drop_with(&mut drag, &event).await.unwrap().is_none());
        assert_eq!(*drag.state(), crate::drag::DragState::Idle);
    }

    #[tokio::test]
    async fn test_create_helpers_append() {
        let (session, _rx, column) = session().await;
        session.load().await.unwrap();

        session.create_card(column, "Dishes").await.unwrap();
        session.create_card(column, "Laundry").await.unwrap();
        session.create_column("Done").await.unwrap();
        session
            .create_label("urgent", Some("#FF0000".into()))
            .await
            .unwrap();

        let view = session.view().await.unwrap();
        assert_eq!(view.titles(), vec![vec!["Dishes", "Laundry"], vec![]]);
        let orders: Vec<f64> = view.columns[0].cards.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![1.0, 2.0]);
        assert_eq!(view.labels.len(), 1);
        assert_eq!(view.labels[0].color, "ff0000");
    }

    #[tokio::test]
    #[traced_test]
    async fn test_notifications_survive_a_dropped_receiver() {
        let (session, rx, _column) = session().await;
        drop(rx);
        session.load().await.unwrap();

        let result = session
            .submit(Mutation::DeleteCard {
                id: CardId::new(404),
            })
            .await;
        assert!(result.is_err());
        assert_eq!(session.pending_count().await, 0);
        assert!(logs_contain("operation failed"));
    }
}
