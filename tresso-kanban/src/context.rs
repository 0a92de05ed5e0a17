//! TressoContext - storage access for the board commands
//!
//! The context carries the store and the already-authenticated user. It has
//! no business logic beyond turning "absent or not yours" into a
//! [`TressoError::NotFound`]. Commands do all the work.

use crate::error::{Result, TressoError};
use crate::store::{EntityStore, MemoryStore, SqliteStore};
use crate::types::{Board, BoardId, Card, CardId, Column, ColumnId, Label, LabelId, UserId};
use std::path::Path;
use std::sync::Arc;

/// Context passed to every command
#[derive(Clone)]
pub struct TressoContext {
    store: Arc<dyn EntityStore>,
    user: UserId,
}

impl TressoContext {
    /// Create a context over any store, acting as `user`
    pub fn new(store: Arc<dyn EntityStore>, user: UserId) -> Self {
        Self { store, user }
    }

    /// Context over a fresh in-memory store
    pub fn in_memory(user: UserId) -> Self {
        Self::new(Arc::new(MemoryStore::new()), user)
    }

    /// Context over a SQLite database file
    pub fn open_sqlite(path: impl AsRef<Path>, user: UserId) -> Result<Self> {
        Ok(Self::new(Arc::new(SqliteStore::open(path)?), user))
    }

    /// Same store, different user
    pub fn for_user(&self, user: UserId) -> Self {
        Self {
            store: Arc::clone(&self.store),
            user,
        }
    }

    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }

    /// The authenticated user every command acts as
    pub fn user(&self) -> UserId {
        self.user
    }

    // =========================================================================
    // Owner-scoped lookups
    // =========================================================================

    pub async fn require_board(&self, id: BoardId) -> Result<Board> {
        self.store
            .get_board(self.user, id)
            .await?
            .ok_or_else(|| TressoError::not_found("board", id))
    }

    pub async fn require_column(&self, id: ColumnId) -> Result<Column> {
        self.store
            .get_column(self.user, id)
            .await?
            .ok_or_else(|| TressoError::not_found("column", id))
    }

    /// A column that must also sit on `board`
    pub async fn require_column_on(&self, id: ColumnId, board: BoardId) -> Result<Column> {
        let column = self.require_column(id).await?;
        if column.board_id != board {
            return Err(TressoError::not_found("column", id));
        }
        Ok(column)
    }

    pub async fn require_card(&self, id: CardId) -> Result<Card> {
        self.store
            .get_card(self.user, id)
            .await?
            .ok_or_else(|| TressoError::not_found("card", id))
    }

    pub async fn require_label(&self, id: LabelId) -> Result<Label> {
        self.store
            .get_label(self.user, id)
            .await?
            .ok_or_else(|| TressoError::not_found("label", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::NewBoard;

    #[tokio::test]
    async fn test_require_board_scoped_to_user() {
        let ctx = TressoContext::in_memory(UserId::new(1));
        let board = ctx
            .store()
            .insert_board(NewBoard {
                owner: ctx.user(),
                name: "Mine".into(),
                color: "1e3a8a".into(),
            })
            .await
            .unwrap();

        assert_eq!(ctx.require_board(board.id).await.unwrap().name, "Mine");

        let other = ctx.for_user(UserId::new(2));
        let err = other.require_board(board.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFoundOrForbidden);
    }

    #[tokio::test]
    async fn test_open_sqlite() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = TressoContext::open_sqlite(temp.path().join("tresso.db"), UserId::new(1)).unwrap();
        let err = ctx.require_card(CardId::new(1)).await.unwrap_err();
        assert_eq!(err.to_string(), "card not found: 1");
    }
}
