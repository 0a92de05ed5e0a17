//! SQLite-backed store
//!
//! # Schema
//!
//! - `boards`: (id, name, color, owner, created_at)
//! - `columns`: (id, board_id, name, order, archived)
//! - `cards`: (id, board_id, column_id, title, content, order)
//! - `labels`: (id, board_id, name, color)
//! - `cards_to_labels`: (card_id, label_id), unique pair
//! - `activity`: one JSON-encoded log entry per row
//!
//! Every child table references its parent with `ON DELETE CASCADE`, so
//! deletes only ever touch a single row and SQLite removes the dependants.

use super::{
    BoardPatch, CardPatch, ColumnPatch, EntityStore, LabelPatch, NewBoard, NewCard, NewColumn,
    NewLabel,
};
use crate::error::Result;
use crate::types::{
    Board, BoardId, BoardSnapshot, Card, CardId, Column, ColumnId, Label, LabelId, UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tresso_operations::LogEntry;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS boards (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        color TEXT NOT NULL,
        owner INTEGER NOT NULL,
        created_at INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS columns (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        board_id INTEGER NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        "order" REAL NOT NULL,
        archived INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS cards (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        board_id INTEGER NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
        column_id INTEGER NOT NULL REFERENCES columns(id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        content TEXT,
        "order" REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS labels (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        board_id INTEGER NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        color TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS cards_to_labels (
        card_id INTEGER NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
        label_id INTEGER NOT NULL REFERENCES labels(id) ON DELETE CASCADE,
        PRIMARY KEY (card_id, label_id)
    );

    CREATE TABLE IF NOT EXISTS activity (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL,
        entry TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_boards_owner ON boards(owner);
    CREATE INDEX IF NOT EXISTS idx_columns_board ON columns(board_id);
    CREATE INDEX IF NOT EXISTS idx_cards_column ON cards(column_id);
    CREATE INDEX IF NOT EXISTS idx_labels_board ON labels(board_id);
"#;

const BOARD_FIELDS: &str = "b.id, b.name, b.color, b.owner, b.created_at";
const COLUMN_FIELDS: &str = r#"c.id, c.board_id, c.name, c."order", c.archived"#;
const CARD_FIELDS: &str = r#"c.id, c.board_id, c.column_id, c.title, c.content, c."order""#;
const LABEL_FIELDS: &str = "l.id, l.board_id, l.name, l.color";

fn board_from_row(row: &Row<'_>) -> rusqlite::Result<Board> {
    let created_ms: i64 = row.get(4)?;
    Ok(Board {
        id: BoardId::new(row.get(0)?),
        name: row.get(1)?,
        color: row.get(2)?,
        owner: UserId::new(row.get(3)?),
        created_at: DateTime::<Utc>::from_timestamp_millis(created_ms).unwrap_or_default(),
    })
}

fn column_from_row(row: &Row<'_>) -> rusqlite::Result<Column> {
    Ok(Column {
        id: ColumnId::new(row.get(0)?),
        board_id: BoardId::new(row.get(1)?),
        name: row.get(2)?,
        order: row.get(3)?,
        archived: row.get(4)?,
    })
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: CardId::new(row.get(0)?),
        board_id: BoardId::new(row.get(1)?),
        column_id: ColumnId::new(row.get(2)?),
        title: row.get(3)?,
        content: row.get(4)?,
        order: row.get(5)?,
        labels: Vec::new(),
    })
}

fn label_from_row(row: &Row<'_>) -> rusqlite::Result<Label> {
    Ok(Label {
        id: LabelId::new(row.get(0)?),
        board_id: BoardId::new(row.get(1)?),
        name: row.get(2)?,
        color: row.get(3)?,
    })
}

/// Store persisting to a SQLite database
///
/// The connection sits behind a mutex so the store is `Send + Sync`; no
/// guard is ever held across an await point.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file and make sure the schema exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::init(conn)
    }

    /// Private database that vanishes with the store
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn query_board(conn: &Connection, owner: UserId, id: BoardId) -> rusqlite::Result<Option<Board>> {
        conn.query_row(
            &format!("SELECT {BOARD_FIELDS} FROM boards b WHERE b.id = ?1 AND b.owner = ?2"),
            params![id.get(), owner.get()],
            board_from_row,
        )
        .optional()
    }

    fn query_column(
        conn: &Connection,
        owner: UserId,
        id: ColumnId,
    ) -> rusqlite::Result<Option<Column>> {
        conn.query_row(
            &format!(
                "SELECT {COLUMN_FIELDS} FROM columns c JOIN boards b ON b.id = c.board_id \
                 WHERE c.id = ?1 AND b.owner = ?2"
            ),
            params![id.get(), owner.get()],
            column_from_row,
        )
        .optional()
    }

    fn query_card(conn: &Connection, owner: UserId, id: CardId) -> rusqlite::Result<Option<Card>> {
        let card = conn
            .query_row(
                &format!(
                    "SELECT {CARD_FIELDS} FROM cards c JOIN boards b ON b.id = c.board_id \
                     WHERE c.id = ?1 AND b.owner = ?2"
                ),
                params![id.get(), owner.get()],
                card_from_row,
            )
            .optional()?;
        let Some(mut card) = card else {
            return Ok(None);
        };

        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {LABEL_FIELDS} FROM labels l \
             JOIN cards_to_labels cl ON cl.label_id = l.id \
             WHERE cl.card_id = ?1 ORDER BY l.name, l.id"
        ))?;
        card.labels = stmt
            .query_map([id.get()], label_from_row)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(Some(card))
    }

    fn query_label(conn: &Connection, owner: UserId, id: LabelId) -> rusqlite::Result<Option<Label>> {
        conn.query_row(
            &format!(
                "SELECT {LABEL_FIELDS} FROM labels l JOIN boards b ON b.id = l.board_id \
                 WHERE l.id = ?1 AND b.owner = ?2"
            ),
            params![id.get(), owner.get()],
            label_from_row,
        )
        .optional()
    }
}

#[async_trait]
impl EntityStore for SqliteStore {
    async fn insert_board(&self, new: NewBoard) -> Result<Board> {
        let conn = self.conn();
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO boards (name, color, owner, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![new.name, new.color, new.owner.get(), created_at.timestamp_millis()],
        )?;
        Ok(Board {
            id: BoardId::new(conn.last_insert_rowid()),
            name: new.name,
            color: new.color,
            owner: new.owner,
            created_at: DateTime::<Utc>::from_timestamp_millis(created_at.timestamp_millis())
                .unwrap_or(created_at),
        })
    }

    async fn get_board(&self, owner: UserId, id: BoardId) -> Result<Option<Board>> {
        Ok(Self::query_board(&self.conn(), owner, id)?)
    }

    async fn list_boards(&self, owner: UserId) -> Result<Vec<Board>> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {BOARD_FIELDS} FROM boards b WHERE b.owner = ?1 \
             ORDER BY b.created_at DESC, b.id DESC"
        ))?;
        let boards = stmt
            .query_map([owner.get()], board_from_row)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(boards)
    }

    async fn update_board(
        &self,
        owner: UserId,
        id: BoardId,
        patch: BoardPatch,
    ) -> Result<Option<Board>> {
        let conn = self.conn();
        let Some(mut board) = Self::query_board(&conn, owner, id)? else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            board.name = name;
        }
        if let Some(color) = patch.color {
            board.color = color;
        }
        conn.execute(
            "UPDATE boards SET name = ?1, color = ?2 WHERE id = ?3",
            params![board.name, board.color, id.get()],
        )?;
        Ok(Some(board))
    }

    async fn delete_board(&self, owner: UserId, id: BoardId) -> Result<bool> {
        let removed = self.conn().execute(
            "DELETE FROM boards WHERE id = ?1 AND owner = ?2",
            params![id.get(), owner.get()],
        )?;
        Ok(removed > 0)
    }

    async fn board_snapshot(&self, owner: UserId, id: BoardId) -> Result<Option<BoardSnapshot>> {
        let conn = self.conn();
        let Some(board) = Self::query_board(&conn, owner, id)? else {
            return Ok(None);
        };
        let mut snapshot = BoardSnapshot::empty(&board);

        let mut stmt = conn.prepare_cached(&format!(
            r#"SELECT {COLUMN_FIELDS} FROM columns c WHERE c.board_id = ?1 ORDER BY c."order", c.id"#
        ))?;
        snapshot.columns = stmt
            .query_map([id.get()], column_from_row)?
            .collect::<rusqlite::Result<_>>()?;

        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {LABEL_FIELDS} FROM labels l WHERE l.board_id = ?1 ORDER BY l.name, l.id"
        ))?;
        snapshot.labels = stmt
            .query_map([id.get()], label_from_row)?
            .collect::<rusqlite::Result<_>>()?;

        let mut attached: HashMap<CardId, Vec<Label>> = HashMap::new();
        let mut stmt = conn.prepare_cached(
            "SELECT cl.card_id, cl.label_id FROM cards_to_labels cl \
             JOIN cards c ON c.id = cl.card_id WHERE c.board_id = ?1",
        )?;
        let pairs = stmt
            .query_map([id.get()], |row| {
                Ok((CardId::new(row.get(0)?), LabelId::new(row.get(1)?)))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        // Labels are already sorted by name, so walk them in that order
        for label in &snapshot.labels {
            for (card, _) in pairs.iter().filter(|(_, l)| *l == label.id) {
                attached.entry(*card).or_default().push(label.clone());
            }
        }

        let mut stmt = conn.prepare_cached(&format!(
            r#"SELECT {CARD_FIELDS} FROM cards c WHERE c.board_id = ?1 ORDER BY c."order", c.id"#
        ))?;
        snapshot.cards = stmt
            .query_map([id.get()], card_from_row)?
            .map(|card| {
                card.map(|mut card| {
                    card.labels = attached.remove(&card.id).unwrap_or_default();
                    card
                })
            })
            .collect::<rusqlite::Result<_>>()?;

        Ok(Some(snapshot))
    }

    async fn insert_column(&self, new: NewColumn) -> Result<Column> {
        let conn = self.conn();
        conn.execute(
            r#"INSERT INTO columns (board_id, name, "order") VALUES (?1, ?2, ?3)"#,
            params![new.board_id.get(), new.name, new.order],
        )?;
        Ok(Column::new(
            ColumnId::new(conn.last_insert_rowid()),
            new.board_id,
            new.name,
            new.order,
        ))
    }

    async fn get_column(&self, owner: UserId, id: ColumnId) -> Result<Option<Column>> {
        Ok(Self::query_column(&self.conn(), owner, id)?)
    }

    async fn update_column(
        &self,
        owner: UserId,
        id: ColumnId,
        patch: ColumnPatch,
    ) -> Result<Option<Column>> {
        let conn = self.conn();
        let Some(mut column) = Self::query_column(&conn, owner, id)? else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            column.name = name;
        }
        if let Some(order) = patch.order {
            column.order = order;
        }
        if let Some(archived) = patch.archived {
            column.archived = archived;
        }
        conn.execute(
            r#"UPDATE columns SET name = ?1, "order" = ?2, archived = ?3 WHERE id = ?4"#,
            params![column.name, column.order, column.archived, id.get()],
        )?;
        Ok(Some(column))
    }

    async fn delete_column(&self, owner: UserId, id: ColumnId) -> Result<bool> {
        let conn = self.conn();
        if Self::query_column(&conn, owner, id)?.is_none() {
            return Ok(false);
        }
        conn.execute("DELETE FROM columns WHERE id = ?1", [id.get()])?;
        Ok(true)
    }

    async fn column_count(&self, board: BoardId) -> Result<usize> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM columns WHERE board_id = ?1",
            [board.get()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    async fn insert_card(&self, new: NewCard) -> Result<Card> {
        let conn = self.conn();
        conn.execute(
            r#"INSERT INTO cards (board_id, column_id, title, content, "order")
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
            params![
                new.board_id.get(),
                new.column_id.get(),
                new.title,
                new.content,
                new.order
            ],
        )?;
        let mut card = Card::new(
            CardId::new(conn.last_insert_rowid()),
            new.board_id,
            new.column_id,
            new.title,
            new.order,
        );
        card.content = new.content;
        Ok(card)
    }

    async fn get_card(&self, owner: UserId, id: CardId) -> Result<Option<Card>> {
        Ok(Self::query_card(&self.conn(), owner, id)?)
    }

    async fn update_card(
        &self,
        owner: UserId,
        id: CardId,
        patch: CardPatch,
    ) -> Result<Option<Card>> {
        let conn = self.conn();
        let Some(mut card) = Self::query_card(&conn, owner, id)? else {
            return Ok(None);
        };
        if let Some(column_id) = patch.column_id {
            card.column_id = column_id;
        }
        if let Some(order) = patch.order {
            card.order = order;
        }
        if let Some(title) = patch.title {
            card.title = title;
        }
        if let Some(content) = patch.content {
            card.content = content;
        }
        conn.execute(
            r#"UPDATE cards SET column_id = ?1, "order" = ?2, title = ?3, content = ?4
               WHERE id = ?5"#,
            params![
                card.column_id.get(),
                card.order,
                card.title,
                card.content,
                id.get()
            ],
        )?;
        Ok(Some(card))
    }

    async fn delete_card(&self, owner: UserId, id: CardId) -> Result<bool> {
        let conn = self.conn();
        let removed = conn.execute(
            "DELETE FROM cards WHERE id = ?1 \
             AND board_id IN (SELECT id FROM boards WHERE owner = ?2)",
            params![id.get(), owner.get()],
        )?;
        Ok(removed > 0)
    }

    async fn max_card_order(&self, column: ColumnId) -> Result<Option<f64>> {
        let max: Option<f64> = self.conn().query_row(
            r#"SELECT MAX("order") FROM cards WHERE column_id = ?1"#,
            [column.get()],
            |row| row.get(0),
        )?;
        Ok(max)
    }

    async fn insert_label(&self, new: NewLabel) -> Result<Label> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO labels (board_id, name, color) VALUES (?1, ?2, ?3)",
            params![new.board_id.get(), new.name, new.color],
        )?;
        Ok(Label {
            id: LabelId::new(conn.last_insert_rowid()),
            board_id: new.board_id,
            name: new.name,
            color: new.color,
        })
    }

    async fn get_label(&self, owner: UserId, id: LabelId) -> Result<Option<Label>> {
        Ok(Self::query_label(&self.conn(), owner, id)?)
    }

    async fn update_label(
        &self,
        owner: UserId,
        id: LabelId,
        patch: LabelPatch,
    ) -> Result<Option<Label>> {
        let conn = self.conn();
        let Some(mut label) = Self::query_label(&conn, owner, id)? else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            label.name = name;
        }
        if let Some(color) = patch.color {
            label.color = color;
        }
        conn.execute(
            "UPDATE labels SET name = ?1, color = ?2 WHERE id = ?3",
            params![label.name, label.color, id.get()],
        )?;
        Ok(Some(label))
    }

    async fn delete_label(&self, owner: UserId, id: LabelId) -> Result<bool> {
        let conn = self.conn();
        let removed = conn.execute(
            "DELETE FROM labels WHERE id = ?1 \
             AND board_id IN (SELECT id FROM boards WHERE owner = ?2)",
            params![id.get(), owner.get()],
        )?;
        Ok(removed > 0)
    }

    async fn attach_label(&self, card: CardId, label: LabelId) -> Result<bool> {
        let inserted = self.conn().execute(
            "INSERT INTO cards_to_labels (card_id, label_id) VALUES (?1, ?2) \
             ON CONFLICT DO NOTHING",
            params![card.get(), label.get()],
        )?;
        Ok(inserted > 0)
    }

    async fn detach_label(&self, card: CardId, label: LabelId) -> Result<bool> {
        let removed = self.conn().execute(
            "DELETE FROM cards_to_labels WHERE card_id = ?1 AND label_id = ?2",
            params![card.get(), label.get()],
        )?;
        Ok(removed > 0)
    }

    async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        let json = serde_json::to_string(entry)?;
        self.conn().execute(
            "INSERT INTO activity (id, entry) VALUES (?1, ?2)",
            params![entry.id, json],
        )?;
        Ok(())
    }

    async fn read_activity(&self, limit: usize) -> Result<Vec<LogEntry>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare_cached("SELECT entry FROM activity ORDER BY seq DESC LIMIT ?1")?;
        let rows = stmt
            .query_map([limit as i64], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let mut entries = Vec::with_capacity(rows.len());
        for json in rows {
            entries.push(serde_json::from_str(&json)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: UserId = UserId::new(1);

    async fn seeded() -> (SqliteStore, Board, Column) {
        let store = SqliteStore::open_in_memory().unwrap();
        let board = store
            .insert_board(NewBoard {
                owner: OWNER,
                name: "Roadmap".into(),
                color: "1e3a8a".into(),
            })
            .await
            .unwrap();
        let column = store
            .insert_column(NewColumn {
                board_id: board.id,
                name: "To Do".into(),
                order: 1.0,
            })
            .await
            .unwrap();
        (store, board, column)
    }

    #[tokio::test]
    async fn test_board_delete_cascades() {
        let (store, board, column) = seeded().await;
        let card = store
            .insert_card(NewCard {
                board_id: board.id,
                column_id: column.id,
                title: "Ship it".into(),
                content: Some("soon".into()),
                order: 1.0,
            })
            .await
            .unwrap();

        assert!(store.delete_board(OWNER, board.id).await.unwrap());
        assert!(store.get_column(OWNER, column.id).await.unwrap().is_none());
        assert!(store.get_card(OWNER, card.id).await.unwrap().is_none());
        assert_eq!(store.column_count(board.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_card_reads_include_labels() {
        let (store, board, column) = seeded().await;
        let card = store
            .insert_card(NewCard {
                board_id: board.id,
                column_id: column.id,
                title: "Ship it".into(),
                content: None,
                order: 1.0,
            })
            .await
            .unwrap();
        let label = store
            .insert_label(NewLabel {
                board_id: board.id,
                name: "urgent".into(),
                color: "7f1d1d".into(),
            })
            .await
            .unwrap();

        assert!(store.attach_label(card.id, label.id).await.unwrap());
        assert!(!store.attach_label(card.id, label.id).await.unwrap());

        let read = store.get_card(OWNER, card.id).await.unwrap().unwrap();
        assert_eq!(read.labels, vec![label.clone()]);

        let snapshot = store.board_snapshot(OWNER, board.id).await.unwrap().unwrap();
        assert_eq!(snapshot.cards[0].labels, vec![label.clone()]);

        // Deleting the label drops the association
        assert!(store.delete_label(OWNER, label.id).await.unwrap());
        let read = store.get_card(OWNER, card.id).await.unwrap().unwrap();
        assert!(read.labels.is_empty());
    }

    #[tokio::test]
    async fn test_max_card_order() {
        let (store, board, column) = seeded().await;
        assert_eq!(store.max_card_order(column.id).await.unwrap(), None);
        for order in [1.0, 2.5, 2.0] {
            store
                .insert_card(NewCard {
                    board_id: board.id,
                    column_id: column.id,
                    title: "c".into(),
                    content: None,
                    order,
                })
                .await
                .unwrap();
        }
        assert_eq!(store.max_card_order(column.id).await.unwrap(), Some(2.5));
    }
}
