//! In-process store, used by tests and by embedders that don't need a file

use super::{
    BoardPatch, CardPatch, ColumnPatch, EntityStore, LabelPatch, NewBoard, NewCard, NewColumn,
    NewLabel,
};
use crate::error::Result;
use crate::ordering::sort_by_order;
use crate::types::{
    Board, BoardId, BoardSnapshot, Card, CardId, Column, ColumnId, Label, LabelId, UserId,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;
use tresso_operations::LogEntry;

#[derive(Default)]
struct Tables {
    last_id: i64,
    boards: BTreeMap<BoardId, Board>,
    columns: BTreeMap<ColumnId, Column>,
    cards: BTreeMap<CardId, Card>,
    labels: BTreeMap<LabelId, Label>,
    card_labels: BTreeSet<(CardId, LabelId)>,
    activity: Vec<LogEntry>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn owns(&self, owner: UserId, board: BoardId) -> bool {
        self.boards.get(&board).is_some_and(|b| b.owner == owner)
    }

    fn labels_of(&self, card: CardId) -> Vec<Label> {
        let mut labels: Vec<Label> = self
            .card_labels
            .iter()
            .filter(|(c, _)| *c == card)
            .filter_map(|(_, l)| self.labels.get(l).cloned())
            .collect();
        labels.sort_by(|a, b| a.name.cmp(&b.name));
        labels
    }

    fn card_with_labels(&self, card: &Card) -> Card {
        Card {
            labels: self.labels_of(card.id),
            ..card.clone()
        }
    }

    fn remove_cards(&mut self, doomed: &[CardId]) {
        for id in doomed {
            self.cards.remove(id);
        }
        self.card_labels.retain(|(c, _)| !doomed.contains(c));
    }
}

/// Store keeping every table in memory behind a single lock
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert_board(&self, new: NewBoard) -> Result<Board> {
        let mut t = self.tables.write().await;
        let board = Board {
            id: BoardId::new(t.next_id()),
            name: new.name,
            color: new.color,
            owner: new.owner,
            created_at: Utc::now(),
        };
        t.boards.insert(board.id, board.clone());
        Ok(board)
    }

    async fn get_board(&self, owner: UserId, id: BoardId) -> Result<Option<Board>> {
        let t = self.tables.read().await;
        Ok(t.boards.get(&id).filter(|b| b.owner == owner).cloned())
    }

    async fn list_boards(&self, owner: UserId) -> Result<Vec<Board>> {
        let t = self.tables.read().await;
        let mut boards: Vec<Board> = t
            .boards
            .values()
            .filter(|b| b.owner == owner)
            .cloned()
            .collect();
        boards.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(boards)
    }

    async fn update_board(
        &self,
        owner: UserId,
        id: BoardId,
        patch: BoardPatch,
    ) -> Result<Option<Board>> {
        let mut t = self.tables.write().await;
        let Some(board) = t.boards.get_mut(&id).filter(|b| b.owner == owner) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            board.name = name;
        }
        if let Some(color) = patch.color {
            board.color = color;
        }
        Ok(Some(board.clone()))
    }

    async fn delete_board(&self, owner: UserId, id: BoardId) -> Result<bool> {
        let mut t = self.tables.write().await;
        if !t.owns(owner, id) {
            return Ok(false);
        }
        t.boards.remove(&id);
        t.columns.retain(|_, c| c.board_id != id);
        let doomed: Vec<CardId> = t
            .cards
            .values()
            .filter(|c| c.board_id == id)
            .map(|c| c.id)
            .collect();
        t.remove_cards(&doomed);
        let labels: Vec<LabelId> = t
            .labels
            .values()
            .filter(|l| l.board_id == id)
            .map(|l| l.id)
            .collect();
        t.labels.retain(|_, l| l.board_id != id);
        t.card_labels.retain(|(_, l)| !labels.contains(l));
        Ok(true)
    }

    async fn board_snapshot(&self, owner: UserId, id: BoardId) -> Result<Option<BoardSnapshot>> {
        let t = self.tables.read().await;
        let Some(board) = t.boards.get(&id).filter(|b| b.owner == owner) else {
            return Ok(None);
        };
        let mut snapshot = BoardSnapshot::empty(board);
        snapshot.columns = t
            .columns
            .values()
            .filter(|c| c.board_id == id)
            .cloned()
            .collect();
        sort_by_order(&mut snapshot.columns);
        snapshot.cards = t
            .cards
            .values()
            .filter(|c| c.board_id == id)
            .map(|c| t.card_with_labels(c))
            .collect();
        sort_by_order(&mut snapshot.cards);
        snapshot.labels = t
            .labels
            .values()
            .filter(|l| l.board_id == id)
            .cloned()
            .collect();
        snapshot.labels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Some(snapshot))
    }

    async fn insert_column(&self, new: NewColumn) -> Result<Column> {
        let mut t = self.tables.write().await;
        let column = Column::new(ColumnId::new(t.next_id()), new.board_id, new.name, new.order);
        t.columns.insert(column.id, column.clone());
        Ok(column)
    }

    async fn get_column(&self, owner: UserId, id: ColumnId) -> Result<Option<Column>> {
        let t = self.tables.read().await;
        Ok(t
            .columns
            .get(&id)
            .filter(|c| t.owns(owner, c.board_id))
            .cloned())
    }

    async fn update_column(
        &self,
        owner: UserId,
        id: ColumnId,
        patch: ColumnPatch,
    ) -> Result<Option<Column>> {
        let mut t = self.tables.write().await;
        let owned = t.columns.get(&id).is_some_and(|c| t.owns(owner, c.board_id));
        let Some(column) = t.columns.get_mut(&id).filter(|_| owned) else {
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
        Ok(Some(column.clone()))
    }

    async fn delete_column(&self, owner: UserId, id: ColumnId) -> Result<bool> {
        let mut t = self.tables.write().await;
        if !t.columns.get(&id).is_some_and(|c| t.owns(owner, c.board_id)) {
            return Ok(false);
        }
        t.columns.remove(&id);
        let doomed: Vec<CardId> = t
            .cards
            .values()
            .filter(|c| c.column_id == id)
            .map(|c| c.id)
            .collect();
        t.remove_cards(&doomed);
        Ok(true)
    }

    async fn column_count(&self, board: BoardId) -> Result<usize> {
        let t = self.tables.read().await;
        Ok(t.columns.values().filter(|c| c.board_id == board).count())
    }

    async fn insert_card(&self, new: NewCard) -> Result<Card> {
        let mut t = self.tables.write().await;
        let mut card = Card::new(
            CardId::new(t.next_id()),
            new.board_id,
            new.column_id,
            new.title,
            new.order,
        );
        card.content = new.content;
        t.cards.insert(card.id, card.clone());
        Ok(card)
    }

    async fn get_card(&self, owner: UserId, id: CardId) -> Result<Option<Card>> {
        let t = self.tables.read().await;
        Ok(t
            .cards
            .get(&id)
            .filter(|c| t.owns(owner, c.board_id))
            .map(|c| t.card_with_labels(c)))
    }

    async fn update_card(
        &self,
        owner: UserId,
        id: CardId,
        patch: CardPatch,
    ) -> Result<Option<Card>> {
        let mut t = self.tables.write().await;
        let owned = t.cards.get(&id).is_some_and(|c| t.owns(owner, c.board_id));
        let Some(card) = t.cards.get_mut(&id).filter(|_| owned) else {
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
        let card = card.clone();
        Ok(Some(t.card_with_labels(&card)))
    }

    async fn delete_card(&self, owner: UserId, id: CardId) -> Result<bool> {
        let mut t = self.tables.write().await;
        if !t.cards.get(&id).is_some_and(|c| t.owns(owner, c.board_id)) {
            return Ok(false);
        }
        t.remove_cards(&[id]);
        Ok(true)
    }

    async fn max_card_order(&self, column: ColumnId) -> Result<Option<f64>> {
        let t = self.tables.read().await;
        Ok(t
            .cards
            .values()
            .filter(|c| c.column_id == column)
            .map(|c| c.order)
            .max_by(f64::total_cmp))
    }

    async fn insert_label(&self, new: NewLabel) -> Result<Label> {
        let mut t = self.tables.write().await;
        let label = Label {
            id: LabelId::new(t.next_id()),
            board_id: new.board_id,
            name: new.name,
            color: new.color,
        };
        t.labels.insert(label.id, label.clone());
        Ok(label)
    }

    async fn get_label(&self, owner: UserId, id: LabelId) -> Result<Option<Label>> {
        let t = self.tables.read().await;
        Ok(t
            .labels
            .get(&id)
            .filter(|l| t.owns(owner, l.board_id))
            .cloned())
    }

    async fn update_label(
        &self,
        owner: UserId,
        id: LabelId,
        patch: LabelPatch,
    ) -> Result<Option<Label>> {
        let mut t = self.tables.write().await;
        let owned = t.labels.get(&id).is_some_and(|l| t.owns(owner, l.board_id));
        let Some(label) = t.labels.get_mut(&id).filter(|_| owned) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            label.name = name;
        }
        if let Some(color) = patch.color {
            label.color = color;
        }
        Ok(Some(label.clone()))
    }

    async fn delete_label(&self, owner: UserId, id: LabelId) -> Result<bool> {
        let mut t = self.tables.write().await;
        if !t.labels.get(&id).is_some_and(|l| t.owns(owner, l.board_id)) {
            return Ok(false);
        }
        t.labels.remove(&id);
        t.card_labels.retain(|(_, l)| *l != id);
        Ok(true)
    }

    async fn attach_label(&self, card: CardId, label: LabelId) -> Result<bool> {
        let mut t = self.tables.write().await;
        Ok(t.card_labels.insert((card, label)))
    }

    async fn detach_label(&self, card: CardId, label: LabelId) -> Result<bool> {
        let mut t = self.tables.write().await;
        Ok(t.card_labels.remove(&(card, label)))
    }

    async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        self.tables.write().await.activity.push(entry.clone());
        Ok(())
    }

    async fn read_activity(&self, limit: usize) -> Result<Vec<LogEntry>> {
        let t = self.tables.read().await;
        Ok(t.activity.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: UserId = UserId::new(1);
    const STRANGER: UserId = UserId::new(2);

    async fn board(store: &MemoryStore) -> Board {
        store
            .insert_board(NewBoard {
                owner: OWNER,
                name: "Roadmap".into(),
                color: "1e3a8a".into(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_owner_scoping() {
        let store = MemoryStore::new();
        let board = board(&store).await;

        assert!(store.get_board(OWNER, board.id).await.unwrap().is_some());
        assert!(store.get_board(STRANGER, board.id).await.unwrap().is_none());
        assert!(!store.delete_board(STRANGER, board.id).await.unwrap());
        assert!(store.list_boards(STRANGER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_column_delete_cascades_cards() {
        let store = MemoryStore::new();
        let board = board(&store).await;
        let column = store
            .insert_column(NewColumn {
                board_id: board.id,
                name: "To Do".into(),
                order: 1.0,
            })
            .await
            .unwrap();
        let card = store
            .insert_card(NewCard {
                board_id: board.id,
                column_id: column.id,
                title: "a".into(),
                content: None,
                order: 1.0,
            })
            .await
            .unwrap();

        assert!(store.delete_column(OWNER, column.id).await.unwrap());
        assert!(store.get_card(OWNER, card.id).await.unwrap().is_none());
        assert_eq!(store.max_card_order(column.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_attach_is_idempotent() {
        let store = MemoryStore::new();
        let card = CardId::new(10);
        let label = LabelId::new(20);

        assert!(store.attach_label(card, label).await.unwrap());
        assert!(!store.attach_label(card, label).await.unwrap());
        assert!(store.detach_label(card, label).await.unwrap());
        assert!(!store.detach_label(card, label).await.unwrap());
    }
}
