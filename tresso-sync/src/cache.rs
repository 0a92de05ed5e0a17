//! Client-side board cache with optimistic updates.
//!
//! The cache holds one board's columns, cards and labels keyed by id. Every
//! mutation is applied locally the moment it is issued ([`ClientCache::begin`])
//! and settled when the server answers ([`ClientCache::reconcile`]).
//!
//! Each mutation gets a sequence number within its [`Collection`]. When a
//! response comes back for a mutation that is no longer the latest of its
//! collection, its record is not merged: a newer edit is already displayed and
//! must not be stomped by a late answer. Once a collection has nothing in
//! flight, and no create is pending anywhere, the settlement asks for a
//! refetch and the fetched snapshot is the final word. Mutations still pending
//! at that point are replayed on top of it, so an in-flight edit never
//! visibly reverts.

use crate::mutation::{Collection, Mutation, MutationOutcome};
use crate::view::{BoardView, ColumnView};
use std::collections::BTreeMap;
use tresso_kanban::auto_color::auto_color;
use tresso_kanban::ordering::{compare_order, needs_compaction, renumber, sort_by_order};
use tresso_kanban::validate;
use tresso_kanban::{
    BoardId, BoardSnapshot, Card, CardId, Column, ColumnId, Label, LabelId, TressoError,
};

/// Handle for one issued mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutationTicket {
    seq: u64,
    collection: Collection,
    collection_seq: u64,
}

impl MutationTicket {
    /// Global issue order
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Issue order within the collection
    pub fn collection_seq(&self) -> u64 {
        self.collection_seq
    }
}

/// Lifecycle of a tracked mutation: `Pending -> Confirmed | Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    Pending,
    Confirmed,
    Failed,
}

/// What happened when a mutation settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The server accepted the mutation. A superseded confirmation only
    /// swapped provisional ids and left the newer optimistic state alone.
    Confirmed { superseded: bool, refetch: bool },
    /// The server rejected it; `message` is safe to show to the user
    Failed { message: String, refetch: bool },
}

impl Settlement {
    pub fn status(&self) -> MutationStatus {
        match self {
            Self::Confirmed { .. } => MutationStatus::Confirmed,
            Self::Failed { .. } => MutationStatus::Failed,
        }
    }

    /// Whether the caller should refetch the board now
    pub fn refetch(&self) -> bool {
        match self {
            Self::Confirmed { refetch, .. } | Self::Failed { refetch, .. } => *refetch,
        }
    }
}

/// Marks when a fetch started, so a snapshot that predates a settlement can
/// be thrown away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken {
    settled: u64,
}

/// Whole-collection contents for [`ClientCache::get`] / [`ClientCache::set`]
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionData {
    Columns(Vec<Column>),
    Cards(Vec<Card>),
    Labels(Vec<Label>),
}

impl CollectionData {
    pub fn collection(&self) -> Collection {
        match self {
            Self::Columns(_) => Collection::Columns,
            Self::Cards(_) => Collection::Cards,
            Self::Labels(_) => Collection::Labels,
        }
    }
}

#[derive(Debug, Clone)]
struct BoardMeta {
    id: BoardId,
    name: String,
    color: String,
}

#[derive(Debug, Clone, Copy, Default)]
struct CollectionState {
    issued: u64,
    stale: bool,
}

#[derive(Debug, Clone)]
struct Pending {
    ticket: MutationTicket,
    mutation: Mutation,
}

/// Cached state of one board, owned by whoever displays it
#[derive(Debug, Default)]
pub struct ClientCache {
    board: Option<BoardMeta>,
    columns: BTreeMap<ColumnId, Column>,
    cards: BTreeMap<CardId, Card>,
    labels: BTreeMap<LabelId, Label>,
    pending: BTreeMap<u64, Pending>,
    collections: BTreeMap<Collection, CollectionState>,
    last_seq: u64,
    last_provisional: i64,
    settled: u64,
}

impl ClientCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the seeded board, if any
    pub fn board_id(&self) -> Option<BoardId> {
        self.board.as_ref().map(|b| b.id)
    }

    /// Hand out a fresh provisional id for an optimistic create
    pub fn next_provisional_id(&mut self) -> i64 {
        self.last_provisional -= 1;
        self.last_provisional
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    /// Replace everything with a server snapshot, then replay what is still
    /// in flight on top of it
    pub fn seed(&mut self, snapshot: BoardSnapshot) {
        self.board = Some(BoardMeta {
            id: snapshot.id,
            name: snapshot.name,
            color: snapshot.color,
        });
        self.columns = snapshot.columns.into_iter().map(|c| (c.id, c)).collect();
        self.cards = snapshot.cards.into_iter().map(|c| (c.id, c)).collect();
        self.labels = snapshot.labels.into_iter().map(|l| (l.id, l)).collect();
        for state in self.collections.values_mut() {
            state.stale = false;
        }

        let replay: Vec<Mutation> = self.pending.values().map(|p| p.mutation.clone()).collect();
        for mutation in &replay {
            self.apply(mutation);
        }
        tracing::debug!(
            columns = self.columns.len(),
            cards = self.cards.len(),
            replayed = replay.len(),
            "cache seeded"
        );
    }

    /// Start a fetch; pass the token back to [`Self::seed_fetched`]
    pub fn begin_fetch(&self) -> FetchToken {
        FetchToken {
            settled: self.settled,
        }
    }

    /// Seed from a fetch unless a mutation settled while it was in flight.
    ///
    /// Returns false when the snapshot was discarded; the caller should
    /// start a new fetch.
    pub fn seed_fetched(&mut self, token: FetchToken, snapshot: BoardSnapshot) -> bool {
        if token.settled != self.settled {
            tracing::debug!(
                started_at = token.settled,
                now = self.settled,
                "discarding stale fetch"
            );
            return false;
        }
        // The server may already hold the record while its provisional copy
        // is still pending; replaying the create would show it twice
        if self.has_pending_create() {
            tracing::debug!("discarding fetch while a create is in flight");
            return false;
        }
        self.seed(snapshot);
        true
    }

    // =========================================================================
    // Mutation lifecycle
    // =========================================================================

    /// Record a mutation as pending and apply it optimistically
    pub fn begin(&mut self, mutation: Mutation) -> MutationTicket {
        self.last_seq += 1;
        let collection = mutation.collection();
        let state = self.collections.entry(collection).or_default();
        state.issued += 1;
        let ticket = MutationTicket {
            seq: self.last_seq,
            collection,
            collection_seq: state.issued,
        };

        self.apply(&mutation);
        tracing::debug!(
            seq = ticket.seq,
            ?collection,
            collection_seq = ticket.collection_seq,
            mutation = mutation.name(),
            "mutation pending"
        );
        self.pending.insert(ticket.seq, Pending { ticket, mutation });
        ticket
    }

    /// Settle a pending mutation with the server's answer.
    ///
    /// Returns `None` for a ticket that is not pending (already settled).
    pub fn reconcile(
        &mut self,
        ticket: MutationTicket,
        result: &Result<MutationOutcome, TressoError>,
    ) -> Option<Settlement> {
        let Some(pending) = self.pending.remove(&ticket.seq) else {
            tracing::warn!(seq = ticket.seq, "reconcile for a mutation that is not pending");
            return None;
        };
        self.settled += 1;

        let latest = self
            .collections
            .get(&ticket.collection)
            .map_or(true, |s| s.issued == ticket.collection_seq);
        let refetch = !self.has_pending(ticket.collection) && !self.has_pending_create();

        match result {
            Ok(outcome) => {
                self.swap_provisional(&pending.mutation, outcome);
                if latest {
                    self.merge(outcome);
                    tracing::debug!(
                        seq = ticket.seq,
                        mutation = pending.mutation.name(),
                        "mutation confirmed"
                    );
                } else {
                    tracing::warn!(
                        seq = ticket.seq,
                        mutation = pending.mutation.name(),
                        collection_seq = ticket.collection_seq,
                        "mutation superseded by a newer edit, not merging"
                    );
                }
                Some(Settlement::Confirmed {
                    superseded: !latest,
                    refetch,
                })
            }
            Err(error) => {
                self.invalidate(ticket.collection);
                tracing::warn!(
                    seq = ticket.seq,
                    mutation = pending.mutation.name(),
                    %error,
                    "mutation failed"
                );
                Some(Settlement::Failed {
                    message: error.user_message(),
                    refetch,
                })
            }
        }
    }

    pub fn is_pending(&self, ticket: &MutationTicket) -> bool {
        self.pending.contains_key(&ticket.seq)
    }

    /// Whether anything is in flight for the collection
    pub fn has_pending(&self, collection: Collection) -> bool {
        self.pending
            .values()
            .any(|p| p.ticket.collection == collection)
    }

    /// Whether an optimistic create is still waiting for its server id
    pub fn has_pending_create(&self) -> bool {
        self.pending.values().any(|p| p.mutation.is_create())
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    // =========================================================================
    // Optimistic application
    // =========================================================================

    /// Apply a mutation to the local state as if the server had accepted it.
    ///
    /// Idempotent: applying the same mutation twice leaves the same state as
    /// applying it once.
    pub fn apply(&mut self, mutation: &Mutation) {
        match mutation {
            Mutation::CreateColumn {
                provisional_id,
                board_id,
                name,
            } => {
                if !self.columns.contains_key(provisional_id) {
                    let order = (self.columns.len() + 1) as f64;
                    let column = Column::new(*provisional_id, *board_id, name.clone(), order);
                    self.columns.insert(*provisional_id, column);
                }
            }
            Mutation::UpdateColumn {
                id,
                name,
                order,
                archived,
                ..
            } => {
                if let Some(column) = self.columns.get_mut(id) {
                    if let Some(name) = name {
                        column.name = name.clone();
                    }
                    if let Some(order) = order {
                        column.order = *order;
                    }
                    if let Some(archived) = archived {
                        column.archived = *archived;
                    }
                }
            }
            Mutation::DeleteColumn { id, .. } => {
                self.columns.remove(id);
                self.cards.retain(|_, c| c.column_id != *id);
            }
            Mutation::CreateCard {
                provisional_id,
                board_id,
                column_id,
                title,
                content,
                order,
            } => {
                if !self.cards.contains_key(provisional_id) {
                    let mut card =
                        Card::new(*provisional_id, *board_id, *column_id, title.clone(), *order);
                    card.content = validate::content(content.as_deref());
                    self.cards.insert(*provisional_id, card);
                }
            }
            Mutation::MoveCard {
                id,
                column_id,
                order,
            } => {
                if let Some(card) = self.cards.get_mut(id) {
                    card.column_id = *column_id;
                    card.order = *order;
                }
            }
            Mutation::UpdateCardTitle { id, title } => {
                if let Some(card) = self.cards.get_mut(id) {
                    card.title = title.trim().to_string();
                }
            }
            Mutation::UpdateCardContent { id, content } => {
                if let Some(card) = self.cards.get_mut(id) {
                    card.content = validate::content(content.as_deref());
                }
            }
            Mutation::DeleteCard { id } => {
                self.cards.remove(id);
            }
            Mutation::AttachLabel { card_id, label_id } => {
                let Some(label) = self.labels.get(label_id).cloned() else {
                    return;
                };
                if let Some(card) = self.cards.get_mut(card_id) {
                    if !card.has_label(*label_id) {
                        card.labels.push(label);
                        card.labels.sort_by(|a, b| a.name.cmp(&b.name));
                    }
                }
            }
            Mutation::DetachLabel { card_id, label_id } => {
                if let Some(card) = self.cards.get_mut(card_id) {
                    card.labels.retain(|l| l.id != *label_id);
                }
            }
            Mutation::CreateLabel {
                provisional_id,
                board_id,
                name,
                color,
            } => {
                if !self.labels.contains_key(provisional_id) {
                    let name = name.trim().to_string();
                    let color = match color {
                        Some(color) => validate::color(color).unwrap_or_else(|_| color.clone()),
                        None => auto_color(&name).to_string(),
                    };
                    self.labels.insert(
                        *provisional_id,
                        Label {
                            id: *provisional_id,
                            board_id: *board_id,
                            name,
                            color,
                        },
                    );
                }
            }
            Mutation::UpdateLabel { id, name, color } => {
                let Some(label) = self.labels.get_mut(id) else {
                    return;
                };
                if let Some(name) = name {
                    label.name = name.trim().to_string();
                }
                if let Some(color) = color {
                    label.color = validate::color(color).unwrap_or_else(|_| color.clone());
                }
                let label = label.clone();
                self.replace_label_copies(&label);
            }
            Mutation::DeleteLabel { id, .. } => {
                self.labels.remove(id);
                for card in self.cards.values_mut() {
                    card.labels.retain(|l| l.id != *id);
                }
            }
        }
    }

    /// Re-key an optimistic create under the id the server assigned
    fn swap_provisional(&mut self, mutation: &Mutation, outcome: &MutationOutcome) {
        match (mutation, outcome) {
            (Mutation::CreateColumn { provisional_id, .. }, MutationOutcome::Column(server)) => {
                if let Some(mut column) = self.columns.remove(provisional_id) {
                    column.id = server.id;
                    self.columns.entry(server.id).or_insert(column);
                }
                for card in self.cards.values_mut() {
                    if card.column_id == *provisional_id {
                        card.column_id = server.id;
                    }
                }
            }
            (Mutation::CreateCard { provisional_id, .. }, MutationOutcome::Card(server)) => {
                if let Some(mut card) = self.cards.remove(provisional_id) {
                    card.id = server.id;
                    self.cards.entry(server.id).or_insert(card);
                }
            }
            (Mutation::CreateLabel { provisional_id, .. }, MutationOutcome::Label(server)) => {
                if let Some(mut label) = self.labels.remove(provisional_id) {
                    label.id = server.id;
                    self.labels.entry(server.id).or_insert(label);
                }
                for card in self.cards.values_mut() {
                    for label in card.labels.iter_mut() {
                        if label.id == *provisional_id {
                            label.id = server.id;
                        }
                    }
                }
            }
            _ => {}
        }
    }

    /// Overwrite the local guess with the authoritative record
    fn merge(&mut self, outcome: &MutationOutcome) {
        match outcome {
            MutationOutcome::Column(column) => {
                self.columns.insert(column.id, column.clone());
            }
            MutationOutcome::Card(card) => {
                self.cards.insert(card.id, card.clone());
            }
            MutationOutcome::Label(label) => {
                self.labels.insert(label.id, label.clone());
                self.replace_label_copies(label);
            }
            MutationOutcome::Done => {}
        }
    }

    fn replace_label_copies(&mut self, label: &Label) {
        for card in self.cards.values_mut() {
            let mut touched = false;
            for attached in card.labels.iter_mut().filter(|l| l.id == label.id) {
                *attached = label.clone();
                touched = true;
            }
            if touched {
                card.labels.sort_by(|a, b| a.name.cmp(&b.name));
            }
        }
    }

    // =========================================================================
    // Collection access
    // =========================================================================

    /// Current contents of a collection, sorted for display
    pub fn get(&self, collection: Collection) -> CollectionData {
        match collection {
            Collection::Columns => {
                let mut columns: Vec<Column> = self.columns.values().cloned().collect();
                sort_by_order(&mut columns);
                CollectionData::Columns(columns)
            }
            Collection::Cards => {
                let mut cards: Vec<Card> = self.cards.values().cloned().collect();
                sort_by_order(&mut cards);
                CollectionData::Cards(cards)
            }
            Collection::Labels => CollectionData::Labels(self.sorted_labels()),
        }
    }

    fn sorted_labels(&self) -> Vec<Label> {
        let mut labels: Vec<Label> = self.labels.values().cloned().collect();
        labels.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        labels
    }

    /// Replace one collection wholesale
    pub fn set(&mut self, data: CollectionData) {
        let collection = data.collection();
        match data {
            CollectionData::Columns(columns) => {
                self.columns = columns.into_iter().map(|c| (c.id, c)).collect();
            }
            CollectionData::Cards(cards) => {
                self.cards = cards.into_iter().map(|c| (c.id, c)).collect();
            }
            CollectionData::Labels(labels) => {
                self.labels = labels.into_iter().map(|l| (l.id, l)).collect();
            }
        }
        self.collections.entry(collection).or_default().stale = false;
    }

    /// Mark a collection as no longer trustworthy until the next seed
    pub fn invalidate(&mut self, collection: Collection) {
        self.collections.entry(collection).or_default().stale = true;
        tracing::debug!(?collection, "collection invalidated");
    }

    pub fn is_stale(&self, collection: Collection) -> bool {
        self.collections
            .get(&collection)
            .is_some_and(|state| state.stale)
    }

    // =========================================================================
    // Projections
    // =========================================================================

    /// Columns in display order, each with its cards in display order.
    ///
    /// Cards whose column is not in the cache are not shown. `None` until
    /// the first seed.
    pub fn view(&self) -> Option<BoardView> {
        let board = self.board.as_ref()?;
        let mut columns: Vec<&Column> = self.columns.values().collect();
        columns.sort_by(|a, b| compare_order(*a, *b));

        let columns = columns
            .into_iter()
            .map(|column| {
                let mut cards: Vec<Card> = self
                    .cards
                    .values()
                    .filter(|c| c.column_id == column.id)
                    .cloned()
                    .collect();
                sort_by_order(&mut cards);
                ColumnView {
                    column: column.clone(),
                    cards,
                }
            })
            .collect();

        Some(BoardView {
            id: board.id,
            name: board.name.clone(),
            color: board.color.clone(),
            columns,
            labels: self.sorted_labels(),
        })
    }

    /// Reorder mutations that renumber every sibling list with neighbours
    /// closer than `min_gap` to 1..=N. Records with provisional ids are left
    /// out; the list is compacted on a later pass.
    pub fn compaction_plan(&self, min_gap: f64) -> Vec<Mutation> {
        let Some(view) = self.view() else {
            return Vec::new();
        };
        let mut plan = Vec::new();

        let columns: Vec<Column> = view.columns.iter().map(|c| c.column.clone()).collect();
        if needs_compaction(&columns, min_gap) && !columns.iter().any(|c| c.id.is_provisional()) {
            plan.extend(
                renumber(&columns)
                    .into_iter()
                    .map(|(id, order)| Mutation::reorder_column(id, view.id, order)),
            );
        }

        for column in view.columns.iter().filter(|c| !c.column.id.is_provisional()) {
            if needs_compaction(&column.cards, min_gap)
                && !column.cards.iter().any(|c| c.id.is_provisional())
            {
                plan.extend(renumber(&column.cards).into_iter().map(|(id, order)| {
                    Mutation::MoveCard {
                        id,
                        column_id: column.column.id,
                        order,
                    }
                }));
            }
        }

        if !plan.is_empty() {
            tracing::info!(mutations = plan.len(), min_gap, "compaction planned");
        }
        plan
    }
}
