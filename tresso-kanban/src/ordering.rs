//! Fractional ordering of columns and cards.
//!
//! Siblings are never renumbered on a move: the moved item takes the midpoint
//! between its new neighbours. Orders are plain `f64` values, so repeated
//! insertion at the same spot eventually runs out of precision. With
//! neighbours of magnitude around 1 at least [`MIN_GUARANTEED_SPLITS`]
//! consecutive splits stay strictly ordered; [`is_exhausted`] tells when the
//! next split would collapse and [`renumber`] produces a fresh 1..=N layout.

use crate::types::{Card, CardId, Column, ColumnId};
use std::cmp::Ordering;

/// Order used in place of a missing preceding neighbour (head drop)
pub const HEAD_SENTINEL: f64 = 0.0;

/// Order of the first item appended to an empty list
pub const FIRST_ORDER: f64 = 1.0;

/// Minimum number of same-spot midpoint splits that stay strictly ordered
pub const MIN_GUARANTEED_SPLITS: usize = 50;

/// Midpoint between two neighbours.
///
/// For a head drop pass [`HEAD_SENTINEL`] as `preceding`; for a tail drop pass
/// `preceding + 1.0` as `following` (see [`tail_following`]).
pub fn compute_drop_order(preceding: f64, following: f64) -> f64 {
    (preceding + following) / 2.0
}

/// The `following` bound used when dropping after the last item
pub fn tail_following(preceding: f64) -> f64 {
    preceding + 1.0
}

/// Order for an item appended after `last`, or [`FIRST_ORDER`] for an empty list
pub fn append_order(last: Option<f64>) -> f64 {
    match last {
        Some(last) => last + 1.0,
        None => FIRST_ORDER,
    }
}

/// True when the midpoint of the two neighbours is no longer strictly between them
pub fn is_exhausted(preceding: f64, following: f64) -> bool {
    let mid = compute_drop_order(preceding, following);
    !(preceding < mid && mid < following)
}

/// Which side of a neighbour an item lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

/// Order for landing on `side` of the item at `index` in a sorted list of
/// sibling orders.
///
/// A head drop splits against [`HEAD_SENTINEL`] and a tail drop against
/// [`tail_following`]. Returns `None` when `index` is out of range or when
/// the neighbours are too close to split; the list has to be renumbered
/// before anything else can land there.
pub fn order_beside(orders: &[f64], index: usize, side: Side) -> Option<f64> {
    let target = *orders.get(index)?;
    let (preceding, following) = match side {
        Side::Before => {
            let preceding = index.checked_sub(1).map_or(HEAD_SENTINEL, |i| orders[i]);
            (preceding, target)
        }
        Side::After => {
            let following = orders
                .get(index + 1)
                .copied()
                .unwrap_or_else(|| tail_following(target));
            (target, following)
        }
    };
    if is_exhausted(preceding, following) {
        tracing::warn!(preceding, following, "no room between neighbours, list needs compaction");
        return None;
    }
    Some(compute_drop_order(preceding, following))
}

/// Anything positioned by a fractional order with an id tie-break
pub trait Ordered {
    type Id: Ord + Copy;

    fn order(&self) -> f64;
    fn order_id(&self) -> Self::Id;
}

impl Ordered for Column {
    type Id = ColumnId;

    fn order(&self) -> f64 {
        self.order
    }

    fn order_id(&self) -> ColumnId {
        self.id
    }
}

impl Ordered for Card {
    type Id = CardId;

    fn order(&self) -> f64 {
        self.order
    }

    fn order_id(&self) -> CardId {
        self.id
    }
}

/// Ascending by order, ties broken by id
pub fn compare_order<T: Ordered>(a: &T, b: &T) -> Ordering {
    a.order()
        .total_cmp(&b.order())
        .then_with(|| a.order_id().cmp(&b.order_id()))
}

pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by(compare_order);
}

/// Whether any two adjacent items of a sorted list sit closer than `min_gap`
pub fn needs_compaction<T: Ordered>(sorted: &[T], min_gap: f64) -> bool {
    sorted
        .windows(2)
        .any(|pair| pair[1].order() - pair[0].order() < min_gap)
}

/// Fresh orders 1..=N for a sorted list, as `(id, new_order)` pairs for the
/// items whose order actually changes
pub fn renumber<T: Ordered>(sorted: &[T]) -> Vec<(T::Id, f64)> {
    sorted
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let order = (i + 1) as f64;
            (item.order() != order).then_some((item.order_id(), order))
        })
        .collect()
}
