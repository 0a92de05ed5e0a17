//! Orders for `--before`, `--after` and `--end`

use tresso_kanban::ordering::{append_order, order_beside, Ordered, Side};
use tresso_kanban::TressoError;

/// Requested position relative to a sibling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement<Id> {
    Before(Id),
    After(Id),
    End,
}

/// Order for `moving` placed within `siblings`.
///
/// `siblings` must be sorted by order; the moved item itself is skipped so
/// that placing an item next to its current neighbours works.
pub fn order_for<T: Ordered>(
    siblings: &[T],
    moving: T::Id,
    placement: Placement<T::Id>,
) -> Result<f64, TressoError>
where
    T::Id: std::fmt::Display,
{
    let others: Vec<&T> = siblings.iter().filter(|s| s.order_id() != moving).collect();

    let anchor_index = |anchor: T::Id| {
        if anchor == moving {
            return Err(TressoError::invalid_value(
                "position",
                "cannot place an item relative to itself",
            ));
        }
        others
            .iter()
            .position(|s| s.order_id() == anchor)
            .ok_or_else(|| TressoError::not_found("anchor", anchor))
    };

    let (anchor, side) = match placement {
        Placement::Before(anchor) => (anchor, Side::Before),
        Placement::After(anchor) => (anchor, Side::After),
        Placement::End => return Ok(append_order(others.last().map(|s| s.order()))),
    };
    let index = anchor_index(anchor)?;
    let orders: Vec<f64> = others.iter().map(|s| s.order()).collect();
    order_beside(&orders, index, side).ok_or_else(|| {
        TressoError::invalid_value(
            "position",
            "no room left between the neighbours, renumber the list first",
        )
    })
}
