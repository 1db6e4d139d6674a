//! Persistence seam for the stock ledger.

use std::sync::Arc;

use reelrent_catalog::CatalogItemId;
use reelrent_core::DomainResult;

use crate::movement::StockMovement;

/// Append-only movement storage coupled to the catalog on-hand count.
///
/// `append_and_adjust` is one unit of work: the ledger row and the count
/// change land together or not at all. Implementations must make the `Out`
/// path a conditional decrement (fail when on-hand would go negative) rather
/// than a read-then-write, so concurrent outbound movements cannot overdraw
/// an item.
pub trait StockStore: Send + Sync {
    /// Append a movement and apply its signed delta to the referenced item's
    /// on-hand count. Returns the count after the adjustment.
    fn append_and_adjust(&self, movement: &StockMovement) -> DomainResult<i64>;

    /// Movements, optionally filtered to one item, newest-first.
    fn list_movements(&self, item: Option<CatalogItemId>) -> Vec<StockMovement>;
}

impl<S> StockStore for Arc<S>
where
    S: StockStore + ?Sized,
{
    fn append_and_adjust(&self, movement: &StockMovement) -> DomainResult<i64> {
        (**self).append_and_adjust(movement)
    }

    fn list_movements(&self, item: Option<CatalogItemId>) -> Vec<StockMovement> {
        (**self).list_movements(item)
    }
}
