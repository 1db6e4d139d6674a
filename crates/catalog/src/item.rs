use std::sync::Arc;

use serde::{Deserialize, Serialize};

use reelrent_core::{EntityId, Money};

/// Catalog item identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CatalogItemId(pub EntityId);

impl CatalogItemId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CatalogItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A rentable film/disc record as seen by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: CatalogItemId,
    pub title: String,
    pub unit_price: Money,
    pub on_hand: i64,
    pub is_available: bool,
}

impl CatalogItem {
    /// True when the item can satisfy a request for `quantity` units.
    pub fn can_supply(&self, quantity: u32) -> bool {
        self.is_available && self.on_hand >= i64::from(quantity)
    }
}

/// Read-only catalog lookup.
pub trait CatalogReader: Send + Sync {
    fn find_item(&self, id: CatalogItemId) -> Option<CatalogItem>;
}

impl<C> CatalogReader for Arc<C>
where
    C: CatalogReader + ?Sized,
{
    fn find_item(&self, id: CatalogItemId) -> Option<CatalogItem> {
        (**self).find_item(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(on_hand: i64, is_available: bool) -> CatalogItem {
        CatalogItem {
            id: CatalogItemId::new(EntityId::new()),
            title: "Stalker".to_string(),
            unit_price: Money::from_cents(995),
            on_hand,
            is_available,
        }
    }

    #[test]
    fn supply_requires_availability_and_stock() {
        assert!(item(5, true).can_supply(5));
        assert!(!item(5, true).can_supply(6));
        assert!(!item(5, false).can_supply(1));
    }
}
