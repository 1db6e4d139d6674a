use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reelrent_catalog::CatalogItemId;
use reelrent_core::{EntityId, UserId};

/// Cart line identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CartLineId(pub EntityId);

impl CartLineId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CartLineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One (user, item, quantity) row in a user's shopping cart.
///
/// At most one line exists per (user, catalog item) pair; adding an
/// already-present item merges into the existing line instead of creating a
/// duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    pub user_id: UserId,
    pub catalog_item_id: CatalogItemId,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
