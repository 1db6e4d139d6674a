use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reelrent_catalog::CatalogItemId;
use reelrent_core::EntityId;

/// Stock movement identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MovementId(pub EntityId);

impl MovementId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for MovementId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Direction of a stock adjustment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    In,
    Out,
}

impl MovementKind {
    /// Signed effect of this movement on the item's on-hand count.
    pub fn signed(self, quantity: u32) -> i64 {
        match self {
            MovementKind::In => i64::from(quantity),
            MovementKind::Out => -i64::from(quantity),
        }
    }
}

/// Immutable ledger entry: one inbound/outbound adjustment.
///
/// Movements are never updated or deleted; corrections are recorded as
/// compensating movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: MovementId,
    pub catalog_item_id: CatalogItemId,
    pub kind: MovementKind,
    pub quantity: u32,
    pub note: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_delta_follows_kind() {
        assert_eq!(MovementKind::In.signed(4), 4);
        assert_eq!(MovementKind::Out.signed(4), -4);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: an In and an Out of the same quantity cancel out.
            #[test]
            fn in_and_out_cancel(quantity in 1u32..=10_000) {
                prop_assert_eq!(
                    MovementKind::In.signed(quantity) + MovementKind::Out.signed(quantity),
                    0
                );
            }
        }
    }
}
