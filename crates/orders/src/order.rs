use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reelrent_catalog::CatalogItemId;
use reelrent_core::{EntityId, Money, UserId};

/// Order identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

impl OrderId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order line identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrderLineId(pub EntityId);

impl OrderLineId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderLineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order status lifecycle.
///
/// `Pending → Assigned → InTransit → Delivered`, `Delivered → Returned`, and
/// any non-terminal state can be `Cancelled`. Transitions outside this table
/// are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Assigned,
    InTransit,
    Delivered,
    Returned,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states accept no forward progress (`Delivered` still allows
    /// the return leg).
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Returned | OrderStatus::Cancelled
        )
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Assigned)
                | (Assigned, InTransit)
                | (InTransit, Delivered)
                | (Delivered, Returned)
                | (Pending | Assigned | InTransit, Cancelled)
        )
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Assigned => "assigned",
            OrderStatus::InTransit => "in transit",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Returned => "returned",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// One snapshot line of an order.
///
/// `unit_price` is captured from the catalog at order creation and never
/// follows later catalog price changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub catalog_item_id: CatalogItemId,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// A checked-out purchase and its snapshot line items.
///
/// Lines are owned by the order and persist with it in one unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub ordered_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub returned_at: Option<DateTime<Utc>>,
    pub total: Money,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub courier_id: Option<UserId>,
    pub updated_at: Option<DateTime<Utc>>,
    pub lines: Vec<OrderLine>,
}

/// Partial update of the mutable order fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPatch {
    pub delivered_at: Option<DateTime<Utc>>,
    pub returned_at: Option<DateTime<Utc>>,
    pub status: Option<OrderStatus>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions_are_allowed() {
        use OrderStatus::*;
        for (from, to) in [
            (Pending, Assigned),
            (Assigned, InTransit),
            (InTransit, Delivered),
            (Delivered, Returned),
        ] {
            assert!(from.can_transition_to(to), "{from} -> {to}");
        }
    }

    #[test]
    fn cancellation_is_only_reachable_from_non_terminal_states() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Assigned.can_transition_to(Cancelled));
        assert!(InTransit.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Returned.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn jumps_and_regressions_are_rejected() {
        use OrderStatus::*;
        assert!(!Pending.can_transition_to(InTransit));
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Assigned.can_transition_to(Pending));
        assert!(!Returned.can_transition_to(Pending));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_status() -> impl Strategy<Value = OrderStatus> {
            use OrderStatus::*;
            prop_oneof![
                Just(Pending),
                Just(Assigned),
                Just(InTransit),
                Just(Delivered),
                Just(Returned),
                Just(Cancelled),
            ]
        }

        proptest! {
            /// Property: the only edge out of a terminal state is the
            /// delivered-to-returned leg.
            #[test]
            fn terminal_states_admit_only_the_return_leg(
                from in any_status(),
                to in any_status(),
            ) {
                if from.is_terminal() && from.can_transition_to(to) {
                    prop_assert_eq!(from, OrderStatus::Delivered);
                    prop_assert_eq!(to, OrderStatus::Returned);
                }
            }

            /// Property: no state transitions to itself.
            #[test]
            fn no_self_loops(status in any_status()) {
                prop_assert!(!status.can_transition_to(status));
            }
        }
    }
}
