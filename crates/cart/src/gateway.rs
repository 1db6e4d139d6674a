//! Order-creation seam consumed at checkout.
//!
//! Checkout hands the current cart lines to the order workflow through this
//! trait. The cart is cleared only after the gateway reports success; a
//! failed placement leaves the cart untouched.

use std::sync::Arc;

use reelrent_catalog::CatalogItemId;
use reelrent_core::{DomainResult, EntityId, Money, UserId};

/// One requested order line: item and quantity. Unit prices are snapshotted
/// by the order workflow at creation time, not supplied here.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OrderLineRequest {
    pub catalog_item_id: CatalogItemId,
    pub quantity: u32,
}

/// Outcome summary the cart needs from a successful placement.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_id: EntityId,
    pub total: Money,
}

pub trait OrderGateway: Send + Sync {
    fn place_order(
        &self,
        user_id: UserId,
        delivery_address: String,
        notes: Option<String>,
        lines: Vec<OrderLineRequest>,
    ) -> DomainResult<PlacedOrder>;
}

impl<G> OrderGateway for Arc<G>
where
    G: OrderGateway + ?Sized,
{
    fn place_order(
        &self,
        user_id: UserId,
        delivery_address: String,
        notes: Option<String>,
        lines: Vec<OrderLineRequest>,
    ) -> DomainResult<PlacedOrder> {
        (**self).place_order(user_id, delivery_address, notes, lines)
    }
}
