//! Order workflow service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use reelrent_cart::{OrderGateway, OrderLineRequest, PlacedOrder};
use reelrent_catalog::{CatalogItemId, CatalogReader};
use reelrent_core::{
    ApiResponse, Clock, DomainError, DomainResult, EntityId, Money, Role, UserDirectory, UserId,
};

use crate::order::{Order, OrderId, OrderLine, OrderLineId, OrderPatch, OrderStatus};
use crate::store::OrderStore;

/// Request to create an order from explicit line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrder {
    pub user_id: UserId,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub lines: Vec<OrderLineRequest>,
}

/// Order line enriched with the item's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLineView {
    pub id: OrderLineId,
    pub catalog_item_id: CatalogItemId,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderView {
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
    pub lines: Vec<OrderLineView>,
}

/// Creates orders with price snapshots and drives their status lifecycle.
pub struct OrderService<S, C, U, K> {
    store: S,
    catalog: C,
    users: U,
    clock: K,
}

impl<S, C, U, K> OrderService<S, C, U, K>
where
    S: OrderStore,
    C: CatalogReader,
    U: UserDirectory,
    K: Clock,
{
    pub fn new(store: S, catalog: C, users: U, clock: K) -> Self {
        Self {
            store,
            catalog,
            users,
            clock,
        }
    }

    /// Create an order in `Pending` status from explicit line items.
    ///
    /// Unit prices are snapshotted from the catalog now; later catalog price
    /// changes do not touch the stored totals. Creation does not move stock:
    /// the stock ledger records the outbound movement when the warehouse
    /// dispatches the order.
    pub fn create(&self, request: CreateOrder) -> ApiResponse<OrderView> {
        ApiResponse::from_result(self.try_create(request).map(|order| self.view(&order)))
    }

    fn try_create(&self, request: CreateOrder) -> DomainResult<Order> {
        let delivery_address = request.delivery_address.trim().to_string();
        if delivery_address.is_empty() {
            return Err(DomainError::validation("delivery address is required"));
        }

        let mut lines = Vec::with_capacity(request.lines.len());
        for line in &request.lines {
            if line.quantity == 0 {
                return Err(DomainError::validation("quantity must be positive"));
            }
            let item = self.catalog.find_item(line.catalog_item_id).ok_or_else(|| {
                DomainError::not_found(format!("catalog item {}", line.catalog_item_id))
            })?;
            lines.push(OrderLine {
                id: OrderLineId::new(EntityId::new()),
                catalog_item_id: line.catalog_item_id,
                quantity: line.quantity,
                unit_price: item.unit_price,
                line_total: item.unit_price.times(line.quantity)?,
            });
        }

        let total = Money::sum(lines.iter().map(|l| l.line_total))?;

        let order = Order {
            id: OrderId::new(EntityId::new()),
            user_id: request.user_id,
            ordered_at: self.clock.now(),
            delivered_at: None,
            returned_at: None,
            total,
            // Status is forced regardless of what a caller might want.
            status: OrderStatus::Pending,
            delivery_address,
            notes: request.notes,
            courier_id: None,
            updated_at: None,
            lines,
        };

        self.store.insert_order(order.clone());
        info!(order = %order.id, user = %order.user_id, total = %order.total, "order created");
        Ok(order)
    }

    /// Assign a courier and advance the order to `Assigned`.
    ///
    /// Valid from `Pending` or `Assigned` (re-assignment); the courier must
    /// resolve to a user holding the `Courier` role.
    pub fn assign_courier(&self, order_id: OrderId, courier_id: UserId) -> ApiResponse<bool> {
        ApiResponse::from_result(self.try_assign_courier(order_id, courier_id))
    }

    fn try_assign_courier(&self, order_id: OrderId, courier_id: UserId) -> DomainResult<bool> {
        let mut order = self.find(order_id)?;

        let courier = self
            .users
            .find_user(courier_id)
            .filter(|u| u.role == Role::Courier)
            .ok_or_else(|| DomainError::not_found(format!("courier {courier_id}")))?;

        if !matches!(order.status, OrderStatus::Pending | OrderStatus::Assigned) {
            return Err(DomainError::invariant(format!(
                "courier can only be assigned while the order is pending or assigned (currently {})",
                order.status
            )));
        }

        order.courier_id = Some(courier.id);
        order.status = OrderStatus::Assigned;
        order.updated_at = Some(self.clock.now());
        self.store.update_order(order);

        info!(order = %order_id, courier = %courier_id, "courier assigned");
        Ok(true)
    }

    /// Move the order along the status lifecycle; jumps outside the
    /// transition table are rejected.
    pub fn update_status(&self, order_id: OrderId, status: OrderStatus) -> ApiResponse<bool> {
        ApiResponse::from_result(self.try_update_status(order_id, status))
    }

    fn try_update_status(&self, order_id: OrderId, status: OrderStatus) -> DomainResult<bool> {
        let mut order = self.find(order_id)?;
        self.check_transition(order.status, status)?;

        order.status = status;
        order.updated_at = Some(self.clock.now());
        self.store.update_order(order);

        info!(order = %order_id, status = %status, "order status updated");
        Ok(true)
    }

    pub fn list_all(&self) -> ApiResponse<Vec<OrderView>> {
        let views = self.store.list_orders().iter().map(|o| self.view(o)).collect();
        ApiResponse::ok(views)
    }

    pub fn list_for_user(&self, user_id: UserId) -> ApiResponse<Vec<OrderView>> {
        let views = self
            .store
            .list_orders()
            .iter()
            .filter(|o| o.user_id == user_id)
            .map(|o| self.view(o))
            .collect();
        ApiResponse::ok(views)
    }

    pub fn list_by_status(&self, status: OrderStatus) -> ApiResponse<Vec<OrderView>> {
        let views = self
            .store
            .list_orders()
            .iter()
            .filter(|o| o.status == status)
            .map(|o| self.view(o))
            .collect();
        ApiResponse::ok(views)
    }

    pub fn get_by_id(&self, order_id: OrderId) -> ApiResponse<OrderView> {
        ApiResponse::from_result(self.find(order_id).map(|o| self.view(&o)))
    }

    /// Partial update of delivery/return timestamps, status, and notes.
    pub fn update(&self, order_id: OrderId, patch: OrderPatch) -> ApiResponse<OrderView> {
        ApiResponse::from_result(self.try_update(order_id, patch).map(|o| self.view(&o)))
    }

    fn try_update(&self, order_id: OrderId, patch: OrderPatch) -> DomainResult<Order> {
        let mut order = self.find(order_id)?;

        if let Some(status) = patch.status {
            self.check_transition(order.status, status)?;
            order.status = status;
        }
        if let Some(delivered_at) = patch.delivered_at {
            order.delivered_at = Some(delivered_at);
        }
        if let Some(returned_at) = patch.returned_at {
            order.returned_at = Some(returned_at);
        }
        if let Some(notes) = patch.notes {
            order.notes = Some(notes);
        }
        order.updated_at = Some(self.clock.now());

        self.store.update_order(order.clone());
        Ok(order)
    }

    /// Hard delete; an explicit administrative operation.
    pub fn delete(&self, order_id: OrderId) -> ApiResponse<bool> {
        if self.store.delete_order(order_id) {
            info!(order = %order_id, "order deleted");
            ApiResponse::ok(true)
        } else {
            ApiResponse::error(&DomainError::not_found(format!("order {order_id}")))
        }
    }

    fn find(&self, order_id: OrderId) -> DomainResult<Order> {
        self.store
            .find_order(order_id)
            .ok_or_else(|| DomainError::not_found(format!("order {order_id}")))
    }

    fn check_transition(&self, from: OrderStatus, to: OrderStatus) -> DomainResult<()> {
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(DomainError::invariant(format!(
                "cannot move order from {from} to {to}"
            )))
        }
    }

    fn view(&self, order: &Order) -> OrderView {
        let lines = order
            .lines
            .iter()
            .map(|line| OrderLineView {
                id: line.id,
                catalog_item_id: line.catalog_item_id,
                title: self
                    .catalog
                    .find_item(line.catalog_item_id)
                    .map(|i| i.title)
                    .unwrap_or_default(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total,
            })
            .collect();

        OrderView {
            id: order.id,
            user_id: order.user_id,
            ordered_at: order.ordered_at,
            delivered_at: order.delivered_at,
            returned_at: order.returned_at,
            total: order.total,
            status: order.status,
            delivery_address: order.delivery_address.clone(),
            notes: order.notes.clone(),
            courier_id: order.courier_id,
            updated_at: order.updated_at,
            lines,
        }
    }
}

/// Checkout seam: the cart hands its lines over and carries on with the
/// summary alone.
impl<S, C, U, K> OrderGateway for OrderService<S, C, U, K>
where
    S: OrderStore,
    C: CatalogReader,
    U: UserDirectory,
    K: Clock,
{
    fn place_order(
        &self,
        user_id: UserId,
        delivery_address: String,
        notes: Option<String>,
        lines: Vec<OrderLineRequest>,
    ) -> DomainResult<PlacedOrder> {
        let order = self.try_create(CreateOrder {
            user_id,
            delivery_address,
            notes,
            lines,
        })?;
        Ok(PlacedOrder {
            order_id: order.id.0,
            total: order.total,
        })
    }
}
