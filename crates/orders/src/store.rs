//! Persistence seam for orders.

use std::sync::Arc;

use crate::order::{Order, OrderId};

/// Order storage.
///
/// An order carries its lines, so `insert_order` persists both in one unit
/// of work; a failure must leave neither behind.
pub trait OrderStore: Send + Sync {
    fn insert_order(&self, order: Order);

    fn find_order(&self, id: OrderId) -> Option<Order>;

    /// Replace a stored order; false when absent.
    fn update_order(&self, order: Order) -> bool;

    fn delete_order(&self, id: OrderId) -> bool;

    /// All orders, newest-first by order date.
    fn list_orders(&self) -> Vec<Order>;
}

impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    fn insert_order(&self, order: Order) {
        (**self).insert_order(order)
    }

    fn find_order(&self, id: OrderId) -> Option<Order> {
        (**self).find_order(id)
    }

    fn update_order(&self, order: Order) -> bool {
        (**self).update_order(order)
    }

    fn delete_order(&self, id: OrderId) -> bool {
        (**self).delete_order(id)
    }

    fn list_orders(&self) -> Vec<Order> {
        (**self).list_orders()
    }
}
