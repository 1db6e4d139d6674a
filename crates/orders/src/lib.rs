//! Order workflow module.
//!
//! Converts carts (or direct line-item lists) into orders with a validated
//! status lifecycle. Unit prices are snapshotted from the catalog at creation
//! time and never recomputed when catalog prices change later.

pub mod order;
pub mod service;
pub mod store;

pub use order::{Order, OrderId, OrderLine, OrderLineId, OrderPatch, OrderStatus};
pub use service::{CreateOrder, OrderLineView, OrderService, OrderView};
pub use store::OrderStore;
