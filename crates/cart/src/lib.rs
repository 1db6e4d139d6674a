//! Cart aggregate module.
//!
//! Maintains the set of cart lines for one user and derives order-ready data
//! from them. The order workflow is injected behind [`OrderGateway`]; the
//! cart never constructs orders itself.

pub mod gateway;
pub mod line;
pub mod service;
pub mod store;

pub use gateway::{OrderGateway, OrderLineRequest, PlacedOrder};
pub use line::{CartLine, CartLineId};
pub use service::{AddToCart, CartLineView, CartService, CartSummaryView};
pub use store::CartStore;
