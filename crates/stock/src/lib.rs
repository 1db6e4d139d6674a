//! Stock ledger module.
//!
//! Append-only record of inbound/outbound stock movements per catalog item.
//! The ledger is the authoritative adjustment log for on-hand counts: every
//! successful movement lands together with the count change, or not at all.

pub mod movement;
pub mod service;
pub mod store;

pub use movement::{MovementId, MovementKind, StockMovement};
pub use service::{RecordMovement, StockLedger, StockMovementView};
pub use store::StockStore;
