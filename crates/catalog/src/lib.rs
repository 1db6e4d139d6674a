//! Catalog collaborator boundary (read-only to this core).
//!
//! Catalog items are created and maintained by staff tooling elsewhere. This
//! core reads them for price/availability checks and title enrichment; the
//! only mutation it makes to an item is the on-hand count, and only through
//! the stock ledger.

pub mod item;

pub use item::{CatalogItem, CatalogItemId, CatalogReader};
