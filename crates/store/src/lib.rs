//! In-memory backing store implementing every persistence seam.

pub mod memory;

pub use memory::InMemoryStore;
