//! `reelrent-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod clock;
pub mod error;
pub mod id;
pub mod identity;
pub mod money;
pub mod response;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use id::{EntityId, UserId};
pub use identity::{Role, UserDirectory, UserRecord};
pub use money::Money;
pub use response::ApiResponse;
