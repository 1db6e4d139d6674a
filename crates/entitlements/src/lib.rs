//! Prepaid rental packages and the per-user entitlements bought from them.

pub mod entitlement;
pub mod package;
pub mod service;
pub mod store;

pub use entitlement::{EntitlementId, UserPackageEntitlement};
pub use package::{PackageDef, PackageId, PackageReader};
pub use service::{EntitlementPatch, EntitlementService, EntitlementView, PurchasePackage};
pub use store::EntitlementStore;
