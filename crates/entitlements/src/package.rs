use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use reelrent_core::{EntityId, Money};

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PackageId(pub EntityId);

impl PackageId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A sellable package: a film allowance at a fixed price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDef {
    pub id: PackageId,
    pub name: String,
    /// How many film uses a purchase of this package grants.
    pub film_allowance: u32,
    pub price: Money,
    pub is_active: bool,
}

/// Read access to the package definitions, owned elsewhere.
pub trait PackageReader: Send + Sync {
    fn find_package(&self, id: PackageId) -> Option<PackageDef>;
}

impl<R> PackageReader for Arc<R>
where
    R: PackageReader + ?Sized,
{
    fn find_package(&self, id: PackageId) -> Option<PackageDef> {
        (**self).find_package(id)
    }
}
