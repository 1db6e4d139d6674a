use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reelrent_core::{EntityId, UserId};

use crate::package::PackageId;

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntitlementId(pub EntityId);

impl EntitlementId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntitlementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A user's purchased package: a decrementing balance of film uses with an
/// expiry date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPackageEntitlement {
    pub id: EntitlementId,
    pub user_id: UserId,
    pub package_id: PackageId,
    pub purchased_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Remaining film uses; only ever decreases after purchase.
    pub remaining_uses: u32,
    pub is_active: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserPackageEntitlement {
    /// Whether a film can be drawn from this entitlement right now.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.remaining_uses > 0 && self.expires_at > now
    }
}
