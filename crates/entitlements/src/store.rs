use std::sync::Arc;

use reelrent_core::UserId;

use crate::entitlement::{EntitlementId, UserPackageEntitlement};

/// Persistence seam for entitlements.
///
/// `list_*` return newest purchase first.
pub trait EntitlementStore: Send + Sync {
    fn insert_entitlement(&self, entitlement: UserPackageEntitlement);
    fn find_entitlement(&self, id: EntitlementId) -> Option<UserPackageEntitlement>;
    fn update_entitlement(&self, entitlement: UserPackageEntitlement) -> bool;
    fn delete_entitlement(&self, id: EntitlementId) -> bool;
    fn list_entitlements(&self) -> Vec<UserPackageEntitlement>;
    fn list_user_entitlements(&self, user_id: UserId) -> Vec<UserPackageEntitlement>;
}

impl<S> EntitlementStore for Arc<S>
where
    S: EntitlementStore + ?Sized,
{
    fn insert_entitlement(&self, entitlement: UserPackageEntitlement) {
        (**self).insert_entitlement(entitlement)
    }

    fn find_entitlement(&self, id: EntitlementId) -> Option<UserPackageEntitlement> {
        (**self).find_entitlement(id)
    }

    fn update_entitlement(&self, entitlement: UserPackageEntitlement) -> bool {
        (**self).update_entitlement(entitlement)
    }

    fn delete_entitlement(&self, id: EntitlementId) -> bool {
        (**self).delete_entitlement(id)
    }

    fn list_entitlements(&self) -> Vec<UserPackageEntitlement> {
        (**self).list_entitlements()
    }

    fn list_user_entitlements(&self, user_id: UserId) -> Vec<UserPackageEntitlement> {
        (**self).list_user_entitlements(user_id)
    }
}
