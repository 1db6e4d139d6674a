//! Entitlement lifecycle: purchase, draw-down, and admin maintenance.

use chrono::{DateTime, Months, Utc};
use serde::Serialize;
use tracing::info;

use reelrent_core::{
    ApiResponse, Clock, DomainError, DomainResult, EntityId, Money, UserDirectory, UserId,
};

use crate::entitlement::{EntitlementId, UserPackageEntitlement};
use crate::package::{PackageId, PackageReader};
use crate::store::EntitlementStore;

/// Validity window granted by a purchase.
const VALIDITY_MONTHS: u32 = 1;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PurchasePackage {
    pub user_id: UserId,
    pub package_id: PackageId,
}

/// Partial update of an entitlement; only admin-facing knobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitlementPatch {
    pub expires_at: Option<DateTime<Utc>>,
    pub remaining_uses: Option<u32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitlementView {
    pub id: EntitlementId,
    pub user_id: UserId,
    pub package_id: PackageId,
    pub package_name: String,
    pub price_paid: Money,
    pub purchased_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub remaining_uses: u32,
    pub is_active: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Sells packages to users and draws individual film uses from the
/// soonest-expiring usable entitlement.
pub struct EntitlementService<S, P, U, K> {
    store: S,
    packages: P,
    users: U,
    clock: K,
}

impl<S, P, U, K> EntitlementService<S, P, U, K>
where
    S: EntitlementStore,
    P: PackageReader,
    U: UserDirectory,
    K: Clock,
{
    pub fn new(store: S, packages: P, users: U, clock: K) -> Self {
        Self {
            store,
            packages,
            users,
            clock,
        }
    }

    /// Buy a package for a user, granting its full film allowance for one
    /// month from now.
    pub fn purchase(&self, request: PurchasePackage) -> ApiResponse<EntitlementView> {
        ApiResponse::from_result(self.try_purchase(request).map(|e| self.view(&e)))
    }

    fn try_purchase(&self, request: PurchasePackage) -> DomainResult<UserPackageEntitlement> {
        let user = self
            .users
            .find_user(request.user_id)
            .ok_or_else(|| DomainError::not_found(format!("user {}", request.user_id)))?;
        let package = self
            .packages
            .find_package(request.package_id)
            .ok_or_else(|| DomainError::not_found(format!("package {}", request.package_id)))?;
        if !package.is_active {
            return Err(DomainError::PackageInactive);
        }

        let now = self.clock.now();
        let expires_at = now
            .checked_add_months(Months::new(VALIDITY_MONTHS))
            .ok_or_else(|| DomainError::validation("expiry date out of range"))?;

        let entitlement = UserPackageEntitlement {
            id: EntitlementId::new(EntityId::new()),
            user_id: user.id,
            package_id: package.id,
            purchased_at: now,
            expires_at,
            remaining_uses: package.film_allowance,
            is_active: true,
            updated_at: None,
        };

        self.store.insert_entitlement(entitlement.clone());
        info!(
            entitlement = %entitlement.id,
            user = %user.id,
            package = %package.name,
            uses = package.film_allowance,
            "package purchased"
        );
        Ok(entitlement)
    }

    /// Consume one film use for the user.
    ///
    /// Picks the usable entitlement that expires soonest, so balances close
    /// to lapsing are spent first. The entitlement deactivates when its last
    /// use is drawn.
    pub fn use_one_film(&self, user_id: UserId) -> ApiResponse<EntitlementView> {
        ApiResponse::from_result(self.try_use_one_film(user_id).map(|e| self.view(&e)))
    }

    fn try_use_one_film(&self, user_id: UserId) -> DomainResult<UserPackageEntitlement> {
        let now = self.clock.now();
        let mut entitlement = self
            .store
            .list_user_entitlements(user_id)
            .into_iter()
            .filter(|e| e.is_usable(now))
            .min_by_key(|e| e.expires_at)
            .ok_or(DomainError::NoActiveEntitlement)?;

        entitlement.remaining_uses -= 1;
        if entitlement.remaining_uses == 0 {
            entitlement.is_active = false;
        }
        entitlement.updated_at = Some(now);
        self.store.update_entitlement(entitlement.clone());

        info!(
            entitlement = %entitlement.id,
            user = %user_id,
            remaining = entitlement.remaining_uses,
            "film use drawn"
        );
        Ok(entitlement)
    }

    pub fn get_all(&self) -> ApiResponse<Vec<EntitlementView>> {
        let views = self
            .store
            .list_entitlements()
            .iter()
            .map(|e| self.view(e))
            .collect();
        ApiResponse::ok(views)
    }

    pub fn get_by_id(&self, id: EntitlementId) -> ApiResponse<EntitlementView> {
        ApiResponse::from_result(self.find(id).map(|e| self.view(&e)))
    }

    pub fn get_by_user(&self, user_id: UserId) -> ApiResponse<Vec<EntitlementView>> {
        let views = self
            .store
            .list_user_entitlements(user_id)
            .iter()
            .map(|e| self.view(e))
            .collect();
        ApiResponse::ok(views)
    }

    /// Admin patch. The remaining balance can be corrected downward but
    /// never topped up; a fresh purchase is the only way to add uses.
    pub fn update(&self, id: EntitlementId, patch: EntitlementPatch) -> ApiResponse<EntitlementView> {
        ApiResponse::from_result(self.try_update(id, patch).map(|e| self.view(&e)))
    }

    fn try_update(
        &self,
        id: EntitlementId,
        patch: EntitlementPatch,
    ) -> DomainResult<UserPackageEntitlement> {
        let mut entitlement = self.find(id)?;

        if let Some(remaining) = patch.remaining_uses {
            if remaining > entitlement.remaining_uses {
                return Err(DomainError::invariant(format!(
                    "remaining uses can only decrease ({} -> {remaining})",
                    entitlement.remaining_uses
                )));
            }
            entitlement.remaining_uses = remaining;
        }
        if let Some(expires_at) = patch.expires_at {
            entitlement.expires_at = expires_at;
        }
        if let Some(is_active) = patch.is_active {
            entitlement.is_active = is_active;
        }
        entitlement.updated_at = Some(self.clock.now());

        self.store.update_entitlement(entitlement.clone());
        Ok(entitlement)
    }

    pub fn delete(&self, id: EntitlementId) -> ApiResponse<bool> {
        if self.store.delete_entitlement(id) {
            info!(entitlement = %id, "entitlement deleted");
            ApiResponse::ok(true)
        } else {
            ApiResponse::error(&DomainError::not_found(format!("entitlement {id}")))
        }
    }

    fn find(&self, id: EntitlementId) -> DomainResult<UserPackageEntitlement> {
        self.store
            .find_entitlement(id)
            .ok_or_else(|| DomainError::not_found(format!("entitlement {id}")))
    }

    fn view(&self, entitlement: &UserPackageEntitlement) -> EntitlementView {
        let package = self.packages.find_package(entitlement.package_id);
        EntitlementView {
            id: entitlement.id,
            user_id: entitlement.user_id,
            package_id: entitlement.package_id,
            package_name: package.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
            price_paid: package.map(|p| p.price).unwrap_or(Money::ZERO),
            purchased_at: entitlement.purchased_at,
            expires_at: entitlement.expires_at,
            remaining_uses: entitlement.remaining_uses,
            is_active: entitlement.is_active,
            updated_at: entitlement.updated_at,
        }
    }
}
