//! Single-lock in-memory store.
//!
//! One `RwLock` guards all tables, so every trait method is one lock
//! acquisition and therefore one atomic unit of work. In particular the
//! stock ledger's append-and-adjust either lands both the movement row and
//! the on-hand change or neither.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use reelrent_cart::{CartLine, CartLineId, CartStore};
use reelrent_catalog::{CatalogItem, CatalogItemId, CatalogReader};
use reelrent_core::{DomainError, DomainResult, UserDirectory, UserId, UserRecord};
use reelrent_entitlements::{
    EntitlementId, EntitlementStore, PackageDef, PackageId, PackageReader, UserPackageEntitlement,
};
use reelrent_orders::{Order, OrderId, OrderStore};
use reelrent_stock::{StockMovement, StockStore};

#[derive(Default)]
struct State {
    catalog: HashMap<CatalogItemId, CatalogItem>,
    users: HashMap<UserId, UserRecord>,
    packages: HashMap<PackageId, PackageDef>,
    cart_lines: HashMap<CartLineId, CartLine>,
    orders: HashMap<OrderId, Order>,
    movements: Vec<StockMovement>,
    entitlements: HashMap<EntitlementId, UserPackageEntitlement>,
}

/// In-memory backing store for every domain service.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn put_catalog_item(&self, item: CatalogItem) {
        self.write().catalog.insert(item.id, item);
    }

    pub fn put_user(&self, user: UserRecord) {
        self.write().users.insert(user.id, user);
    }

    pub fn put_package(&self, package: PackageDef) {
        self.write().packages.insert(package.id, package);
    }
}

impl CatalogReader for InMemoryStore {
    fn find_item(&self, id: CatalogItemId) -> Option<CatalogItem> {
        self.read().catalog.get(&id).cloned()
    }
}

impl UserDirectory for InMemoryStore {
    fn find_user(&self, id: UserId) -> Option<UserRecord> {
        self.read().users.get(&id).cloned()
    }
}

impl PackageReader for InMemoryStore {
    fn find_package(&self, id: PackageId) -> Option<PackageDef> {
        self.read().packages.get(&id).cloned()
    }
}

impl StockStore for InMemoryStore {
    fn append_and_adjust(&self, movement: &StockMovement) -> DomainResult<i64> {
        let mut state = self.write();
        let item = state
            .catalog
            .get_mut(&movement.catalog_item_id)
            .ok_or_else(|| {
                DomainError::not_found(format!("catalog item {}", movement.catalog_item_id))
            })?;

        let next = item.on_hand + movement.kind.signed(movement.quantity);
        if next < 0 {
            return Err(DomainError::insufficient_stock(
                item.title.clone(),
                item.on_hand,
                i64::from(movement.quantity),
            ));
        }
        item.on_hand = next;
        state.movements.push(movement.clone());
        Ok(next)
    }

    fn list_movements(&self, item: Option<CatalogItemId>) -> Vec<StockMovement> {
        self.read()
            .movements
            .iter()
            .rev()
            .filter(|m| item.is_none_or(|id| m.catalog_item_id == id))
            .cloned()
            .collect()
    }
}

impl CartStore for InMemoryStore {
    fn lines_for_user(&self, user: UserId) -> Vec<CartLine> {
        let mut lines: Vec<CartLine> = self
            .read()
            .cart_lines
            .values()
            .filter(|l| l.user_id == user)
            .cloned()
            .collect();
        lines.sort_by(|a, b| b.added_at.cmp(&a.added_at).then(b.id.cmp(&a.id)));
        lines
    }

    fn find_line(&self, id: CartLineId) -> Option<CartLine> {
        self.read().cart_lines.get(&id).cloned()
    }

    fn find_user_item(&self, user: UserId, item: CatalogItemId) -> Option<CartLine> {
        self.read()
            .cart_lines
            .values()
            .find(|l| l.user_id == user && l.catalog_item_id == item)
            .cloned()
    }

    fn upsert_line(&self, line: CartLine) {
        self.write().cart_lines.insert(line.id, line);
    }

    fn delete_line(&self, id: CartLineId) -> bool {
        self.write().cart_lines.remove(&id).is_some()
    }

    fn clear_user(&self, user: UserId) -> usize {
        let mut state = self.write();
        let before = state.cart_lines.len();
        state.cart_lines.retain(|_, l| l.user_id != user);
        before - state.cart_lines.len()
    }
}

impl OrderStore for InMemoryStore {
    fn insert_order(&self, order: Order) {
        self.write().orders.insert(order.id, order);
    }

    fn find_order(&self, id: OrderId) -> Option<Order> {
        self.read().orders.get(&id).cloned()
    }

    fn update_order(&self, order: Order) -> bool {
        let mut state = self.write();
        match state.orders.get_mut(&order.id) {
            Some(existing) => {
                *existing = order;
                true
            }
            None => false,
        }
    }

    fn delete_order(&self, id: OrderId) -> bool {
        self.write().orders.remove(&id).is_some()
    }

    fn list_orders(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = self.read().orders.values().cloned().collect();
        orders.sort_by(|a, b| b.ordered_at.cmp(&a.ordered_at).then(b.id.cmp(&a.id)));
        orders
    }
}

impl EntitlementStore for InMemoryStore {
    fn insert_entitlement(&self, entitlement: UserPackageEntitlement) {
        self.write().entitlements.insert(entitlement.id, entitlement);
    }

    fn find_entitlement(&self, id: EntitlementId) -> Option<UserPackageEntitlement> {
        self.read().entitlements.get(&id).cloned()
    }

    fn update_entitlement(&self, entitlement: UserPackageEntitlement) -> bool {
        let mut state = self.write();
        match state.entitlements.get_mut(&entitlement.id) {
            Some(existing) => {
                *existing = entitlement;
                true
            }
            None => false,
        }
    }

    fn delete_entitlement(&self, id: EntitlementId) -> bool {
        self.write().entitlements.remove(&id).is_some()
    }

    fn list_entitlements(&self) -> Vec<UserPackageEntitlement> {
        let mut all: Vec<UserPackageEntitlement> =
            self.read().entitlements.values().cloned().collect();
        all.sort_by(|a, b| b.purchased_at.cmp(&a.purchased_at).then(b.id.cmp(&a.id)));
        all
    }

    fn list_user_entitlements(&self, user_id: UserId) -> Vec<UserPackageEntitlement> {
        self.list_entitlements()
            .into_iter()
            .filter(|e| e.user_id == user_id)
            .collect()
    }
}
