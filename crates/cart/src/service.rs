//! Cart service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use reelrent_catalog::{CatalogItem, CatalogItemId, CatalogReader};
use reelrent_core::{ApiResponse, Clock, DomainError, DomainResult, EntityId, Money, UserId};

use crate::gateway::{OrderGateway, OrderLineRequest};
use crate::line::{CartLine, CartLineId};
use crate::store::CartStore;

/// Request to add an item to the cart.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AddToCart {
    pub catalog_item_id: CatalogItemId,
    pub quantity: u32,
}

/// Cart line with current catalog price applied.
///
/// Totals here reflect the catalog price at read time; the permanent price
/// snapshot is taken by the order workflow at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub id: CartLineId,
    pub user_id: UserId,
    pub catalog_item_id: CatalogItemId,
    pub title: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
    pub added_at: DateTime<Utc>,
}

/// The whole cart plus derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummaryView {
    pub total_items: u32,
    pub total_amount: Money,
    pub lines: Vec<CartLineView>,
}

/// Maintains one user's cart lines and converts them into orders.
pub struct CartService<S, C, O, K> {
    store: S,
    catalog: C,
    orders: O,
    clock: K,
}

impl<S, C, O, K> CartService<S, C, O, K>
where
    S: CartStore,
    C: CatalogReader,
    O: OrderGateway,
    K: Clock,
{
    pub fn new(store: S, catalog: C, orders: O, clock: K) -> Self {
        Self {
            store,
            catalog,
            orders,
            clock,
        }
    }

    /// The user's cart, most-recently-added first, with derived totals.
    pub fn get_cart(&self, user_id: UserId) -> ApiResponse<CartSummaryView> {
        ApiResponse::from_result(self.try_get_cart(user_id))
    }

    fn try_get_cart(&self, user_id: UserId) -> DomainResult<CartSummaryView> {
        let mut lines = Vec::new();
        for line in self.store.lines_for_user(user_id) {
            let item = self.find_item(line.catalog_item_id)?;
            lines.push(self.line_view(&line, &item)?);
        }

        let total_items = lines.iter().map(|l| l.quantity).sum();
        let total_amount = Money::sum(lines.iter().map(|l| l.line_total))?;

        Ok(CartSummaryView {
            total_items,
            total_amount,
            lines,
        })
    }

    /// Add an item, merging into an existing line for the same item.
    pub fn add_item(&self, user_id: UserId, request: AddToCart) -> ApiResponse<CartLineView> {
        ApiResponse::from_result(self.try_add_item(user_id, request))
    }

    fn try_add_item(&self, user_id: UserId, request: AddToCart) -> DomainResult<CartLineView> {
        if request.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        let item = self.find_item(request.catalog_item_id)?;
        if !item.can_supply(request.quantity) {
            return Err(DomainError::insufficient_stock(
                item.title,
                item.on_hand,
                i64::from(request.quantity),
            ));
        }

        let line = match self.store.find_user_item(user_id, request.catalog_item_id) {
            Some(mut existing) => {
                existing.quantity += request.quantity;
                existing.updated_at = Some(self.clock.now());
                existing
            }
            None => CartLine {
                id: CartLineId::new(EntityId::new()),
                user_id,
                catalog_item_id: request.catalog_item_id,
                quantity: request.quantity,
                added_at: self.clock.now(),
                updated_at: None,
            },
        };

        self.store.upsert_line(line.clone());
        info!(user = %user_id, item = %line.catalog_item_id, quantity = line.quantity, "cart line upserted");
        self.line_view(&line, &item)
    }

    /// Set a line's quantity; zero or negative removes the line (success
    /// with null data).
    pub fn update_item(&self, line_id: CartLineId, quantity: i64) -> ApiResponse<CartLineView> {
        match self.try_update_item(line_id, quantity) {
            Ok(Some(view)) => ApiResponse::ok(view),
            Ok(None) => ApiResponse::ok_empty("item removed from cart"),
            Err(err) => ApiResponse::error(&err),
        }
    }

    fn try_update_item(
        &self,
        line_id: CartLineId,
        quantity: i64,
    ) -> DomainResult<Option<CartLineView>> {
        let mut line = self
            .store
            .find_line(line_id)
            .ok_or_else(|| DomainError::not_found(format!("cart line {line_id}")))?;

        if quantity <= 0 {
            self.store.delete_line(line_id);
            return Ok(None);
        }

        let item = self.find_item(line.catalog_item_id)?;
        if item.on_hand < quantity {
            return Err(DomainError::insufficient_stock(
                item.title,
                item.on_hand,
                quantity,
            ));
        }

        line.quantity = quantity as u32;
        line.updated_at = Some(self.clock.now());
        self.store.upsert_line(line.clone());

        Ok(Some(self.line_view(&line, &item)?))
    }

    /// Remove one line outright.
    pub fn remove_item(&self, line_id: CartLineId) -> ApiResponse<bool> {
        if self.store.delete_line(line_id) {
            ApiResponse::ok_with(true, "item removed from cart")
        } else {
            ApiResponse::error(&DomainError::not_found(format!("cart line {line_id}")))
        }
    }

    /// Drop every line for the user; succeeds on an already-empty cart.
    pub fn clear_cart(&self, user_id: UserId) -> ApiResponse<bool> {
        let dropped = self.store.clear_user(user_id);
        info!(user = %user_id, dropped, "cart cleared");
        ApiResponse::ok(true)
    }

    /// Convert the cart into an order, then clear it.
    ///
    /// Stock is re-validated against current on-hand counts here even though
    /// it was validated at add time, because stock may have moved since. The
    /// cart is cleared only after order creation succeeds.
    pub fn checkout(&self, user_id: UserId, delivery_address: &str) -> ApiResponse<bool> {
        ApiResponse::from_result(self.try_checkout(user_id, delivery_address))
    }

    fn try_checkout(&self, user_id: UserId, delivery_address: &str) -> DomainResult<bool> {
        let delivery_address = delivery_address.trim();
        if delivery_address.is_empty() {
            return Err(DomainError::validation("delivery address is required"));
        }

        let lines = self.store.lines_for_user(user_id);
        if lines.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        let mut requests = Vec::with_capacity(lines.len());
        for line in &lines {
            let item = self.find_item(line.catalog_item_id)?;
            if item.on_hand < i64::from(line.quantity) {
                return Err(DomainError::insufficient_stock(
                    item.title,
                    item.on_hand,
                    i64::from(line.quantity),
                ));
            }
            requests.push(OrderLineRequest {
                catalog_item_id: line.catalog_item_id,
                quantity: line.quantity,
            });
        }

        let placed = self.orders.place_order(
            user_id,
            delivery_address.to_string(),
            Some("created from cart checkout".to_string()),
            requests,
        )?;

        self.store.clear_user(user_id);
        info!(user = %user_id, order = %placed.order_id, total = %placed.total, "cart checked out");
        Ok(true)
    }

    fn find_item(&self, id: CatalogItemId) -> DomainResult<CatalogItem> {
        self.catalog
            .find_item(id)
            .ok_or_else(|| DomainError::not_found(format!("catalog item {id}")))
    }

    fn line_view(&self, line: &CartLine, item: &CatalogItem) -> DomainResult<CartLineView> {
        Ok(CartLineView {
            id: line.id,
            user_id: line.user_id,
            catalog_item_id: line.catalog_item_id,
            title: item.title.clone(),
            unit_price: item.unit_price,
            quantity: line.quantity,
            line_total: item.unit_price.times(line.quantity)?,
            added_at: line.added_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex, RwLock};

    use reelrent_core::FixedClock;

    use crate::gateway::PlacedOrder;

    #[derive(Default)]
    struct MemCart {
        catalog: RwLock<HashMap<CatalogItemId, CatalogItem>>,
        lines: RwLock<Vec<CartLine>>,
    }

    impl MemCart {
        fn seed(&self, title: &str, price_cents: i64, on_hand: i64) -> CatalogItemId {
            let id = CatalogItemId::new(EntityId::new());
            self.catalog.write().unwrap().insert(
                id,
                CatalogItem {
                    id,
                    title: title.to_string(),
                    unit_price: Money::from_cents(price_cents),
                    on_hand,
                    is_available: true,
                },
            );
            id
        }
    }

    impl CatalogReader for MemCart {
        fn find_item(&self, id: CatalogItemId) -> Option<CatalogItem> {
            self.catalog.read().unwrap().get(&id).cloned()
        }
    }

    impl CartStore for MemCart {
        fn lines_for_user(&self, user: UserId) -> Vec<CartLine> {
            let mut out: Vec<_> = self
                .lines
                .read()
                .unwrap()
                .iter()
                .filter(|l| l.user_id == user)
                .cloned()
                .collect();
            out.sort_by(|a, b| b.added_at.cmp(&a.added_at).then(b.id.cmp(&a.id)));
            out
        }

        fn find_line(&self, id: CartLineId) -> Option<CartLine> {
            self.lines.read().unwrap().iter().find(|l| l.id == id).cloned()
        }

        fn find_user_item(&self, user: UserId, item: CatalogItemId) -> Option<CartLine> {
            self.lines
                .read()
                .unwrap()
                .iter()
                .find(|l| l.user_id == user && l.catalog_item_id == item)
                .cloned()
        }

        fn upsert_line(&self, line: CartLine) {
            let mut lines = self.lines.write().unwrap();
            if let Some(existing) = lines.iter_mut().find(|l| l.id == line.id) {
                *existing = line;
            } else {
                lines.push(line);
            }
        }

        fn delete_line(&self, id: CartLineId) -> bool {
            let mut lines = self.lines.write().unwrap();
            let before = lines.len();
            lines.retain(|l| l.id != id);
            lines.len() < before
        }

        fn clear_user(&self, user: UserId) -> usize {
            let mut lines = self.lines.write().unwrap();
            let before = lines.len();
            lines.retain(|l| l.user_id != user);
            before - lines.len()
        }
    }

    /// Gateway double: records placements, optionally refuses them.
    #[derive(Default)]
    struct StubOrders {
        fail: AtomicBool,
        placements: Mutex<Vec<(UserId, String, Vec<OrderLineRequest>)>>,
    }

    impl OrderGateway for StubOrders {
        fn place_order(
            &self,
            user_id: UserId,
            delivery_address: String,
            _notes: Option<String>,
            lines: Vec<OrderLineRequest>,
        ) -> DomainResult<PlacedOrder> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(DomainError::validation("order rejected"));
            }
            self.placements
                .lock()
                .unwrap()
                .push((user_id, delivery_address, lines));
            Ok(PlacedOrder {
                order_id: EntityId::new(),
                total: Money::ZERO,
            })
        }
    }

    type TestService = CartService<Arc<MemCart>, Arc<MemCart>, Arc<StubOrders>, Arc<FixedClock>>;

    fn setup() -> (Arc<MemCart>, Arc<StubOrders>, TestService) {
        let store = Arc::new(MemCart::default());
        let orders = Arc::new(StubOrders::default());
        let start = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let clock = Arc::new(FixedClock::new(start));
        let service = CartService::new(store.clone(), store.clone(), orders.clone(), clock);
        (store, orders, service)
    }

    #[test]
    fn repeat_add_merges_into_one_line() {
        let (store, _, service) = setup();
        let user = UserId::new();
        let film = store.seed("Alien", 1500, 10);

        assert!(service.add_item(user, AddToCart { catalog_item_id: film, quantity: 2 }).success);
        let resp = service.add_item(user, AddToCart { catalog_item_id: film, quantity: 3 });
        assert!(resp.success);
        assert_eq!(resp.data.unwrap().quantity, 5);

        let cart = service.get_cart(user).data.unwrap();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.total_items, 5);
        assert_eq!(cart.total_amount, Money::from_cents(7500));
    }

    #[test]
    fn add_rejects_unknown_item_and_thin_stock() {
        let (store, _, service) = setup();
        let user = UserId::new();

        let missing = CatalogItemId::new(EntityId::new());
        let resp = service.add_item(user, AddToCart { catalog_item_id: missing, quantity: 1 });
        assert!(!resp.success);
        assert!(resp.message.starts_with("not found"));

        let scarce = store.seed("Ran", 999, 1);
        let resp = service.add_item(user, AddToCart { catalog_item_id: scarce, quantity: 2 });
        assert!(!resp.success);
        assert!(resp.message.contains("insufficient stock"));
        assert!(service.get_cart(user).data.unwrap().lines.is_empty());
    }

    #[test]
    fn update_to_zero_removes_the_line_with_null_data() {
        let (store, _, service) = setup();
        let user = UserId::new();
        let film = store.seed("Heat", 1200, 5);

        let line_id = service
            .add_item(user, AddToCart { catalog_item_id: film, quantity: 2 })
            .data
            .unwrap()
            .id;

        let resp = service.update_item(line_id, 0);
        assert!(resp.success);
        assert!(resp.data.is_none());
        assert!(service.get_cart(user).data.unwrap().lines.is_empty());
    }

    #[test]
    fn update_validates_stock_against_new_quantity() {
        let (store, _, service) = setup();
        let user = UserId::new();
        let film = store.seed("Heat", 1200, 3);

        let line_id = service
            .add_item(user, AddToCart { catalog_item_id: film, quantity: 2 })
            .data
            .unwrap()
            .id;

        let resp = service.update_item(line_id, 4);
        assert!(!resp.success);
        assert!(resp.message.contains("available 3"));

        let resp = service.update_item(line_id, 3);
        assert!(resp.success);
        assert_eq!(resp.data.unwrap().quantity, 3);
    }

    #[test]
    fn remove_missing_line_is_not_found() {
        let (_, _, service) = setup();
        let resp = service.remove_item(CartLineId::new(EntityId::new()));
        assert!(!resp.success);
        assert!(resp.message.starts_with("not found"));
    }

    #[test]
    fn clear_succeeds_on_an_empty_cart() {
        let (_, _, service) = setup();
        let resp = service.clear_cart(UserId::new());
        assert!(resp.success);
        assert_eq!(resp.data, Some(true));
    }

    #[test]
    fn checkout_of_empty_cart_fails_without_placing_an_order() {
        let (_, orders, service) = setup();
        let resp = service.checkout(UserId::new(), "12 Elm Street");
        assert!(!resp.success);
        assert_eq!(resp.message, "cart is empty");
        assert!(orders.placements.lock().unwrap().is_empty());
    }

    #[test]
    fn checkout_requires_a_delivery_address() {
        let (store, orders, service) = setup();
        let user = UserId::new();
        let film = store.seed("Alien", 1500, 10);
        service.add_item(user, AddToCart { catalog_item_id: film, quantity: 1 });

        let resp = service.checkout(user, "   ");
        assert!(!resp.success);
        assert!(orders.placements.lock().unwrap().is_empty());
    }

    #[test]
    fn checkout_revalidates_stock_and_leaves_cart_untouched_on_shortfall() {
        let (store, orders, service) = setup();
        let user = UserId::new();
        let film = store.seed("Alien", 1500, 5);
        service.add_item(user, AddToCart { catalog_item_id: film, quantity: 4 });

        // Stock drains between add and checkout.
        store.catalog.write().unwrap().get_mut(&film).unwrap().on_hand = 2;

        let resp = service.checkout(user, "12 Elm Street");
        assert!(!resp.success);
        assert!(resp.message.contains("Alien"));
        assert!(resp.message.contains("available 2"));
        assert!(orders.placements.lock().unwrap().is_empty());
        assert_eq!(service.get_cart(user).data.unwrap().lines.len(), 1);
    }

    #[test]
    fn failed_order_placement_preserves_the_cart() {
        let (store, orders, service) = setup();
        let user = UserId::new();
        let film = store.seed("Alien", 1500, 5);
        service.add_item(user, AddToCart { catalog_item_id: film, quantity: 2 });

        orders.fail.store(true, Ordering::SeqCst);
        let resp = service.checkout(user, "12 Elm Street");
        assert!(!resp.success);
        assert_eq!(service.get_cart(user).data.unwrap().lines.len(), 1);
    }

    #[test]
    fn successful_checkout_hands_lines_over_and_clears_the_cart() {
        let (store, orders, service) = setup();
        let user = UserId::new();
        let a = store.seed("Alien", 1500, 5);
        let b = store.seed("Ran", 999, 5);
        service.add_item(user, AddToCart { catalog_item_id: a, quantity: 3 });
        service.add_item(user, AddToCart { catalog_item_id: b, quantity: 1 });

        let resp = service.checkout(user, "12 Elm Street");
        assert!(resp.success);
        assert_eq!(resp.data, Some(true));

        let placements = orders.placements.lock().unwrap();
        assert_eq!(placements.len(), 1);
        let (placed_user, address, lines) = &placements[0];
        assert_eq!(*placed_user, user);
        assert_eq!(address, "12 Elm Street");
        assert_eq!(lines.len(), 2);

        assert!(service.get_cart(user).data.unwrap().lines.is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: adding the same item twice yields exactly one line
            /// holding the summed quantity.
            #[test]
            fn adds_merge_to_a_single_line(q1 in 1u32..=50, q2 in 1u32..=50) {
                let (store, _, service) = setup();
                let user = UserId::new();
                let film = store.seed("Alien", 1500, 200);

                let first_add = service.add_item(user, AddToCart { catalog_item_id: film, quantity: q1 }).success;
                prop_assert!(first_add);
                let second_add = service.add_item(user, AddToCart { catalog_item_id: film, quantity: q2 }).success;
                prop_assert!(second_add);

                let cart = service.get_cart(user).data.unwrap();
                prop_assert_eq!(cart.lines.len(), 1);
                prop_assert_eq!(cart.total_items, q1 + q2);
            }
        }
    }
}
