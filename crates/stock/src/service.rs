//! Stock ledger service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use reelrent_catalog::{CatalogItemId, CatalogReader};
use reelrent_core::{ApiResponse, Clock, DomainError, DomainResult, EntityId, Money};

use crate::movement::{MovementId, MovementKind, StockMovement};
use crate::store::StockStore;

/// Request to record one stock adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMovement {
    pub catalog_item_id: CatalogItemId,
    pub kind: MovementKind,
    pub quantity: u32,
    pub note: Option<String>,
}

/// Movement enriched with the catalog item's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockMovementView {
    pub id: MovementId,
    pub catalog_item_id: CatalogItemId,
    pub title: String,
    pub kind: MovementKind,
    pub quantity: u32,
    pub unit_price: Money,
    pub note: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl StockMovementView {
    fn new(movement: StockMovement, title: String, unit_price: Money) -> Self {
        Self {
            id: movement.id,
            catalog_item_id: movement.catalog_item_id,
            title,
            kind: movement.kind,
            quantity: movement.quantity,
            unit_price,
            note: movement.note,
            recorded_at: movement.recorded_at,
        }
    }
}

/// Records and lists inventory adjustments.
pub struct StockLedger<S, C, K> {
    store: S,
    catalog: C,
    clock: K,
}

impl<S, C, K> StockLedger<S, C, K>
where
    S: StockStore,
    C: CatalogReader,
    K: Clock,
{
    pub fn new(store: S, catalog: C, clock: K) -> Self {
        Self {
            store,
            catalog,
            clock,
        }
    }

    /// Record an adjustment and apply it to the item's on-hand count.
    pub fn record_movement(&self, request: RecordMovement) -> ApiResponse<StockMovementView> {
        ApiResponse::from_result(self.try_record(request))
    }

    fn try_record(&self, request: RecordMovement) -> DomainResult<StockMovementView> {
        if request.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        let item = self
            .catalog
            .find_item(request.catalog_item_id)
            .ok_or_else(|| {
                DomainError::not_found(format!("catalog item {}", request.catalog_item_id))
            })?;

        let movement = StockMovement {
            id: MovementId::new(EntityId::new()),
            catalog_item_id: request.catalog_item_id,
            kind: request.kind,
            quantity: request.quantity,
            note: request.note,
            recorded_at: self.clock.now(),
        };

        // The store rejects an Out that would overdraw the item and leaves
        // both ledger and count untouched on failure.
        let on_hand = self.store.append_and_adjust(&movement)?;

        info!(
            item = %movement.catalog_item_id,
            kind = ?movement.kind,
            quantity = movement.quantity,
            on_hand,
            "stock movement recorded"
        );

        Ok(StockMovementView::new(movement, item.title, item.unit_price))
    }

    /// Movements, optionally filtered to one item, newest-first.
    pub fn list_movements(
        &self,
        item: Option<CatalogItemId>,
    ) -> ApiResponse<Vec<StockMovementView>> {
        let views = self
            .store
            .list_movements(item)
            .into_iter()
            .map(|movement| {
                let (title, unit_price) = self
                    .catalog
                    .find_item(movement.catalog_item_id)
                    .map(|i| (i.title, i.unit_price))
                    .unwrap_or_default();
                StockMovementView::new(movement, title, unit_price)
            })
            .collect();
        ApiResponse::ok(views)
    }
}
