//! Persistence seam for cart lines.

use std::sync::Arc;

use reelrent_catalog::CatalogItemId;
use reelrent_core::UserId;

use crate::line::{CartLine, CartLineId};

pub trait CartStore: Send + Sync {
    /// All lines for the user, most-recently-added first.
    fn lines_for_user(&self, user: UserId) -> Vec<CartLine>;

    fn find_line(&self, id: CartLineId) -> Option<CartLine>;

    /// The user's line for one catalog item, if any (unique per pair).
    fn find_user_item(&self, user: UserId, item: CatalogItemId) -> Option<CartLine>;

    /// Insert or replace a line by id.
    fn upsert_line(&self, line: CartLine);

    /// Remove a line; false when absent.
    fn delete_line(&self, id: CartLineId) -> bool;

    /// Remove every line for the user, returning how many were dropped.
    fn clear_user(&self, user: UserId) -> usize;
}

impl<S> CartStore for Arc<S>
where
    S: CartStore + ?Sized,
{
    fn lines_for_user(&self, user: UserId) -> Vec<CartLine> {
        (**self).lines_for_user(user)
    }

    fn find_line(&self, id: CartLineId) -> Option<CartLine> {
        (**self).find_line(id)
    }

    fn find_user_item(&self, user: UserId, item: CatalogItemId) -> Option<CartLine> {
        (**self).find_user_item(user, item)
    }

    fn upsert_line(&self, line: CartLine) {
        (**self).upsert_line(line)
    }

    fn delete_line(&self, id: CartLineId) -> bool {
        (**self).delete_line(id)
    }

    fn clear_user(&self, user: UserId) -> usize {
        (**self).clear_user(user)
    }
}
