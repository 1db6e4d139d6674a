//! Identity collaborator boundary.
//!
//! Authentication and role gating live outside this core: the HTTP layer
//! supplies an authenticated user id and role per request, and this core
//! trusts them verbatim. The one role check made here is that courier
//! assignment must resolve to a user holding the `Courier` role.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// Staff/customer role attached to a user record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Customer,
    Admin,
    Coordinator,
    Accountant,
    Warehouse,
    Courier,
    FilmEntry,
}

/// Minimal user projection this core reads from the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub is_active: bool,
}

/// Read-only user lookup.
pub trait UserDirectory: Send + Sync {
    fn find_user(&self, id: UserId) -> Option<UserRecord>;
}

impl<D> UserDirectory for Arc<D>
where
    D: UserDirectory + ?Sized,
{
    fn find_user(&self, id: UserId) -> Option<UserRecord> {
        (**self).find_user(id)
    }
}
