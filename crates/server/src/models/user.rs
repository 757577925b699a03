//! User account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use driftline_core::{Email, Role, UserId};

use crate::store::{Entity, StoreState};

/// Marker stored instead of a real hash for seeded demo accounts.
/// The login flow accepts the password "admin" for these.
pub const DEMO_PASSWORD_SENTINEL: &str = "demo-hash";

/// A registered user.
///
/// Email uniqueness is enforced by the register flow (lookup before
/// insert), not by the store. Users are never deleted; deactivation is
/// the only way to retire an account. The full struct (including
/// `password_hash`) only ever appears in snapshot files; API responses
/// use dedicated view types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Role,
    pub active: bool,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for a user.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub email: Email,
    pub name: String,
    pub role: Role,
    pub active: bool,
    pub password_hash: String,
}

/// Partial update for a user. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub active: Option<bool>,
    pub password_hash: Option<String>,
}

impl Entity for User {
    type Id = UserId;
    type Draft = UserDraft;
    type Patch = UserPatch;

    const COLLECTION: &'static str = "users";

    fn generate_id() -> Self::Id {
        UserId::generate()
    }

    fn build(id: Self::Id, now: DateTime<Utc>, draft: Self::Draft) -> Self {
        Self {
            id,
            email: draft.email,
            name: draft.name,
            role: draft.role,
            active: draft.active,
            password_hash: draft.password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        if let Some(password_hash) = patch.password_hash {
            self.password_hash = password_hash;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn slot(state: &StoreState) -> &Vec<Self> {
        &state.users
    }

    fn slot_mut(state: &mut StoreState) -> &mut Vec<Self> {
        &mut state.users
    }
}
