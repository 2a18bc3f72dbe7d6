//! User repository trait and the in-memory implementation.

use std::fmt;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::info;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_entity::user::{CreateUser, User};

/// Storage operations the auth handlers need for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + fmt::Debug + 'static {
    /// Find a user by login email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Create a new user. Fails with `Conflict` if the email is taken.
    async fn create(&self, input: CreateUser) -> AppResult<User>;

    /// Activate or deactivate an account and return the updated user.
    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<User>;

    /// Count registered users.
    async fn count(&self) -> AppResult<u64>;
}

/// Normalized key for the email index.
fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Process-local user store backed by concurrent maps.
///
/// Suitable for single-node deployments and tests; data does not survive a
/// restart.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    /// id → user.
    users: DashMap<Uuid, User>,
    /// normalized email → id.
    email_index: DashMap<String, Uuid>,
}

impl MemoryUserRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.email_index.get(&email_key(email)).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn create(&self, input: CreateUser) -> AppResult<User> {
        let user = User::new(input);

        match self.email_index.entry(email_key(&user.email)) {
            Entry::Occupied(_) => return Err(AppError::conflict("User already exists")),
            Entry::Vacant(slot) => {
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
            }
        }

        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<User> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        user.is_active = active;
        user.updated_at = Utc::now();

        info!(user_id = %id, active, "User activation changed");
        Ok(user.clone())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.len() as u64)
    }
}
