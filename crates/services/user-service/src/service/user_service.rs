//! User service - user management use cases.
//!
//! Each operation delegates to the repository. Validation happens in the
//! repository so every backend enforces the same rules.

use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;
use domain::{User, UserId, UserInput};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users ordered by id
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> AppResult<User>;

    /// Create a new user, returning its id
    async fn create_user(&self, input: UserInput) -> AppResult<UserId>;

    /// Replace name, email and age
    async fn update_user(&self, id: UserId, input: UserInput) -> AppResult<()>;

    /// Delete user, returning rows affected
    async fn delete_user(&self, id: UserId) -> AppResult<u64>;

    /// Report whether storage is reachable
    async fn health(&self) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn get_user(&self, id: UserId) -> AppResult<User> {
        self.repo.find_by_id(id).await
    }

    async fn create_user(&self, input: UserInput) -> AppResult<UserId> {
        let id = self.repo.create(input).await?;
        tracing::info!(user_id = id, "user created");
        Ok(id)
    }

    async fn update_user(&self, id: UserId, input: UserInput) -> AppResult<()> {
        self.repo.update(id, input).await
    }

    async fn delete_user(&self, id: UserId) -> AppResult<u64> {
        let rows = self.repo.delete(id).await?;
        tracing::info!(user_id = id, rows, "user deleted");
        Ok(rows)
    }

    async fn health(&self) -> AppResult<()> {
        self.repo.ping().await
    }
}
