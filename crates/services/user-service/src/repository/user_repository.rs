//! User repository: the capability interface and its relational implementation.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::warn;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{User, UserId, UserInput};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Message for an id that matched no row
pub(crate) fn not_found(id: UserId) -> String {
    format!("user {} not found", id)
}

/// User repository trait for dependency injection.
///
/// Implementations validate input before touching storage and report a
/// missing id as [`AppError::NotFound`], never as a backend failure.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by id
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AppResult<User>;

    /// Insert a user and return the assigned id
    async fn create(&self, input: UserInput) -> AppResult<UserId>;

    /// Replace name, email and age of an existing user
    async fn update(&self, id: UserId, input: UserInput) -> AppResult<()>;

    /// Delete a user, returning the number of rows removed
    async fn delete(&self, id: UserId) -> AppResult<u64>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// PostgreSQL-backed implementation of UserRepository.
///
/// Each call is a single statement on a pooled connection, bounded by
/// `exec_timeout`.
pub struct UserStore {
    db: DatabaseConnection,
    exec_timeout: Duration,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection, exec_timeout: Duration) -> Self {
        Self { db, exec_timeout }
    }

    /// Run one database call under the execution timeout.
    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, DbErr>> + Send,
    {
        match tokio::time::timeout(self.exec_timeout, call).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => {
                warn!(operation, timeout = ?self.exec_timeout, "database call timed out");
                Err(AppError::Timeout(operation))
            }
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        let models = self
            .bounded(
                "list users",
                UserEntity::find()
                    .order_by_asc(user::Column::Id)
                    .all(&self.db),
            )
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<User> {
        let model = self
            .bounded("get user", UserEntity::find_by_id(id).one(&self.db))
            .await?
            .ok_or_not_found(not_found(id))?;

        Ok(User::from(model))
    }

    async fn create(&self, input: UserInput) -> AppResult<UserId> {
        input.validate()?;

        let active_model = ActiveModel {
            id: NotSet,
            name: Set(input.name),
            email: Set(input.email),
            age: Set(input.age),
            created_at: NotSet,
        };

        // INSERT ... RETURNING id
        let result = self
            .bounded("create user", UserEntity::insert(active_model).exec(&self.db))
            .await?;

        Ok(result.last_insert_id)
    }

    async fn update(&self, id: UserId, input: UserInput) -> AppResult<()> {
        input.validate()?;

        let result = self
            .bounded(
                "update user",
                UserEntity::update_many()
                    .col_expr(user::Column::Name, Expr::value(input.name))
                    .col_expr(user::Column::Email, Expr::value(input.email))
                    .col_expr(user::Column::Age, Expr::value(input.age))
                    .filter(user::Column::Id.eq(id))
                    .exec(&self.db),
            )
            .await?;

        // The statement succeeded but matched nothing
        if result.rows_affected == 0 {
            return Err(AppError::not_found(not_found(id)));
        }

        Ok(())
    }

    async fn delete(&self, id: UserId) -> AppResult<u64> {
        let result = self
            .bounded("delete user", UserEntity::delete_by_id(id).exec(&self.db))
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(not_found(id)));
        }

        Ok(result.rows_affected)
    }

    async fn ping(&self) -> AppResult<()> {
        self.bounded("ping", crate::infra::ping(&self.db)).await
    }
}
