//! Process-local user repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use super::user_repository::{not_found, UserRepository};
use common::{AppError, AppResult, OptionExt};
use domain::{User, UserId, UserInput};

/// In-memory implementation of [`UserRepository`].
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryUserStore {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.inner.lock().users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<User> {
        self.inner
            .lock()
            .users
            .get(&id)
            .cloned()
            .ok_or_not_found(not_found(id))
    }

    async fn create(&self, input: UserInput) -> AppResult<UserId> {
        input.validate()?;

        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id = id
            .checked_add(1)
            .ok_or_else(|| AppError::internal("user id space exhausted"))?;
        inner.users.insert(id, input.into_user(id, Utc::now()));
        Ok(id)
    }

    async fn update(&self, id: UserId, input: UserInput) -> AppResult<()> {
        input.validate()?;

        let mut inner = self.inner.lock();
        let user = inner
            .users
            .get_mut(&id)
            .ok_or_not_found(not_found(id))?;
        user.name = input.name;
        user.email = input.email;
        user.age = input.age;
        Ok(())
    }

    async fn delete(&self, id: UserId) -> AppResult<u64> {
        match self.inner.lock().users.remove(&id) {
            Some(_) => Ok(1),
            None => Err(AppError::not_found(not_found(id))),
        }
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, age: i32) -> UserInput {
        UserInput::new(name, format!("{}@example.com", name.to_lowercase()), age)
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let store = InMemoryUserStore::new();
        let id = store.create(input("Ali", 30)).await.unwrap();
        assert_eq!(id, 1);

        let user = store.find_by_id(id).await.unwrap();
        assert_eq!(user.name, "Ali");
        assert_eq!(user.age, 30);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = InMemoryUserStore::new();
        let first = store.create(input("Ali", 30)).await.unwrap();
        assert_eq!(store.delete(first).await.unwrap(), 1);

        let second = store.create(input("Dana", 25)).await.unwrap();
        assert_eq!(second, 2);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let store = InMemoryUserStore::new();
        let id = store.create(input("Ali", 30)).await.unwrap();
        let before = store.find_by_id(id).await.unwrap();

        store.update(id, input("Alikhan", 31)).await.unwrap();

        let after = store.find_by_id(id).await.unwrap();
        assert_eq!(after.name, "Alikhan");
        assert_eq!(after.email, "alikhan@example.com");
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let store = InMemoryUserStore::new();
        assert!(matches!(store.find_by_id(3).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            store.update(3, input("Ali", 30)).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(store.delete(3).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_input_leaves_store_untouched() {
        let store = InMemoryUserStore::new();
        let err = store.create(input("Ali", -1)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "age must be positive"));
        assert!(store.list().await.unwrap().is_empty());

        // Rejected creates do not consume an id
        assert_eq!(store.create(input("Ali", 30)).await.unwrap(), 1);
    }
}
