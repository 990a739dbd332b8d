use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::models::User;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("user already exists")]
    DuplicateEmail,
}

/// Storage seam for user records. Route handlers only see this trait, so the
/// in-memory implementation can be swapped for a real database without
/// touching them.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Option<User>;
    async fn find_by_id(&self, id: Uuid) -> Option<User>;
    async fn insert(&self, user: User) -> Result<(), RepositoryError>;
    async fn count(&self) -> usize;
}

/// Demo-grade store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Option<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    async fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    async fn insert(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        // Duplicate check and insert under one write lock.
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(RepositoryError::DuplicateEmail);
        }
        users.insert(user.id, user);
        Ok(())
    }

    async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new(
            email.to_string(),
            "Test Farmer".to_string(),
            "$2b$10$hash".to_string(),
        )
    }

    #[actix_web::test]
    async fn insert_then_lookup_by_email_and_id() {
        let repo = InMemoryUserRepository::new();
        let record = user("farmer@example.com");
        let id = record.id;
        repo.insert(record).await.unwrap();

        let by_email = repo.find_by_email("farmer@example.com").await.unwrap();
        assert_eq!(by_email.id, id);
        assert!(repo.find_by_id(id).await.is_some());
    }

    #[actix_web::test]
    async fn duplicate_email_is_rejected_and_count_is_unchanged() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("farmer@example.com")).await.unwrap();
        assert_eq!(repo.count().await, 1);

        let err = repo.insert(user("farmer@example.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateEmail));
        assert_eq!(repo.count().await, 1);
    }

    #[actix_web::test]
    async fn email_lookup_is_case_insensitive() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("Farmer@Example.com")).await.unwrap();

        assert!(repo.find_by_email("farmer@example.com").await.is_some());
        assert!(repo
            .insert(user("FARMER@EXAMPLE.COM"))
            .await
            .is_err());
    }

    #[actix_web::test]
    async fn unknown_email_returns_none() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.find_by_email("nobody@example.com").await.is_none());
        assert!(repo.find_by_id(Uuid::new_v4()).await.is_none());
    }
}
