use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id, email = %user.email))]
    async fn save_user(&self, user: User) -> Result<()> {
        trace!("Acquiring write lock for user storage");
        let mut storage = self.storage.write().await;
        debug!(user_id = %user.id, role = %user.role, "User saved to memory storage");
        storage.insert(user.id.clone(), user);
        Ok(())
    }

    #[instrument(skip(self), fields(email = email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        let user = storage.values().find(|u| u.email == email).cloned();
        match &user {
            Some(u) => debug!(user_id = %u.id, "User found in storage"),
            None => trace!(email = email, "User not found in storage"),
        }
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = id))]
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        let user = storage.get(id).cloned();
        if user.is_none() {
            trace!(user_id = id, "User not found in storage");
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;
    use chrono::Utc;

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            full_name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: Role::Candidate,
            applied_jobs: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_user_saves_user_correctly() {
        let repo = InMemoryUserRepository::new();
        let saved = user("user-1", "test@example.com");

        repo.save_user(saved.clone()).await.unwrap();

        let retrieved = repo.find_user_by_id("user-1").await.unwrap().unwrap();
        assert_eq!(retrieved.email, saved.email);
        assert_eq!(retrieved.password_hash, saved.password_hash);
        assert_eq!(retrieved.role, Role::Candidate);
    }

    #[tokio::test]
    async fn test_find_user_by_email_finds_user_by_email() {
        let repo = InMemoryUserRepository::new();
        repo.save_user(user("user-2", "alice@example.com")).await.unwrap();

        let found = repo.find_user_by_email("alice@example.com").await.unwrap();
        assert_eq!(found.unwrap().id, "user-2");
    }

    #[tokio::test]
    async fn test_find_user_returns_none_when_missing() {
        let repo = InMemoryUserRepository::new();

        assert!(repo
            .find_user_by_email("nonexistent@example.com")
            .await
            .unwrap()
            .is_none());
        assert!(repo.find_user_by_id("nonexistent-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_user_overwrites_existing_user() {
        let repo = InMemoryUserRepository::new();
        repo.save_user(user("user-4", "first@example.com")).await.unwrap();

        let mut updated = user("user-4", "first@example.com");
        updated.applied_jobs.push("job-9".to_string());
        repo.save_user(updated).await.unwrap();

        let retrieved = repo.find_user_by_id("user-4").await.unwrap().unwrap();
        assert_eq!(retrieved.applied_jobs, vec!["job-9".to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_writes() {
        let repo = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let repo_clone = repo.clone();
                let u = user(&format!("user-{}", i), &format!("user{}@example.com", i));
                tokio::spawn(async move { repo_clone.save_user(u).await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        for i in 0..10 {
            let found = repo.find_user_by_id(&format!("user-{}", i)).await.unwrap();
            assert_eq!(found.unwrap().email, format!("user{}@example.com", i));
        }
    }
}
