use std::collections::BTreeSet;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Role;
use tokio::sync::RwLock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::AuthError;

#[derive(Debug, Clone)]
struct Account {
    user: User,
    roles: BTreeSet<Role>,
}

/// Credential store kept in process memory.
///
/// Used by the HTTP tests and for running the service without a database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    /// Map of username -> account
    accounts: Arc<RwLock<HashMap<Username, Account>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account directly, bypassing the duplicate check.
    pub async fn put_user(&self, user: User, roles: impl IntoIterator<Item = Role>) {
        let account = Account {
            user,
            roles: roles.into_iter().collect(),
        };

        self.accounts
            .write()
            .await
            .insert(account.user.username.clone(), account);
    }

    /// Enable or disable an existing account. Returns false if it does not exist.
    pub async fn set_enabled(&self, username: &Username, enabled: bool) -> bool {
        match self.accounts.write().await.get_mut(username) {
            Some(account) => {
                account.user.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn exists_user(&self, username: &Username) -> Result<bool, AuthError> {
        Ok(self.accounts.read().await.contains_key(username))
    }

    async fn get_user(&self, username: &Username) -> Result<Option<User>, AuthError> {
        Ok(self
            .accounts
            .read()
            .await
            .get(username)
            .map(|account| account.user.clone()))
    }

    async fn get_roles(&self, username: &Username) -> Result<BTreeSet<Role>, AuthError> {
        Ok(self
            .accounts
            .read()
            .await
            .get(username)
            .map(|account| account.roles.clone())
            .unwrap_or_default())
    }

    async fn save_user(&self, user: NewUser) -> Result<(), AuthError> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&user.username) {
            return Err(AuthError::UserAlreadyExists(user.username.to_string()));
        }

        let account = Account {
            user: User {
                username: user.username.clone(),
                password_hash: user.password_hash,
                enabled: true,
            },
            roles: user.roles,
        };
        accounts.insert(user.username, account);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn username(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    fn new_user(name: &str, roles: &[&str]) -> NewUser {
        NewUser {
            username: username(name),
            password_hash: "hash".to_string(),
            roles: roles.iter().map(|r| Role::new(*r).unwrap()).collect(),
        }
    }

    #[tokio::test]
    async fn test_save_and_read_back() {
        let store = InMemoryCredentialStore::new();
        store.save_user(new_user("alice", &["ADMIN", "USER"])).await.unwrap();

        assert!(store.exists_user(&username("alice")).await.unwrap());
        let user = store.get_user(&username("alice")).await.unwrap().unwrap();
        assert_eq!(user.password_hash, "hash");
        assert!(user.enabled);
        assert_eq!(store.get_roles(&username("alice")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let store = InMemoryCredentialStore::new();

        assert!(!store.exists_user(&username("ghost")).await.unwrap());
        assert!(store.get_user(&username("ghost")).await.unwrap().is_none());
        assert!(store.get_roles(&username("ghost")).await.unwrap().is_empty());
        assert!(!store.set_enabled(&username("ghost"), false).await);
    }

    #[tokio::test]
    async fn test_duplicate_save_leaves_original_untouched() {
        let store = InMemoryCredentialStore::new();
        store.save_user(new_user("bob", &["USER"])).await.unwrap();

        let mut duplicate = new_user("bob", &["ADMIN"]);
        duplicate.password_hash = "other".to_string();
        let result = store.save_user(duplicate).await;

        assert!(matches!(result, Err(AuthError::UserAlreadyExists(_))));
        assert_eq!(store.len().await, 1);
        let user = store.get_user(&username("bob")).await.unwrap().unwrap();
        assert_eq!(user.password_hash, "hash");
        let roles = store.get_roles(&username("bob")).await.unwrap();
        assert!(roles.iter().all(|r| r.as_str() == "USER"));
    }

    #[tokio::test]
    async fn test_set_enabled() {
        let store = InMemoryCredentialStore::new();
        store.save_user(new_user("carol", &[])).await.unwrap();

        assert!(store.set_enabled(&username("carol"), false).await);
        let user = store.get_user(&username("carol")).await.unwrap().unwrap();
        assert!(!user.enabled);
    }
}
