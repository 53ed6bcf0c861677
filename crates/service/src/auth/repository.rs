use async_trait::async_trait;

use super::domain::AdminAccount;
use super::errors::AuthError;

/// Repository abstraction for admin-account persistence.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, AuthError>;
    async fn create(&self, username: &str, password_hash: &str) -> Result<AdminAccount, AuthError>;
    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAdminRepository {
        accounts: Mutex<HashMap<String, AdminAccount>>,
    }

    #[async_trait]
    impl AdminRepository for MockAdminRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, AuthError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.get(username).cloned())
        }

        async fn create(&self, username: &str, password_hash: &str) -> Result<AdminAccount, AuthError> {
            let mut accounts = self.accounts.lock().unwrap();
            let account = AdminAccount {
                id: accounts.len() as i32 + 1,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
            };
            accounts.insert(username.to_string(), account.clone());
            Ok(account)
        }

        async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), AuthError> {
            let mut accounts = self.accounts.lock().unwrap();
            for account in accounts.values_mut() {
                if account.id == id {
                    account.password_hash = password_hash.to_string();
                    return Ok(());
                }
            }
            Err(AuthError::NotFound)
        }
    }
}
