use sea_orm::DatabaseConnection;

use crate::auth::domain::AdminAccount;
use crate::auth::errors::AuthError;
use crate::auth::repository::AdminRepository;

pub struct SeaOrmAdminRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AdminRepository for SeaOrmAdminRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, AuthError> {
        let res = models::admin_user::find_by_username(&self.db, username)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|u| AdminAccount { id: u.id, username: u.username, password_hash: u.password_hash }))
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<AdminAccount, AuthError> {
        let created = models::admin_user::create(&self.db, username, password_hash)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(AdminAccount { id: created.id, username: created.username, password_hash: created.password_hash })
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), AuthError> {
        models::admin_user::update_password(&self.db, id, password_hash)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))
    }
}
