use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{info, instrument, warn};

use super::domain::{AdminClaims, ChangePasswordInput, LoginInput};
use super::errors::AuthError;
use super::repository::AdminRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
}

/// Admin auth business service independent of the web framework.
pub struct AuthService<R: AdminRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AdminRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string())
    }

    fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::Unauthorized)
    }

    /// Seed the bootstrap admin account from configuration when missing.
    /// A blank configured password leaves the table untouched.
    #[instrument(skip(self, password))]
    pub async fn ensure_bootstrap_admin(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if self.repo.find_by_username(username).await?.is_some() {
            return Ok(());
        }
        if password.is_empty() {
            warn!(%username, "no bootstrap admin password configured; admin login unavailable");
            return Ok(());
        }
        let hash = Self::hash_password(password)?;
        let created = self.repo.create(username, &hash).await?;
        info!(admin_id = created.id, %username, "bootstrap admin created");
        Ok(())
    }

    /// Verify credentials and issue a signed session token with expiry.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, service::AuthConfig};
    /// use service::auth::domain::LoginInput;
    /// use service::auth::repository::mock::MockAdminRepository;
    /// let repo = Arc::new(MockAdminRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), session_ttl_hours: 12 });
    /// tokio_test::block_on(svc.ensure_bootstrap_admin("admin", "admin123")).unwrap();
    /// let token = tokio_test::block_on(svc.login(LoginInput { username: "admin".into(), password: "admin123".into() })).unwrap();
    /// let claims = svc.verify_token(&token).unwrap();
    /// assert_eq!(claims.sub, "admin");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<String, AuthError> {
        let account = self
            .repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        Self::verify_password(&input.password, &account.password_hash)?;

        let exp = (chrono::Utc::now() + chrono::Duration::hours(self.cfg.session_ttl_hours)).timestamp() as usize;
        let claims = AdminClaims { sub: account.username.clone(), uid: account.id, exp };
        let token = encode(
            &JwtHeader::default(),
            &claims,
            &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenError(e.to_string()))?;
        info!(admin_id = account.id, "admin_logged_in");
        Ok(token)
    }

    /// Validate a session token's signature and expiry.
    pub fn verify_token(&self, token: &str) -> Result<AdminClaims, AuthError> {
        let data = decode::<AdminClaims>(
            token,
            &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AuthError::TokenError(e.to_string()))?;
        Ok(data.claims)
    }

    /// Re-verify the old password and persist a new hash.
    #[instrument(skip(self, input))]
    pub async fn change_password(&self, username: &str, input: ChangePasswordInput) -> Result<(), AuthError> {
        if input.new_password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        let account = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(AuthError::NotFound)?;
        Self::verify_password(&input.old_password, &account.password_hash)?;
        let hash = Self::hash_password(&input.new_password)?;
        self.repo.update_password(account.id, &hash).await?;
        info!(admin_id = account.id, "admin_password_changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAdminRepository;

    fn svc() -> AuthService<MockAdminRepository> {
        AuthService::new(
            Arc::new(MockAdminRepository::default()),
            AuthConfig { jwt_secret: "test-secret".into(), session_ttl_hours: 12 },
        )
    }

    #[tokio::test]
    async fn bootstrap_then_login_round_trips_claims() {
        let svc = svc();
        svc.ensure_bootstrap_admin("admin", "admin123").await.expect("seed");
        // Second call is a no-op, not an error
        svc.ensure_bootstrap_admin("admin", "other-password").await.expect("idempotent");

        let token = svc
            .login(LoginInput { username: "admin".into(), password: "admin123".into() })
            .await
            .expect("login");
        let claims = svc.verify_token(&token).expect("verify");
        assert_eq!(claims.sub, "admin");
        assert!(claims.exp > chrono::Utc::now().timestamp() as usize);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_unauthorized() {
        let svc = svc();
        svc.ensure_bootstrap_admin("admin", "admin123").await.expect("seed");

        let err = svc
            .login(LoginInput { username: "admin".into(), password: "wrong".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));

        let err = svc
            .login(LoginInput { username: "ghost".into(), password: "admin123".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn expired_or_tampered_tokens_rejected() {
        let svc = AuthService::new(
            Arc::new(MockAdminRepository::default()),
            AuthConfig { jwt_secret: "test-secret".into(), session_ttl_hours: -1 },
        );
        svc.ensure_bootstrap_admin("admin", "admin123").await.expect("seed");
        let token = svc
            .login(LoginInput { username: "admin".into(), password: "admin123".into() })
            .await
            .expect("login issues even when already expired");
        assert!(matches!(svc.verify_token(&token), Err(AuthError::TokenError(_))));

        let other = AuthService::new(
            Arc::new(MockAdminRepository::default()),
            AuthConfig { jwt_secret: "another-secret".into(), session_ttl_hours: 12 },
        );
        assert!(matches!(other.verify_token(&token), Err(AuthError::TokenError(_))));
    }

    #[tokio::test]
    async fn change_password_persists_and_old_stops_working() {
        let svc = svc();
        svc.ensure_bootstrap_admin("admin", "admin123").await.expect("seed");

        svc.change_password(
            "admin",
            ChangePasswordInput { old_password: "admin123".into(), new_password: "brand-new-pass".into() },
        )
        .await
        .expect("change");

        assert!(svc
            .login(LoginInput { username: "admin".into(), password: "admin123".into() })
            .await
            .is_err());
        svc.login(LoginInput { username: "admin".into(), password: "brand-new-pass".into() })
            .await
            .expect("new password works");
    }

    #[tokio::test]
    async fn change_password_rejects_short_or_wrong_old() {
        let svc = svc();
        svc.ensure_bootstrap_admin("admin", "admin123").await.expect("seed");

        let err = svc
            .change_password("admin", ChangePasswordInput { old_password: "admin123".into(), new_password: "short".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = svc
            .change_password("admin", ChangePasswordInput { old_password: "nope".into(), new_password: "long-enough-pass".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }
}
