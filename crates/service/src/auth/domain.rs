use serde::{Deserialize, Serialize};

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Password-change input; the old password is re-verified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}

/// Admin account as stored (hash included; never serialized to clients).
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

/// Claims carried by the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub uid: i32,
    pub exp: usize,
}
