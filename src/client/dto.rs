//! Request/Response DTOs for the auth endpoints

use serde::{Deserialize, Serialize};

/// `POST /api/login/` body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /api/register/` body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Token issued by login and register
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
