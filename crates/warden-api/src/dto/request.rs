//! Request bodies. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use warden_service::{CreateAccountRequest, UpdateAccountRequest};

/// `POST /api/accounts`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountBody {
    #[serde(default)]
    pub is_admin: bool,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

impl From<CreateAccountBody> for CreateAccountRequest {
    fn from(body: CreateAccountBody) -> Self {
        Self {
            is_admin: body.is_admin,
            username: body.username,
            email: body.email,
            password: body.password,
        }
    }
}

/// `PATCH /api/accounts/{id}`. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountBody {
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl From<UpdateAccountBody> for UpdateAccountRequest {
    fn from(body: UpdateAccountBody) -> Self {
        Self {
            is_admin: body.is_admin,
            username: body.username,
            email: body.email,
            password: body.password,
        }
    }
}

/// `POST /api/auth/token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateBody {
    pub username: String,
    pub password: String,
}

/// `POST /api/auth/validate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateTokenBody {
    pub token: String,
}
