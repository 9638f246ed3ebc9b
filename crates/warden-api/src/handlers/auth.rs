//! Authentication handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{AuthenticateBody, ValidateTokenBody};
use crate::dto::response::{ApiResponse, ClaimsResponse, TokenResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/auth/token
pub async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateBody>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let auth = state
        .accounts
        .authenticate(&body.username, &body.password)
        .await?;
    Ok(Json(ApiResponse::ok(auth.into())))
}

/// POST /api/auth/validate
pub async fn validate_token(
    State(state): State<AppState>,
    Json(body): Json<ValidateTokenBody>,
) -> Result<Json<ApiResponse<ClaimsResponse>>, ApiError> {
    let claims = state.accounts.validate_token(&body.token)?;
    Ok(Json(ApiResponse::ok(claims.into())))
}
