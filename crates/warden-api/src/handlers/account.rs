//! Account management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use warden_core::error::AppError;
use warden_core::types::AccountId;
use warden_entity::account::AccountProfile;

use crate::dto::request::{CreateAccountBody, UpdateAccountBody};
use crate::dto::response::{ApiResponse, CreatedResponse};
use crate::error::ApiError;
use crate::extractors::Caller;
use crate::state::AppState;

/// Parses an account id path segment.
fn parse_id(raw: &str) -> Result<AccountId, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid account id '{raw}'")))
}

/// POST /api/accounts
pub async fn create_account(
    State(state): State<AppState>,
    caller: Caller,
    Json(body): Json<CreateAccountBody>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), ApiError> {
    let id = state
        .accounts
        .create(caller.claims(), body.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CreatedResponse { id })),
    ))
}

/// GET /api/accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<AccountProfile>>>, ApiError> {
    let accounts = state.accounts.get_all(caller.claims()).await?;
    Ok(Json(ApiResponse::ok(accounts)))
}

/// GET /api/accounts/{id}
pub async fn get_account(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AccountProfile>>, ApiError> {
    let id = parse_id(&id)?;
    let account = state.accounts.get(caller.claims(), id).await?;
    Ok(Json(ApiResponse::ok(account)))
}

/// PATCH /api/accounts/{id}
pub async fn update_account(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    Json(body): Json<UpdateAccountBody>,
) -> Result<Json<ApiResponse<AccountProfile>>, ApiError> {
    let id = parse_id(&id)?;
    let account = state
        .accounts
        .update(caller.claims(), id, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(account)))
}
