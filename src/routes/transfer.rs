use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::info;
use utoipa::OpenApi;

use crate::{
    models::{
        dto::{ErrorMessage, TransferRequest, TransferResponse},
        Error,
    },
    AppState,
};

/// Defines the OpenAPI spec for transfer endpoints
#[derive(OpenApi)]
#[openapi(paths(transfer_handler))]
pub struct TransferApi;

pub const TRANSFER_API_GROUP: &str = "TRANSFER";

pub fn transfer_routes() -> Router<Arc<AppState>> {
    Router::new().route("/transfer", post(transfer_handler))
}

/// Moves balance from one account to another in a single transaction
#[utoipa::path(
    post,
    path = "/transfer",
    tag = TRANSFER_API_GROUP,
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer committed", body = TransferResponse),
        (status = 400, description = "Invalid amount or insufficient funds", body = ErrorMessage),
        (status = 404, description = "One of the accounts does not exist", body = ErrorMessage),
    )
)]
pub async fn transfer_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<TransferResponse>, Error> {
    let Json(body) = body?;
    let (from_account, to_account) = state
        .db
        .transfer(body.from_account, body.to_account, body.amount)
        .await?;

    info!(
        from = body.from_account,
        to = body.to_account,
        amount = body.amount,
        "transfer completed"
    );
    Ok(Json(TransferResponse {
        from_account,
        to_account,
        amount: body.amount,
    }))
}
