use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::get,
    Json, Router,
};
use tracing::info;
use utoipa::OpenApi;

use crate::{
    models::{
        dto::{invalid_name, ErrorMessage, Message, NewAccount, UpdateAccount},
        Account, Error,
    },
    AppState,
};

/// Defines the OpenAPI spec for account endpoints
#[derive(OpenApi)]
#[openapi(paths(
    list_accounts_handler,
    create_account_handler,
    get_account_handler,
    update_account_handler,
    delete_account_handler
))]
pub struct AccountsApi;

/// Used to group account endpoints together in the OpenAPI documentation
pub const ACCOUNT_API_GROUP: &str = "ACCOUNT";

/// Builds a router for account routes. Delete is only reachable on the identified resource.
pub fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/account",
            get(list_accounts_handler).post(create_account_handler),
        )
        .route(
            "/account/:id",
            get(get_account_handler)
                .put(update_account_handler)
                .delete(delete_account_handler),
        )
}

fn check_names(first_name: &str, last_name: &str) -> Result<(), Error> {
    match invalid_name(first_name, last_name) {
        Some(reason) => Err(Error::bad_request(reason)),
        None => Ok(()),
    }
}

/// List accounts handler function
#[utoipa::path(
    get,
    path = "/account",
    tag = ACCOUNT_API_GROUP,
    responses(
        (status = 200, description = "All accounts", body = [Account]),
        (status = 500, description = "Storage failure", body = ErrorMessage),
    )
)]
pub async fn list_accounts_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Account>>, Error> {
    let accounts = state.db.get_accounts().await?;
    Ok(Json(accounts))
}

/// Create account handler function
#[utoipa::path(
    post,
    path = "/account",
    tag = ACCOUNT_API_GROUP,
    request_body = NewAccount,
    responses(
        (status = 200, description = "Account successfully created", body = Account),
        (status = 400, description = "Malformed body or unstorable name", body = ErrorMessage),
    )
)]
pub async fn create_account_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewAccount>, JsonRejection>,
) -> Result<Json<Account>, Error> {
    let Json(body) = body?;
    check_names(&body.first_name, &body.last_name)?;

    let account = state.db.create_account(&body).await?;
    info!(id = account.id, "account created");
    Ok(Json(account))
}

/// Get account handler function
#[utoipa::path(
    get,
    path = "/account/{id}",
    tag = ACCOUNT_API_GROUP,
    responses(
        (status = 200, description = "Account found", body = Account),
        (status = 400, description = "Invalid account id", body = ErrorMessage),
        (status = 404, description = "Account not found", body = ErrorMessage),
    ),
    params(
        ("id" = i32, Path, description = "Account ID")
    )
)]
pub async fn get_account_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Account>, Error> {
    let Path(id) = id?;
    let account = state.db.get_account_by_id(id).await?;
    let account = account.ok_or_else(|| Error::not_found("Account not found"))?;
    Ok(Json(account))
}

/// Update account handler function
#[utoipa::path(
    put,
    path = "/account/{id}",
    tag = ACCOUNT_API_GROUP,
    request_body = UpdateAccount,
    responses(
        (status = 200, description = "Account successfully updated", body = Account),
        (status = 400, description = "Invalid id or body", body = ErrorMessage),
        (status = 404, description = "Account not found", body = ErrorMessage),
    ),
    params(
        ("id" = i32, Path, description = "Account ID")
    )
)]
pub async fn update_account_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdateAccount>, JsonRejection>,
) -> Result<Json<Account>, Error> {
    let Path(id) = id?;
    let Json(body) = body?;
    check_names(&body.first_name, &body.last_name)?;

    if let Some(account) = state.db.update_account(id, &body).await? {
        Ok(Json(account))
    } else {
        Err(Error::not_found("Account not found"))
    }
}

/// Delete account handler function
#[utoipa::path(
    delete,
    path = "/account/{id}",
    tag = ACCOUNT_API_GROUP,
    responses(
        (status = 200, description = "Account successfully deleted", body = Message),
        (status = 400, description = "Invalid account id", body = ErrorMessage),
        (status = 404, description = "Account not found", body = ErrorMessage),
    ),
    params(
        ("id" = i32, Path, description = "Account ID")
    )
)]
pub async fn delete_account_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Message>, Error> {
    let Path(id) = id?;
    if !state.db.delete_account(id).await? {
        return Err(Error::not_found("Account not found"));
    }

    info!(id, "account deleted");
    Ok(Json(Message::new("successfully deleted the account")))
}
