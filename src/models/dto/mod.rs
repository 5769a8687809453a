pub mod account;
pub mod message;
pub use account::*;
pub use message::{ErrorMessage, Message};

use utoipa::OpenApi;

use crate::models::Account;

#[derive(OpenApi)]
#[openapi(components(schemas(
    Account,
    NewAccount,
    UpdateAccount,
    TransferRequest,
    TransferResponse,
    Message,
    ErrorMessage,
)))]
/// Captures OpenAPI schemas defined in the DTO module
pub struct OpenApiSchemas;
