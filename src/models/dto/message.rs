use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain `{ "message": ... }` body used for acknowledgements
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// Body returned for every failed request
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorMessage {
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

impl ErrorMessage {
    pub fn new(message: &str) -> Self {
        Self {
            error_message: message.to_owned(),
        }
    }
}
