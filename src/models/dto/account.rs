use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Account;

/// Longest name the `account` table accepts (`varchar(50)`)
pub const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Deserialize, Serialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccount {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account: i32,
    pub to_account: i32,
    #[schema(example = 10)]
    pub amount: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub from_account: Account,
    pub to_account: Account,
    pub amount: i32,
}

/// Describes why a name cannot be stored in the `account` table, if it cannot
pub fn invalid_name(first_name: &str, last_name: &str) -> Option<String> {
    [("firstName", first_name), ("lastName", last_name)]
        .into_iter()
        .find_map(|(field, value)| {
            if value.chars().count() > MAX_NAME_LEN {
                Some(format!("{field} must be at most {MAX_NAME_LEN} characters"))
            } else if value.contains('\0') {
                Some(format!("{field} must not contain NUL characters"))
            } else {
                None
            }
        })
}
