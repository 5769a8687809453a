use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub number: i32,
    pub balance: i32,
    #[schema(value_type = String, example = "2024-05-01T12:30:00.000000")]
    pub created_at: NaiveDateTime,
}
