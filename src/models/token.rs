use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Opaque authentication token shared by a specialist and a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Token {
    pub id: i64,
    pub specialist_id: i64,
    pub company_id: i64,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDraft {
    pub specialist_id: i64,
    pub company_id: i64,
    pub token: String,
}
