use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTokenPayload {
    pub specialist_id: i64,
    pub company_id: i64,
    /// Generated when omitted.
    #[validate(length(min = 1, max = 200))]
    pub token: Option<String>,
}
