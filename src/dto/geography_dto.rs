use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCountryPayload {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCountryPayload {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTownPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub country_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateTownPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub country_id: Option<i64>,
}
