use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{specialist::Specialist, technology::Technology};
use crate::utils::validation::{validate_born_date, validate_password};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSpecialistPayload {
    #[validate(length(min = 8, max = 30))]
    pub login: String,
    #[validate(length(max = 20), custom(function = "validate_password"))]
    pub password: String,
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(length(min = 2, max = 100))]
    pub surname: String,
    #[validate(length(min = 2, max = 100))]
    pub patronymic: Option<String>,
    #[validate(custom(function = "validate_born_date"))]
    pub born_date: NaiveDate,
    pub country_id: i64,
    pub town_id: i64,
    /// Technologies to link right after the specialist is stored.
    #[serde(default)]
    pub technology_ids: Vec<i64>,
}

/// Partial update. A blank `patronymic` clears it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateSpecialistPayload {
    #[validate(length(min = 8, max = 30))]
    pub login: Option<String>,
    #[validate(length(max = 20), custom(function = "validate_password"))]
    pub password: Option<String>,
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 2, max = 100))]
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    #[validate(custom(function = "validate_born_date"))]
    pub born_date: Option<NaiveDate>,
    pub country_id: Option<i64>,
    pub town_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistResponse {
    pub id: i64,
    pub login: String,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub born_date: NaiveDate,
    pub country_id: i64,
    pub town_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Specialist> for SpecialistResponse {
    fn from(specialist: Specialist) -> Self {
        Self {
            id: specialist.id,
            login: specialist.login,
            name: specialist.name,
            surname: specialist.surname,
            patronymic: specialist.patronymic,
            born_date: specialist.born_date,
            country_id: specialist.country_id,
            town_id: specialist.town_id,
            created_at: specialist.created_at,
            updated_at: specialist.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistDetailResponse {
    #[serde(flatten)]
    pub specialist: SpecialistResponse,
    pub technologies: Vec<Technology>,
}
