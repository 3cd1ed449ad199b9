use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::common_dto::nullable;
use crate::models::{
    salary::{Currency, Salary},
    vacancy::Vacancy,
};
use crate::utils::validation::validate_salary;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVacancyPayload {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    pub company_id: i64,
    /// Defaults to the company's town.
    pub town_id: Option<i64>,
    #[validate(length(max = 100), custom(function = "validate_salary"))]
    pub salary: String,
    #[serde(default)]
    pub salary_currency: Currency,
    #[validate(length(max = 10000))]
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateVacancyPayload {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    pub company_id: Option<i64>,
    pub town_id: Option<i64>,
    #[validate(length(max = 100), custom(function = "validate_salary"))]
    pub salary: Option<String>,
    pub salary_currency: Option<Currency>,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    /// `null` unpublishes.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub published_at: Option<Option<DateTime<Utc>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyResponse {
    pub id: i64,
    pub name: String,
    pub company_id: i64,
    pub town_id: i64,
    pub salary: Salary,
    pub salary_currency: Currency,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vacancy> for VacancyResponse {
    fn from(vacancy: Vacancy) -> Self {
        Self {
            id: vacancy.id,
            salary: vacancy.salary(),
            name: vacancy.name,
            company_id: vacancy.company_id,
            town_id: vacancy.town_id,
            salary_currency: vacancy.salary_currency,
            description: vacancy.description,
            published_at: vacancy.published_at,
            created_at: vacancy.created_at,
            updated_at: vacancy.updated_at,
        }
    }
}
