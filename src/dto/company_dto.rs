use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::company::Company;
use crate::utils::validation::{validate_foundation_date, validate_password};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCompanyPayload {
    #[validate(length(min = 8, max = 30))]
    pub login: String,
    #[validate(length(max = 20), custom(function = "validate_password"))]
    pub password: String,
    #[validate(length(min = 4, max = 100))]
    pub name: String,
    pub country_id: i64,
    pub town_id: i64,
    #[validate(custom(function = "validate_foundation_date"))]
    pub foundation_date: NaiveDate,
    #[validate(url, length(max = 200))]
    pub site_href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateCompanyPayload {
    #[validate(length(min = 8, max = 30))]
    pub login: Option<String>,
    #[validate(length(max = 20), custom(function = "validate_password"))]
    pub password: Option<String>,
    #[validate(length(min = 4, max = 100))]
    pub name: Option<String>,
    pub country_id: Option<i64>,
    pub town_id: Option<i64>,
    #[validate(custom(function = "validate_foundation_date"))]
    pub foundation_date: Option<NaiveDate>,
    #[validate(url, length(max = 200))]
    pub site_href: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub id: i64,
    pub login: String,
    pub name: String,
    pub country_id: i64,
    pub town_id: i64,
    pub foundation_date: NaiveDate,
    pub site_href: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            login: company.login,
            name: company.name,
            country_id: company.country_id,
            town_id: company.town_id,
            foundation_date: company.foundation_date,
            site_href: company.site_href,
            created_at: company.created_at,
            updated_at: company.updated_at,
        }
    }
}
