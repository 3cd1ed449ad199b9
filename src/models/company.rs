use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Stored company account. `password_hash` is an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Company {
    pub id: i64,
    pub login: String,
    pub password_hash: String,
    pub name: String,
    pub country_id: i64,
    pub town_id: i64,
    pub foundation_date: NaiveDate,
    pub site_href: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDraft {
    pub login: String,
    pub password_hash: String,
    pub name: String,
    pub country_id: i64,
    pub town_id: i64,
    pub foundation_date: NaiveDate,
    pub site_href: String,
}

impl From<Company> for CompanyDraft {
    fn from(company: Company) -> Self {
        Self {
            login: company.login,
            password_hash: company.password_hash,
            name: company.name,
            country_id: company.country_id,
            town_id: company.town_id,
            foundation_date: company.foundation_date,
            site_href: company.site_href,
        }
    }
}
