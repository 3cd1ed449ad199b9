use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use super::salary::{Currency, Salary};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Vacancy {
    pub id: i64,
    pub name: String,
    pub company_id: i64,
    pub town_id: i64,
    pub salary_from: Decimal,
    pub salary_to: Option<Decimal>,
    pub salary_currency: Currency,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vacancy {
    pub fn salary(&self) -> Salary {
        Salary::from_columns(self.salary_from, self.salary_to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyDraft {
    pub name: String,
    pub company_id: i64,
    pub town_id: i64,
    pub salary: Salary,
    pub salary_currency: Currency,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<Vacancy> for VacancyDraft {
    fn from(vacancy: Vacancy) -> Self {
        Self {
            salary: vacancy.salary(),
            name: vacancy.name,
            company_id: vacancy.company_id,
            town_id: vacancy.town_id,
            salary_currency: vacancy.salary_currency,
            description: vacancy.description,
            published_at: vacancy.published_at,
        }
    }
}
