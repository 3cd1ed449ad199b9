use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use super::salary::{Currency, Salary};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Resume {
    pub id: i64,
    pub position: String,
    pub specialist_id: i64,
    pub salary_from: Decimal,
    pub salary_to: Option<Decimal>,
    pub salary_currency: Currency,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resume {
    pub fn salary(&self) -> Salary {
        Salary::from_columns(self.salary_from, self.salary_to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDraft {
    pub position: String,
    pub specialist_id: i64,
    pub salary: Salary,
    pub salary_currency: Currency,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<Resume> for ResumeDraft {
    fn from(resume: Resume) -> Self {
        Self {
            salary: resume.salary(),
            position: resume.position,
            specialist_id: resume.specialist_id,
            salary_currency: resume.salary_currency,
            description: resume.description,
            published_at: resume.published_at,
        }
    }
}
