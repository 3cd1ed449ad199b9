use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::common_dto::nullable;
use crate::models::{
    resume::Resume,
    salary::{Currency, Salary},
};
use crate::utils::validation::validate_salary;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateResumePayload {
    #[validate(length(min = 1, max = 150))]
    pub position: String,
    pub specialist_id: i64,
    #[validate(length(max = 100), custom(function = "validate_salary"))]
    pub salary: String,
    #[serde(default)]
    pub salary_currency: Currency,
    #[validate(length(max = 10000))]
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateResumePayload {
    #[validate(length(min = 1, max = 150))]
    pub position: Option<String>,
    pub specialist_id: Option<i64>,
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
pub struct ResumeResponse {
    pub id: i64,
    pub position: String,
    pub specialist_id: i64,
    pub salary: Salary,
    pub salary_currency: Currency,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resume> for ResumeResponse {
    fn from(resume: Resume) -> Self {
        Self {
            id: resume.id,
            salary: resume.salary(),
            position: resume.position,
            specialist_id: resume.specialist_id,
            salary_currency: resume.salary_currency,
            description: resume.description,
            published_at: resume.published_at,
            created_at: resume.created_at,
            updated_at: resume.updated_at,
        }
    }
}
