use tracing::info;
use validator::Validate;

use super::vacancy_service::parse_salary;
use crate::database::Store;
use crate::dto::{
    common_dto::{ListQuery, Page},
    resume_dto::{CreateResumePayload, UpdateResumePayload},
};
use crate::error::Result;
use crate::models::resume::{Resume, ResumeDraft};

#[derive(Clone)]
pub struct ResumeService<S> {
    store: S,
}

impl<S: Store> ResumeService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: CreateResumePayload) -> Result<Resume> {
        payload.validate()?;
        let draft = ResumeDraft {
            salary: parse_salary(&payload.salary)?,
            position: payload.position,
            specialist_id: payload.specialist_id,
            salary_currency: payload.salary_currency,
            description: payload.description,
            published_at: payload.published_at,
        };
        let resume = self.store.insert_resume(draft).await?;
        info!(
            resume_id = resume.id,
            specialist_id = resume.specialist_id,
            "Resume created"
        );
        Ok(resume)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Resume> {
        self.store.get_resume(id).await
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Resume>> {
        self.store.list_resumes(query).await
    }

    pub async fn update(&self, id: i64, payload: UpdateResumePayload) -> Result<Resume> {
        payload.validate()?;
        let mut draft = ResumeDraft::from(self.store.get_resume(id).await?);

        if let Some(position) = payload.position {
            draft.position = position;
        }
        if let Some(specialist_id) = payload.specialist_id {
            draft.specialist_id = specialist_id;
        }
        if let Some(salary) = payload.salary {
            draft.salary = parse_salary(&salary)?;
        }
        if let Some(currency) = payload.salary_currency {
            draft.salary_currency = currency;
        }
        if let Some(description) = payload.description {
            draft.description = description;
        }
        if let Some(published_at) = payload.published_at {
            draft.published_at = published_at;
        }

        self.store.update_resume(id, draft).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_resume(id).await?;
        info!(resume_id = id, "Resume deleted");
        Ok(())
    }
}
