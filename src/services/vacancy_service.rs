use tracing::info;
use validator::Validate;

use crate::database::Store;
use crate::dto::{
    common_dto::{ListQuery, Page},
    vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload},
};
use crate::error::{Error, Result};
use crate::models::{
    salary::Salary,
    vacancy::{Vacancy, VacancyDraft},
};
use crate::utils::validation::field_error;

#[derive(Clone)]
pub struct VacancyService<S> {
    store: S,
}

pub(crate) fn parse_salary(raw: &str) -> Result<Salary> {
    raw.parse::<Salary>()
        .map_err(|err| Error::Validation(field_error("salary", "salary_format", err.to_string())))
}

impl<S: Store> VacancyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Without an explicit town the vacancy is placed in the company's town.
    pub async fn create(&self, payload: CreateVacancyPayload) -> Result<Vacancy> {
        payload.validate()?;
        let town_id = match payload.town_id {
            Some(town_id) => town_id,
            None => self.company_town(payload.company_id).await?,
        };

        let draft = VacancyDraft {
            salary: parse_salary(&payload.salary)?,
            name: payload.name,
            company_id: payload.company_id,
            town_id,
            salary_currency: payload.salary_currency,
            description: payload.description,
            published_at: payload.published_at,
        };
        let vacancy = self.store.insert_vacancy(draft).await?;
        info!(
            vacancy_id = vacancy.id,
            company_id = vacancy.company_id,
            "Vacancy created"
        );
        Ok(vacancy)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Vacancy> {
        self.store.get_vacancy(id).await
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Vacancy>> {
        self.store.list_vacancies(query).await
    }

    pub async fn update(&self, id: i64, payload: UpdateVacancyPayload) -> Result<Vacancy> {
        payload.validate()?;
        let mut draft = VacancyDraft::from(self.store.get_vacancy(id).await?);

        if let Some(name) = payload.name {
            draft.name = name;
        }
        if let Some(company_id) = payload.company_id {
            draft.company_id = company_id;
        }
        if let Some(town_id) = payload.town_id {
            draft.town_id = town_id;
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

        self.store.update_vacancy(id, draft).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_vacancy(id).await?;
        info!(vacancy_id = id, "Vacancy deleted");
        Ok(())
    }

    async fn company_town(&self, company_id: i64) -> Result<i64> {
        match self.store.get_company(company_id).await {
            Ok(company) => Ok(company.town_id),
            Err(Error::NotFound(_)) => Err(Error::Referential(format!(
                "Company {} does not exist",
                company_id
            ))),
            Err(err) => Err(err),
        }
    }
}
