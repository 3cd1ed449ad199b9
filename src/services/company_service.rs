use tracing::{info, warn};
use validator::Validate;

use super::ensure_town_in_country;
use crate::database::Store;
use crate::dto::{
    auth_dto::CredentialsPayload,
    common_dto::{ListQuery, Page},
    company_dto::{CreateCompanyPayload, UpdateCompanyPayload},
};
use crate::error::{Error, Result};
use crate::models::company::{Company, CompanyDraft};
use crate::utils::crypto::{hash_password, password_matches};

#[derive(Clone)]
pub struct CompanyService<S> {
    store: S,
}

impl<S: Store> CompanyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: CreateCompanyPayload) -> Result<Company> {
        payload.validate()?;
        ensure_town_in_country(&self.store, payload.town_id, payload.country_id).await?;

        let draft = CompanyDraft {
            password_hash: hash_password(&payload.password)?,
            login: payload.login,
            name: payload.name,
            country_id: payload.country_id,
            town_id: payload.town_id,
            foundation_date: payload.foundation_date,
            site_href: payload.site_href,
        };
        let company = self.store.insert_company(draft).await?;
        info!(company_id = company.id, login = %company.login, "Company created");
        Ok(company)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Company> {
        self.store.get_company(id).await
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Company>> {
        self.store.list_companies(query).await
    }

    pub async fn update(&self, id: i64, payload: UpdateCompanyPayload) -> Result<Company> {
        payload.validate()?;
        let mut draft = CompanyDraft::from(self.store.get_company(id).await?);

        if let Some(login) = payload.login {
            draft.login = login;
        }
        if let Some(password) = payload.password {
            draft.password_hash = hash_password(&password)?;
        }
        if let Some(name) = payload.name {
            draft.name = name;
        }
        if let Some(country_id) = payload.country_id {
            draft.country_id = country_id;
        }
        if let Some(town_id) = payload.town_id {
            draft.town_id = town_id;
        }
        if let Some(foundation_date) = payload.foundation_date {
            draft.foundation_date = foundation_date;
        }
        if let Some(site_href) = payload.site_href {
            draft.site_href = site_href;
        }

        ensure_town_in_country(&self.store, draft.town_id, draft.country_id).await?;
        self.store.update_company(id, draft).await
    }

    /// Removes the company with its vacancies and tokens.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_company(id).await?;
        info!(company_id = id, "Company deleted");
        Ok(())
    }

    pub async fn authenticate(&self, credentials: CredentialsPayload) -> Result<Company> {
        let company = self.store.find_company_by_login(&credentials.login).await?;
        match company {
            Some(company) if password_matches(&credentials.password, &company.password_hash)? => {
                Ok(company)
            }
            _ => {
                warn!(login = %credentials.login, "Company authentication failed");
                Err(Error::Unauthorized("Invalid login or password".to_string()))
            }
        }
    }
}
