use tracing::{info, warn};
use validator::Validate;

use super::ensure_town_in_country;
use crate::database::Store;
use crate::dto::{
    auth_dto::CredentialsPayload,
    common_dto::{ListQuery, Page},
    specialist_dto::{CreateSpecialistPayload, SpecialistDetailResponse, UpdateSpecialistPayload},
};
use crate::error::{Error, Result};
use crate::models::{
    specialist::{Specialist, SpecialistDraft},
    specialist_technology::SpecialistTechnology,
    technology::Technology,
};
use crate::utils::{
    crypto::{hash_password, password_matches},
    validation::field_error,
};

#[derive(Clone)]
pub struct SpecialistService<S> {
    store: S,
}

/// Blank patronymics are treated as absent.
fn normalize_patronymic(patronymic: Option<String>) -> Option<String> {
    patronymic.filter(|value| !value.trim().is_empty())
}

fn check_patronymic(patronymic: Option<&str>) -> Result<()> {
    match patronymic.map(|value| value.chars().count()) {
        Some(length) if !(2..=100).contains(&length) => Err(Error::Validation(field_error(
            "patronymic",
            "length",
            "patronymic must be between 2 and 100 characters".to_string(),
        ))),
        _ => Ok(()),
    }
}

impl<S: Store> SpecialistService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stores the specialist and its technology links as one write.
    pub async fn create(&self, mut payload: CreateSpecialistPayload) -> Result<Specialist> {
        payload.patronymic = normalize_patronymic(payload.patronymic);
        payload.validate()?;
        ensure_town_in_country(&self.store, payload.town_id, payload.country_id).await?;

        let draft = SpecialistDraft {
            password_hash: hash_password(&payload.password)?,
            login: payload.login,
            name: payload.name,
            surname: payload.surname,
            patronymic: payload.patronymic,
            born_date: payload.born_date,
            country_id: payload.country_id,
            town_id: payload.town_id,
        };
        let specialist = self
            .store
            .insert_specialist(draft, payload.technology_ids)
            .await?;
        info!(specialist_id = specialist.id, login = %specialist.login, "Specialist created");
        Ok(specialist)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Specialist> {
        self.store.get_specialist(id).await
    }

    pub async fn get_detail(&self, id: i64) -> Result<SpecialistDetailResponse> {
        let specialist = self.store.get_specialist(id).await?;
        let technologies = self.store.list_specialist_technologies(id).await?;
        Ok(SpecialistDetailResponse {
            specialist: specialist.into(),
            technologies,
        })
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Specialist>> {
        self.store.list_specialists(query).await
    }

    pub async fn update(&self, id: i64, payload: UpdateSpecialistPayload) -> Result<Specialist> {
        payload.validate()?;
        let mut draft = SpecialistDraft::from(self.store.get_specialist(id).await?);

        if let Some(login) = payload.login {
            draft.login = login;
        }
        if let Some(password) = payload.password {
            draft.password_hash = hash_password(&password)?;
        }
        if let Some(name) = payload.name {
            draft.name = name;
        }
        if let Some(surname) = payload.surname {
            draft.surname = surname;
        }
        if let Some(patronymic) = payload.patronymic {
            draft.patronymic = normalize_patronymic(Some(patronymic));
            check_patronymic(draft.patronymic.as_deref())?;
        }
        if let Some(born_date) = payload.born_date {
            draft.born_date = born_date;
        }
        if let Some(country_id) = payload.country_id {
            draft.country_id = country_id;
        }
        if let Some(town_id) = payload.town_id {
            draft.town_id = town_id;
        }

        ensure_town_in_country(&self.store, draft.town_id, draft.country_id).await?;
        self.store.update_specialist(id, draft).await
    }

    /// Removes the specialist with resumes, technology links and tokens.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_specialist(id).await?;
        info!(specialist_id = id, "Specialist deleted");
        Ok(())
    }

    pub async fn authenticate(&self, credentials: CredentialsPayload) -> Result<Specialist> {
        let specialist = self
            .store
            .find_specialist_by_login(&credentials.login)
            .await?;
        match specialist {
            Some(specialist)
                if password_matches(&credentials.password, &specialist.password_hash)? =>
            {
                Ok(specialist)
            }
            _ => {
                warn!(login = %credentials.login, "Specialist authentication failed");
                Err(Error::Unauthorized("Invalid login or password".to_string()))
            }
        }
    }

    /// Fails with a constraint violation when the pair is already linked.
    pub async fn add_technology(
        &self,
        specialist_id: i64,
        technology_id: i64,
    ) -> Result<SpecialistTechnology> {
        let link = self
            .store
            .insert_specialist_technology(specialist_id, technology_id)
            .await?;
        info!(specialist_id, technology_id, "Technology linked to specialist");
        Ok(link)
    }

    pub async fn remove_technology(&self, specialist_id: i64, technology_id: i64) -> Result<()> {
        self.store
            .delete_specialist_technology(specialist_id, technology_id)
            .await
    }

    pub async fn technologies(&self, specialist_id: i64) -> Result<Vec<Technology>> {
        self.store.get_specialist(specialist_id).await?;
        self.store.list_specialist_technologies(specialist_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_patronymic_becomes_absent() {
        assert_eq!(normalize_patronymic(Some("  ".into())), None);
        assert_eq!(
            normalize_patronymic(Some("Ivanovich".into())),
            Some("Ivanovich".into())
        );
    }

    #[test]
    fn one_letter_patronymic_is_rejected() {
        assert!(check_patronymic(Some("I")).is_err());
        assert!(check_patronymic(None).is_ok());
    }
}
