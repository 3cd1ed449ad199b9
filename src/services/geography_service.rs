use tracing::info;
use validator::Validate;

use crate::database::Store;
use crate::dto::{
    common_dto::{ListQuery, Page},
    geography_dto::{
        CreateCountryPayload, CreateTownPayload, UpdateCountryPayload, UpdateTownPayload,
    },
};
use crate::error::Result;
use crate::models::{
    country::Country,
    town::{Town, TownDraft},
};

/// Countries and the towns inside them.
#[derive(Clone)]
pub struct GeographyService<S> {
    store: S,
}

impl<S: Store> GeographyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create_country(&self, payload: CreateCountryPayload) -> Result<Country> {
        payload.validate()?;
        let country = self.store.insert_country(payload.name).await?;
        info!(country_id = country.id, name = %country.name, "Country created");
        Ok(country)
    }

    pub async fn get_country(&self, id: i64) -> Result<Country> {
        self.store.get_country(id).await
    }

    pub async fn list_countries(&self, query: &ListQuery) -> Result<Page<Country>> {
        self.store.list_countries(query).await
    }

    pub async fn update_country(&self, id: i64, payload: UpdateCountryPayload) -> Result<Country> {
        payload.validate()?;
        self.store.update_country(id, payload.name).await
    }

    /// Removes the country with its towns and every account located there.
    pub async fn delete_country(&self, id: i64) -> Result<()> {
        self.store.delete_country(id).await?;
        info!(country_id = id, "Country deleted");
        Ok(())
    }

    pub async fn create_town(&self, payload: CreateTownPayload) -> Result<Town> {
        payload.validate()?;
        let town = self
            .store
            .insert_town(TownDraft {
                name: payload.name,
                country_id: payload.country_id,
            })
            .await?;
        info!(town_id = town.id, country_id = town.country_id, "Town created");
        Ok(town)
    }

    pub async fn get_town(&self, id: i64) -> Result<Town> {
        self.store.get_town(id).await
    }

    pub async fn list_towns(&self, query: &ListQuery) -> Result<Page<Town>> {
        self.store.list_towns(query).await
    }

    pub async fn update_town(&self, id: i64, payload: UpdateTownPayload) -> Result<Town> {
        payload.validate()?;
        let current = self.store.get_town(id).await?;
        let draft = TownDraft {
            name: payload.name.unwrap_or(current.name),
            country_id: payload.country_id.unwrap_or(current.country_id),
        };
        self.store.update_town(id, draft).await
    }

    pub async fn delete_town(&self, id: i64) -> Result<()> {
        self.store.delete_town(id).await?;
        info!(town_id = id, "Town deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::error::Error;

    fn service() -> GeographyService<MemoryStore> {
        GeographyService::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn country_name_longer_than_fifty_is_rejected() {
        let err = service()
            .create_country(CreateCountryPayload {
                name: "x".repeat(51),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn town_patch_keeps_unset_fields() {
        let service = service();
        let country = service
            .create_country(CreateCountryPayload {
                name: "Testland".into(),
            })
            .await
            .unwrap();
        let town = service
            .create_town(CreateTownPayload {
                name: "Testville".into(),
                country_id: country.id,
            })
            .await
            .unwrap();

        let renamed = service
            .update_town(
                town.id,
                UpdateTownPayload {
                    name: Some("Newville".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Newville");
        assert_eq!(renamed.country_id, country.id);
    }
}
