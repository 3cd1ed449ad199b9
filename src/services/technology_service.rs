use tracing::info;
use validator::Validate;

use crate::database::Store;
use crate::dto::{
    common_dto::{ListQuery, Page},
    technology_dto::TechnologyPayload,
};
use crate::error::Result;
use crate::models::technology::Technology;

#[derive(Clone)]
pub struct TechnologyService<S> {
    store: S,
}

impl<S: Store> TechnologyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: TechnologyPayload) -> Result<Technology> {
        payload.validate()?;
        let technology = self.store.insert_technology(payload.name).await?;
        info!(technology_id = technology.id, name = %technology.name, "Technology created");
        Ok(technology)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Technology> {
        self.store.get_technology(id).await
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Technology>> {
        self.store.list_technologies(query).await
    }

    pub async fn update(&self, id: i64, payload: TechnologyPayload) -> Result<Technology> {
        payload.validate()?;
        self.store.update_technology(id, payload.name).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_technology(id).await?;
        info!(technology_id = id, "Technology deleted");
        Ok(())
    }
}
