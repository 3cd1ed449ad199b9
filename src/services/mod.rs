pub mod company_service;
pub mod geography_service;
pub mod resume_service;
pub mod seed_service;
pub mod specialist_service;
pub mod technology_service;
pub mod token_service;
pub mod vacancy_service;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::utils::validation::field_error;

/// Rejects a location whose town lies in another country.
pub(crate) async fn ensure_town_in_country<S: Store>(
    store: &S,
    town_id: i64,
    country_id: i64,
) -> Result<()> {
    match store.get_town(town_id).await {
        Ok(town) if town.country_id != country_id => Err(Error::Validation(field_error(
            "town_id",
            "town_outside_country",
            format!("town {} does not belong to country {}", town_id, country_id),
        ))),
        Ok(_) => Ok(()),
        Err(Error::NotFound(_)) => Err(Error::Referential(format!(
            "Town {} does not exist",
            town_id
        ))),
        Err(err) => Err(err),
    }
}
