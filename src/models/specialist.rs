use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Stored specialist account. `password_hash` is an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Specialist {
    pub id: i64,
    pub login: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub born_date: NaiveDate,
    pub country_id: i64,
    pub town_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialistDraft {
    pub login: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub born_date: NaiveDate,
    pub country_id: i64,
    pub town_id: i64,
}

impl From<Specialist> for SpecialistDraft {
    fn from(specialist: Specialist) -> Self {
        Self {
            login: specialist.login,
            password_hash: specialist.password_hash,
            name: specialist.name,
            surname: specialist.surname,
            patronymic: specialist.patronymic,
            born_date: specialist.born_date,
            country_id: specialist.country_id,
            town_id: specialist.town_id,
        }
    }
}
