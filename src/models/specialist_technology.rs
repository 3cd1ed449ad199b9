use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Join row between a specialist and one technology they list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SpecialistTechnology {
    pub id: i64,
    pub specialist_id: i64,
    pub technology_id: i64,
}
