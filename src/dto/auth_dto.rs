use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsPayload {
    pub login: String,
    pub password: String,
}
