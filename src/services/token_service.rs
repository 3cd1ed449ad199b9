use rand::{distributions::Alphanumeric, thread_rng, Rng};
use tracing::info;
use validator::Validate;

use crate::database::Store;
use crate::dto::{
    common_dto::{ListQuery, Page},
    token_dto::CreateTokenPayload,
};
use crate::error::Result;
use crate::models::token::{Token, TokenDraft};

/// Length of tokens issued without an explicit value.
pub const GENERATED_TOKEN_LENGTH: usize = 48;

fn random_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[derive(Clone)]
pub struct TokenService<S> {
    store: S,
}

impl<S: Store> TokenService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn issue(&self, payload: CreateTokenPayload) -> Result<Token> {
        payload.validate()?;
        let draft = TokenDraft {
            specialist_id: payload.specialist_id,
            company_id: payload.company_id,
            token: payload
                .token
                .unwrap_or_else(random_token),
        };
        let token = self.store.insert_token(draft).await?;
        info!(
            token_id = token.id,
            specialist_id = token.specialist_id,
            company_id = token.company_id,
            "Token issued"
        );
        Ok(token)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Token> {
        self.store.get_token(id).await
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Token>> {
        self.store.list_tokens(query).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_token(id).await?;
        info!(token_id = id, "Token deleted");
        Ok(())
    }
}
