use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    database::Store,
    dto::{common_dto::ListQuery, token_dto::CreateTokenPayload},
    error::Result,
    AppState,
};

pub async fn issue_token<S: Store>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateTokenPayload>,
) -> Result<impl IntoResponse> {
    let token = state.token_service.issue(payload).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

pub async fn list_tokens<S: Store>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.token_service.list(&query).await?;
    Ok(Json(page))
}

pub async fn get_token<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let token = state.token_service.get_by_id(id).await?;
    Ok(Json(token))
}

pub async fn delete_token<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.token_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
