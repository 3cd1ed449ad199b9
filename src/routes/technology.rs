use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    database::Store,
    dto::{common_dto::ListQuery, technology_dto::TechnologyPayload},
    error::Result,
    AppState,
};

pub async fn create_technology<S: Store>(
    State(state): State<AppState<S>>,
    Json(payload): Json<TechnologyPayload>,
) -> Result<impl IntoResponse> {
    let technology = state.technology_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(technology)))
}

pub async fn list_technologies<S: Store>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.technology_service.list(&query).await?;
    Ok(Json(page))
}

pub async fn get_technology<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let technology = state.technology_service.get_by_id(id).await?;
    Ok(Json(technology))
}

pub async fn update_technology<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<TechnologyPayload>,
) -> Result<impl IntoResponse> {
    let technology = state.technology_service.update(id, payload).await?;
    Ok(Json(technology))
}

pub async fn delete_technology<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.technology_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
