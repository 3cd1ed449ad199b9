use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    database::Store,
    dto::{
        common_dto::ListQuery,
        geography_dto::{
            CreateCountryPayload, CreateTownPayload, UpdateCountryPayload, UpdateTownPayload,
        },
    },
    error::Result,
    AppState,
};

pub async fn create_country<S: Store>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateCountryPayload>,
) -> Result<impl IntoResponse> {
    let country = state.geography_service.create_country(payload).await?;
    Ok((StatusCode::CREATED, Json(country)))
}

pub async fn list_countries<S: Store>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.geography_service.list_countries(&query).await?;
    Ok(Json(page))
}

pub async fn get_country<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let country = state.geography_service.get_country(id).await?;
    Ok(Json(country))
}

pub async fn update_country<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCountryPayload>,
) -> Result<impl IntoResponse> {
    let country = state.geography_service.update_country(id, payload).await?;
    Ok(Json(country))
}

pub async fn delete_country<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.geography_service.delete_country(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_town<S: Store>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateTownPayload>,
) -> Result<impl IntoResponse> {
    let town = state.geography_service.create_town(payload).await?;
    Ok((StatusCode::CREATED, Json(town)))
}

pub async fn list_towns<S: Store>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.geography_service.list_towns(&query).await?;
    Ok(Json(page))
}

pub async fn get_town<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let town = state.geography_service.get_town(id).await?;
    Ok(Json(town))
}

pub async fn update_town<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTownPayload>,
) -> Result<impl IntoResponse> {
    let town = state.geography_service.update_town(id, payload).await?;
    Ok(Json(town))
}

pub async fn delete_town<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.geography_service.delete_town(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
