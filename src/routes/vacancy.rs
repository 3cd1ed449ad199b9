use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    database::Store,
    dto::{
        common_dto::ListQuery,
        vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload, VacancyResponse},
    },
    error::Result,
    AppState,
};

pub async fn create_vacancy<S: Store>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateVacancyPayload>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(VacancyResponse::from(vacancy))))
}

pub async fn list_vacancies<S: Store>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.vacancy_service.list(&query).await?;
    Ok(Json(page.map(VacancyResponse::from)))
}

pub async fn get_vacancy<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.get_by_id(id).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

pub async fn update_vacancy<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateVacancyPayload>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.update(id, payload).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

pub async fn delete_vacancy<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.vacancy_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
