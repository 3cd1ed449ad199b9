use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    database::Store,
    dto::{
        auth_dto::CredentialsPayload,
        common_dto::ListQuery,
        specialist_dto::{CreateSpecialistPayload, SpecialistResponse, UpdateSpecialistPayload},
        technology_dto::LinkTechnologyPayload,
    },
    error::Result,
    AppState,
};

pub async fn create_specialist<S: Store>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateSpecialistPayload>,
) -> Result<impl IntoResponse> {
    let specialist = state.specialist_service.create(payload).await?;
    let detail = state.specialist_service.get_detail(specialist.id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn list_specialists<S: Store>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.specialist_service.list(&query).await?;
    Ok(Json(page.map(SpecialistResponse::from)))
}

pub async fn get_specialist<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let detail = state.specialist_service.get_detail(id).await?;
    Ok(Json(detail))
}

pub async fn update_specialist<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSpecialistPayload>,
) -> Result<impl IntoResponse> {
    let specialist = state.specialist_service.update(id, payload).await?;
    Ok(Json(SpecialistResponse::from(specialist)))
}

pub async fn delete_specialist<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.specialist_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn authenticate_specialist<S: Store>(
    State(state): State<AppState<S>>,
    Json(credentials): Json<CredentialsPayload>,
) -> Result<impl IntoResponse> {
    let specialist = state.specialist_service.authenticate(credentials).await?;
    Ok(Json(SpecialistResponse::from(specialist)))
}

pub async fn list_specialist_technologies<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let technologies = state.specialist_service.technologies(id).await?;
    Ok(Json(technologies))
}

pub async fn add_specialist_technology<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<LinkTechnologyPayload>,
) -> Result<impl IntoResponse> {
    let link = state
        .specialist_service
        .add_technology(id, payload.technology_id)
        .await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn remove_specialist_technology<S: Store>(
    State(state): State<AppState<S>>,
    Path((id, technology_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    state
        .specialist_service
        .remove_technology(id, technology_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
