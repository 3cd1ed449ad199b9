use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    database::Store,
    dto::{
        common_dto::ListQuery,
        resume_dto::{CreateResumePayload, ResumeResponse, UpdateResumePayload},
    },
    error::Result,
    AppState,
};

pub async fn create_resume<S: Store>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateResumePayload>,
) -> Result<impl IntoResponse> {
    let resume = state.resume_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ResumeResponse::from(resume))))
}

pub async fn list_resumes<S: Store>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.resume_service.list(&query).await?;
    Ok(Json(page.map(ResumeResponse::from)))
}

pub async fn get_resume<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let resume = state.resume_service.get_by_id(id).await?;
    Ok(Json(ResumeResponse::from(resume)))
}

pub async fn update_resume<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateResumePayload>,
) -> Result<impl IntoResponse> {
    let resume = state.resume_service.update(id, payload).await?;
    Ok(Json(ResumeResponse::from(resume)))
}

pub async fn delete_resume<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.resume_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
