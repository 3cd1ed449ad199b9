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
        company_dto::{CompanyResponse, CreateCompanyPayload, UpdateCompanyPayload},
    },
    error::Result,
    AppState,
};

pub async fn create_company<S: Store>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateCompanyPayload>,
) -> Result<impl IntoResponse> {
    let company = state.company_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(CompanyResponse::from(company))))
}

pub async fn list_companies<S: Store>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.company_service.list(&query).await?;
    Ok(Json(page.map(CompanyResponse::from)))
}

pub async fn get_company<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let company = state.company_service.get_by_id(id).await?;
    Ok(Json(CompanyResponse::from(company)))
}

pub async fn update_company<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<impl IntoResponse> {
    let company = state.company_service.update(id, payload).await?;
    Ok(Json(CompanyResponse::from(company)))
}

pub async fn delete_company<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.company_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn authenticate_company<S: Store>(
    State(state): State<AppState<S>>,
    Json(credentials): Json<CredentialsPayload>,
) -> Result<impl IntoResponse> {
    let company = state.company_service.authenticate(credentials).await?;
    Ok(Json(CompanyResponse::from(company)))
}
