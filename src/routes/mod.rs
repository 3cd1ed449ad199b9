pub mod company;
pub mod geography;
pub mod health;
pub mod resume;
pub mod specialist;
pub mod technology;
pub mod token;
pub mod vacancy;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{database::Store, AppState};

/// JSON admin API over every entity.
pub fn router<S: Store>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/countries",
            get(geography::list_countries::<S>).post(geography::create_country::<S>),
        )
        .route(
            "/api/countries/:id",
            get(geography::get_country::<S>)
                .patch(geography::update_country::<S>)
                .delete(geography::delete_country::<S>),
        )
        .route(
            "/api/towns",
            get(geography::list_towns::<S>).post(geography::create_town::<S>),
        )
        .route(
            "/api/towns/:id",
            get(geography::get_town::<S>)
                .patch(geography::update_town::<S>)
                .delete(geography::delete_town::<S>),
        )
        .route(
            "/api/technologies",
            get(technology::list_technologies::<S>).post(technology::create_technology::<S>),
        )
        .route(
            "/api/technologies/:id",
            get(technology::get_technology::<S>)
                .patch(technology::update_technology::<S>)
                .delete(technology::delete_technology::<S>),
        )
        .route(
            "/api/companies",
            get(company::list_companies::<S>).post(company::create_company::<S>),
        )
        .route(
            "/api/companies/authenticate",
            post(company::authenticate_company::<S>),
        )
        .route(
            "/api/companies/:id",
            get(company::get_company::<S>)
                .patch(company::update_company::<S>)
                .delete(company::delete_company::<S>),
        )
        .route(
            "/api/specialists",
            get(specialist::list_specialists::<S>).post(specialist::create_specialist::<S>),
        )
        .route(
            "/api/specialists/authenticate",
            post(specialist::authenticate_specialist::<S>),
        )
        .route(
            "/api/specialists/:id",
            get(specialist::get_specialist::<S>)
                .patch(specialist::update_specialist::<S>)
                .delete(specialist::delete_specialist::<S>),
        )
        .route(
            "/api/specialists/:id/technologies",
            get(specialist::list_specialist_technologies::<S>)
                .post(specialist::add_specialist_technology::<S>),
        )
        .route(
            "/api/specialists/:id/technologies/:technology_id",
            delete(specialist::remove_specialist_technology::<S>),
        )
        .route(
            "/api/vacancies",
            get(vacancy::list_vacancies::<S>).post(vacancy::create_vacancy::<S>),
        )
        .route(
            "/api/vacancies/:id",
            get(vacancy::get_vacancy::<S>)
                .patch(vacancy::update_vacancy::<S>)
                .delete(vacancy::delete_vacancy::<S>),
        )
        .route(
            "/api/resumes",
            get(resume::list_resumes::<S>).post(resume::create_resume::<S>),
        )
        .route(
            "/api/resumes/:id",
            get(resume::get_resume::<S>)
                .patch(resume::update_resume::<S>)
                .delete(resume::delete_resume::<S>),
        )
        .route(
            "/api/tokens",
            get(token::list_tokens::<S>).post(token::issue_token::<S>),
        )
        .route(
            "/api/tokens/:id",
            get(token::get_token::<S>).delete(token::delete_token::<S>),
        )
        .with_state(state)
}
