pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::database::Store;
use crate::services::{
    company_service::CompanyService, geography_service::GeographyService,
    resume_service::ResumeService, specialist_service::SpecialistService,
    technology_service::TechnologyService, token_service::TokenService,
    vacancy_service::VacancyService,
};

#[derive(Clone)]
pub struct AppState<S: Store> {
    pub store: S,
    pub geography_service: GeographyService<S>,
    pub technology_service: TechnologyService<S>,
    pub company_service: CompanyService<S>,
    pub specialist_service: SpecialistService<S>,
    pub vacancy_service: VacancyService<S>,
    pub resume_service: ResumeService<S>,
    pub token_service: TokenService<S>,
}

impl<S: Store> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            geography_service: GeographyService::new(store.clone()),
            technology_service: TechnologyService::new(store.clone()),
            company_service: CompanyService::new(store.clone()),
            specialist_service: SpecialistService::new(store.clone()),
            vacancy_service: VacancyService::new(store.clone()),
            resume_service: ResumeService::new(store.clone()),
            token_service: TokenService::new(store.clone()),
            store,
        }
    }
}
