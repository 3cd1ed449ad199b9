use std::future::Future;

use crate::dto::common_dto::{ListQuery, Page};
use crate::error::Result;
use crate::models::{
    company::{Company, CompanyDraft},
    country::Country,
    resume::{Resume, ResumeDraft},
    specialist::{Specialist, SpecialistDraft},
    specialist_technology::SpecialistTechnology,
    technology::Technology,
    token::{Token, TokenDraft},
    town::{Town, TownDraft},
    vacancy::{Vacancy, VacancyDraft},
};

/// Persistence backend for the job board schema.
///
/// Implementations enforce the storage-level rules on their own: unique keys,
/// foreign keys, the foundation/born date checks and cascading deletes. Field
/// validation happens in the services before a backend is called.
pub trait Store: Clone + Send + Sync + 'static {
    fn insert_country(&self, name: String) -> impl Future<Output = Result<Country>> + Send;
    fn get_country(&self, id: i64) -> impl Future<Output = Result<Country>> + Send;
    fn list_countries(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Page<Country>>> + Send;
    fn update_country(&self, id: i64, name: String)
        -> impl Future<Output = Result<Country>> + Send;
    fn delete_country(&self, id: i64) -> impl Future<Output = Result<()>> + Send;

    fn insert_town(&self, draft: TownDraft) -> impl Future<Output = Result<Town>> + Send;
    fn get_town(&self, id: i64) -> impl Future<Output = Result<Town>> + Send;
    fn list_towns(&self, query: &ListQuery) -> impl Future<Output = Result<Page<Town>>> + Send;
    fn update_town(&self, id: i64, draft: TownDraft) -> impl Future<Output = Result<Town>> + Send;
    fn delete_town(&self, id: i64) -> impl Future<Output = Result<()>> + Send;

    fn insert_technology(&self, name: String) -> impl Future<Output = Result<Technology>> + Send;
    fn get_technology(&self, id: i64) -> impl Future<Output = Result<Technology>> + Send;
    fn list_technologies(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Page<Technology>>> + Send;
    fn update_technology(
        &self,
        id: i64,
        name: String,
    ) -> impl Future<Output = Result<Technology>> + Send;
    fn delete_technology(&self, id: i64) -> impl Future<Output = Result<()>> + Send;

    fn insert_company(&self, draft: CompanyDraft) -> impl Future<Output = Result<Company>> + Send;
    fn get_company(&self, id: i64) -> impl Future<Output = Result<Company>> + Send;
    fn find_company_by_login(
        &self,
        login: &str,
    ) -> impl Future<Output = Result<Option<Company>>> + Send;
    fn list_companies(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Page<Company>>> + Send;
    fn update_company(
        &self,
        id: i64,
        draft: CompanyDraft,
    ) -> impl Future<Output = Result<Company>> + Send;
    fn delete_company(&self, id: i64) -> impl Future<Output = Result<()>> + Send;

    /// Inserts the specialist together with its technology links. Nothing is
    /// stored when the row or any link is rejected.
    fn insert_specialist(
        &self,
        draft: SpecialistDraft,
        technology_ids: Vec<i64>,
    ) -> impl Future<Output = Result<Specialist>> + Send;
    fn get_specialist(&self, id: i64) -> impl Future<Output = Result<Specialist>> + Send;
    fn find_specialist_by_login(
        &self,
        login: &str,
    ) -> impl Future<Output = Result<Option<Specialist>>> + Send;
    fn list_specialists(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Page<Specialist>>> + Send;
    fn update_specialist(
        &self,
        id: i64,
        draft: SpecialistDraft,
    ) -> impl Future<Output = Result<Specialist>> + Send;
    fn delete_specialist(&self, id: i64) -> impl Future<Output = Result<()>> + Send;

    fn insert_specialist_technology(
        &self,
        specialist_id: i64,
        technology_id: i64,
    ) -> impl Future<Output = Result<SpecialistTechnology>> + Send;
    fn delete_specialist_technology(
        &self,
        specialist_id: i64,
        technology_id: i64,
    ) -> impl Future<Output = Result<()>> + Send;
    /// Technologies linked to the specialist, ordered by name.
    fn list_specialist_technologies(
        &self,
        specialist_id: i64,
    ) -> impl Future<Output = Result<Vec<Technology>>> + Send;

    fn insert_vacancy(&self, draft: VacancyDraft) -> impl Future<Output = Result<Vacancy>> + Send;
    fn get_vacancy(&self, id: i64) -> impl Future<Output = Result<Vacancy>> + Send;
    fn list_vacancies(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Page<Vacancy>>> + Send;
    fn update_vacancy(
        &self,
        id: i64,
        draft: VacancyDraft,
    ) -> impl Future<Output = Result<Vacancy>> + Send;
    fn delete_vacancy(&self, id: i64) -> impl Future<Output = Result<()>> + Send;

    fn insert_resume(&self, draft: ResumeDraft) -> impl Future<Output = Result<Resume>> + Send;
    fn get_resume(&self, id: i64) -> impl Future<Output = Result<Resume>> + Send;
    fn list_resumes(&self, query: &ListQuery)
        -> impl Future<Output = Result<Page<Resume>>> + Send;
    fn update_resume(
        &self,
        id: i64,
        draft: ResumeDraft,
    ) -> impl Future<Output = Result<Resume>> + Send;
    fn delete_resume(&self, id: i64) -> impl Future<Output = Result<()>> + Send;

    fn insert_token(&self, draft: TokenDraft) -> impl Future<Output = Result<Token>> + Send;
    fn get_token(&self, id: i64) -> impl Future<Output = Result<Token>> + Send;
    fn list_tokens(&self, query: &ListQuery) -> impl Future<Output = Result<Page<Token>>> + Send;
    fn delete_token(&self, id: i64) -> impl Future<Output = Result<()>> + Send;
}
