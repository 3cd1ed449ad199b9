pub mod auth_dto;
pub mod common_dto;
pub mod company_dto;
pub mod geography_dto;
pub mod resume_dto;
pub mod specialist_dto;
pub mod technology_dto;
pub mod token_dto;
pub mod vacancy_dto;
