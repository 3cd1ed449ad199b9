use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder};

use crate::database::store::Store;
use crate::dto::common_dto::{ListQuery, Page};
use crate::error::{Error, Result};
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

const COMPANY_COLUMNS: &str = "id, login, password_hash, name, country_id, town_id, \
     foundation_date, site_href, created_at, updated_at";
const SPECIALIST_COLUMNS: &str = "id, login, password_hash, name, surname, patronymic, \
     born_date, country_id, town_id, created_at, updated_at";
const VACANCY_COLUMNS: &str = "id, name, company_id, town_id, salary_from, salary_to, \
     salary_currency, description, published_at, created_at, updated_at";
const RESUME_COLUMNS: &str = "id, position, specialist_id, salary_from, salary_to, \
     salary_currency, description, published_at, created_at, updated_at";

type Filters = fn(&mut QueryBuilder<'_, Postgres>, &ListQuery);

/// Postgres backend. Constraints, cascades and date triggers live in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_page<T>(
        &self,
        columns: &str,
        table: &str,
        query: &ListQuery,
        filters: Filters,
    ) -> Result<Page<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut count = QueryBuilder::<Postgres>::new(format!(
            "SELECT COUNT(*) FROM {} WHERE TRUE",
            table
        ));
        filters(&mut count, query);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut items = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {} WHERE TRUE",
            columns, table
        ));
        filters(&mut items, query);
        items
            .push(" ORDER BY id LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());
        let rows = items.build_query_as::<T>().fetch_all(&self.pool).await?;

        Ok(Page::new(rows, total, query))
    }

    async fn delete_by_id(&self, table: &str, entity: &str, id: i64) -> Result<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table))
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found(entity, id));
        }
        Ok(())
    }
}

fn name_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    if let Some(pattern) = query.search_pattern() {
        qb.push(" AND name ILIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\'");
    }
}

fn town_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    if let Some(country_id) = query.country_id {
        qb.push(" AND country_id = ").push_bind(country_id);
    }
    name_filters(qb, query);
}

fn company_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    if let Some(country_id) = query.country_id {
        qb.push(" AND country_id = ").push_bind(country_id);
    }
    if let Some(town_id) = query.town_id {
        qb.push(" AND town_id = ").push_bind(town_id);
    }
    name_filters(qb, query);
}

fn specialist_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    if let Some(country_id) = query.country_id {
        qb.push(" AND country_id = ").push_bind(country_id);
    }
    if let Some(town_id) = query.town_id {
        qb.push(" AND town_id = ").push_bind(town_id);
    }
    if let Some(pattern) = query.search_pattern() {
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR surname ILIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
}

fn vacancy_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    if let Some(company_id) = query.company_id {
        qb.push(" AND company_id = ").push_bind(company_id);
    }
    if let Some(town_id) = query.town_id {
        qb.push(" AND town_id = ").push_bind(town_id);
    }
    name_filters(qb, query);
}

fn resume_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    if let Some(specialist_id) = query.specialist_id {
        qb.push(" AND specialist_id = ").push_bind(specialist_id);
    }
    if let Some(pattern) = query.search_pattern() {
        qb.push(" AND position ILIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\'");
    }
}

fn token_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    if let Some(specialist_id) = query.specialist_id {
        qb.push(" AND specialist_id = ").push_bind(specialist_id);
    }
    if let Some(company_id) = query.company_id {
        qb.push(" AND company_id = ").push_bind(company_id);
    }
}

impl Store for PgStore {
    async fn insert_country(&self, name: String) -> Result<Country> {
        let country = sqlx::query_as::<_, Country>(
            "INSERT INTO countries (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(country)
    }

    async fn get_country(&self, id: i64) -> Result<Country> {
        sqlx::query_as::<_, Country>("SELECT id, name FROM countries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::not_found("Country", id))
    }

    async fn list_countries(&self, query: &ListQuery) -> Result<Page<Country>> {
        self.fetch_page("id, name", "countries", query, name_filters)
            .await
    }

    async fn update_country(&self, id: i64, name: String) -> Result<Country> {
        sqlx::query_as::<_, Country>(
            "UPDATE countries SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("Country", id))
    }

    async fn delete_country(&self, id: i64) -> Result<()> {
        self.delete_by_id("countries", "Country", id).await
    }

    async fn insert_town(&self, draft: TownDraft) -> Result<Town> {
        let town = sqlx::query_as::<_, Town>(
            "INSERT INTO towns (name, country_id) VALUES ($1, $2) RETURNING id, name, country_id",
        )
        .bind(draft.name)
        .bind(draft.country_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(town)
    }

    async fn get_town(&self, id: i64) -> Result<Town> {
        sqlx::query_as::<_, Town>("SELECT id, name, country_id FROM towns WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::not_found("Town", id))
    }

    async fn list_towns(&self, query: &ListQuery) -> Result<Page<Town>> {
        self.fetch_page("id, name, country_id", "towns", query, town_filters)
            .await
    }

    async fn update_town(&self, id: i64, draft: TownDraft) -> Result<Town> {
        sqlx::query_as::<_, Town>(
            r#"
            UPDATE towns SET name = $2, country_id = $3
            WHERE id = $1
            RETURNING id, name, country_id
            "#,
        )
        .bind(id)
        .bind(draft.name)
        .bind(draft.country_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("Town", id))
    }

    async fn delete_town(&self, id: i64) -> Result<()> {
        self.delete_by_id("towns", "Town", id).await
    }

    async fn insert_technology(&self, name: String) -> Result<Technology> {
        let technology = sqlx::query_as::<_, Technology>(
            "INSERT INTO technologies (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(technology)
    }

    async fn get_technology(&self, id: i64) -> Result<Technology> {
        sqlx::query_as::<_, Technology>("SELECT id, name FROM technologies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::not_found("Technology", id))
    }

    async fn list_technologies(&self, query: &ListQuery) -> Result<Page<Technology>> {
        self.fetch_page("id, name", "technologies", query, name_filters)
            .await
    }

    async fn update_technology(&self, id: i64, name: String) -> Result<Technology> {
        sqlx::query_as::<_, Technology>(
            "UPDATE technologies SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("Technology", id))
    }

    async fn delete_technology(&self, id: i64) -> Result<()> {
        self.delete_by_id("technologies", "Technology", id).await
    }

    async fn insert_company(&self, draft: CompanyDraft) -> Result<Company> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (
                login, password_hash, name, country_id, town_id, foundation_date, site_href
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id,
                login,
                password_hash,
                name,
                country_id,
                town_id,
                foundation_date,
                site_href,
                created_at,
                updated_at
            "#,
        )
        .bind(draft.login)
        .bind(draft.password_hash)
        .bind(draft.name)
        .bind(draft.country_id)
        .bind(draft.town_id)
        .bind(draft.foundation_date)
        .bind(draft.site_href)
        .fetch_one(&self.pool)
        .await?;
        Ok(company)
    }

    async fn get_company(&self, id: i64) -> Result<Company> {
        sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies WHERE id = $1",
            COMPANY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("Company", id))
    }

    async fn find_company_by_login(&self, login: &str) -> Result<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies WHERE login = $1",
            COMPANY_COLUMNS
        ))
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }

    async fn list_companies(&self, query: &ListQuery) -> Result<Page<Company>> {
        self.fetch_page(COMPANY_COLUMNS, "companies", query, company_filters)
            .await
    }

    async fn update_company(&self, id: i64, draft: CompanyDraft) -> Result<Company> {
        sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET
                login = $2,
                password_hash = $3,
                name = $4,
                country_id = $5,
                town_id = $6,
                foundation_date = $7,
                site_href = $8
            WHERE id = $1
            RETURNING
                id,
                login,
                password_hash,
                name,
                country_id,
                town_id,
                foundation_date,
                site_href,
                created_at,
                updated_at
            "#,
        )
        .bind(id)
        .bind(draft.login)
        .bind(draft.password_hash)
        .bind(draft.name)
        .bind(draft.country_id)
        .bind(draft.town_id)
        .bind(draft.foundation_date)
        .bind(draft.site_href)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("Company", id))
    }

    async fn delete_company(&self, id: i64) -> Result<()> {
        self.delete_by_id("companies", "Company", id).await
    }

    async fn insert_specialist(
        &self,
        draft: SpecialistDraft,
        technology_ids: Vec<i64>,
    ) -> Result<Specialist> {
        let mut tx = self.pool.begin().await?;
        let specialist = sqlx::query_as::<_, Specialist>(
            r#"
            INSERT INTO specialists (
                login, password_hash, name, surname, patronymic, born_date, country_id, town_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id,
                login,
                password_hash,
                name,
                surname,
                patronymic,
                born_date,
                country_id,
                town_id,
                created_at,
                updated_at
            "#,
        )
        .bind(draft.login)
        .bind(draft.password_hash)
        .bind(draft.name)
        .bind(draft.surname)
        .bind(draft.patronymic)
        .bind(draft.born_date)
        .bind(draft.country_id)
        .bind(draft.town_id)
        .fetch_one(&mut *tx)
        .await?;

        for technology_id in technology_ids {
            sqlx::query(
                "INSERT INTO specialist_technologies (specialist_id, technology_id) VALUES ($1, $2)",
            )
            .bind(specialist.id)
            .bind(technology_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(specialist)
    }

    async fn get_specialist(&self, id: i64) -> Result<Specialist> {
        sqlx::query_as::<_, Specialist>(&format!(
            "SELECT {} FROM specialists WHERE id = $1",
            SPECIALIST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("Specialist", id))
    }

    async fn find_specialist_by_login(&self, login: &str) -> Result<Option<Specialist>> {
        let specialist = sqlx::query_as::<_, Specialist>(&format!(
            "SELECT {} FROM specialists WHERE login = $1",
            SPECIALIST_COLUMNS
        ))
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;
        Ok(specialist)
    }

    async fn list_specialists(&self, query: &ListQuery) -> Result<Page<Specialist>> {
        self.fetch_page(SPECIALIST_COLUMNS, "specialists", query, specialist_filters)
            .await
    }

    async fn update_specialist(&self, id: i64, draft: SpecialistDraft) -> Result<Specialist> {
        sqlx::query_as::<_, Specialist>(
            r#"
            UPDATE specialists
            SET
                login = $2,
                password_hash = $3,
                name = $4,
                surname = $5,
                patronymic = $6,
                born_date = $7,
                country_id = $8,
                town_id = $9
            WHERE id = $1
            RETURNING
                id,
                login,
                password_hash,
                name,
                surname,
                patronymic,
                born_date,
                country_id,
                town_id,
                created_at,
                updated_at
            "#,
        )
        .bind(id)
        .bind(draft.login)
        .bind(draft.password_hash)
        .bind(draft.name)
        .bind(draft.surname)
        .bind(draft.patronymic)
        .bind(draft.born_date)
        .bind(draft.country_id)
        .bind(draft.town_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("Specialist", id))
    }

    async fn delete_specialist(&self, id: i64) -> Result<()> {
        self.delete_by_id("specialists", "Specialist", id).await
    }

    async fn insert_specialist_technology(
        &self,
        specialist_id: i64,
        technology_id: i64,
    ) -> Result<SpecialistTechnology> {
        let link = sqlx::query_as::<_, SpecialistTechnology>(
            r#"
            INSERT INTO specialist_technologies (specialist_id, technology_id)
            VALUES ($1, $2)
            RETURNING id, specialist_id, technology_id
            "#,
        )
        .bind(specialist_id)
        .bind(technology_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }

    async fn delete_specialist_technology(
        &self,
        specialist_id: i64,
        technology_id: i64,
    ) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM specialist_technologies WHERE specialist_id = $1 AND technology_id = $2",
        )
        .bind(specialist_id)
        .bind(technology_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!(
                "Specialist {} does not list technology {}",
                specialist_id, technology_id
            )));
        }
        Ok(())
    }

    async fn list_specialist_technologies(&self, specialist_id: i64) -> Result<Vec<Technology>> {
        let technologies = sqlx::query_as::<_, Technology>(
            r#"
            SELECT t.id, t.name
            FROM technologies t
            JOIN specialist_technologies st ON st.technology_id = t.id
            WHERE st.specialist_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(specialist_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(technologies)
    }

    async fn insert_vacancy(&self, draft: VacancyDraft) -> Result<Vacancy> {
        let (salary_from, salary_to) = draft.salary.columns();
        let vacancy = sqlx::query_as::<_, Vacancy>(
            r#"
            INSERT INTO vacancies (
                name, company_id, town_id, salary_from, salary_to,
                salary_currency, description, published_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id,
                name,
                company_id,
                town_id,
                salary_from,
                salary_to,
                salary_currency,
                description,
                published_at,
                created_at,
                updated_at
            "#,
        )
        .bind(draft.name)
        .bind(draft.company_id)
        .bind(draft.town_id)
        .bind(salary_from)
        .bind(salary_to)
        .bind(draft.salary_currency)
        .bind(draft.description)
        .bind(draft.published_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(vacancy)
    }

    async fn get_vacancy(&self, id: i64) -> Result<Vacancy> {
        sqlx::query_as::<_, Vacancy>(&format!(
            "SELECT {} FROM vacancies WHERE id = $1",
            VACANCY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("Vacancy", id))
    }

    async fn list_vacancies(&self, query: &ListQuery) -> Result<Page<Vacancy>> {
        self.fetch_page(VACANCY_COLUMNS, "vacancies", query, vacancy_filters)
            .await
    }

    async fn update_vacancy(&self, id: i64, draft: VacancyDraft) -> Result<Vacancy> {
        let (salary_from, salary_to) = draft.salary.columns();
        sqlx::query_as::<_, Vacancy>(
            r#"
            UPDATE vacancies
            SET
                name = $2,
                company_id = $3,
                town_id = $4,
                salary_from = $5,
                salary_to = $6,
                salary_currency = $7,
                description = $8,
                published_at = $9
            WHERE id = $1
            RETURNING
                id,
                name,
                company_id,
                town_id,
                salary_from,
                salary_to,
                salary_currency,
                description,
                published_at,
                created_at,
                updated_at
            "#,
        )
        .bind(id)
        .bind(draft.name)
        .bind(draft.company_id)
        .bind(draft.town_id)
        .bind(salary_from)
        .bind(salary_to)
        .bind(draft.salary_currency)
        .bind(draft.description)
        .bind(draft.published_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("Vacancy", id))
    }

    async fn delete_vacancy(&self, id: i64) -> Result<()> {
        self.delete_by_id("vacancies", "Vacancy", id).await
    }

    async fn insert_resume(&self, draft: ResumeDraft) -> Result<Resume> {
        let (salary_from, salary_to) = draft.salary.columns();
        let resume = sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes (
                position, specialist_id, salary_from, salary_to,
                salary_currency, description, published_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id,
                position,
                specialist_id,
                salary_from,
                salary_to,
                salary_currency,
                description,
                published_at,
                created_at,
                updated_at
            "#,
        )
        .bind(draft.position)
        .bind(draft.specialist_id)
        .bind(salary_from)
        .bind(salary_to)
        .bind(draft.salary_currency)
        .bind(draft.description)
        .bind(draft.published_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(resume)
    }

    async fn get_resume(&self, id: i64) -> Result<Resume> {
        sqlx::query_as::<_, Resume>(&format!(
            "SELECT {} FROM resumes WHERE id = $1",
            RESUME_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("Resume", id))
    }

    async fn list_resumes(&self, query: &ListQuery) -> Result<Page<Resume>> {
        self.fetch_page(RESUME_COLUMNS, "resumes", query, resume_filters)
            .await
    }

    async fn update_resume(&self, id: i64, draft: ResumeDraft) -> Result<Resume> {
        let (salary_from, salary_to) = draft.salary.columns();
        sqlx::query_as::<_, Resume>(
            r#"
            UPDATE resumes
            SET
                position = $2,
                specialist_id = $3,
                salary_from = $4,
                salary_to = $5,
                salary_currency = $6,
                description = $7,
                published_at = $8
            WHERE id = $1
            RETURNING
                id,
                position,
                specialist_id,
                salary_from,
                salary_to,
                salary_currency,
                description,
                published_at,
                created_at,
                updated_at
            "#,
        )
        .bind(id)
        .bind(draft.position)
        .bind(draft.specialist_id)
        .bind(salary_from)
        .bind(salary_to)
        .bind(draft.salary_currency)
        .bind(draft.description)
        .bind(draft.published_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("Resume", id))
    }

    async fn delete_resume(&self, id: i64) -> Result<()> {
        self.delete_by_id("resumes", "Resume", id).await
    }

    async fn insert_token(&self, draft: TokenDraft) -> Result<Token> {
        let token = sqlx::query_as::<_, Token>(
            r#"
            INSERT INTO tokens (specialist_id, company_id, token)
            VALUES ($1, $2, $3)
            RETURNING id, specialist_id, company_id, token
            "#,
        )
        .bind(draft.specialist_id)
        .bind(draft.company_id)
        .bind(draft.token)
        .fetch_one(&self.pool)
        .await?;
        Ok(token)
    }

    async fn get_token(&self, id: i64) -> Result<Token> {
        sqlx::query_as::<_, Token>(
            "SELECT id, specialist_id, company_id, token FROM tokens WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("Token", id))
    }

    async fn list_tokens(&self, query: &ListQuery) -> Result<Page<Token>> {
        self.fetch_page(
            "id, specialist_id, company_id, token",
            "tokens",
            query,
            token_filters,
        )
        .await
    }

    async fn delete_token(&self, id: i64) -> Result<()> {
        self.delete_by_id("tokens", "Token", id).await
    }
}
