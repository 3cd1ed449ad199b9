use std::collections::BTreeMap;
use std::future::{ready, Future};
use std::sync::{Arc, Mutex, PoisonError};

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
use crate::utils::{
    time::{now, today},
    validation::{born_date_allowed, foundation_date_allowed},
};

/// In-process backend with the same key, check and cascade rules as the
/// Postgres schema. Used for tests and `serve --in-memory`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

#[derive(Default)]
struct Tables {
    last_id: i64,
    countries: BTreeMap<i64, Country>,
    towns: BTreeMap<i64, Town>,
    technologies: BTreeMap<i64, Technology>,
    companies: BTreeMap<i64, Company>,
    specialists: BTreeMap<i64, Specialist>,
    specialist_technologies: BTreeMap<i64, SpecialistTechnology>,
    vacancies: BTreeMap<i64, Vacancy>,
    resumes: BTreeMap<i64, Resume>,
    tokens: BTreeMap<i64, Token>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_tables<T>(&self, f: impl FnOnce(&mut Tables) -> Result<T>) -> Result<T> {
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut tables)
    }

    fn run<T: Send>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T>,
    ) -> impl Future<Output = Result<T>> + Send {
        ready(self.with_tables(f))
    }
}

fn page<T: Clone>(
    rows: &BTreeMap<i64, T>,
    query: &ListQuery,
    keep: impl Fn(&T) -> bool,
) -> Page<T> {
    let matching: Vec<&T> = rows.values().filter(|row| keep(row)).collect();
    let total = matching.len() as i64;
    let items = matching
        .into_iter()
        .skip(query.offset() as usize)
        .take(query.per_page() as usize)
        .cloned()
        .collect();
    Page::new(items, total, query)
}

fn found<T: Clone>(rows: &BTreeMap<i64, T>, entity: &str, id: i64) -> Result<T> {
    rows.get(&id)
        .cloned()
        .ok_or_else(|| Error::not_found(entity, id))
}

fn referenced<T>(rows: &BTreeMap<i64, T>, entity: &str, id: i64) -> Result<()> {
    if rows.contains_key(&id) {
        Ok(())
    } else {
        Err(Error::Referential(format!(
            "{} {} referenced by the record does not exist",
            entity, id
        )))
    }
}

fn unique(taken: bool, what: String) -> Result<()> {
    if taken {
        Err(Error::ConstraintViolation(format!("{} already exists", what)))
    } else {
        Ok(())
    }
}

fn ids_where<T>(rows: &BTreeMap<i64, T>, matches: impl Fn(&T) -> bool) -> Vec<i64> {
    rows.iter()
        .filter(|(_, row)| matches(row))
        .map(|(id, _)| *id)
        .collect()
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn check_town(&self, draft: &TownDraft, id: Option<i64>) -> Result<()> {
        referenced(&self.countries, "Country", draft.country_id)?;
        unique(
            self.towns.values().any(|town| {
                Some(town.id) != id && town.name == draft.name && town.country_id == draft.country_id
            }),
            format!("Town {:?} in country {}", draft.name, draft.country_id),
        )
    }

    fn check_company(&self, draft: &CompanyDraft, id: Option<i64>) -> Result<()> {
        referenced(&self.countries, "Country", draft.country_id)?;
        referenced(&self.towns, "Town", draft.town_id)?;
        unique(
            self.companies
                .values()
                .any(|company| Some(company.id) != id && company.login == draft.login),
            format!("Company with login {:?}", draft.login),
        )?;
        if !foundation_date_allowed(draft.foundation_date, today()) {
            return Err(Error::ConstraintViolation(format!(
                "foundation_date {} is in the future (foundation_date_constraint)",
                draft.foundation_date
            )));
        }
        Ok(())
    }

    fn check_specialist(&self, draft: &SpecialistDraft, id: Option<i64>) -> Result<()> {
        referenced(&self.countries, "Country", draft.country_id)?;
        referenced(&self.towns, "Town", draft.town_id)?;
        unique(
            self.specialists
                .values()
                .any(|specialist| Some(specialist.id) != id && specialist.login == draft.login),
            format!("Specialist with login {:?}", draft.login),
        )?;
        if !born_date_allowed(draft.born_date, today()) {
            return Err(Error::ConstraintViolation(format!(
                "specialist born on {} is younger than 18 years (born_date_constraint)",
                draft.born_date
            )));
        }
        Ok(())
    }

    fn check_vacancy(&self, draft: &VacancyDraft) -> Result<()> {
        referenced(&self.companies, "Company", draft.company_id)?;
        referenced(&self.towns, "Town", draft.town_id)
    }

    fn remove_country(&mut self, id: i64) {
        if self.countries.remove(&id).is_none() {
            return;
        }
        for town_id in ids_where(&self.towns, |town| town.country_id == id) {
            self.remove_town(town_id);
        }
        for company_id in ids_where(&self.companies, |company| company.country_id == id) {
            self.remove_company(company_id);
        }
        for specialist_id in ids_where(&self.specialists, |specialist| specialist.country_id == id)
        {
            self.remove_specialist(specialist_id);
        }
    }

    fn remove_town(&mut self, id: i64) {
        if self.towns.remove(&id).is_none() {
            return;
        }
        for company_id in ids_where(&self.companies, |company| company.town_id == id) {
            self.remove_company(company_id);
        }
        for specialist_id in ids_where(&self.specialists, |specialist| specialist.town_id == id) {
            self.remove_specialist(specialist_id);
        }
        self.vacancies.retain(|_, vacancy| vacancy.town_id != id);
    }

    fn remove_technology(&mut self, id: i64) {
        if self.technologies.remove(&id).is_some() {
            self.specialist_technologies
                .retain(|_, link| link.technology_id != id);
        }
    }

    fn remove_company(&mut self, id: i64) {
        if self.companies.remove(&id).is_some() {
            self.vacancies.retain(|_, vacancy| vacancy.company_id != id);
            self.tokens.retain(|_, token| token.company_id != id);
        }
    }

    fn remove_specialist(&mut self, id: i64) {
        if self.specialists.remove(&id).is_some() {
            self.resumes.retain(|_, resume| resume.specialist_id != id);
            self.specialist_technologies
                .retain(|_, link| link.specialist_id != id);
            self.tokens.retain(|_, token| token.specialist_id != id);
        }
    }
}

impl Store for MemoryStore {
    fn insert_country(&self, name: String) -> impl Future<Output = Result<Country>> + Send {
        self.run(move |t| {
            unique(
                t.countries.values().any(|country| country.name == name),
                format!("Country {:?}", name),
            )?;
            let id = t.next_id();
            let country = Country { id, name };
            t.countries.insert(id, country.clone());
            Ok(country)
        })
    }

    fn get_country(&self, id: i64) -> impl Future<Output = Result<Country>> + Send {
        self.run(move |t| found(&t.countries, "Country", id))
    }

    fn list_countries(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Page<Country>>> + Send {
        self.run(|t| Ok(page(&t.countries, query, |c| query.matches_search(&[c.name.as_str()]))))
    }

    fn update_country(
        &self,
        id: i64,
        name: String,
    ) -> impl Future<Output = Result<Country>> + Send {
        self.run(move |t| {
            found(&t.countries, "Country", id)?;
            unique(
                t.countries
                    .values()
                    .any(|country| country.id != id && country.name == name),
                format!("Country {:?}", name),
            )?;
            let country = Country { id, name };
            t.countries.insert(id, country.clone());
            Ok(country)
        })
    }

    fn delete_country(&self, id: i64) -> impl Future<Output = Result<()>> + Send {
        self.run(move |t| {
            found(&t.countries, "Country", id)?;
            t.remove_country(id);
            Ok(())
        })
    }

    fn insert_town(&self, draft: TownDraft) -> impl Future<Output = Result<Town>> + Send {
        self.run(move |t| {
            t.check_town(&draft, None)?;
            let id = t.next_id();
            let town = Town {
                id,
                name: draft.name,
                country_id: draft.country_id,
            };
            t.towns.insert(id, town.clone());
            Ok(town)
        })
    }

    fn get_town(&self, id: i64) -> impl Future<Output = Result<Town>> + Send {
        self.run(move |t| found(&t.towns, "Town", id))
    }

    fn list_towns(&self, query: &ListQuery) -> impl Future<Output = Result<Page<Town>>> + Send {
        self.run(|t| {
            Ok(page(&t.towns, query, |town| {
                query.country_id.map_or(true, |id| town.country_id == id)
                    && query.matches_search(&[town.name.as_str()])
            }))
        })
    }

    fn update_town(&self, id: i64, draft: TownDraft) -> impl Future<Output = Result<Town>> + Send {
        self.run(move |t| {
            found(&t.towns, "Town", id)?;
            t.check_town(&draft, Some(id))?;
            let town = Town {
                id,
                name: draft.name,
                country_id: draft.country_id,
            };
            t.towns.insert(id, town.clone());
            Ok(town)
        })
    }

    fn delete_town(&self, id: i64) -> impl Future<Output = Result<()>> + Send {
        self.run(move |t| {
            found(&t.towns, "Town", id)?;
            t.remove_town(id);
            Ok(())
        })
    }

    fn insert_technology(&self, name: String) -> impl Future<Output = Result<Technology>> + Send {
        self.run(move |t| {
            unique(
                t.technologies.values().any(|tech| tech.name == name),
                format!("Technology {:?}", name),
            )?;
            let id = t.next_id();
            let technology = Technology { id, name };
            t.technologies.insert(id, technology.clone());
            Ok(technology)
        })
    }

    fn get_technology(&self, id: i64) -> impl Future<Output = Result<Technology>> + Send {
        self.run(move |t| found(&t.technologies, "Technology", id))
    }

    fn list_technologies(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Page<Technology>>> + Send {
        self.run(|t| {
            Ok(page(&t.technologies, query, |tech| {
                query.matches_search(&[tech.name.as_str()])
            }))
        })
    }

    fn update_technology(
        &self,
        id: i64,
        name: String,
    ) -> impl Future<Output = Result<Technology>> + Send {
        self.run(move |t| {
            found(&t.technologies, "Technology", id)?;
            unique(
                t.technologies
                    .values()
                    .any(|tech| tech.id != id && tech.name == name),
                format!("Technology {:?}", name),
            )?;
            let technology = Technology { id, name };
            t.technologies.insert(id, technology.clone());
            Ok(technology)
        })
    }

    fn delete_technology(&self, id: i64) -> impl Future<Output = Result<()>> + Send {
        self.run(move |t| {
            found(&t.technologies, "Technology", id)?;
            t.remove_technology(id);
            Ok(())
        })
    }

    fn insert_company(&self, draft: CompanyDraft) -> impl Future<Output = Result<Company>> + Send {
        self.run(move |t| {
            t.check_company(&draft, None)?;
            let id = t.next_id();
            let created_at = now();
            let company = Company {
                id,
                login: draft.login,
                password_hash: draft.password_hash,
                name: draft.name,
                country_id: draft.country_id,
                town_id: draft.town_id,
                foundation_date: draft.foundation_date,
                site_href: draft.site_href,
                created_at,
                updated_at: created_at,
            };
            t.companies.insert(id, company.clone());
            Ok(company)
        })
    }

    fn get_company(&self, id: i64) -> impl Future<Output = Result<Company>> + Send {
        self.run(move |t| found(&t.companies, "Company", id))
    }

    fn find_company_by_login(
        &self,
        login: &str,
    ) -> impl Future<Output = Result<Option<Company>>> + Send {
        self.run(move |t| {
            Ok(t.companies
                .values()
                .find(|company| company.login == login)
                .cloned())
        })
    }

    fn list_companies(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Page<Company>>> + Send {
        self.run(|t| {
            Ok(page(&t.companies, query, |company| {
                query.country_id.map_or(true, |id| company.country_id == id)
                    && query.town_id.map_or(true, |id| company.town_id == id)
                    && query.matches_search(&[company.name.as_str()])
            }))
        })
    }

    fn update_company(
        &self,
        id: i64,
        draft: CompanyDraft,
    ) -> impl Future<Output = Result<Company>> + Send {
        self.run(move |t| {
            let existing = found(&t.companies, "Company", id)?;
            t.check_company(&draft, Some(id))?;
            let company = Company {
                id,
                login: draft.login,
                password_hash: draft.password_hash,
                name: draft.name,
                country_id: draft.country_id,
                town_id: draft.town_id,
                foundation_date: draft.foundation_date,
                site_href: draft.site_href,
                created_at: existing.created_at,
                updated_at: now(),
            };
            t.companies.insert(id, company.clone());
            Ok(company)
        })
    }

    fn delete_company(&self, id: i64) -> impl Future<Output = Result<()>> + Send {
        self.run(move |t| {
            found(&t.companies, "Company", id)?;
            t.remove_company(id);
            Ok(())
        })
    }

    fn insert_specialist(
        &self,
        draft: SpecialistDraft,
        technology_ids: Vec<i64>,
    ) -> impl Future<Output = Result<Specialist>> + Send {
        self.run(move |t| {
            t.check_specialist(&draft, None)?;
            for (index, technology_id) in technology_ids.iter().enumerate() {
                referenced(&t.technologies, "Technology", *technology_id)?;
                unique(
                    technology_ids[..index].contains(technology_id),
                    format!("Technology {} for specialist", technology_id),
                )?;
            }
            let id = t.next_id();
            let created_at = now();
            let specialist = Specialist {
                id,
                login: draft.login,
                password_hash: draft.password_hash,
                name: draft.name,
                surname: draft.surname,
                patronymic: draft.patronymic,
                born_date: draft.born_date,
                country_id: draft.country_id,
                town_id: draft.town_id,
                created_at,
                updated_at: created_at,
            };
            t.specialists.insert(id, specialist.clone());
            for technology_id in technology_ids {
                let link_id = t.next_id();
                t.specialist_technologies.insert(
                    link_id,
                    SpecialistTechnology {
                        id: link_id,
                        specialist_id: id,
                        technology_id,
                    },
                );
            }
            Ok(specialist)
        })
    }

    fn get_specialist(&self, id: i64) -> impl Future<Output = Result<Specialist>> + Send {
        self.run(move |t| found(&t.specialists, "Specialist", id))
    }

    fn find_specialist_by_login(
        &self,
        login: &str,
    ) -> impl Future<Output = Result<Option<Specialist>>> + Send {
        self.run(move |t| {
            Ok(t.specialists
                .values()
                .find(|specialist| specialist.login == login)
                .cloned())
        })
    }

    fn list_specialists(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Page<Specialist>>> + Send {
        self.run(|t| {
            Ok(page(&t.specialists, query, |specialist| {
                query.country_id.map_or(true, |id| specialist.country_id == id)
                    && query.town_id.map_or(true, |id| specialist.town_id == id)
                    && query.matches_search(&[specialist.name.as_str(), specialist.surname.as_str()])
            }))
        })
    }

    fn update_specialist(
        &self,
        id: i64,
        draft: SpecialistDraft,
    ) -> impl Future<Output = Result<Specialist>> + Send {
        self.run(move |t| {
            let existing = found(&t.specialists, "Specialist", id)?;
            t.check_specialist(&draft, Some(id))?;
            let specialist = Specialist {
                id,
                login: draft.login,
                password_hash: draft.password_hash,
                name: draft.name,
                surname: draft.surname,
                patronymic: draft.patronymic,
                born_date: draft.born_date,
                country_id: draft.country_id,
                town_id: draft.town_id,
                created_at: existing.created_at,
                updated_at: now(),
            };
            t.specialists.insert(id, specialist.clone());
            Ok(specialist)
        })
    }

    fn delete_specialist(&self, id: i64) -> impl Future<Output = Result<()>> + Send {
        self.run(move |t| {
            found(&t.specialists, "Specialist", id)?;
            t.remove_specialist(id);
            Ok(())
        })
    }

    fn insert_specialist_technology(
        &self,
        specialist_id: i64,
        technology_id: i64,
    ) -> impl Future<Output = Result<SpecialistTechnology>> + Send {
        self.run(move |t| {
            referenced(&t.specialists, "Specialist", specialist_id)?;
            referenced(&t.technologies, "Technology", technology_id)?;
            unique(
                t.specialist_technologies.values().any(|link| {
                    link.specialist_id == specialist_id && link.technology_id == technology_id
                }),
                format!(
                    "Technology {} for specialist {}",
                    technology_id, specialist_id
                ),
            )?;
            let id = t.next_id();
            let link = SpecialistTechnology {
                id,
                specialist_id,
                technology_id,
            };
            t.specialist_technologies.insert(id, link.clone());
            Ok(link)
        })
    }

    fn delete_specialist_technology(
        &self,
        specialist_id: i64,
        technology_id: i64,
    ) -> impl Future<Output = Result<()>> + Send {
        self.run(move |t| {
            let before = t.specialist_technologies.len();
            t.specialist_technologies.retain(|_, link| {
                !(link.specialist_id == specialist_id && link.technology_id == technology_id)
            });
            if t.specialist_technologies.len() == before {
                return Err(Error::NotFound(format!(
                    "Specialist {} does not list technology {}",
                    specialist_id, technology_id
                )));
            }
            Ok(())
        })
    }

    fn list_specialist_technologies(
        &self,
        specialist_id: i64,
    ) -> impl Future<Output = Result<Vec<Technology>>> + Send {
        self.run(move |t| {
            let mut technologies: Vec<Technology> = t
                .specialist_technologies
                .values()
                .filter(|link| link.specialist_id == specialist_id)
                .filter_map(|link| t.technologies.get(&link.technology_id).cloned())
                .collect();
            technologies.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(technologies)
        })
    }

    fn insert_vacancy(&self, draft: VacancyDraft) -> impl Future<Output = Result<Vacancy>> + Send {
        self.run(move |t| {
            t.check_vacancy(&draft)?;
            let id = t.next_id();
            let (salary_from, salary_to) = draft.salary.columns();
            let created_at = now();
            let vacancy = Vacancy {
                id,
                name: draft.name,
                company_id: draft.company_id,
                town_id: draft.town_id,
                salary_from,
                salary_to,
                salary_currency: draft.salary_currency,
                description: draft.description,
                published_at: draft.published_at,
                created_at,
                updated_at: created_at,
            };
            t.vacancies.insert(id, vacancy.clone());
            Ok(vacancy)
        })
    }

    fn get_vacancy(&self, id: i64) -> impl Future<Output = Result<Vacancy>> + Send {
        self.run(move |t| found(&t.vacancies, "Vacancy", id))
    }

    fn list_vacancies(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Page<Vacancy>>> + Send {
        self.run(|t| {
            Ok(page(&t.vacancies, query, |vacancy| {
                query.company_id.map_or(true, |id| vacancy.company_id == id)
                    && query.town_id.map_or(true, |id| vacancy.town_id == id)
                    && query.matches_search(&[vacancy.name.as_str()])
            }))
        })
    }

    fn update_vacancy(
        &self,
        id: i64,
        draft: VacancyDraft,
    ) -> impl Future<Output = Result<Vacancy>> + Send {
        self.run(move |t| {
            let existing = found(&t.vacancies, "Vacancy", id)?;
            t.check_vacancy(&draft)?;
            let (salary_from, salary_to) = draft.salary.columns();
            let vacancy = Vacancy {
                id,
                name: draft.name,
                company_id: draft.company_id,
                town_id: draft.town_id,
                salary_from,
                salary_to,
                salary_currency: draft.salary_currency,
                description: draft.description,
                published_at: draft.published_at,
                created_at: existing.created_at,
                updated_at: now(),
            };
            t.vacancies.insert(id, vacancy.clone());
            Ok(vacancy)
        })
    }

    fn delete_vacancy(&self, id: i64) -> impl Future<Output = Result<()>> + Send {
        self.run(move |t| {
            t.vacancies
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| Error::not_found("Vacancy", id))
        })
    }

    fn insert_resume(&self, draft: ResumeDraft) -> impl Future<Output = Result<Resume>> + Send {
        self.run(move |t| {
            referenced(&t.specialists, "Specialist", draft.specialist_id)?;
            let id = t.next_id();
            let (salary_from, salary_to) = draft.salary.columns();
            let created_at = now();
            let resume = Resume {
                id,
                position: draft.position,
                specialist_id: draft.specialist_id,
                salary_from,
                salary_to,
                salary_currency: draft.salary_currency,
                description: draft.description,
                published_at: draft.published_at,
                created_at,
                updated_at: created_at,
            };
            t.resumes.insert(id, resume.clone());
            Ok(resume)
        })
    }

    fn get_resume(&self, id: i64) -> impl Future<Output = Result<Resume>> + Send {
        self.run(move |t| found(&t.resumes, "Resume", id))
    }

    fn list_resumes(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Page<Resume>>> + Send {
        self.run(|t| {
            Ok(page(&t.resumes, query, |resume| {
                query
                    .specialist_id
                    .map_or(true, |id| resume.specialist_id == id)
                    && query.matches_search(&[resume.position.as_str()])
            }))
        })
    }

    fn update_resume(
        &self,
        id: i64,
        draft: ResumeDraft,
    ) -> impl Future<Output = Result<Resume>> + Send {
        self.run(move |t| {
            let existing = found(&t.resumes, "Resume", id)?;
            referenced(&t.specialists, "Specialist", draft.specialist_id)?;
            let (salary_from, salary_to) = draft.salary.columns();
            let resume = Resume {
                id,
                position: draft.position,
                specialist_id: draft.specialist_id,
                salary_from,
                salary_to,
                salary_currency: draft.salary_currency,
                description: draft.description,
                published_at: draft.published_at,
                created_at: existing.created_at,
                updated_at: now(),
            };
            t.resumes.insert(id, resume.clone());
            Ok(resume)
        })
    }

    fn delete_resume(&self, id: i64) -> impl Future<Output = Result<()>> + Send {
        self.run(move |t| {
            t.resumes
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| Error::not_found("Resume", id))
        })
    }

    fn insert_token(&self, draft: TokenDraft) -> impl Future<Output = Result<Token>> + Send {
        self.run(move |t| {
            referenced(&t.specialists, "Specialist", draft.specialist_id)?;
            referenced(&t.companies, "Company", draft.company_id)?;
            let id = t.next_id();
            let token = Token {
                id,
                specialist_id: draft.specialist_id,
                company_id: draft.company_id,
                token: draft.token,
            };
            t.tokens.insert(id, token.clone());
            Ok(token)
        })
    }

    fn get_token(&self, id: i64) -> impl Future<Output = Result<Token>> + Send {
        self.run(move |t| found(&t.tokens, "Token", id))
    }

    fn list_tokens(&self, query: &ListQuery) -> impl Future<Output = Result<Page<Token>>> + Send {
        self.run(|t| {
            Ok(page(&t.tokens, query, |token| {
                query
                    .specialist_id
                    .map_or(true, |id| token.specialist_id == id)
                    && query.company_id.map_or(true, |id| token.company_id == id)
            }))
        })
    }

    fn delete_token(&self, id: i64) -> impl Future<Output = Result<()>> + Send {
        self.run(move |t| {
            t.tokens
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| Error::not_found("Token", id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn company_draft(country_id: i64, town_id: i64, login: &str) -> CompanyDraft {
        CompanyDraft {
            login: login.to_string(),
            password_hash: "hash".to_string(),
            name: "Acme Labs".to_string(),
            country_id,
            town_id,
            foundation_date: NaiveDate::from_ymd_opt(2001, 5, 4).unwrap(),
            site_href: "https://acme.example".to_string(),
        }
    }

    #[test]
    fn ids_are_shared_across_tables() {
        let store = MemoryStore::new();
        let country = tokio_test::block_on(store.insert_country("Testland".into())).unwrap();
        let tech = tokio_test::block_on(store.insert_technology("Rust".into())).unwrap();
        assert_ne!(country.id, tech.id);
    }

    #[test]
    fn storage_rejects_future_foundation_date() {
        let store = MemoryStore::new();
        let country = tokio_test::block_on(store.insert_country("Testland".into())).unwrap();
        let town = tokio_test::block_on(store.insert_town(TownDraft {
            name: "Testville".into(),
            country_id: country.id,
        }))
        .unwrap();

        let mut draft = company_draft(country.id, town.id, "acme_login");
        draft.foundation_date = today().succ_opt().unwrap();
        let err = tokio_test::block_on(store.insert_company(draft)).unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
    }

    #[test]
    fn missing_parent_is_a_referential_error() {
        let store = MemoryStore::new();
        let err = tokio_test::block_on(store.insert_town(TownDraft {
            name: "Nowhere".into(),
            country_id: 42,
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Referential(_)));
    }

    #[test]
    fn deleting_town_removes_its_vacancies_and_accounts() {
        let store = MemoryStore::new();
        let country = tokio_test::block_on(store.insert_country("Testland".into())).unwrap();
        let town = tokio_test::block_on(store.insert_town(TownDraft {
            name: "Testville".into(),
            country_id: country.id,
        }))
        .unwrap();
        let company =
            tokio_test::block_on(store.insert_company(company_draft(country.id, town.id, "acme_login")))
                .unwrap();

        tokio_test::block_on(store.delete_town(town.id)).unwrap();

        let err = tokio_test::block_on(store.get_company(company.id)).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        let country = tokio_test::block_on(store.get_country(country.id)).unwrap();
        assert_eq!(country.name, "Testland");
    }
}
