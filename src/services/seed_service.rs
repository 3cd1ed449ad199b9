use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};
use fake::faker::address::en::{CityName, CountryName};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::Username;
use fake::faker::job::en::Title;
use fake::faker::lorem::en::Paragraph;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use super::{
    company_service::CompanyService, geography_service::GeographyService,
    resume_service::ResumeService, specialist_service::SpecialistService,
    technology_service::TechnologyService, vacancy_service::VacancyService,
};
use crate::database::Store;
use crate::dto::{
    company_dto::CreateCompanyPayload,
    geography_dto::{CreateCountryPayload, CreateTownPayload},
    resume_dto::CreateResumePayload,
    specialist_dto::CreateSpecialistPayload,
    technology_dto::TechnologyPayload,
    vacancy_dto::CreateVacancyPayload,
};
use crate::error::{Error, Result};
use crate::models::{
    company::Company, salary::Currency, specialist::Specialist, technology::Technology,
    town::Town,
};
use crate::utils::{
    time::{now, today, years_before},
    validation::MIN_SPECIALIST_AGE,
};

pub const TECHNOLOGY_NAMES: [&str; 5] = ["Python", "C", "C++", "Java", "JavaScript"];

const NAME_ATTEMPTS: usize = 50;
const PASSWORD_LENGTH: usize = 12;
const SPECIAL_CHARACTERS: &[u8] = b"!@#$%^&*?";

/// Row counts for one generator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    pub countries: usize,
    pub towns_per_country: usize,
    pub companies: usize,
    pub specialists: usize,
    pub technologies_per_specialist: usize,
    pub vacancies_per_company: usize,
    pub resumes_per_specialist: usize,
}

impl SeedPlan {
    /// `generate-test-data`
    pub fn bulk() -> Self {
        Self {
            countries: 10,
            towns_per_country: 10,
            companies: 10,
            specialists: 10,
            technologies_per_specialist: 1,
            vacancies_per_company: 1,
            resumes_per_specialist: 1,
        }
    }

    /// `generate-test-data-factory`
    pub fn factory() -> Self {
        Self {
            countries: 100,
            towns_per_country: 1,
            companies: 100,
            specialists: 100,
            technologies_per_specialist: 1,
            vacancies_per_company: 1,
            resumes_per_specialist: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub countries: usize,
    pub towns: usize,
    pub technologies: usize,
    pub companies: usize,
    pub specialists: usize,
    pub specialist_technologies: usize,
    pub vacancies: usize,
    pub resumes: usize,
}

/// Fills an empty store with referentially consistent fake rows.
///
/// Every row is written through the regular services, so a rejected write
/// stops the run with the service error. Not idempotent: unique names and
/// logins collide on a second run against the same store.
pub struct SeedService<S: Store> {
    geography: GeographyService<S>,
    technologies: TechnologyService<S>,
    companies: CompanyService<S>,
    specialists: SpecialistService<S>,
    vacancies: VacancyService<S>,
    resumes: ResumeService<S>,
    rng: StdRng,
    country_names: HashSet<String>,
    town_names: HashMap<i64, HashSet<String>>,
    logins: HashSet<String>,
}

impl<S: Store> SeedService<S> {
    /// A fixed `seed` makes the generated values reproducible.
    pub fn new(store: S, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            geography: GeographyService::new(store.clone()),
            technologies: TechnologyService::new(store.clone()),
            companies: CompanyService::new(store.clone()),
            specialists: SpecialistService::new(store.clone()),
            vacancies: VacancyService::new(store.clone()),
            resumes: ResumeService::new(store),
            rng,
            country_names: HashSet::new(),
            town_names: HashMap::new(),
            logins: HashSet::new(),
        }
    }

    pub async fn run(&mut self, plan: SeedPlan) -> Result<SeedReport> {
        let mut report = SeedReport::default();
        info!(?plan, "Generating test data");

        let mut towns: Vec<Town> = Vec::new();
        for _ in 0..plan.countries {
            let name = self.country_name();
            let country = self
                .geography
                .create_country(CreateCountryPayload { name })
                .await?;
            report.countries += 1;

            for _ in 0..plan.towns_per_country {
                let name = self.town_name(country.id);
                let town = self
                    .geography
                    .create_town(CreateTownPayload {
                        name,
                        country_id: country.id,
                    })
                    .await?;
                towns.push(town);
                report.towns += 1;
            }
        }
        info!(
            countries = report.countries,
            towns = report.towns,
            "Geography generated"
        );

        let mut technologies: Vec<Technology> = Vec::new();
        for name in TECHNOLOGY_NAMES {
            let technology = self
                .technologies
                .create(TechnologyPayload {
                    name: name.to_string(),
                })
                .await?;
            technologies.push(technology);
            report.technologies += 1;
        }

        let mut companies: Vec<Company> = Vec::new();
        for _ in 0..plan.companies {
            let town = self.pick_town(&towns)?;
            let payload = self.company_payload(&town);
            companies.push(self.companies.create(payload).await?);
            report.companies += 1;
        }
        info!(companies = report.companies, "Companies generated");

        let mut specialists: Vec<Specialist> = Vec::new();
        for _ in 0..plan.specialists {
            let town = self.pick_town(&towns)?;
            let payload = self.specialist_payload(&town)?;
            let specialist = self.specialists.create(payload).await?;

            for technology_id in
                self.distinct_technologies(&technologies, plan.technologies_per_specialist)
            {
                self.specialists
                    .add_technology(specialist.id, technology_id)
                    .await?;
                report.specialist_technologies += 1;
            }
            specialists.push(specialist);
            report.specialists += 1;
        }
        info!(
            specialists = report.specialists,
            links = report.specialist_technologies,
            "Specialists generated"
        );

        for company in &companies {
            for _ in 0..plan.vacancies_per_company {
                let payload = CreateVacancyPayload {
                    name: self.job_title(100),
                    company_id: company.id,
                    town_id: None,
                    salary: self.salary(),
                    salary_currency: self.currency(),
                    description: self.description(),
                    published_at: Some(now()),
                };
                self.vacancies.create(payload).await?;
                report.vacancies += 1;
            }
        }

        for specialist in &specialists {
            for _ in 0..plan.resumes_per_specialist {
                let payload = CreateResumePayload {
                    position: self.job_title(150),
                    specialist_id: specialist.id,
                    salary: self.salary(),
                    salary_currency: self.currency(),
                    description: self.description(),
                    published_at: Some(now()),
                };
                self.resumes.create(payload).await?;
                report.resumes += 1;
            }
        }

        info!(?report, "Test data generated");
        Ok(report)
    }

    fn pick_town(&mut self, towns: &[Town]) -> Result<Town> {
        towns
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| Error::BadRequest("plan has no towns to place accounts in".to_string()))
    }

    /// Reject-and-retry over the catalog so a specialist never lists a
    /// technology twice.
    fn distinct_technologies(&mut self, technologies: &[Technology], count: usize) -> Vec<i64> {
        let count = count.min(technologies.len());
        let mut chosen: Vec<i64> = Vec::with_capacity(count);
        while chosen.len() < count {
            let candidate = technologies[self.rng.gen_range(0..technologies.len())].id;
            if !chosen.contains(&candidate) {
                chosen.push(candidate);
            }
        }
        chosen
    }

    fn country_name(&mut self) -> String {
        let candidate = unique_value(&mut self.rng, &self.country_names, 50, |rng| {
            CountryName().fake_with_rng(rng)
        });
        self.country_names.insert(candidate.clone());
        candidate
    }

    fn town_name(&mut self, country_id: i64) -> String {
        let taken = self.town_names.entry(country_id).or_default();
        let candidate = unique_value(&mut self.rng, taken, 100, |rng| {
            CityName().fake_with_rng(rng)
        });
        taken.insert(candidate.clone());
        candidate
    }

    fn login(&mut self) -> String {
        loop {
            let base: String = Username().fake_with_rng(&mut self.rng);
            let base: String = base
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .take(20)
                .collect::<String>()
                .to_lowercase();
            let candidate = format!("{:0<8}", format!("{}{}", base, self.rng.gen_range(10..10000)));
            if self.logins.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    fn password(&mut self) -> String {
        let mut chars: Vec<char> = vec![
            self.rng.gen_range(b'a'..=b'z') as char,
            self.rng.gen_range(b'A'..=b'Z') as char,
            self.rng.gen_range(b'0'..=b'9') as char,
            SPECIAL_CHARACTERS[self.rng.gen_range(0..SPECIAL_CHARACTERS.len())] as char,
        ];
        while chars.len() < PASSWORD_LENGTH {
            chars.push(self.rng.sample(rand::distributions::Alphanumeric) as char);
        }
        chars.shuffle(&mut self.rng);
        chars.into_iter().collect()
    }

    fn company_payload(&mut self, town: &Town) -> CreateCompanyPayload {
        let login = self.login();
        let name: String = CompanyName().fake_with_rng(&mut self.rng);
        let name = if name.chars().count() < 4 {
            format!("{} Group", name)
        } else {
            clip(name, 100)
        };
        let start = epoch_start();
        CreateCompanyPayload {
            site_href: format!("https://{}.example.com", login),
            login,
            password: self.password(),
            name,
            country_id: town.country_id,
            town_id: town.id,
            foundation_date: self.date_between(start, today()),
        }
    }

    fn specialist_payload(&mut self, town: &Town) -> Result<CreateSpecialistPayload> {
        let latest = years_before(today(), MIN_SPECIALIST_AGE)
            .ok_or_else(|| Error::Internal("cannot compute adult birth date".to_string()))?;
        let patronymic: Option<String> = if self.rng.gen_bool(0.5) {
            Some(FirstName().fake_with_rng(&mut self.rng))
        } else {
            None
        };
        Ok(CreateSpecialistPayload {
            login: self.login(),
            password: self.password(),
            name: person_name(FirstName().fake_with_rng(&mut self.rng)),
            surname: person_name(LastName().fake_with_rng(&mut self.rng)),
            patronymic: patronymic.map(person_name),
            born_date: self.date_between(epoch_start(), latest),
            country_id: town.country_id,
            town_id: town.id,
            technology_ids: Vec::new(),
        })
    }

    fn date_between(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        let days = (end - start).num_days().max(0);
        start + Duration::days(self.rng.gen_range(0..=days))
    }

    /// Bare amount or a `low-high` range, chosen evenly.
    fn salary(&mut self) -> String {
        let low: u32 = self.rng.gen_range(1000..=100_000);
        if self.rng.gen_bool(0.5) {
            low.to_string()
        } else {
            format!("{}-{}", low, low + self.rng.gen_range(1000..=30_000))
        }
    }

    fn currency(&mut self) -> Currency {
        Currency::ALL[self.rng.gen_range(0..Currency::ALL.len())]
    }

    fn job_title(&mut self, max: usize) -> String {
        let title: String = Title().fake_with_rng(&mut self.rng);
        person_name(clip(title, max))
    }

    fn description(&mut self) -> String {
        clip(Paragraph(2..5).fake_with_rng(&mut self.rng), 1500)
    }
}

fn epoch_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Draws from `generate` until the value is unused; after enough collisions a
/// numeric suffix is appended instead.
fn unique_value(
    rng: &mut StdRng,
    taken: &HashSet<String>,
    max: usize,
    generate: impl Fn(&mut StdRng) -> String,
) -> String {
    for _ in 0..NAME_ATTEMPTS {
        let candidate = clip(generate(rng), max);
        if !candidate.is_empty() && !taken.contains(&candidate) {
            return candidate;
        }
    }
    let base = clip(generate(rng), max.saturating_sub(8));
    let mut suffix = taken.len() + 1;
    loop {
        let candidate = format!("{} {}", base, suffix);
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn clip(value: String, max: usize) -> String {
    if value.chars().count() <= max {
        value
    } else {
        value.chars().take(max).collect::<String>().trim_end().to_string()
    }
}

/// Pads names shorter than the two-character minimum.
fn person_name(value: String) -> String {
    if value.chars().count() < 2 {
        format!("{}a", value)
    } else {
        value
    }
}
