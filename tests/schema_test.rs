use chrono::NaiveDate;
use jobboard_backend::{
    database::{MemoryStore, Store},
    dto::{
        auth_dto::CredentialsPayload,
        common_dto::ListQuery,
        company_dto::{CreateCompanyPayload, UpdateCompanyPayload},
        geography_dto::{CreateCountryPayload, CreateTownPayload},
        resume_dto::CreateResumePayload,
        specialist_dto::CreateSpecialistPayload,
        technology_dto::TechnologyPayload,
        token_dto::CreateTokenPayload,
        vacancy_dto::CreateVacancyPayload,
    },
    error::Error,
    models::{
        country::Country,
        salary::{Currency, Salary},
        town::Town,
    },
    utils::time::{today, years_before},
    AppState,
};
use rust_decimal::Decimal;

fn state() -> AppState<MemoryStore> {
    AppState::new(MemoryStore::new())
}

async fn place(state: &AppState<MemoryStore>, country: &str, town: &str) -> (Country, Town) {
    let country = state
        .geography_service
        .create_country(CreateCountryPayload {
            name: country.into(),
        })
        .await
        .unwrap();
    let town = state
        .geography_service
        .create_town(CreateTownPayload {
            name: town.into(),
            country_id: country.id,
        })
        .await
        .unwrap();
    (country, town)
}

fn specialist_payload(login: &str, town: &Town, born_date: NaiveDate) -> CreateSpecialistPayload {
    CreateSpecialistPayload {
        login: login.into(),
        password: "Valid1Pass!".into(),
        name: "Ivan".into(),
        surname: "Petrov".into(),
        patronymic: None,
        born_date,
        country_id: town.country_id,
        town_id: town.id,
        technology_ids: Vec::new(),
    }
}

fn company_payload(login: &str, town: &Town) -> CreateCompanyPayload {
    CreateCompanyPayload {
        login: login.into(),
        password: "Valid1Pass!".into(),
        name: "Acme Corp".into(),
        country_id: town.country_id,
        town_id: town.id,
        foundation_date: NaiveDate::from_ymd_opt(2001, 5, 14).unwrap(),
        site_href: "https://acme.example.com".into(),
    }
}

fn years_ago(years: u32) -> NaiveDate {
    years_before(today(), years).unwrap()
}

#[tokio::test]
async fn end_to_end_specialist_with_technology_and_resume() {
    let state = state();
    let (country, town) = place(&state, "Testland", "Testville").await;
    assert_eq!(town.country_id, country.id);

    let specialist = state
        .specialist_service
        .create(specialist_payload("testspecialist", &town, years_ago(20)))
        .await
        .unwrap();
    let python = state
        .technology_service
        .create(TechnologyPayload {
            name: "Python".into(),
        })
        .await
        .unwrap();
    let link = state
        .specialist_service
        .add_technology(specialist.id, python.id)
        .await
        .unwrap();
    let resume = state
        .resume_service
        .create(CreateResumePayload {
            position: "Backend developer".into(),
            specialist_id: specialist.id,
            salary: "50000".into(),
            salary_currency: Currency::Usd,
            description: "Ten years of services in production.".into(),
            published_at: None,
        })
        .await
        .unwrap();

    let stored = state.store.get_specialist(specialist.id).await.unwrap();
    assert_eq!(stored.town_id, town.id);
    assert_eq!(stored.country_id, country.id);
    assert_eq!(link.technology_id, python.id);
    let technologies = state
        .specialist_service
        .technologies(specialist.id)
        .await
        .unwrap();
    assert_eq!(technologies, vec![python.clone()]);
    let resume = state.resume_service.get_by_id(resume.id).await.unwrap();
    assert_eq!(resume.specialist_id, specialist.id);
    assert_eq!(resume.salary(), Salary::Amount(Decimal::from(50000)));
    assert_eq!(resume.salary_currency, Currency::Usd);

    let err = state
        .specialist_service
        .add_technology(specialist.id, python.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConstraintViolation(_)), "{:?}", err);
}

#[tokio::test]
async fn duplicate_country_and_town_names_are_rejected() {
    let state = state();
    let (country, _) = place(&state, "Testland", "Testville").await;

    let err = state
        .geography_service
        .create_country(CreateCountryPayload {
            name: "Testland".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConstraintViolation(_)));

    let err = state
        .geography_service
        .create_town(CreateTownPayload {
            name: "Testville".into(),
            country_id: country.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConstraintViolation(_)));

    let (other, _) = place(&state, "Otherland", "Testville").await;
    assert_ne!(other.id, country.id);
}

#[tokio::test]
async fn deleting_country_cascades_to_every_dependent() {
    let state = state();
    let (country, town) = place(&state, "Testland", "Testville").await;
    let (_, other_town) = place(&state, "Otherland", "Otherville").await;

    let company = state
        .company_service
        .create(company_payload("acmecompany", &town))
        .await
        .unwrap();
    let specialist = state
        .specialist_service
        .create(specialist_payload("testspecialist", &town, years_ago(30)))
        .await
        .unwrap();
    let technology = state
        .technology_service
        .create(TechnologyPayload { name: "Rust".into() })
        .await
        .unwrap();
    state
        .specialist_service
        .add_technology(specialist.id, technology.id)
        .await
        .unwrap();
    let vacancy = state
        .vacancy_service
        .create(CreateVacancyPayload {
            name: "Engineer".into(),
            company_id: company.id,
            town_id: None,
            salary: "10000-15000".into(),
            salary_currency: Currency::Rub,
            description: String::new(),
            published_at: None,
        })
        .await
        .unwrap();
    assert_eq!(vacancy.town_id, town.id);
    state
        .resume_service
        .create(CreateResumePayload {
            position: "Engineer".into(),
            specialist_id: specialist.id,
            salary: "12000".into(),
            salary_currency: Currency::Eur,
            description: String::new(),
            published_at: None,
        })
        .await
        .unwrap();
    let token = state
        .token_service
        .issue(CreateTokenPayload {
            specialist_id: specialist.id,
            company_id: company.id,
            token: None,
        })
        .await
        .unwrap();
    assert_eq!(token.token.len(), 48);

    state
        .geography_service
        .delete_country(country.id)
        .await
        .unwrap();

    let all = ListQuery::default();
    let towns = state.geography_service.list_towns(&all).await.unwrap();
    assert_eq!(towns.items, vec![other_town]);
    assert_eq!(state.company_service.list(&all).await.unwrap().total, 0);
    assert_eq!(state.specialist_service.list(&all).await.unwrap().total, 0);
    assert_eq!(state.vacancy_service.list(&all).await.unwrap().total, 0);
    assert_eq!(state.resume_service.list(&all).await.unwrap().total, 0);
    assert_eq!(state.token_service.list(&all).await.unwrap().total, 0);
    assert!(state
        .store
        .list_specialist_technologies(specialist.id)
        .await
        .unwrap()
        .is_empty());
    // Reference data outside the country survives.
    assert_eq!(state.technology_service.list(&all).await.unwrap().total, 1);
}

#[tokio::test]
async fn specialist_must_be_eighteen() {
    let state = state();
    let (_, town) = place(&state, "Testland", "Testville").await;

    let err = state
        .specialist_service
        .create(specialist_payload(
            "youngperson",
            &town,
            today() - chrono::Duration::days(17 * 365),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)), "{:?}", err);

    let eighteen_today = years_ago(18);
    state
        .specialist_service
        .create(specialist_payload("adultperson", &town, eighteen_today))
        .await
        .unwrap();
}

#[tokio::test]
async fn future_foundation_date_is_rejected_on_create_and_update() {
    let state = state();
    let (_, town) = place(&state, "Testland", "Testville").await;
    let tomorrow = today() + chrono::Duration::days(1);

    let mut payload = company_payload("futurecompany", &town);
    payload.foundation_date = tomorrow;
    let err = state.company_service.create(payload).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let company = state
        .company_service
        .create(company_payload("presentcompany", &town))
        .await
        .unwrap();
    let err = state
        .company_service
        .update(
            company.id,
            UpdateCompanyPayload {
                foundation_date: Some(tomorrow),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn weak_password_is_rejected_and_hash_is_stored() {
    let state = state();
    let (_, town) = place(&state, "Testland", "Testville").await;

    let mut payload = company_payload("weakcompany", &town);
    payload.password = "alllowercase1!".into();
    let err = state.company_service.create(payload).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let company = state
        .company_service
        .create(company_payload("strongcompany", &town))
        .await
        .unwrap();
    assert_ne!(company.password_hash, "Valid1Pass!");
    assert!(company.password_hash.starts_with("$argon2"));

    let authenticated = state
        .company_service
        .authenticate(CredentialsPayload {
            login: "strongcompany".into(),
            password: "Valid1Pass!".into(),
        })
        .await
        .unwrap();
    assert_eq!(authenticated.id, company.id);

    let err = state
        .company_service
        .authenticate(CredentialsPayload {
            login: "strongcompany".into(),
            password: "Wrong1Pass!".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));
}

#[tokio::test]
async fn duplicate_login_is_a_constraint_violation() {
    let state = state();
    let (_, town) = place(&state, "Testland", "Testville").await;
    state
        .company_service
        .create(company_payload("samecompany", &town))
        .await
        .unwrap();
    let err = state
        .company_service
        .create(company_payload("samecompany", &town))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConstraintViolation(_)));
}

#[tokio::test]
async fn town_from_another_country_is_rejected() {
    let state = state();
    let (country, _) = place(&state, "Testland", "Testville").await;
    let (_, foreign_town) = place(&state, "Otherland", "Otherville").await;

    let mut payload = company_payload("lostcompany", &foreign_town);
    payload.country_id = country.id;
    let err = state.company_service.create(payload).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn vacancy_for_missing_company_is_referential_error() {
    let state = state();
    let err = state
        .vacancy_service
        .create(CreateVacancyPayload {
            name: "Ghost".into(),
            company_id: 999,
            town_id: None,
            salary: "1000".into(),
            salary_currency: Currency::Rub,
            description: String::new(),
            published_at: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Referential(_)));
}

#[tokio::test]
async fn inverted_salary_range_is_rejected() {
    let state = state();
    let (_, town) = place(&state, "Testland", "Testville").await;
    let specialist = state
        .specialist_service
        .create(specialist_payload("rangeperson", &town, years_ago(25)))
        .await
        .unwrap();
    let err = state
        .resume_service
        .create(CreateResumePayload {
            position: "Analyst".into(),
            specialist_id: specialist.id,
            salary: "20000-10000".into(),
            salary_currency: Currency::Rub,
            description: String::new(),
            published_at: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn failed_technology_link_leaves_no_specialist() {
    let state = state();
    let (_, town) = place(&state, "Testland", "Testville").await;
    let python = state
        .technology_service
        .create(TechnologyPayload {
            name: "Python".into(),
        })
        .await
        .unwrap();

    let mut payload = specialist_payload("twicelinked", &town, years_ago(30));
    payload.technology_ids = vec![python.id, python.id];
    let err = state.specialist_service.create(payload).await.unwrap_err();
    assert!(matches!(err, Error::ConstraintViolation(_)), "{:?}", err);

    let mut payload = specialist_payload("twicelinked", &town, years_ago(30));
    payload.technology_ids = vec![python.id, 999];
    let err = state.specialist_service.create(payload).await.unwrap_err();
    assert!(matches!(err, Error::Referential(_)), "{:?}", err);

    let specialists = state
        .specialist_service
        .list(&ListQuery::default())
        .await
        .unwrap();
    assert_eq!(specialists.total, 0);

    let mut payload = specialist_payload("twicelinked", &town, years_ago(30));
    payload.technology_ids = vec![python.id];
    let specialist = state.specialist_service.create(payload).await.unwrap();
    let technologies = state
        .specialist_service
        .technologies(specialist.id)
        .await
        .unwrap();
    assert_eq!(technologies, vec![python]);
}
