//! Storage rules enforced by the Postgres schema itself. These talk to the
//! database named by `DATABASE_URL` and are skipped when it is unset.

use chrono::{NaiveDate, Utc};
use jobboard_backend::{
    config::Config,
    database::{pool::create_pool, PgStore, Store},
    dto::common_dto::ListQuery,
    error::Error,
    models::{
        company::CompanyDraft,
        resume::ResumeDraft,
        salary::{Currency, Salary},
        specialist::SpecialistDraft,
        token::TokenDraft,
        town::{Town, TownDraft},
        vacancy::VacancyDraft,
    },
    utils::time::{today, years_before},
};
use rust_decimal::Decimal;

async fn store() -> Option<PgStore> {
    let config = Config::from_env().expect("config");
    if config.database_url.is_none() {
        eprintln!("DATABASE_URL is not set, skipping Postgres test");
        return None;
    }
    let pool = create_pool(&config).await.expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    Some(PgStore::new(pool))
}

/// Suffix that keeps names and logins unique across runs on a shared database.
fn unique() -> String {
    format!("{:08x}", rand::random::<u32>())
}

async fn place(store: &PgStore, suffix: &str) -> Town {
    let country = store
        .insert_country(format!("Country {}", suffix))
        .await
        .unwrap();
    store
        .insert_town(TownDraft {
            name: format!("Town {}", suffix),
            country_id: country.id,
        })
        .await
        .unwrap()
}

fn specialist_draft(town: &Town, login: String, born_date: NaiveDate) -> SpecialistDraft {
    SpecialistDraft {
        login,
        password_hash: "not-a-real-hash".into(),
        name: "Ivan".into(),
        surname: "Petrov".into(),
        patronymic: None,
        born_date,
        country_id: town.country_id,
        town_id: town.id,
    }
}

fn company_draft(town: &Town, login: String, foundation_date: NaiveDate) -> CompanyDraft {
    CompanyDraft {
        login,
        password_hash: "not-a-real-hash".into(),
        name: "Acme Corp".into(),
        country_id: town.country_id,
        town_id: town.id,
        foundation_date,
        site_href: "https://acme.example.com".into(),
    }
}

#[tokio::test]
async fn date_triggers_reject_direct_inserts() {
    let Some(store) = store().await else { return };
    let suffix = unique();
    let town = place(&store, &suffix).await;

    let minor = years_before(today(), 10).unwrap();
    let err = store
        .insert_specialist(specialist_draft(&town, format!("minor{}", suffix), minor), Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConstraintViolation(_)), "{:?}", err);

    let tomorrow = today().succ_opt().unwrap();
    let err = store
        .insert_company(company_draft(&town, format!("future{}", suffix), tomorrow))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConstraintViolation(_)), "{:?}", err);
}

#[tokio::test]
async fn duplicate_technology_link_is_a_constraint_violation() {
    let Some(store) = store().await else { return };
    let suffix = unique();
    let town = place(&store, &suffix).await;
    let technology = store
        .insert_technology(format!("Lang {}", suffix))
        .await
        .unwrap();
    let adult = years_before(today(), 30).unwrap();

    let login = format!("twice{}", suffix);
    let err = store
        .insert_specialist(
            specialist_draft(&town, login.clone(), adult),
            vec![technology.id, technology.id],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConstraintViolation(_)), "{:?}", err);
    assert!(store.find_specialist_by_login(&login).await.unwrap().is_none());

    let specialist = store
        .insert_specialist(specialist_draft(&town, login, adult), vec![technology.id])
        .await
        .unwrap();
    let err = store
        .insert_specialist_technology(specialist.id, technology.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConstraintViolation(_)), "{:?}", err);

    let err = store
        .insert_specialist_technology(specialist.id, i64::MAX)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Referential(_)), "{:?}", err);
}

#[tokio::test]
async fn deleting_country_cascades_through_schema() {
    let Some(store) = store().await else { return };
    let suffix = unique();
    let town = place(&store, &suffix).await;
    let technology = store
        .insert_technology(format!("Tool {}", suffix))
        .await
        .unwrap();

    let company = store
        .insert_company(company_draft(
            &town,
            format!("company{}", suffix),
            NaiveDate::from_ymd_opt(2001, 5, 14).unwrap(),
        ))
        .await
        .unwrap();
    let specialist = store
        .insert_specialist(
            specialist_draft(
                &town,
                format!("person{}", suffix),
                years_before(today(), 25).unwrap(),
            ),
            vec![technology.id],
        )
        .await
        .unwrap();
    let vacancy = store
        .insert_vacancy(VacancyDraft {
            name: "Backend engineer".into(),
            company_id: company.id,
            town_id: town.id,
            salary: Salary::Range {
                from: Decimal::from(10000),
                to: Decimal::from(15000),
            },
            salary_currency: Currency::Eur,
            description: String::new(),
            published_at: Some(Utc::now()),
        })
        .await
        .unwrap();
    let resume = store
        .insert_resume(ResumeDraft {
            position: "Analyst".into(),
            specialist_id: specialist.id,
            salary: Salary::Amount(Decimal::from(50000)),
            salary_currency: Currency::Usd,
            description: String::new(),
            published_at: None,
        })
        .await
        .unwrap();
    let token = store
        .insert_token(TokenDraft {
            specialist_id: specialist.id,
            company_id: company.id,
            token: format!("token-{}", suffix),
        })
        .await
        .unwrap();
    assert_eq!(
        store.get_vacancy(vacancy.id).await.unwrap().salary(),
        vacancy.salary()
    );

    store.delete_country(town.country_id).await.unwrap();

    let gone = [
        store.get_town(town.id).await.map(|_| ()),
        store.get_company(company.id).await.map(|_| ()),
        store.get_specialist(specialist.id).await.map(|_| ()),
        store.get_vacancy(vacancy.id).await.map(|_| ()),
        store.get_resume(resume.id).await.map(|_| ()),
        store.get_token(token.id).await.map(|_| ()),
    ];
    for result in gone {
        assert!(matches!(result, Err(Error::NotFound(_))), "{:?}", result);
    }
    let links = store
        .list_specialist_technologies(specialist.id)
        .await
        .unwrap();
    assert!(links.is_empty());
    assert_eq!(store.get_technology(technology.id).await.unwrap(), technology);
}

#[tokio::test]
async fn search_wildcards_match_literally() {
    let Some(store) = store().await else { return };
    let suffix = unique();
    let country = store
        .insert_country(format!("Esc{}", suffix))
        .await
        .unwrap();

    let exact = ListQuery {
        search: Some(format!("esc{}", suffix)),
        ..Default::default()
    };
    let page = store.list_countries(&exact).await.unwrap();
    assert_eq!(page.items, vec![country]);

    let wildcard = ListQuery {
        search: Some(format!("E_c{}", suffix)),
        ..Default::default()
    };
    assert_eq!(store.list_countries(&wildcard).await.unwrap().total, 0);
}
