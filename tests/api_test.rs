use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use jobboard_backend::{database::MemoryStore, routes, AppState};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

fn app() -> Router {
    routes::router(AppState::new(MemoryStore::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        })
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, uri: &str, body: JsonValue) -> JsonValue {
    let (status, json) = send(app, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}: {}", uri, json);
    json
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn country_crud_and_error_statuses() {
    let app = app();
    let country = create(&app, "/api/countries", json!({ "name": "Testland" })).await;
    let id = country["id"].as_i64().unwrap();

    let (status, _) = send(&app, "POST", "/api/countries", Some(json!({ "name": "Testland" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "POST", "/api/countries", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/countries/{}", id),
        Some(json!({ "name": "Renamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Renamed");

    let (status, body) = send(&app, "GET", "/api/countries?search=ren", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 20);

    let (status, _) = send(&app, "DELETE", &format!("/api/countries/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/api/countries/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn town_with_unknown_country_is_unprocessable() {
    let (status, _) = send(
        &app(),
        "POST",
        "/api/towns",
        Some(json!({ "name": "Nowhere", "country_id": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn specialist_flow_over_http() {
    let app = app();
    let country = create(&app, "/api/countries", json!({ "name": "Testland" })).await;
    let town = create(
        &app,
        "/api/towns",
        json!({ "name": "Testville", "country_id": country["id"] }),
    )
    .await;
    let python = create(&app, "/api/technologies", json!({ "name": "Python" })).await;

    let specialist = create(
        &app,
        "/api/specialists",
        json!({
            "login": "httpspecialist",
            "password": "Valid1Pass!",
            "name": "Anna",
            "surname": "Smirnova",
            "patronymic": "",
            "born_date": "1990-04-12",
            "country_id": country["id"],
            "town_id": town["id"],
            "technology_ids": [python["id"]],
        }),
    )
    .await;
    assert!(specialist.get("password_hash").is_none());
    assert!(specialist["patronymic"].is_null());
    assert_eq!(specialist["technologies"][0]["name"], "Python");
    let id = specialist["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/specialists/{}/technologies", id),
        Some(json!({ "technology_id": python["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        "POST",
        "/api/specialists/authenticate",
        Some(json!({ "login": "httpspecialist", "password": "Valid1Pass!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);

    let (status, _) = send(
        &app,
        "POST",
        "/api/specialists/authenticate",
        Some(json!({ "login": "httpspecialist", "password": "Nope1Pass!" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let resume = create(
        &app,
        "/api/resumes",
        json!({
            "position": "Data engineer",
            "specialist_id": id,
            "salary": "10000-15000",
            "salary_currency": "USD",
            "description": "Pipelines and warehouses.",
        }),
    )
    .await;
    assert_eq!(resume["salary"], "10000-15000");
    assert_eq!(resume["salary_currency"], "USD");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/specialists/{}/technologies/{}", id, python["id"]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, technologies) = send(&app, "GET", &format!("/api/specialists/{}/technologies", id), None).await;
    assert_eq!(technologies, json!([]));
}

#[tokio::test]
async fn vacancy_defaults_to_company_town_and_rub() {
    let app = app();
    let country = create(&app, "/api/countries", json!({ "name": "Testland" })).await;
    let town = create(
        &app,
        "/api/towns",
        json!({ "name": "Testville", "country_id": country["id"] }),
    )
    .await;
    let company = create(
        &app,
        "/api/companies",
        json!({
            "login": "httpcompany",
            "password": "Valid1Pass!",
            "name": "Acme Corp",
            "country_id": country["id"],
            "town_id": town["id"],
            "foundation_date": "2004-09-01",
            "site_href": "https://acme.example.com",
        }),
    )
    .await;
    assert!(company.get("password_hash").is_none());

    let vacancy = create(
        &app,
        "/api/vacancies",
        json!({
            "name": "Backend engineer",
            "company_id": company["id"],
            "salary": "50000",
            "description": "",
        }),
    )
    .await;
    assert_eq!(vacancy["town_id"], town["id"]);
    assert_eq!(vacancy["salary_currency"], "RUB");
    assert_eq!(vacancy["salary"], "50000");

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/vacancies/{}", vacancy["id"]),
        Some(json!({ "salary": "9-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/vacancies/{}", vacancy["id"]);
    let (status, published) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({ "published_at": "2024-03-01T10:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(published["published_at"].is_string());

    let (_, renamed) = send(&app, "PATCH", &uri, Some(json!({ "name": "Platform engineer" }))).await;
    assert_eq!(renamed["published_at"], published["published_at"]);

    let (status, unpublished) = send(&app, "PATCH", &uri, Some(json!({ "published_at": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(unpublished["published_at"].is_null());
    assert_eq!(unpublished["name"], "Platform engineer");

    let (_, page) = send(
        &app,
        "GET",
        &format!("/api/vacancies?company_id={}", company["id"]),
        None,
    )
    .await;
    assert_eq!(page["total"], 1);
}
