mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use izimo::app::build_router;

fn app() -> Router {
    build_router(common::state(common::memory_store()))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn register(app: &Router, email: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": "secret123",
            "firstName": "Julien",
            "lastName": "Martin",
            "role": role
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["user"].get("password").is_none());
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let (status, _) = send(&app(), "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_need_a_token() {
    let app = app();
    let (status, _) = send(&app, "GET", "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/users/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_registration_is_a_bad_request() {
    let (status, _) = send(
        &app(),
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": "not-an-email",
            "password": "123",
            "firstName": "J",
            "lastName": "M",
            "role": "tenant"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn owner_publishes_and_tenant_applies() {
    let app = app();
    let owner = register(&app, "owner@example.fr", "owner").await;
    let tenant = register(&app, "tenant@example.fr", "tenant").await;

    let property = json!({
        "title": "T2 Croix-Rousse",
        "address": "3 place Colbert",
        "city": "Lyon",
        "postalCode": "69001",
        "propertyType": "apartment",
        "surface": 45.0,
        "rent": 780.0,
        "charges": 40.0
    });

    // Inquilino não publica imóveis
    let (status, _) = send(
        &app,
        "POST",
        "/api/properties",
        Some(&tenant),
        Some(property.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) =
        send(&app, "POST", "/api/properties", Some(&owner), Some(property)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    let reference = created["reference"].as_str().unwrap().to_string();

    // Consulta pública pela referência
    let uri = format!("/api/properties/reference/{}", reference);
    let (status, found) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["id"], created["id"]);

    let (status, listed) = send(&app, "GET", "/api/properties", Some(&tenant), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, application) = send(
        &app,
        "POST",
        "/api/applications",
        Some(&tenant),
        Some(json!({"propertyId": id, "message": "Dossier complet"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(application["status"], "submitted");

    // Só o dono vê as candidaturas do imóvel
    let uri = format!("/api/properties/{}/applications", id);
    let (status, _) = send(&app, "GET", &uri, Some(&tenant), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, applications) = send(&app, "GET", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(applications.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_property_is_not_found() {
    let app = app();
    let token = register(&app, "owner@example.fr", "owner").await;

    let uri = format!("/api/properties/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        send(&app, "GET", "/api/properties/reference/IZ-ZZZZZZ", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn documents_are_visible_only_to_the_parties_involved() {
    let app = app();
    let owner = register(&app, "owner@example.fr", "owner").await;
    let alice = register(&app, "alice@example.fr", "tenant").await;
    let bruno = register(&app, "bruno@example.fr", "tenant").await;

    let (status, property) = send(
        &app,
        "POST",
        "/api/properties",
        Some(&owner),
        Some(json!({
            "title": "Studio Vieux-Port",
            "address": "12 quai du Port",
            "city": "Marseille",
            "postalCode": "13002",
            "propertyType": "studio",
            "surface": 22.0,
            "rent": 560.0,
            "charges": 30.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let property_id = property["id"].as_str().unwrap().to_string();

    let (status, application) = send(
        &app,
        "POST",
        "/api/applications",
        Some(&alice),
        Some(json!({"propertyId": property_id, "message": "Bonjour"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Vínculo com imóvel alheio é recusado mesmo junto da própria candidatura
    let (status, _) = send(
        &app,
        "POST",
        "/api/documents",
        Some(&alice),
        Some(json!({
            "name": "piece_identite.pdf",
            "url": "https://files.example.fr/alice/id.pdf",
            "documentType": "identity",
            "propertyId": property_id,
            "applicationId": application["id"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, identity) = send(
        &app,
        "POST",
        "/api/documents",
        Some(&alice),
        Some(json!({
            "name": "piece_identite.pdf",
            "url": "https://files.example.fr/alice/id.pdf",
            "documentType": "identity",
            "applicationId": application["id"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/documents/{}", identity["id"].as_str().unwrap());

    let (status, _) = send(&app, "GET", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &uri, Some(&bruno), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Terceiro não anexa nada ao imóvel alheio
    let lease = json!({
        "name": "bail.pdf",
        "url": "https://files.example.fr/bail.pdf",
        "documentType": "lease",
        "propertyId": property_id
    });
    let (status, _) = send(&app, "POST", "/api/documents", Some(&bruno), Some(lease.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "POST", "/api/documents", Some(&owner), Some(lease)).await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/properties/{}/documents", property_id);
    let (status, listed) = send(&app, "GET", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    let (status, listed) = send(&app, "GET", &uri, Some(&bruno), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn attaching_to_an_unknown_property_is_not_found() {
    let app = app();
    let owner = register(&app, "owner@example.fr", "owner").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/documents",
        Some(&owner),
        Some(json!({
            "name": "bail.pdf",
            "url": "https://files.example.fr/bail.pdf",
            "documentType": "lease",
            "propertyId": uuid::Uuid::new_v4()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
