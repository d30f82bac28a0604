mod common;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use izimo::{
    common::error::AppError,
    db::{Collection, Store},
    models::{
        application::ApplicationStatus,
        auth::UserRole,
        incident::{CreateIncidentPayload, IncidentRoom, IncidentStatus, IncidentType},
        notification::NotificationType,
        property::{PropertyStatus, UpdatePropertyPayload},
        tenancy::TenancyStatus,
    },
    services::NewTenancy,
};

#[tokio::test]
async fn register_then_login_with_any_email_case() {
    let state = common::state(common::memory_store());
    let (token, user) = common::register(&state, "Marie@Example.fr", UserRole::Tenant).await;

    assert_eq!(user.email, "marie@example.fr");
    assert_ne!(user.password, "secret123");
    assert_eq!(state.auth_service.validate_token(&token).await.unwrap().id, user.id);

    let (_, logged) = state
        .auth_service
        .login_user("MARIE@example.fr", "secret123")
        .await
        .unwrap();
    assert_eq!(logged.id, user.id);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let state = common::state(common::memory_store());
    common::register(&state, "marie@example.fr", UserRole::Tenant).await;

    let wrong_password = state.auth_service.login_user("marie@example.fr", "nope").await;
    let unknown_email = state.auth_service.login_user("ghost@example.fr", "secret123").await;

    assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));
    assert!(matches!(unknown_email, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let state = common::state(common::memory_store());
    common::register(&state, "marie@example.fr", UserRole::Tenant).await;

    let again = state
        .auth_service
        .register_user(serde_json::from_value(json!({
            "email": "MARIE@example.fr",
            "password": "another1",
            "firstName": "M",
            "lastName": "D",
            "role": "owner"
        })).unwrap())
        .await;
    assert!(matches!(again, Err(AppError::EmailAlreadyExists)));
}

#[tokio::test]
async fn public_registration_cannot_create_admins() {
    let state = common::state(common::memory_store());
    let result = state
        .auth_service
        .register_user(serde_json::from_value(json!({
            "email": "root@example.fr",
            "password": "secret123",
            "firstName": "R",
            "lastName": "T",
            "role": "admin"
        })).unwrap())
        .await;
    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn garbage_token_is_invalid() {
    let state = common::state(common::memory_store());
    let result = state.auth_service.validate_token("not.a.jwt").await;
    assert!(matches!(result, Err(AppError::InvalidToken)));
}

#[tokio::test]
async fn property_round_trips_through_sqlite() {
    let state = common::state(common::sqlite_store().await);
    let (_, owner) = common::register(&state, "owner@example.fr", UserRole::Owner).await;

    let created = common::create_property(&state, &owner, "T2 Croix-Rousse").await;
    assert_eq!(created.status, PropertyStatus::Available);
    assert!(created.reference.starts_with("IZ-"));
    assert_eq!(created.reference.len(), 9);

    let loaded = state.property_service.get_property(created.id).await.unwrap();
    assert_eq!(loaded.photos.len(), 2);
    assert!(loaded.furnished);
    assert_eq!(loaded.total_rent(), Decimal::new(910, 0));

    // Registro cru: fotos como texto JSON, flag como 0/1
    let raw = state
        .store
        .get(Collection::Properties, &created.id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert!(raw["photos"].is_string());
    assert_eq!(raw["furnished"], json!(1));

    let by_reference = state
        .property_service
        .find_by_reference(&created.reference.to_lowercase())
        .await
        .unwrap();
    assert_eq!(by_reference.map(|p| p.id), Some(created.id));
}

#[tokio::test]
async fn partial_update_keeps_untouched_fields() {
    let state = common::state(common::memory_store());
    let (_, owner) = common::register(&state, "owner@example.fr", UserRole::Owner).await;
    let property = common::create_property(&state, &owner, "Studio").await;

    let updated = state
        .property_service
        .update_property(
            property.id,
            UpdatePropertyPayload {
                rent: Some(Decimal::new(900, 0)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.rent, Decimal::new(900, 0));
    assert_eq!(updated.title, "Studio");
    assert_eq!(updated.photos, property.photos);
    assert!(updated.updated_at >= property.updated_at);
}

#[tokio::test]
async fn explicit_null_clears_optional_fields() {
    let state = common::state(common::memory_store());
    let (_, owner) = common::register(&state, "owner@example.fr", UserRole::Owner).await;
    let property = common::create_property(&state, &owner, "Studio").await;

    let set: UpdatePropertyPayload = serde_json::from_value(json!({
        "description": "Lumineux, proche du tram",
        "floor": 3
    }))
    .unwrap();
    let updated = state
        .property_service
        .update_property(property.id, set)
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("Lumineux, proche du tram"));
    assert_eq!(updated.floor, Some(3));

    // Campo ausente fica como está; null limpa
    let clear: UpdatePropertyPayload =
        serde_json::from_value(json!({"description": null})).unwrap();
    let cleared = state
        .property_service
        .update_property(property.id, clear)
        .await
        .unwrap();
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.floor, Some(3));
}

#[tokio::test]
async fn available_listing_excludes_occupied_properties() {
    let state = common::state(common::memory_store());
    let (_, owner) = common::register(&state, "owner@example.fr", UserRole::Owner).await;
    let free = common::create_property(&state, &owner, "Libre").await;
    let taken = common::create_property(&state, &owner, "Loué").await;

    state
        .property_service
        .update_status(taken.id, PropertyStatus::Occupied)
        .await
        .unwrap();

    let available = state.property_service.list_available().await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, free.id);
    assert_eq!(state.property_service.list_by_owner(owner.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn accepting_an_application_notifies_the_applicant() {
    let state = common::state(common::memory_store());
    let (_, owner) = common::register(&state, "owner@example.fr", UserRole::Owner).await;
    let (_, tenant) = common::register(&state, "tenant@example.fr", UserRole::Tenant).await;
    let property = common::create_property(&state, &owner, "T3").await;

    let application = state
        .application_service
        .create_application(property.id, tenant.id, "Bonjour".to_string())
        .await
        .unwrap();
    assert_eq!(application.status, ApplicationStatus::Submitted);

    state
        .application_service
        .update_status(application.id, ApplicationStatus::Accepted)
        .await
        .unwrap();

    let notifications = state.notification_service.list_for_user(tenant.id).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].notification_type, NotificationType::ApplicationUpdate);
    assert!(!notifications[0].read);
}

#[tokio::test]
async fn latest_active_tenancy_wins() {
    let state = common::state(common::memory_store());
    let (_, owner) = common::register(&state, "owner@example.fr", UserRole::Owner).await;
    let (_, tenant) = common::register(&state, "tenant@example.fr", UserRole::Tenant).await;
    let property = common::create_property(&state, &owner, "T2").await;

    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    let tenancy = |start| NewTenancy {
        property_id: property.id,
        tenant_id: tenant.id,
        start_date: start,
        end_date: None,
        rent: Decimal::new(850, 0),
        status: TenancyStatus::Active,
    };

    state.tenancy_service.create_tenancy(tenancy(date(2024, 1, 1))).await.unwrap();
    let newer = state.tenancy_service.create_tenancy(tenancy(date(2025, 9, 1))).await.unwrap();

    let active = state
        .tenancy_service
        .find_active_for_tenant(tenant.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id, newer.id);

    let ended = state
        .tenancy_service
        .end_tenancy(newer.id, date(2026, 8, 31))
        .await
        .unwrap();
    assert_eq!(ended.status, TenancyStatus::Ended);
    assert_eq!(ended.end_date, Some(date(2026, 8, 31)));
}

#[tokio::test]
async fn conversation_is_ordered_and_marked_read() {
    let state = common::state(common::memory_store());
    let (_, a) = common::register(&state, "a@example.fr", UserRole::Owner).await;
    let (_, b) = common::register(&state, "b@example.fr", UserRole::Tenant).await;
    let (_, c) = common::register(&state, "c@example.fr", UserRole::Tenant).await;

    state.message_service.send_message(a.id, b.id, "Bonjour".into()).await.unwrap();
    state.message_service.send_message(b.id, a.id, "Salut".into()).await.unwrap();
    state.message_service.send_message(c.id, a.id, "Autre".into()).await.unwrap();

    let conversation = state.message_service.get_conversation(a.id, b.id).await.unwrap();
    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation[0].content, "Bonjour");
    assert!(conversation.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    assert_eq!(state.message_service.unread_count(a.id).await.unwrap(), 2);
    state.message_service.mark_conversation_read(a.id, b.id).await.unwrap();
    assert_eq!(state.message_service.unread_count(a.id).await.unwrap(), 1);

    // Cada mensagem gera uma notificação para o destinatário
    let for_a = state.notification_service.list_for_user(a.id).await.unwrap();
    assert_eq!(for_a.len(), 2);
    assert!(for_a.iter().all(|n| n.notification_type == NotificationType::NewMessage));
}

#[tokio::test]
async fn notifications_mark_all_and_delete() {
    let state = common::state(common::sqlite_store().await);
    let (_, a) = common::register(&state, "a@example.fr", UserRole::Owner).await;
    let (_, b) = common::register(&state, "b@example.fr", UserRole::Tenant).await;

    for text in ["un", "deux", "trois"] {
        state.message_service.send_message(b.id, a.id, text.into()).await.unwrap();
    }

    assert_eq!(state.notification_service.unread_count(a.id).await.unwrap(), 3);
    assert_eq!(state.notification_service.mark_all_as_read(a.id).await.unwrap(), 3);
    assert_eq!(state.notification_service.unread_count(a.id).await.unwrap(), 0);

    let first = state.notification_service.list_for_user(a.id).await.unwrap()[0].id;
    state.notification_service.delete_notification(first).await.unwrap();
    assert!(matches!(
        state.notification_service.delete_notification(first).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn incident_follows_its_lifecycle() {
    let state = common::state(common::memory_store());
    let (_, owner) = common::register(&state, "owner@example.fr", UserRole::Owner).await;
    let (_, tenant) = common::register(&state, "tenant@example.fr", UserRole::Tenant).await;
    let property = common::create_property(&state, &owner, "T2").await;

    let incident = state
        .incident_service
        .create_incident(
            tenant.id,
            CreateIncidentPayload {
                property_id: property.id,
                tenancy_id: None,
                title: "Fuite".to_string(),
                description: String::new(),
                room: IncidentRoom::Bathroom,
                incident_type: IncidentType::Plumbing,
                submit: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(incident.status, IncidentStatus::Reported);

    // Não pode pular direto para resolvido
    let skipped = state.incident_service.transition(incident.id, IncidentStatus::Resolved).await;
    assert!(matches!(skipped, Err(AppError::InvalidTransition { .. })));

    for next in [IncidentStatus::InCharge, IncidentStatus::InProgress, IncidentStatus::Resolved] {
        state.incident_service.transition(incident.id, next).await.unwrap();
    }

    let updates = state.notification_service.list_for_user(tenant.id).await.unwrap();
    assert_eq!(updates.len(), 3);
    assert!(updates.iter().all(|n| n.notification_type == NotificationType::IncidentUpdate));
}

#[tokio::test]
async fn photos_can_be_added_and_removed() {
    let state = common::state(common::sqlite_store().await);
    let (_, owner) = common::register(&state, "owner@example.fr", UserRole::Owner).await;
    let property = common::create_property(&state, &owner, "Loft").await;

    let url = "https://cdn.izimo.fr/c.jpg";
    let with_photo = state.property_service.add_photo(property.id, url.to_string()).await.unwrap();
    assert_eq!(with_photo.photos.len(), 3);

    let without = state.property_service.remove_photo(property.id, url).await.unwrap();
    assert_eq!(without.photos, property.photos);
    assert_eq!(state.property_service.get_property(property.id).await.unwrap().photos.len(), 2);
}
