// src/app.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

/// Monta o router completo da API.
pub fn build_router(app_state: AppState) -> Router {
    // Rotas públicas
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route(
            "/me",
            get(handlers::auth::get_me).put(handlers::auth::update_me),
        )
        .route(
            "/me/notification-preferences",
            put(handlers::auth::update_notification_preferences),
        );

    let property_routes = Router::new()
        .route(
            "/",
            get(handlers::properties::list_properties).post(handlers::properties::create_property),
        )
        .route(
            "/{id}",
            get(handlers::properties::get_property).put(handlers::properties::update_property),
        )
        .route("/{id}/status", put(handlers::properties::update_property_status))
        .route("/{id}/applications", get(handlers::properties::list_property_applications))
        .route("/{id}/tenancies", get(handlers::properties::list_property_tenancies))
        .route("/{id}/documents", get(handlers::properties::list_property_documents))
        .route("/{id}/incidents", get(handlers::properties::list_property_incidents));

    let application_routes = Router::new()
        .route("/", post(handlers::applications::create_application))
        .route("/mine", get(handlers::applications::list_my_applications))
        .route("/{id}/status", put(handlers::applications::update_application_status));

    let tenancy_routes = Router::new()
        .route("/", post(handlers::tenancies::create_tenancy))
        .route("/mine", get(handlers::tenancies::list_my_tenancies))
        .route("/active", get(handlers::tenancies::get_my_active_tenancy))
        .route("/{id}/end", put(handlers::tenancies::end_tenancy));

    let document_routes = Router::new()
        .route("/", post(handlers::documents::create_document))
        .route(
            "/{id}",
            get(handlers::documents::get_document).delete(handlers::documents::delete_document),
        );

    let message_routes = Router::new()
        .route("/", post(handlers::messages::send_message))
        .route("/conversation/{other}", get(handlers::messages::get_conversation))
        .route("/conversation/{other}/read", put(handlers::messages::mark_conversation_read))
        .route("/unread-count", get(handlers::messages::unread_count));

    let notification_routes = Router::new()
        .route("/", get(handlers::notifications::list_notifications))
        .route("/read-all", put(handlers::notifications::mark_all_read))
        .route("/{id}/read", put(handlers::notifications::mark_notification_read))
        .route("/{id}", delete(handlers::notifications::delete_notification));

    let incident_routes = Router::new()
        .route("/", post(handlers::incidents::create_incident))
        .route("/{id}", get(handlers::incidents::get_incident))
        .route("/{id}/status", put(handlers::incidents::transition_incident));

    // Tudo aqui exige um Bearer token válido
    let protected = Router::new()
        .nest("/users", user_routes)
        .nest("/properties", property_routes)
        .nest("/applications", application_routes)
        .nest("/tenancies", tenancy_routes)
        .nest("/documents", document_routes)
        .nest("/messages", message_routes)
        .nest("/notifications", notification_routes)
        .nest("/incidents", incident_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/properties/reference/{reference}",
            get(handlers::properties::get_by_reference),
        )
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .with_state(app_state)
}
