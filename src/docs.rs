// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::update_me,
        handlers::auth::update_notification_preferences,

        // --- Properties ---
        handlers::properties::list_properties,
        handlers::properties::create_property,
        handlers::properties::get_property,
        handlers::properties::get_by_reference,
        handlers::properties::update_property,
        handlers::properties::update_property_status,
        handlers::properties::list_property_applications,
        handlers::properties::list_property_tenancies,
        handlers::properties::list_property_documents,
        handlers::properties::list_property_incidents,

        // --- Applications ---
        handlers::applications::create_application,
        handlers::applications::list_my_applications,
        handlers::applications::update_application_status,

        // --- Tenancies ---
        handlers::tenancies::create_tenancy,
        handlers::tenancies::list_my_tenancies,
        handlers::tenancies::get_my_active_tenancy,
        handlers::tenancies::end_tenancy,

        // --- Documents ---
        handlers::documents::create_document,
        handlers::documents::get_document,
        handlers::documents::delete_document,

        // --- Messages ---
        handlers::messages::send_message,
        handlers::messages::get_conversation,
        handlers::messages::mark_conversation_read,
        handlers::messages::unread_count,

        // --- Notifications ---
        handlers::notifications::list_notifications,
        handlers::notifications::mark_notification_read,
        handlers::notifications::mark_all_read,
        handlers::notifications::delete_notification,

        // --- Incidents ---
        handlers::incidents::create_incident,
        handlers::incidents::get_incident,
        handlers::incidents::transition_incident,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::NotificationPreferences,
            models::auth::UserProfile,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::UpdateUserPayload,
            models::auth::AuthResponse,

            // --- Properties ---
            models::property::PropertyStatus,
            models::property::PropertyType,
            models::property::EnergyClass,
            models::property::TenantCriteria,
            models::property::Property,
            models::property::CreatePropertyPayload,
            models::property::UpdatePropertyPayload,
            models::property::UpdatePropertyStatusPayload,

            // --- Applications ---
            models::application::ApplicationStatus,
            models::application::Application,
            models::application::CreateApplicationPayload,
            models::application::UpdateApplicationStatusPayload,

            // --- Tenancies ---
            models::tenancy::TenancyStatus,
            models::tenancy::Tenancy,
            models::tenancy::CreateTenancyPayload,
            models::tenancy::EndTenancyPayload,

            // --- Documents ---
            models::document::DocumentType,
            models::document::Document,
            models::document::CreateDocumentPayload,

            // --- Messages ---
            models::message::Message,
            models::message::SendMessagePayload,
            models::message::UnreadCount,

            // --- Notifications ---
            models::notification::NotificationType,
            models::notification::Notification,

            // --- Incidents ---
            models::incident::IncidentRoom,
            models::incident::IncidentType,
            models::incident::IncidentStatus,
            models::incident::Incident,
            models::incident::CreateIncidentPayload,
            models::incident::TransitionIncidentPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Preferências"),
        (name = "Properties", description = "Imóveis para locação"),
        (name = "Applications", description = "Candidaturas dos inquilinos"),
        (name = "Tenancies", description = "Contratos de locação"),
        (name = "Documents", description = "Documentos anexados"),
        (name = "Messages", description = "Mensagens entre usuários"),
        (name = "Notifications", description = "Notificações do usuário"),
        (name = "Incidents", description = "Ocorrências e manutenção")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
