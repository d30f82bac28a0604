pub mod auth;
pub use auth::AuthService;
pub mod user_service;
pub use user_service::UserService;
pub mod property_service;
pub use property_service::PropertyService;
pub mod application_service;
pub use application_service::ApplicationService;
pub mod tenancy_service;
pub use tenancy_service::{NewTenancy, TenancyService};
pub mod document_service;
pub use document_service::DocumentService;
pub mod message_service;
pub use message_service::MessageService;
pub mod notification_service;
pub use notification_service::NotificationService;
pub mod incident_service;
pub use incident_service::IncidentService;
