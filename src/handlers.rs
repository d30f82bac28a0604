pub mod auth;
pub mod properties;
pub mod applications;
pub mod tenancies;
pub mod documents;
pub mod messages;
pub mod notifications;
pub mod incidents;
