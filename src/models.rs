pub mod auth;
pub mod property;
pub mod application;
pub mod tenancy;
pub mod document;
pub mod message;
pub mod notification;
pub mod incident;
