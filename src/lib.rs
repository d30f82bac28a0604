pub mod app;
pub mod chat;
pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod maintenance;
pub mod middleware;
pub mod models;
pub mod services;
