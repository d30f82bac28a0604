pub mod admin;
pub mod export;
