pub mod admin;
pub mod auth;
pub mod export;
pub mod registration;
pub mod seminar;
pub mod spreadsheet;
pub mod upload;
