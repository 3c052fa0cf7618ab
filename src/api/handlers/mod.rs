pub mod auth;
pub mod export;
pub mod health;
pub mod registration;
pub mod seed;
pub mod seminar;
pub mod upload;
