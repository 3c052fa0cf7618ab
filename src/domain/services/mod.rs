pub mod auth_service;
pub mod capacity;
pub mod export;
pub mod image;
pub mod registration_guard;
pub mod slug;
pub mod validation;
