use std::sync::Arc;
use crate::domain::ports::{
    AdminRepository, ObjectStorage, RegistrationRepository, SeminarRepository, SpreadsheetRenderer,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub admin_repo: Arc<dyn AdminRepository>,
    pub seminar_repo: Arc<dyn SeminarRepository>,
    pub registration_repo: Arc<dyn RegistrationRepository>,
    pub auth_service: Arc<AuthService>,
    pub storage: Arc<dyn ObjectStorage>,
    pub spreadsheet: Arc<dyn SpreadsheetRenderer>,
}
