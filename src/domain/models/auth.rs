use serde::{Deserialize, Serialize};

pub const SESSION_AUDIENCE: &str = "seminar-admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,

    #[serde(rename = "https://seminar.local/claims/email")]
    pub email: String,

    #[serde(rename = "https://seminar.local/claims/csrf")]
    pub csrf_token: String,
}

/// The admin behind a verified session cookie.
#[derive(Debug, Clone)]
pub struct AdminPrincipal {
    pub id: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub csrf_token: String,
    pub admin: AdminProfile,
}

#[derive(Serialize)]
pub struct AdminProfile {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}
