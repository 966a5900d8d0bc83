use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub jwt_secret: String,
    pub sheets_api_base_url: String,
    pub spreadsheet_id: String,
    pub sheets_api_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            sheets_api_base_url: "http://localhost:4010".to_string(),
            spreadsheet_id: "test-spreadsheet".to_string(),
            sheets_api_key: "test-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            sheets_api_base_url: self.sheets_api_base_url.clone(),
            spreadsheet_id: self.spreadsheet_id.clone(),
            sheets_api_key: self.sheets_api_key.clone(),
            appointments_tab: "Appointments".to_string(),
            patients_tab: "Patients".to_string(),
            jwt_secret: self.jwt_secret.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "receptionist".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn receptionist(email: &str) -> Self {
        Self::new(email, "receptionist")
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, "admin")
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    /// Mints an HS256 token compatible with `jwt::validate_token`. Negative
    /// `hours_valid` produces an already-expired token.
    pub fn create_test_token(user: &TestUser, secret: &str, hours_valid: Option<i64>) -> String {
        let header = json!({ "alg": "HS256", "typ": "JWT" });
        let claims = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "iat": Utc::now().timestamp(),
            "exp": hours_valid.map(|h| (Utc::now() + Duration::hours(h)).timestamp()),
        });

        let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string());
        let claims_b64 = URL_SAFE_NO_PAD.encode(claims.to_string());
        let signing_input = format!("{}.{}", header_b64, claims_b64);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{}.{}", signing_input, signature)
    }
}
