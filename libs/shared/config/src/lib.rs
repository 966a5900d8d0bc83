use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sheets_api_base_url: String,
    pub spreadsheet_id: String,
    pub sheets_api_key: String,
    pub appointments_tab: String,
    pub patients_tab: String,
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            sheets_api_base_url: env::var("SHEETS_API_BASE_URL")
                .unwrap_or_else(|_| "https://sheets.googleapis.com/v4".to_string()),
            spreadsheet_id: env::var("SHEETS_SPREADSHEET_ID")
                .unwrap_or_else(|_| {
                    warn!("SHEETS_SPREADSHEET_ID not set, using empty value");
                    String::new()
                }),
            sheets_api_key: env::var("SHEETS_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("SHEETS_API_KEY not set, using empty value");
                    String::new()
                }),
            appointments_tab: env::var("SHEETS_APPOINTMENTS_TAB")
                .unwrap_or_else(|_| "Appointments".to_string()),
            patients_tab: env::var("SHEETS_PATIENTS_TAB")
                .unwrap_or_else(|_| "Patients".to_string()),
            jwt_secret: env::var("APP_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("APP_JWT_SECRET not set, using empty value");
                    String::new()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.spreadsheet_id.is_empty()
            && !self.sheets_api_key.is_empty()
            && !self.jwt_secret.is_empty()
    }
}
