use std::sync::Arc;

use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};
use urlencoding::encode;

use shared_config::AppConfig;

use crate::error::StoreError;

/// Supplies the API key appended to every outbound call, so call sites never
/// handle the raw secret.
pub trait CredentialProvider: Send + Sync {
    fn api_key(&self) -> String;
}

/// Key sourced from application configuration.
pub struct ConfigKey {
    key: String,
}

impl ConfigKey {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            key: config.sheets_api_key.clone(),
        }
    }
}

impl CredentialProvider for ConfigKey {
    fn api_key(&self) -> String {
        self.key.clone()
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ConnectionStatus {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// Thin client over the Sheets values API. One attempt per call, no retry;
/// timeouts are whatever the transport defaults to.
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl SheetsClient {
    pub fn new(config: &AppConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.sheets_api_base_url.clone(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            credentials,
        }
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}{}",
            self.base_url,
            self.spreadsheet_id,
            encode(range),
            suffix
        )
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        params: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Response, StoreError> {
        if self.spreadsheet_id.is_empty() {
            return Err(StoreError::MissingSpreadsheetId);
        }

        debug!("Sheets request: {} {}", method, url);

        let key = self.credentials.api_key();
        let mut req = self
            .client
            .request(method, &url)
            .query(&[("key", key.as_str())])
            .query(params);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        // reqwest errors echo the request URL, key included; strip it so the
        // credential never reaches logs or response bodies.
        let response = req
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| {
                    v.pointer("/error/message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or(text);
            error!("Sheets API error ({}): {}", status, message);

            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    /// Range read. An absent `values` key means the range is empty.
    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let url = self.values_url(range, "");
        let response = self.send(Method::GET, url, &[], None).await?;
        let parsed: ValueRange = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.without_url().to_string()))?;
        Ok(parsed.values)
    }

    /// Overwrites exactly the addressed range.
    pub async fn update_values(
        &self,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), StoreError> {
        let url = self.values_url(range, "");
        self.send(
            Method::PUT,
            url,
            &[("valueInputOption", "RAW")],
            Some(json!({ "values": rows })),
        )
        .await?;
        Ok(())
    }

    /// Append-mode write; the server picks the row number.
    pub async fn append_values(
        &self,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), StoreError> {
        let url = self.values_url(range, ":append");
        self.send(
            Method::POST,
            url,
            &[("valueInputOption", "RAW")],
            Some(json!({ "values": rows })),
        )
        .await?;
        Ok(())
    }

    /// Blanks the addressed cells. The row itself is not removed.
    pub async fn clear_values(&self, range: &str) -> Result<(), StoreError> {
        let url = self.values_url(range, ":clear");
        self.send(Method::POST, url, &[], Some(json!({}))).await?;
        Ok(())
    }

    pub async fn spreadsheet_metadata(&self) -> Result<Value, StoreError> {
        let url = format!("{}/spreadsheets/{}", self.base_url, self.spreadsheet_id);
        let response = self.send(Method::GET, url, &[], None).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.without_url().to_string()))
    }

    /// Configuration is checked before any network call; the probe succeeds
    /// only when the response carries recognizable spreadsheet metadata.
    pub async fn test_connection(&self) -> ConnectionStatus {
        if self.spreadsheet_id.is_empty() {
            return ConnectionStatus::failed(StoreError::MissingSpreadsheetId.to_string());
        }

        match self.spreadsheet_metadata().await {
            Ok(meta) if meta.get("sheets").map_or(false, Value::is_array) => ConnectionStatus::ok(),
            Ok(_) => ConnectionStatus::failed("Response did not contain spreadsheet metadata"),
            Err(StoreError::Api { status: 404, .. }) => {
                ConnectionStatus::failed("Spreadsheet not found - check the spreadsheet ID")
            }
            Err(StoreError::Api { status: 403, .. }) => {
                ConnectionStatus::failed("Access denied - check the API key and sheet sharing")
            }
            Err(StoreError::Api { status: 400, .. }) => {
                ConnectionStatus::failed("Bad request - the spreadsheet ID looks malformed")
            }
            Err(err) => ConnectionStatus::failed(err.to_string()),
        }
    }
}
