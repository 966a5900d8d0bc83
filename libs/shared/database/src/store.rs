use std::marker::PhantomData;

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::sheets::SheetsClient;

/// Positional mapping between a domain record and one spreadsheet row.
///
/// Row 1 of every tab is the header; data starts at row 2. A record's row is
/// found by scanning the whole tab and matching on id, since the sheet has no
/// index.
pub trait SheetRecord: Sized + Send + Sync {
    const KIND: &'static str;
    const ID_PREFIX: &'static str;
    const LAST_COLUMN: char;
    const HEADER: &'static [&'static str];

    /// Total: short rows and missing cells fall back to field defaults.
    fn from_row(row: &[String]) -> Self;
    fn to_row(&self) -> Vec<String>;
    fn id(&self) -> &str;
    fn owner_id(&self) -> &str;
}

pub fn generate_record_id(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

pub fn cell(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

/// Empty cells read back as `None`.
pub fn optional_cell(row: &[String], index: usize) -> Option<String> {
    let value = cell(row, index);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn optional_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Pseudo-CRUD over one spreadsheet tab: create is an append, read is a
/// full-range fetch plus owner filter, update overwrites a located row's
/// range, delete blanks it. No locking and no transactions; the row layout
/// must not change between a locating scan and the write that follows it.
pub struct SheetStore<T> {
    client: SheetsClient,
    tab: String,
    _record: PhantomData<T>,
}

impl<T: SheetRecord> SheetStore<T> {
    pub fn new(client: SheetsClient, tab: impl Into<String>) -> Self {
        Self {
            client,
            tab: tab.into(),
            _record: PhantomData,
        }
    }

    fn header_range(&self) -> String {
        format!("{}!A1:{}1", self.tab, T::LAST_COLUMN)
    }

    fn table_range(&self) -> String {
        format!("{}!A:{}", self.tab, T::LAST_COLUMN)
    }

    fn row_range(&self, row: usize) -> String {
        format!("{}!A{}:{}{}", self.tab, row, T::LAST_COLUMN, row)
    }

    /// Writes the canonical header row when the header range is empty.
    /// Idempotent. A failed probe is treated the same as a missing header,
    /// so a transient read error costs one harmless header rewrite.
    pub async fn ensure_headers(&self) -> Result<(), StoreError> {
        let present = match self.client.get_values(&self.header_range()).await {
            Ok(rows) => rows.first().map_or(false, |row| !row.is_empty()),
            Err(err) => {
                warn!("Header probe for {} failed: {}", self.tab, err);
                false
            }
        };

        if !present {
            debug!("Writing header row to {}", self.tab);
            let header = T::HEADER.iter().map(|h| h.to_string()).collect();
            self.client
                .update_values(&self.header_range(), vec![header])
                .await?;
        }

        Ok(())
    }

    /// One full-range fetch, then an in-memory owner filter. O(table size)
    /// per call; there is no pagination. Cleared rows survive as blank gaps
    /// and are skipped here.
    pub async fn list(&self, owner_id: &str) -> Result<Vec<T>, StoreError> {
        let rows = self.client.get_values(&self.table_range()).await?;
        Ok(rows
            .iter()
            .skip(1)
            .filter(|row| row.iter().any(|value| !value.is_empty()))
            .map(|row| T::from_row(row))
            .filter(|record| record.owner_id() == owner_id)
            .collect())
    }

    /// Sheet rows are 1-based and row 1 is the header, so the data row at
    /// scan position i lives at sheet row i + 2.
    async fn locate(&self, id: &str, owner_id: &str) -> Result<(usize, T), StoreError> {
        let rows = self.client.get_values(&self.table_range()).await?;
        for (position, row) in rows.iter().skip(1).enumerate() {
            let record = T::from_row(row);
            if record.id() == id && record.owner_id() == owner_id {
                return Ok((position + 2, record));
            }
        }
        Err(StoreError::NotFound(format!("{} {}", T::KIND, id)))
    }

    pub async fn append(&self, record: &T) -> Result<(), StoreError> {
        self.client
            .append_values(&self.table_range(), vec![record.to_row()])
            .await
    }

    /// Locate by scan, merge, overwrite exactly that row's range.
    pub async fn update_with<F>(
        &self,
        id: &str,
        owner_id: &str,
        merge: F,
    ) -> Result<T, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let (row, mut record) = self.locate(id, owner_id).await?;
        merge(&mut record);
        self.client
            .update_values(&self.row_range(row), vec![record.to_row()])
            .await?;
        Ok(record)
    }

    /// Locate by scan, then blank the row. The gap persists; deleting an id
    /// that is already gone fails with NotFound.
    pub async fn delete(&self, id: &str, owner_id: &str) -> Result<(), StoreError> {
        let (row, _) = self.locate(id, owner_id).await?;
        self.client.clear_values(&self.row_range(row)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::CredentialProvider;
    use shared_config::AppConfig;
    use std::sync::Arc;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, PartialEq)]
    struct Note {
        id: String,
        body: String,
        owner_id: String,
    }

    impl SheetRecord for Note {
        const KIND: &'static str = "note";
        const ID_PREFIX: &'static str = "note";
        const LAST_COLUMN: char = 'C';
        const HEADER: &'static [&'static str] = &["ID", "Body", "Owner ID"];

        fn from_row(row: &[String]) -> Self {
            Self {
                id: cell(row, 0),
                body: cell(row, 1),
                owner_id: cell(row, 2),
            }
        }

        fn to_row(&self) -> Vec<String> {
            vec![self.id.clone(), self.body.clone(), self.owner_id.clone()]
        }

        fn id(&self) -> &str {
            &self.id
        }

        fn owner_id(&self) -> &str {
            &self.owner_id
        }
    }

    struct TestKey;

    impl CredentialProvider for TestKey {
        fn api_key(&self) -> String {
            "test-key".to_string()
        }
    }

    fn store(base_url: &str) -> SheetStore<Note> {
        let config = AppConfig {
            sheets_api_base_url: base_url.to_string(),
            spreadsheet_id: "sheet-1".to_string(),
            sheets_api_key: "test-key".to_string(),
            appointments_tab: "Appointments".to_string(),
            patients_tab: "Patients".to_string(),
            jwt_secret: "test-secret".to_string(),
        };
        SheetStore::new(SheetsClient::new(&config, Arc::new(TestKey)), "Notes")
    }

    #[test]
    fn ranges_address_the_tab_by_column_letters() {
        let store = store("http://localhost");
        assert_eq!(store.header_range(), "Notes!A1:C1");
        assert_eq!(store.table_range(), "Notes!A:C");
        assert_eq!(store.row_range(7), "Notes!A7:C7");
    }

    #[test]
    fn record_ids_carry_prefix_timestamp_and_suffix() {
        let id = generate_record_id("apt");
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "apt");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn ensure_headers_writes_the_canonical_row_when_the_probe_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/values/Notes%21A1%3AC1$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "Notes!A1:C1",
                "majorDimension": "ROWS"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path_regex(r"/values/Notes%21A1%3AC1$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "updatedCells": 3
            })))
            .expect(1)
            .mount(&server)
            .await;

        store(&server.uri()).ensure_headers().await.unwrap();
    }

    #[tokio::test]
    async fn ensure_headers_leaves_a_populated_header_alone() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/values/Notes%21A1%3AC1$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "Notes!A1:C1",
                "majorDimension": "ROWS",
                "values": [["ID", "Body", "Owner ID"]]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        store(&server.uri()).ensure_headers().await.unwrap();
    }

    #[tokio::test]
    async fn ensure_headers_rewrites_the_header_when_the_read_fails() {
        let server = MockServer::start().await;
        // A failed header read is treated the same as a missing header, so
        // exactly one canonical header rewrite must follow.
        Mock::given(method("GET"))
            .and(path_regex(r"/values/Notes%21A1%3AC1$"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": { "code": 500, "message": "Internal error" }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path_regex(r"/values/Notes%21A1%3AC1$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "updatedCells": 3
            })))
            .expect(1)
            .mount(&server)
            .await;

        store(&server.uri()).ensure_headers().await.unwrap();
    }

    #[tokio::test]
    async fn a_cleared_row_reads_as_a_gap_not_a_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/values/Notes%21A%3AC$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "Notes!A:C",
                "majorDimension": "ROWS",
                "values": [
                    ["ID", "Body", "Owner ID"],
                    ["note_1", "first", "user-a"],
                    ["", "", ""],
                    ["note_3", "third", "user-a"]
                ]
            })))
            .mount(&server)
            .await;

        let notes = store(&server.uri()).list("user-a").await.unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, "note_1");
        assert_eq!(notes[1].id, "note_3");
    }

    #[tokio::test]
    async fn locate_accounts_for_the_header_row_offset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/values/Notes%21A%3AC$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "Notes!A:C",
                "majorDimension": "ROWS",
                "values": [
                    ["ID", "Body", "Owner ID"],
                    ["note_1", "first", "user-a"],
                    ["note_2", "second", "user-a"]
                ]
            })))
            .mount(&server)
            .await;
        // note_2 is the second data row, so the clear must hit sheet row 3.
        Mock::given(method("POST"))
            .and(path_regex(r"/values/Notes%21A3%3AC3:clear$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "clearedRange": "Notes!A3:C3"
            })))
            .expect(1)
            .mount(&server)
            .await;

        store(&server.uri()).delete("note_2", "user-a").await.unwrap();
    }
}
