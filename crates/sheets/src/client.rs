//! Typed reqwest wrapper for the Google Sheets `values` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use certify_core::config::SourceConfig;
use certify_core::error::{CertifyError, Result};
use certify_core::lookup::GridSource;
use certify_core::models::grid::SheetGrid;
use reqwest::Url;
use tracing::debug;

use crate::models::ValueRange;

const GOOGLE_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Read-only HTTP client for one spreadsheet, authenticated by API key.
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    api_key: String,
}

impl SheetsClient {
    /// Create a new client for the given spreadsheet and API key.
    pub fn new(spreadsheet_id: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: GOOGLE_SHEETS_API_BASE.to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Build a client from the `[source]` section, applying its base URL and timeout.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.clone(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Override the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// `{base}/v4/spreadsheets/{id}/values/{sheet}`, with the sheet name as one encoded segment.
    fn values_url(&self, sheet: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            CertifyError::Config(format!("invalid Sheets base URL {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                CertifyError::Config(format!("Sheets base URL cannot take a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                sheet,
            ]);
        Ok(url)
    }

    /// Fetch every populated cell of `sheet`.
    pub async fn get_values(&self, sheet: &str) -> Result<ValueRange> {
        let url = self.values_url(sheet)?;
        debug!(sheet = %sheet, path = %url.path(), "fetching sheet values");

        let resp = self
            .http
            .get(url)
            .query(&[("key", &self.api_key)])
            .send()
            .await
            .map_err(|e| {
                CertifyError::Sheets(format!("values request failed: {}", e.without_url()))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(CertifyError::Sheets(format!(
                "values request failed ({status}): {body}"
            )));
        }

        resp.json::<ValueRange>()
            .await
            .map_err(|e| CertifyError::Sheets(format!("values parse failed: {}", e.without_url())))
    }
}

#[async_trait]
impl GridSource for SheetsClient {
    async fn fetch_grid(&self, sheet: &str) -> Result<SheetGrid> {
        let range = self.get_values(sheet).await?;
        if range.values.is_none() {
            debug!(sheet = %sheet, "response carried no values");
        }
        Ok(range.into_grid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, SheetsClient) {
        let server = MockServer::start().await;
        let client = SheetsClient::new("sheet-123", "test-key").with_base_url(&server.uri());
        (server, client)
    }

    #[tokio::test]
    async fn get_values_success() {
        let (server, client) = setup().await;

        let response_body = serde_json::json!({
            "range": "Sheet1!A1:D2",
            "majorDimension": "ROWS",
            "values": [
                ["C.ID", "Name", "Course", "Date"],
                ["S001", "Asha", "Data Science", "2024-01-10"]
            ]
        });

        Mock::given(method("GET"))
            .and(path("/v4/spreadsheets/sheet-123/values/Sheet1"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .expect(1)
            .mount(&server)
            .await;

        let range = client.get_values("Sheet1").await.unwrap();
        let values = range.values.unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1][1], "Asha");
    }

    #[tokio::test]
    async fn fetch_grid_returns_rows() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v4/spreadsheets/sheet-123/values/FS_Workshop"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "values": [["ID", "Name"], ["A1", "Ravi"], ["A2"]]
            })))
            .mount(&server)
            .await;

        let grid = client.fetch_grid("FS_Workshop").await.unwrap();
        assert_eq!(grid.len(), 3);
        let (header, rows) = grid.header_and_rows().unwrap();
        assert_eq!(header, ["ID", "Name"]);
        assert_eq!(rows[1], vec!["A2".to_string()]);
    }

    #[tokio::test]
    async fn missing_values_yield_empty_grid() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v4/spreadsheets/sheet-123/values/Sheet1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "Sheet1!A1:Z1000",
                "majorDimension": "ROWS"
            })))
            .mount(&server)
            .await;

        let grid = client.fetch_grid("Sheet1").await.unwrap();
        assert!(grid.is_empty());
    }

    #[tokio::test]
    async fn forbidden_is_an_error() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v4/spreadsheets/sheet-123/values/Sheet1"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = client.get_values("Sheet1").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("API key not valid"));
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v4/spreadsheets/sheet-123/values/Sheet1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client.fetch_grid("Sheet1").await.unwrap_err();
        assert!(err.to_string().contains("values parse failed"));
    }

    #[tokio::test]
    async fn connection_failure_is_an_error() {
        let client = SheetsClient::new("sheet-123", "test-key").with_base_url("http://127.0.0.1:1");
        let err = client.get_values("Sheet1").await.unwrap_err();
        assert!(matches!(err, CertifyError::Sheets(_)));
    }

    #[tokio::test]
    async fn connection_failure_does_not_expose_api_key() {
        let client =
            SheetsClient::new("sheet-123", "SECRET-KEY").with_base_url("http://127.0.0.1:1");
        let err = client.fetch_grid("Sheet1").await.unwrap_err();
        assert!(!err.to_string().contains("SECRET-KEY"));

        let logged = certify_core::error::LookupError::from(err).to_string();
        assert!(logged.starts_with("network failure"));
        assert!(!logged.contains("SECRET-KEY"));
    }

    #[tokio::test]
    async fn parse_failure_does_not_expose_api_key() {
        let server = MockServer::start().await;
        let client = SheetsClient::new("sheet-123", "SECRET-KEY").with_base_url(&server.uri());

        Mock::given(method("GET"))
            .and(path("/v4/spreadsheets/sheet-123/values/Sheet1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client.get_values("Sheet1").await.unwrap_err();
        assert!(err.to_string().contains("values parse failed"));
        assert!(!err.to_string().contains("SECRET-KEY"));
    }

    #[tokio::test]
    async fn from_config_uses_base_url() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/spreadsheets/cfg-sheet/values/Sheet1"))
            .and(query_param("key", "cfg-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "values": [["C.ID"], ["S001"]]
            })))
            .mount(&server)
            .await;

        let config = SourceConfig {
            spreadsheet_id: "cfg-sheet".into(),
            api_key: "cfg-key".into(),
            base_url: format!("{}/", server.uri()),
            timeout_secs: Some(5),
        };
        let client = SheetsClient::from_config(&config).unwrap();
        let grid = client.fetch_grid("Sheet1").await.unwrap();
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn values_url_encodes_sheet_name() {
        let client = SheetsClient::new("sheet-123", "k");
        let url = client.values_url("FS Workshop/2024").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/FS%20Workshop%2F2024"
        );
    }

    #[test]
    fn values_url_rejects_invalid_base() {
        let client = SheetsClient::new("sheet-123", "k").with_base_url("not a url");
        assert!(matches!(client.values_url("Sheet1"), Err(CertifyError::Config(_))));
    }
}
