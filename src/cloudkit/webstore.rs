use reqwest::Client;
use serde_json::{Value, json};

use crate::LogLevel;
use crate::cloudkit::error::StoreError;
use crate::cloudkit::kind::EntityKind;
use crate::cloudkit::parse::{parse_modify_response, parse_query_response, record_to_fields};
use crate::cloudkit::record::Record;
use crate::cloudkit::remoteclient::{FetchedRecord, RemoteStore};

const DEFAULT_BASE_URL: &str = "https://api.apple-cloudkit.com";
const DEFAULT_ZONE: &str = "_defaultZone";

/// Remote store adapter for the CloudKit Web Services public database.
///
/// Authenticates with a CloudKit API token passed as a query parameter.
/// Timeouts and connection reuse are reqwest defaults; no retries.
pub struct CloudKitWebStore {
    client: Client,
    base_url: String,
    container: String,
    environment: String,
    api_token: String,
    log_level: LogLevel,
}

impl CloudKitWebStore {
    /// Create a store for the given container and environment against the
    /// public CloudKit endpoint.
    pub fn new(container: &str, environment: &str, api_token: &str, log_level: LogLevel) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, container, environment, api_token, log_level)
    }

    /// Create a store against a custom endpoint.
    pub fn with_base_url(
        base_url: &str,
        container: &str,
        environment: &str,
        api_token: &str,
        log_level: LogLevel,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            container: container.to_string(),
            environment: environment.to_string(),
            api_token: api_token.to_string(),
            log_level,
        }
    }

    fn records_url(&self, operation: &str) -> String {
        format!(
            "{}/database/1/{}/{}/public/records/{}?ckAPIToken={}",
            self.base_url,
            self.container,
            self.environment,
            operation,
            urlencoding::encode(&self.api_token)
        )
    }

    async fn post(&self, operation: &str, body: Value) -> Result<Value, StoreError> {
        let url = self.records_url(operation);

        if matches!(self.log_level, LogLevel::Debug) {
            println!("CloudKit operation: {}", operation);
            println!("Body: {}", body);
        }

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError(format!("Request failed: {e}")))?;

        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError(format!(
                "CloudKit API error ({}): {}",
                status, body
            )));
        }

        resp.json()
            .await
            .map_err(|e| StoreError(format!("Failed to parse JSON: {e}")))
    }
}

impl RemoteStore for CloudKitWebStore {
    async fn save(&self, record: Record) -> Result<(), StoreError> {
        let body = json!({
            "operations": [{
                "operationType": "create",
                "record": {
                    "recordType": record.kind().record_type(),
                    "fields": record_to_fields(&record),
                },
            }],
        });

        let json = self.post("modify", body).await?;
        parse_modify_response(&json)
    }

    async fn fetch(&self, kind: EntityKind) -> Result<Vec<FetchedRecord>, StoreError> {
        let body = json!({
            "zoneID": { "zoneName": DEFAULT_ZONE },
            "query": { "recordType": kind.record_type() },
        });

        let json = self.post("query", body).await?;
        parse_query_response(&json)
    }
}
