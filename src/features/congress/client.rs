use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::warn;

use crate::config::AppConfig;
use crate::core::error::AppError;
use crate::features::bills::{BillRecord, DetailedBillRecord};
use crate::features::categorize::KeywordCategorizer;
use crate::features::congress::helpers::{map_bill, map_detail};

/// Boundary trait over the upstream legislative-data API, so services and
/// handlers can run against a mock source in tests.
#[async_trait]
pub trait BillSource: Send + Sync {
    async fn fetch_recent(&self, limit: u32) -> Result<Vec<BillRecord>, AppError>;
    async fn fetch_detail(&self, id: &str) -> Result<Option<DetailedBillRecord>, AppError>;
}

pub struct CongressClient {
    config: Arc<AppConfig>,
    http_client: reqwest::Client,
    categorizer: KeywordCategorizer,
}

impl CongressClient {
    pub fn new(config: Arc<AppConfig>, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
            categorizer: KeywordCategorizer::new(),
        }
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(&format!("{}/{path}", self.config.congress_api_base))
            .map_err(|err| AppError::internal(format!("invalid congress url: {err}")))?;

        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("api_key", &self.config.congress_api_key);

        Ok(url)
    }
}

#[async_trait]
impl BillSource for CongressClient {
    async fn fetch_recent(&self, limit: u32) -> Result<Vec<BillRecord>, AppError> {
        let mut url = self.endpoint_url("bill")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        // The api_key travels in the query string, so error text names the
        // endpoint rather than the full url.
        let payload = get_json(&self.http_client, url, "bill").await?;

        let now = Utc::now();
        let mut records = Vec::new();
        for entry in payload
            .get("bills")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            match map_bill(entry, &self.categorizer, now) {
                Some(record) => records.push(record),
                None => warn!(target: "congress", "skipping upstream entry without a bill number"),
            }
        }

        Ok(records)
    }

    async fn fetch_detail(&self, id: &str) -> Result<Option<DetailedBillRecord>, AppError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(AppError::bad_request("bill id must not be empty".to_string()));
        }

        let url = self.endpoint_url(&format!("bill/{trimmed}"))?;
        let endpoint = format!("bill/{trimmed}");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|err| AppError::upstream(format!("network error contacting {endpoint}: {err}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "request to {endpoint} failed with {}",
                response.status()
            )));
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|err| AppError::internal(format!("failed to parse response json: {err}")))?;

        let Some(entry) = payload.get("bill") else {
            return Ok(None);
        };

        match map_detail(entry, &self.categorizer, Utc::now()) {
            Some(detail) => Ok(Some(detail)),
            None => {
                warn!(target: "congress", bill_id = trimmed, "upstream detail carried no bill number");
                Ok(None)
            }
        }
    }
}

async fn get_json(
    http_client: &reqwest::Client,
    url: Url,
    endpoint: &str,
) -> Result<Value, AppError> {
    let response = http_client
        .get(url)
        .send()
        .await
        .map_err(|err| AppError::upstream(format!("network error contacting {endpoint}: {err}")))?;

    if !response.status().is_success() {
        return Err(AppError::upstream(format!(
            "request to {endpoint} failed with {}",
            response.status()
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|err| AppError::internal(format!("failed to parse response json: {err}")))
}
