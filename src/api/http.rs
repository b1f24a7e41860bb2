//! Production `AnalyticsApi` over HTTP. The reqwest client and the token
//! provider are both injected at construction.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::alert::AlertBuckets;
use crate::models::drilldown::DrillDownOption;
use crate::models::kpi::DailyKpis;
use crate::query::{ChartQuery, DrillDownQuery};

use super::wire::{FilteredResponse, RawRecord};
use super::AnalyticsApi;

/// Supplies the bearer token attached to each request. Kept as a trait so
/// the auth context stays outside the engine.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed token, for service accounts and tests.
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// No authentication header at all.
pub struct NoAuth;

impl TokenProvider for NoAuth {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// HTTP client for the analytics backend.
pub struct HttpAnalyticsApi {
    base_url: String,
    client: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpAnalyticsApi {
    /// Wraps an existing reqwest client. The caller owns connection
    /// pooling and timeout policy.
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            tokens,
        }
    }

    /// Builds a client from engine configuration, applying the configured
    /// per-request timeout.
    pub fn from_config(
        config: &EngineConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| EngineError::HttpClient(e.to_string()))?;
        Ok(Self::new(client, &config.base_url, tokens))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, EngineError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.get(&url).query(params);
        if let Some(token) = self.tokens.bearer_token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                EngineError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                EngineError::HttpClient(format!("Request to {path} timed out"))
            } else {
                EngineError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| EngineError::ResponseParsing(e.to_string()))
    }
}

#[async_trait]
impl AnalyticsApi for HttpAnalyticsApi {
    async fn fetch_filtered(&self, query: &ChartQuery) -> Result<Vec<RawRecord>, EngineError> {
        let params = query.params()?;
        let response: FilteredResponse = self.get_json(&query.endpoint_path(), &params).await?;
        Ok(response.into_rows())
    }

    async fn fetch_daily_kpis(&self, query: &ChartQuery) -> Result<DailyKpis, EngineError> {
        let params = query.kpi_params()?;
        self.get_json("/analytics/kpis/daily", &params).await
    }

    async fn fetch_alerts(&self) -> Result<AlertBuckets, EngineError> {
        self.get_json("/analytics/alerts", &[]).await
    }

    async fn fetch_drill_down_options(
        &self,
        query: &DrillDownQuery,
    ) -> Result<Vec<DrillDownOption>, EngineError> {
        let params = query.params()?;
        self.get_json("/analytics/drill-down", &params).await
    }
}
