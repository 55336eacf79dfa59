//! Dashboard REST API Client
//!
//! Typed HTTP client for the dashboard endpoints. Each non-success response
//! maps to a fixed per-endpoint message; there is no retry.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::api::dto::{
    AggregatesResponse, DashboardMetricsResponse, HealthResponse, OrdersResponse,
    RealTimeDataResponse,
};

/// Deployment environment, selects the default base URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Environment::Development => "http://localhost:8000",
            Environment::Production => "https://priyanga.pythonanywhere.com",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Anything other than development selects production
impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Err("empty environment name".to_string()),
            "development" | "dev" => Ok(Environment::Development),
            _ => Ok(Environment::Production),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Client configuration (`[client]` section)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub environment: Environment,
    /// Explicit base URL, wins over the environment default
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            base_url: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ClientConfig {
    /// Resolved base URL without a trailing slash
    pub fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }
}

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("{message} (HTTP {status})")]
    Endpoint {
        message: &'static str,
        status: StatusCode,
    },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to decode response from {path}: {error}")]
    Decode { path: &'static str, error: String },
}

impl ClientError {
    /// The fixed endpoint message, if this is an endpoint failure
    pub fn endpoint_message(&self) -> Option<&'static str> {
        match self {
            ClientError::Endpoint { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// HTTP client for the dashboard API
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /orders
    pub async fn get_orders(&self) -> Result<OrdersResponse, ClientError> {
        self.fetch("/orders", "Failed to fetch orders").await
    }

    /// GET /aggregates
    pub async fn get_aggregates(&self) -> Result<AggregatesResponse, ClientError> {
        self.fetch("/aggregates", "Failed to fetch aggregates").await
    }

    /// GET /health
    pub async fn get_health(&self) -> Result<HealthResponse, ClientError> {
        self.fetch("/health", "Failed to fetch health status").await
    }

    /// GET /dashboard-metrics
    pub async fn get_dashboard_metrics(&self) -> Result<DashboardMetricsResponse, ClientError> {
        self.fetch("/dashboard-metrics", "Failed to fetch dashboard metrics")
            .await
    }

    /// GET /real-time-data
    pub async fn get_real_time_data(&self) -> Result<RealTimeDataResponse, ClientError> {
        self.fetch("/real-time-data", "Failed to fetch real-time data")
            .await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &'static str,
        message: &'static str,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "{}", message);
            return Err(ClientError::Endpoint { message, status });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
            path,
            error: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Aggregator, FixedSource, MetricsSource};
    use crate::api::{build_router, ApiConfig, AppState};
    use crate::orders::sample_orders;
    use crate::refresh::DashboardState;
    use axum::{http::StatusCode as AxumStatus, routing::get, Router};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn dashboard_router() -> Router {
        let source: Arc<dyn MetricsSource> = Arc::new(FixedSource::new(0.5));
        let aggregator = Aggregator::new(Arc::clone(&source));
        let dashboard = Arc::new(DashboardState::new(
            sample_orders(),
            &aggregator,
            source.as_ref(),
        ));
        build_router(AppState::new(dashboard, ApiConfig::default()))
    }

    fn client_for(base_url: String) -> DashboardClient {
        DashboardClient::new(&ClientConfig {
            base_url: Some(base_url),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_environment_base_urls() {
        assert_eq!(ClientConfig::default().base_url(), "http://localhost:8000");

        let prod = ClientConfig {
            environment: Environment::Production,
            ..ClientConfig::default()
        };
        assert_eq!(prod.base_url(), "https://priyanga.pythonanywhere.com");

        let explicit = ClientConfig {
            environment: Environment::Production,
            base_url: Some("http://10.0.0.5:9000/".to_string()),
            ..ClientConfig::default()
        };
        assert_eq!(explicit.base_url(), "http://10.0.0.5:9000");
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!("PROD".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("development".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("staging".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("test".parse::<Environment>(), Ok(Environment::Production));
        assert!("  ".parse::<Environment>().is_err());
        assert_eq!(Environment::Production.to_string(), "production");
    }

    #[tokio::test]
    async fn test_fetch_all_endpoints() {
        let client = client_for(spawn(dashboard_router()).await);

        let orders = client.get_orders().await.unwrap();
        assert_eq!(orders.total, 50);

        let aggregates = client.get_aggregates().await.unwrap();
        assert_eq!(aggregates.snapshot.summary.total_revenue, dec!(54276.34));

        let health = client.get_health().await.unwrap();
        assert_eq!(health.status, "healthy");

        let metrics = client.get_dashboard_metrics().await.unwrap();
        assert_eq!(metrics.display.order_count, "1,847");

        let realtime = client.get_real_time_data().await.unwrap();
        assert_eq!(realtime.series.data_quality.len(), 20);
    }

    #[tokio::test]
    async fn test_server_error_uses_fixed_message() {
        let failing = Router::new()
            .route("/orders", get(|| async { AxumStatus::INTERNAL_SERVER_ERROR }))
            .route("/health", get(|| async { AxumStatus::SERVICE_UNAVAILABLE }));
        let client = client_for(spawn(failing).await);

        let err = client.get_orders().await.unwrap_err();
        assert_eq!(err.endpoint_message(), Some("Failed to fetch orders"));
        assert!(err.to_string().contains("500"));

        let err = client.get_health().await.unwrap_err();
        assert_eq!(err.endpoint_message(), Some("Failed to fetch health status"));

        // Unrouted path comes back 404
        let err = client.get_aggregates().await.unwrap_err();
        assert_eq!(err.endpoint_message(), Some("Failed to fetch aggregates"));
    }

    #[tokio::test]
    async fn test_decode_error() {
        let garbage = Router::new().route("/real-time-data", get(|| async { "not json" }));
        let client = client_for(spawn(garbage).await);

        let err = client.get_real_time_data().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { path: "/real-time-data", .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}", addr));
        let err = client.get_orders().await.unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));
    }
}
