//! OpenDART API client with rate limiting.

use super::extract::LineItem;
use super::source::{CompanyProfile, FinancialSource};
use crate::error::{DataError, Result};
use crate::statement::Quarter;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

/// OpenDART API base URL
pub const DART_BASE_URL: &str = "https://opendart.fss.or.kr/api";

/// Status code OpenDART reports on success
const STATUS_OK: &str = "000";

/// Default spacing between requests
const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// Default HTTP timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`DartClient`].
#[derive(Clone)]
pub struct DartConfig {
    /// OpenDART API key (`crtfc_key`)
    pub api_key: String,
    /// Base URL of the API
    pub base_url: String,
    /// Minimum duration between requests
    pub min_interval: Duration,
    /// HTTP request timeout
    pub timeout: Duration,
}

impl DartConfig {
    /// Configuration with default endpoints and limits.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DART_BASE_URL.to_string(),
            min_interval: DEFAULT_RATE_LIMIT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the minimum interval between requests.
    pub const fn with_rate_limit(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for DartConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DartConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("min_interval", &self.min_interval)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Multi-account financial statement response (`fnlttMultiAcnt.json`)
#[derive(Debug, Deserialize)]
struct MultiAccountResponse {
    status: String,
    message: String,
    #[serde(default)]
    list: Option<Vec<LineItem>>,
}

/// Company overview response (`company.json`)
#[derive(Debug, Deserialize)]
struct CompanyResponse {
    status: String,
    message: String,
    #[serde(default)]
    corp_name: Option<String>,
    #[serde(default)]
    induty_code: Option<String>,
}

/// Rate limiter to keep requests spaced out
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// OpenDART API client with rate limiting
pub struct DartClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    config: DartConfig,
}

impl DartClient {
    /// Create a new client with default settings.
    ///
    /// # Errors
    ///
    /// Returns `DataError::MissingApiKey` for a blank key, or a network error
    /// if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(DartConfig::new(api_key))
    }

    /// Create a new client from an explicit configuration.
    ///
    /// # Example
    /// ```no_run
    /// use quarterly_data::dart::{DartClient, DartConfig};
    /// use std::time::Duration;
    ///
    /// # fn example() -> quarterly_data::Result<()> {
    /// // 5 requests per second
    /// let config = DartConfig::new("my-key").with_rate_limit(Duration::from_millis(200));
    /// let client = DartClient::with_config(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_config(config: DartConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(DataError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.min_interval))),
            config,
        })
    }

    /// Issue a GET against an endpoint and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        self.rate_limiter.lock().await.wait().await;

        let url = format!("{}/{}", self.config.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(&[("crtfc_key", self.config.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(DataError::Network)?;

        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "{} returned HTTP {}",
                endpoint,
                response.status()
            )));
        }

        let body = response.text().await.map_err(DataError::Network)?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Check that a corp code is the 8-digit form OpenDART expects.
///
/// # Errors
///
/// Returns `DataError::InvalidCorpCode` otherwise.
pub fn validate_corp_code(corp_code: &str) -> Result<()> {
    if corp_code.len() != 8 || !corp_code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DataError::InvalidCorpCode(corp_code.to_string()));
    }
    Ok(())
}

fn check_status(status: &str, message: &str) -> Result<()> {
    if status != STATUS_OK {
        return Err(DataError::DartApi {
            status: status.to_string(),
            message: message.to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl FinancialSource for DartClient {
    async fn fetch_period_figures(
        &self,
        corp_code: &str,
        fiscal_year: i32,
        quarter: Quarter,
    ) -> Result<Vec<LineItem>> {
        validate_corp_code(corp_code)?;

        let year = fiscal_year.to_string();
        tracing::debug!(corp_code, fiscal_year, %quarter, "fetching statement");

        let response: MultiAccountResponse = self
            .get_json(
                "fnlttMultiAcnt.json",
                &[
                    ("corp_code", corp_code),
                    ("bsns_year", &year),
                    ("reprt_code", quarter.report_code()),
                ],
            )
            .await?;

        check_status(&response.status, &response.message)?;

        match response.list {
            Some(list) if !list.is_empty() => Ok(list),
            _ => Err(DataError::MissingData {
                corp_code: corp_code.to_string(),
                reason: format!("no line items for {} {}", fiscal_year, quarter),
            }),
        }
    }

    async fn fetch_company_profile(&self, corp_code: &str) -> Result<CompanyProfile> {
        validate_corp_code(corp_code)?;

        let response: CompanyResponse = self
            .get_json("company.json", &[("corp_code", corp_code)])
            .await?;

        check_status(&response.status, &response.message)?;

        Ok(CompanyProfile {
            industry_code: response.induty_code.filter(|c| !c.trim().is_empty()),
            display_name: response.corp_name.unwrap_or_default(),
        })
    }
}

impl std::fmt::Debug for DartClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DartClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_rejected() {
        let result = DartClient::new("   ");
        assert!(matches!(result, Err(DataError::MissingApiKey)));
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = DartConfig::new("secret-key");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains(DART_BASE_URL));
    }

    #[tokio::test]
    async fn test_requests_go_to_configured_base_url() {
        // Nothing listens on the discard port.
        let config = DartConfig::new("key")
            .with_base_url("http://127.0.0.1:9/api")
            .with_rate_limit(Duration::ZERO);
        let client = DartClient::with_config(config).unwrap();

        assert!(format!("{:?}", client).contains("127.0.0.1:9"));
        let result = client.fetch_period_figures("00126380", 2024, Quarter::Q1).await;
        assert!(matches!(result, Err(DataError::Network(_))));
    }

    #[tokio::test]
    async fn test_bad_corp_code_rejected_before_request() {
        let config = DartConfig::new("key").with_base_url("http://127.0.0.1:9/api");
        let client = DartClient::with_config(config).unwrap();

        let result = client.fetch_company_profile("123").await;
        assert!(matches!(result, Err(DataError::InvalidCorpCode(_))));
    }

    #[test]
    fn test_validate_corp_code() {
        assert!(validate_corp_code("00126380").is_ok());
        assert!(matches!(
            validate_corp_code("126380"),
            Err(DataError::InvalidCorpCode(_))
        ));
        assert!(validate_corp_code("0012638a").is_err());
    }

    #[test]
    fn test_check_status() {
        assert!(check_status("000", "정상").is_ok());
        let err = check_status("013", "조회된 데이타가 없습니다.").unwrap_err();
        assert!(matches!(err, DataError::DartApi { ref status, .. } if status == "013"));
    }

    #[test]
    fn test_parse_multi_account_response() {
        let body = r#"{
            "status": "000",
            "message": "정상",
            "list": [
                {"fs_div": "CFS", "account_nm": "매출액", "thstrm_amount": "1,000"},
                {"fs_div": "OFS", "account_nm": "매출액", "thstrm_amount": "900"}
            ]
        }"#;

        let response: MultiAccountResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, "000");
        assert_eq!(response.list.unwrap().len(), 2);
    }

    #[test]
    fn test_parse_error_response_without_list() {
        let body = r#"{"status": "020", "message": "요청 제한을 초과하였습니다."}"#;
        let response: MultiAccountResponse = serde_json::from_str(body).unwrap();
        assert!(response.list.is_none());
        assert!(check_status(&response.status, &response.message).is_err());
    }

    #[test]
    fn test_parse_company_response() {
        let body = r#"{
            "status": "000",
            "message": "정상",
            "corp_code": "00126380",
            "corp_name": "삼성전자(주)",
            "stock_code": "005930",
            "induty_code": "264"
        }"#;

        let response: CompanyResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.corp_name.as_deref(), Some("삼성전자(주)"));
        assert_eq!(response.induty_code.as_deref(), Some("264"));
    }

    #[tokio::test]
    async fn test_rate_limiter_spaces_calls() {
        let mut limiter = RateLimiter::new(Duration::from_millis(50));
        let start = Instant::now();

        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;

        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
