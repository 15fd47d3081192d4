//! HTTP client for the pollen widget endpoint.

use std::time::Duration;

use pollenpal_core::{AppConfig, PollenRecord};
use reqwest::Client;

use crate::error::ScraperError;
use crate::extract::extract;
use crate::retry::retry_with_backoff;

/// Session cookies the widget endpoint expects from a browser visit.
const SESSION_COOKIES: &str =
    "shell#lang=en; deviceType=desktop; BIGipServerwww.v3.kleenex.com_pool=2183760906.20480.0000";

/// Path on the source origin that hosts the widget page, sent as `Referer`.
const REFERER_PATH: &str = "/pollen-count";

/// Transport settings for [`PollenClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub source_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failure for transient errors.
    pub max_retries: u32,
    /// Base delay for exponential backoff: `backoff_base_secs * 2^attempt`.
    pub backoff_base_secs: u64,
}

impl ClientSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            source_url: config.source_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
        }
    }
}

/// Fetches the pollen widget fragment for a city and hands it to the extractor.
///
/// Non-2xx responses surface as typed errors; an empty body is "no data" and
/// is returned as `Ok(None)` rather than an error.
#[derive(Debug, Clone)]
pub struct PollenClient {
    client: Client,
    source_url: String,
    /// Scheme + host (+ port) of `source_url`, sent as `Origin`.
    origin: String,
    /// Host of `source_url`, reported in rate-limit errors.
    domain: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl PollenClient {
    /// Creates a `PollenClient` with configured timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidSourceUrl`] if `settings.source_url` is not an absolute URL.
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be constructed.
    pub fn new(settings: &ClientSettings) -> Result<Self, ScraperError> {
        let url = reqwest::Url::parse(&settings.source_url).map_err(|e| {
            ScraperError::InvalidSourceUrl {
                url: settings.source_url.clone(),
                reason: e.to_string(),
            }
        })?;
        let domain = url
            .host_str()
            .ok_or_else(|| ScraperError::InvalidSourceUrl {
                url: settings.source_url.clone(),
                reason: "URL has no host".to_string(),
            })?
            .to_owned();

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&settings.user_agent)
            .build()?;

        Ok(Self {
            client,
            origin: url.origin().ascii_serialization(),
            domain,
            source_url: settings.source_url.clone(),
            max_retries: settings.max_retries,
            backoff_base_secs: settings.backoff_base_secs,
        })
    }

    /// Fetches and extracts the pollen record for `city`.
    ///
    /// Returns `Ok(None)` when the endpoint answers with an empty body, which
    /// is how it reports an unknown location.
    ///
    /// # Errors
    ///
    /// Propagates any transport error from [`Self::fetch_markup`].
    pub async fn fetch_record(
        &self,
        city: &str,
        country: &str,
    ) -> Result<Option<PollenRecord>, ScraperError> {
        let markup = self.fetch_markup(city, country).await?;
        Ok(markup.map(|markup| {
            let record = extract(&markup);
            tracing::debug!(
                city,
                location = %record.location,
                forecast_days = record.forecast.len(),
                has_current_day = record.current_day.is_some(),
                "extracted pollen record"
            );
            record
        }))
    }

    /// POSTs the city/country form and returns the raw markup, or `None` for
    /// a whitespace-only body. Transient failures are retried per the
    /// configured policy.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status (5xx retried, 4xx not).
    /// - [`ScraperError::Http`]: network or TLS failure after all retries exhausted.
    pub async fn fetch_markup(
        &self,
        city: &str,
        country: &str,
    ) -> Result<Option<String>, ScraperError> {
        tracing::debug!(city, country, url = %self.source_url, "fetching pollen markup");

        let body = retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self
                .client
                .post(&self.source_url)
                .header(reqwest::header::ACCEPT, "*/*")
                .header(reqwest::header::ACCEPT_LANGUAGE, "en-GB,en;q=0.7")
                .header(reqwest::header::ORIGIN, &self.origin)
                .header(
                    reqwest::header::REFERER,
                    format!("{}{REFERER_PATH}", self.origin),
                )
                .header(reqwest::header::COOKIE, SESSION_COOKIES)
                .header("x-requested-with", "XMLHttpRequest")
                .form(&[("city", city), ("country", country)])
                .send()
                .await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(60);

                return Err(ScraperError::RateLimited {
                    domain: self.domain.clone(),
                    retry_after_secs,
                });
            }

            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: self.source_url.clone(),
                });
            }

            Ok(response.text().await?)
        })
        .await?;

        if body.trim().is_empty() {
            tracing::info!(city, country, "pollen endpoint returned an empty body");
            return Ok(None);
        }

        Ok(Some(body))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
