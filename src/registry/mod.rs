//! Companies House registry client
//!
//! Blocking and sequential. Only non-200 responses are handled here (as
//! sentinel strings); transport failures propagate and end the run.

mod budget;
mod types;

pub use budget::RequestBudget;
pub use types::{CompanyProfile, SearchItem, SearchResponse};

use crate::config::Config;
use crate::error::{PurgoError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::{Client, Response};
use reqwest::header::AUTHORIZATION;
use reqwest::{StatusCode, Url};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const NOT_FOUND: &str = "Not Found";
pub const STATUS_NOT_FOUND: &str = "Status not found";
pub const FAILED_TO_FETCH: &str = "Failed to fetch data";

const USER_AGENT: &str = concat!("purgo/", env!("CARGO_PKG_VERSION"));

/// Outcome of a name search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(String),
    NotFound,
    /// Non-200 response, carrying the reason phrase
    Failed(String),
}

impl SearchOutcome {
    /// Value stored in the registration number column.
    pub fn into_cell_value(self) -> String {
        match self {
            SearchOutcome::Found(number) => number,
            other => other.to_string(),
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Found(number) => f.write_str(number),
            SearchOutcome::NotFound => f.write_str(NOT_FOUND),
            SearchOutcome::Failed(reason) => write!(f, "Error: {}", reason),
        }
    }
}

/// The two registry lookups the pipeline needs.
pub trait CompanyRegistry {
    fn search_by_name(&mut self, name: &str) -> Result<SearchOutcome>;

    /// Trading status, or a sentinel string when it could not be fetched.
    fn fetch_status(&mut self, registration_number: &str) -> Result<String>;
}

/// Connection settings, usually taken from `Config`.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub base_url: String,
    pub max_requests: u32,
    pub cooldown: Duration,
    pub timeout: Duration,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RegistrySettings {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            max_requests: config.max_requests,
            cooldown: Duration::from_secs(config.cooldown_seconds),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}

type Sleeper = Box<dyn FnMut(Duration) + Send>;

pub struct RegistryClient {
    http: Client,
    base_url: Url,
    api_key: String,
    budget: RequestBudget,
    sleeper: Sleeper,
}

impl RegistryClient {
    pub fn new(api_key: impl Into<String>, settings: RegistrySettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| PurgoError::InvalidUrl(format!("{}: {}", settings.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(PurgoError::InvalidUrl(settings.base_url));
        }

        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            budget: RequestBudget::new(settings.max_requests, settings.cooldown),
            sleeper: Box::new(std::thread::sleep),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.get_api_key()?, RegistrySettings::from(config))
    }

    /// Replaces the cooldown sleep (tests record pauses instead of waiting).
    pub fn with_sleeper(mut self, sleeper: impl FnMut(Duration) + Send + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    /// Requests made since the last cooldown.
    pub fn request_count(&self) -> u32 {
        self.budget.count()
    }

    /// `Basic base64(api_key)`; the key is the username and there is no password part.
    pub fn authorization(&self) -> String {
        format!("Basic {}", STANDARD.encode(self.api_key.as_bytes()))
    }

    /// Issues one GET under the request budget.
    ///
    /// The count goes up whether or not the call succeeds.
    pub fn request(&mut self, url: Url, query: &[(&str, &str)]) -> Result<Response> {
        let cooldown = self.budget.cooldown();
        if self.budget.exhausted() {
            warn!(
                cooldown_secs = cooldown.as_secs(),
                "Rate limit reached. Cooling down"
            );
        }
        self.budget.wait_if_exhausted(&mut self.sleeper);

        debug!(%url, "registry request");
        let mut builder = self.http.get(url).header(AUTHORIZATION, self.authorization());
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let result = builder.send();
        self.budget.record();

        Ok(result?)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PurgoError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// One fetch attempt: `Some(status)` on 200, `None` otherwise.
    fn fetch_status_once(&mut self, registration_number: &str) -> Result<Option<String>> {
        let url = self.endpoint(&["company", registration_number])?;
        let response = self.request(url, &[])?;

        if response.status() != StatusCode::OK {
            debug!(registration_number, status = %response.status(), "status fetch failed");
            return Ok(None);
        }

        let profile: CompanyProfile = response.json()?;
        Ok(Some(
            profile
                .company_status
                .unwrap_or_else(|| STATUS_NOT_FOUND.to_string()),
        ))
    }
}

impl CompanyRegistry for RegistryClient {
    fn search_by_name(&mut self, name: &str) -> Result<SearchOutcome> {
        let url = self.endpoint(&["search", "companies"])?;
        let response = self.request(url, &[("q", name)])?;

        let status = response.status();
        if status != StatusCode::OK {
            let reason = status.canonical_reason().unwrap_or_default().to_string();
            warn!(name, %status, "company search failed");
            return Ok(SearchOutcome::Failed(reason));
        }

        let body: SearchResponse = response.json()?;
        Ok(match body.items.into_iter().next() {
            Some(item) => SearchOutcome::Found(item.company_number),
            None => SearchOutcome::NotFound,
        })
    }

    fn fetch_status(&mut self, registration_number: &str) -> Result<String> {
        if let Some(status) = self.fetch_status_once(registration_number)? {
            return Ok(status);
        }

        // Registry numbers are sometimes stored without their leading zero
        let padded = format!("0{}", registration_number);
        info!(registration_number, retry = %padded, "initial status check failed, retrying with '0' prefix");

        Ok(self
            .fetch_status_once(&padded)?
            .unwrap_or_else(|| FAILED_TO_FETCH.to_string()))
    }
}

/// Stand-in when no lookups are wanted; any call reports the missing key.
#[derive(Debug, Default)]
pub struct OfflineRegistry;

impl CompanyRegistry for OfflineRegistry {
    fn search_by_name(&mut self, _name: &str) -> Result<SearchOutcome> {
        Err(PurgoError::MissingApiKey)
    }

    fn fetch_status(&mut self, _registration_number: &str) -> Result<String> {
        Err(PurgoError::MissingApiKey)
    }
}
