//! HTTP client for the form, user and directory services

use super::error::ApiError;
use super::traits::FormApi;
use crate::config::AppConfig;
use crate::state::{Doctor, FormResponse, FormSchema};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

/// Client for the remote services
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    /// Base URL of the form and user services
    api_base_url: String,
    /// Full URL of the doctor directory feed
    directory_url: String,
}

impl ApiClient {
    /// Create a client for the given endpoints
    pub fn new(
        api_base_url: impl Into<String>,
        directory_url: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!("dynform-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            directory_url: directory_url.into(),
        })
    }

    /// Create a client for the endpoints named in the configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(config.api_base_url(), config.directory_url())
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ApiError> {
        let body = self
            .http
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }

    async fn load_form(&self, url: &str, identifier: &str) -> Result<FormSchema, ApiError> {
        let body = self.get_text(url, &[("rollNumber", identifier)]).await?;
        let response: FormResponse = serde_json::from_str(&body)?;
        Ok(response.form)
    }
}

#[async_trait]
impl FormApi for ApiClient {
    async fn fetch_form(&self, identifier: &str) -> Result<FormSchema, ApiError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ApiError::MissingIdentifier);
        }

        let url = format!("{}/get-form", self.api_base_url);
        debug!(%url, identifier, "fetching form schema");

        let result = self.load_form(&url, identifier).await;
        if let Err(ref err) = result {
            warn!(identifier, error = %err, "form schema fetch failed");
        }
        result
    }

    async fn register_user(&self, identifier: &str, name: &str) -> Result<(), ApiError> {
        let url = format!("{}/create-user", self.api_base_url);
        debug!(%url, identifier, "registering user");

        self.http
            .post(&url)
            .json(&json!({ "rollNumber": identifier, "name": name }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        debug!(url = %self.directory_url, "fetching doctor directory");
        let body = self.get_text(&self.directory_url, &[]).await?;
        let doctors: Vec<Doctor> = serde_json::from_str(&body)?;
        debug!(count = doctors.len(), "doctor directory loaded");
        Ok(doctors)
    }
}
