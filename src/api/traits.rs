//! Trait abstraction over the remote services to enable mocking in tests

use super::error::ApiError;
use crate::state::{Doctor, FormSchema};
use async_trait::async_trait;

/// Operations against the form, user and directory services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormApi: Send + Sync {
    /// Fetch the form schema assigned to `identifier`
    async fn fetch_form(&self, identifier: &str) -> Result<FormSchema, ApiError>;

    /// Register a user; failure is not fatal to the workflow
    async fn register_user(&self, identifier: &str, name: &str) -> Result<(), ApiError>;

    /// Fetch the doctor directory feed
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, ApiError>;
}
