//! Destination for completed submissions

use crate::state::Submission;
use async_trait::async_trait;
use tracing::info;

/// Receives a completed submission
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, submission: &Submission) -> anyhow::Result<()>;
}

/// Sink that writes the submission to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    async fn submit(&self, submission: &Submission) -> anyhow::Result<()> {
        let values = serde_json::to_string(&submission.values)?;
        info!(
            form_id = %submission.form_id,
            identifier = %submission.identifier,
            submitted_at = %submission.submitted_at.to_rfc3339(),
            %values,
            "form submitted"
        );
        Ok(())
    }
}
