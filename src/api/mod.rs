//! Clients for the remote services and the submission sink

mod client;
mod error;
mod sink;
mod traits;

pub use client::ApiClient;
pub use error::ApiError;
pub use sink::{LogSink, SubmissionSink};
pub use traits::FormApi;

#[cfg(test)]
pub use sink::MockSubmissionSink;
#[cfg(test)]
pub use traits::MockFormApi;
