//! Endpoint and HTTP settings for the client.

use crate::http::HttpConfig;

/// Public Routific Engine host.
pub const DEFAULT_BASE_URL: &str = "https://api.routific.com";

/// URLs of the five service resources the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Synchronous vehicle routing.
    pub vrp: String,
    /// Synchronous pickup and delivery.
    pub pdp: String,
    /// Long-running vehicle routing submission.
    pub vrp_long: String,
    /// Long-running pickup and delivery submission.
    pub pdp_long: String,
    /// Job-status resource; a job lives at `{jobs}/{job_id}`.
    pub jobs: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    /// Derive every endpoint from another host, e.g. a staging server.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            vrp: format!("{base}/v1/vrp"),
            pdp: format!("{base}/v1/pdp"),
            vrp_long: format!("{base}/v1/vrp-long"),
            pdp_long: format!("{base}/v1/pdp-long"),
            jobs: format!("{base}/jobs"),
        }
    }

    /// Status URL of a submitted long job.
    pub fn job_url(&self, job_id: &str) -> String {
        format!("{}/{}", self.jobs, job_id)
    }
}

/// Everything needed to build a [`crate::Routific`] client over HTTP.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub endpoints: Endpoints,
    pub http: HttpConfig,
}
