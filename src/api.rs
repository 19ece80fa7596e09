//! The four public operations: synchronous and long-running solves for
//! vehicle routing (VRP) and pickup-and-delivery (PDP) plans.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::config::{ClientConfig, Endpoints};
use crate::error::{Error, Result};
use crate::http::{HttpTransport, post_json};
use crate::job::{self, PollPolicy, Poller};
use crate::traits::{ThreadSleep, Transport, Wait};
use crate::types::{PdPlan, Schedule, VrPlan};

/// Routific Engine client.
///
/// Holds no per-call state: every method builds its own requests, and one
/// client may be shared between threads when its transport and waiter allow.
#[derive(Debug, Clone)]
pub struct Routific<T = HttpTransport, W = ThreadSleep> {
    transport: T,
    wait: W,
    endpoints: Endpoints,
}

impl Routific {
    /// Client for the public Routific API with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.http)?;
        Ok(Self::from_parts(transport, ThreadSleep, config.endpoints))
    }
}

impl<T: Transport, W: Wait> Routific<T, W> {
    /// Assemble a client from an explicit transport and waiter.
    pub fn from_parts(transport: T, wait: W, endpoints: Endpoints) -> Self {
        Self {
            transport,
            wait,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Solve a vehicle routing plan in a single round trip.
    pub fn vrp(&self, plan: &VrPlan, token: &str) -> Result<Schedule> {
        self.solve(&self.endpoints.vrp, plan, token)
    }

    /// Solve a pickup-and-delivery plan in a single round trip.
    pub fn pdp(&self, plan: &PdPlan, token: &str) -> Result<Schedule> {
        self.solve(&self.endpoints.pdp, plan, token)
    }

    /// Submit a vehicle routing plan as a long job and poll until it resolves.
    ///
    /// Fails with [`Error::TimedOut`] when the job is still running after
    /// `policy.max_retry` further polls, i.e. after
    /// `policy.interval_secs × policy.max_retry` seconds of waiting.
    pub fn long_vrp(&self, plan: &VrPlan, token: &str, policy: PollPolicy) -> Result<Schedule> {
        self.long_job(&self.endpoints.vrp_long, plan, token, policy)
    }

    /// Submit a pickup-and-delivery plan as a long job and poll until it
    /// resolves. See [`Routific::long_vrp`].
    pub fn long_pdp(&self, plan: &PdPlan, token: &str, policy: PollPolicy) -> Result<Schedule> {
        self.long_job(&self.endpoints.pdp_long, plan, token, policy)
    }

    fn solve<P: Serialize>(&self, url: &str, plan: &P, token: &str) -> Result<Schedule> {
        let body = post_json(&self.transport, url, token, plan)?;
        decode(url, &body)
    }

    fn long_job<P: Serialize>(
        &self,
        url: &str,
        plan: &P,
        token: &str,
        policy: PollPolicy,
    ) -> Result<Schedule> {
        let body = post_json(&self.transport, url, token, plan)?;
        let job_id = job::job_id(url, &body)?;
        let job_url = self.endpoints.job_url(&job_id);
        info!(
            url,
            job_id = %job_id,
            interval_secs = policy.interval_secs,
            max_retry = policy.max_retry,
            "submitted long job"
        );

        Poller {
            transport: &self.transport,
            wait: &self.wait,
            token,
            url: &job_url,
            policy,
        }
        .run()
    }
}

fn decode<R: DeserializeOwned>(url: &str, body: &str) -> Result<R> {
    serde_json::from_str(body).map_err(|source| Error::deserialize(url, source))
}

/// [`Routific::vrp`] on a default client.
pub fn vrp(plan: &VrPlan, token: &str) -> Result<Schedule> {
    Routific::new()?.vrp(plan, token)
}

/// [`Routific::pdp`] on a default client.
pub fn pdp(plan: &PdPlan, token: &str) -> Result<Schedule> {
    Routific::new()?.pdp(plan, token)
}

/// [`Routific::long_vrp`] on a default client.
pub fn long_vrp(plan: &VrPlan, token: &str, policy: PollPolicy) -> Result<Schedule> {
    Routific::new()?.long_vrp(plan, token, policy)
}

/// [`Routific::long_pdp`] on a default client.
pub fn long_pdp(plan: &PdPlan, token: &str, policy: PollPolicy) -> Result<Schedule> {
    Routific::new()?.long_pdp(plan, token, policy)
}
