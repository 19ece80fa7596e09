//! Long-running jobs: submit a plan, then poll its status until it resolves.
//!
//! A job moves `submitted → polling* → finished | error | timed out`. The
//! first status check happens right after submission with no wait. Each
//! further check is preceded by one [`Wait`] of the policy interval, and at
//! most [`PollPolicy::max_retry`] further checks are made. A failed request
//! or an unreadable body ends the call at once; it is never treated as
//! "not finished yet".

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::traits::{Transport, Wait};
use crate::types::Schedule;

const FINISHED: &str = "finished";
const FAILED: &str = "error";

/// Fixed-cadence polling budget for a long job.
///
/// The service documents how long jobs of a given size take; pick the
/// interval from that. The worst case before giving up is
/// `interval_secs × max_retry` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval_secs: u16,
    pub max_retry: u8,
}

impl PollPolicy {
    pub const fn new(interval_secs: u16, max_retry: u8) -> Self {
        Self {
            interval_secs,
            max_retry,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.interval_secs))
    }

    /// Total time spent waiting if the job never resolves.
    pub fn deadline(&self) -> Duration {
        self.interval() * u32::from(self.max_retry)
    }
}

/// Status of a long job as read from its status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Finished,
    Failed,
    /// Any other status, e.g. `pending` or `processing`.
    Running(String),
}

impl JobStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            FINISHED => Self::Finished,
            FAILED => Self::Failed,
            other => Self::Running(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running(_))
    }
}

#[derive(Deserialize)]
struct Submitted {
    job_id: String,
}

#[derive(Deserialize)]
struct StatusCheck {
    status: String,
}

#[derive(Deserialize)]
struct FinishedJob {
    status: String,
    #[serde(default)]
    id: Option<String>,
    output: Schedule,
}

#[derive(Deserialize)]
struct FailedJob {
    status: String,
    output: String,
}

/// Read the job id out of a submission response.
pub(crate) fn job_id(url: &str, body: &str) -> Result<String> {
    let submitted: Submitted =
        serde_json::from_str(body).map_err(|source| Error::deserialize(url, source))?;
    if submitted.job_id.is_empty() {
        return Err(Error::MissingJobId {
            url: url.to_string(),
        });
    }
    Ok(submitted.job_id)
}

/// Polls one job's status URL under a [`PollPolicy`].
pub(crate) struct Poller<'a, T: ?Sized, W: ?Sized> {
    pub transport: &'a T,
    pub wait: &'a W,
    pub token: &'a str,
    pub url: &'a str,
    pub policy: PollPolicy,
}

impl<T, W> Poller<'_, T, W>
where
    T: Transport + ?Sized,
    W: Wait + ?Sized,
{
    pub fn run(&self) -> Result<Schedule> {
        let mut body = self.transport.get(self.url, self.token)?;
        let mut status = self.read_status(&body)?;
        debug!(url = self.url, attempt = 0, ?status, "polled job");

        let mut attempt: u8 = 0;
        while !status.is_terminal() && attempt < self.policy.max_retry {
            self.wait.wait(self.policy.interval());
            attempt += 1;
            body = self.transport.get(self.url, self.token)?;
            status = self.read_status(&body)?;
            debug!(url = self.url, attempt, ?status, "polled job");
        }

        match status {
            JobStatus::Finished => self.finished(&body),
            JobStatus::Failed => Err(self.failed(&body)),
            JobStatus::Running(last) => {
                warn!(
                    url = self.url,
                    last_status = %last,
                    max_retry = self.policy.max_retry,
                    interval_secs = self.policy.interval_secs,
                    "job did not finish within the poll budget"
                );
                Err(Error::TimedOut {
                    max_retry: self.policy.max_retry,
                    interval_secs: self.policy.interval_secs,
                })
            }
        }
    }

    fn read_status(&self, body: &str) -> Result<JobStatus> {
        let check: StatusCheck =
            serde_json::from_str(body).map_err(|source| Error::deserialize(self.url, source))?;
        Ok(JobStatus::parse(&check.status))
    }

    fn finished(&self, body: &str) -> Result<Schedule> {
        let job: FinishedJob =
            serde_json::from_str(body).map_err(|source| Error::deserialize(self.url, source))?;
        self.expect_status(FINISHED, job.status)?;
        info!(
            url = self.url,
            job_id = job.id.as_deref().unwrap_or_default(),
            "job finished"
        );
        Ok(job.output)
    }

    fn failed(&self, body: &str) -> Error {
        let job: FailedJob = match serde_json::from_str(body) {
            Ok(job) => job,
            Err(source) => return Error::deserialize(self.url, source),
        };
        if let Err(err) = self.expect_status(FAILED, job.status) {
            return err;
        }
        warn!(url = self.url, message = %job.output, "job failed");
        Error::Remote(job.output)
    }

    fn expect_status(&self, expected: &str, found: String) -> Result<()> {
        if found == expected {
            return Ok(());
        }
        Err(Error::UnexpectedJobState {
            url: self.url.to_string(),
            expected: expected.to_string(),
            found,
        })
    }
}
