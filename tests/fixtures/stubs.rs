//! Deterministic test doubles for [`Transport`] and [`Wait`].

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use routific::{Endpoints, Error, Result, Routific, Transport, Wait};

/// A request the client issued.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Post {
        url: String,
        token: String,
        body: serde_json::Value,
    },
    Get {
        url: String,
        token: String,
    },
}

impl Request {
    pub fn url(&self) -> &str {
        match self {
            Self::Post { url, .. } | Self::Get { url, .. } => url,
        }
    }

    pub fn is_get(&self) -> bool {
        matches!(self, Self::Get { .. })
    }
}

/// Canned outcome for one request.
#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Status(u16),
}

/// Transport that answers requests from a script, in order, and records them.
///
/// Running out of script is reported as a 599 status so an over-eager
/// client fails loudly instead of hanging.
#[derive(Debug, Default)]
pub struct StubTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<Request>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with `body`.
    pub fn reply(self, body: impl Into<String>) -> Self {
        self.push(Reply::Body(body.into()));
        self
    }

    /// Queue `count` identical 200 responses.
    pub fn reply_times(self, count: usize, body: &str) -> Self {
        for _ in 0..count {
            self.push(Reply::Body(body.to_string()));
        }
        self
    }

    /// Queue a response rejected with `status`.
    pub fn fail(self, status: u16) -> Self {
        self.push(Reply::Status(status));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn get_count(&self) -> usize {
        self.requests().iter().filter(|req| req.is_get()).count()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().expect("replies lock").len()
    }

    fn push(&self, reply: Reply) {
        self.replies.lock().expect("replies lock").push_back(reply);
    }

    fn answer(&self, request: Request) -> Result<String> {
        let url = request.url().to_string();
        self.requests.lock().expect("requests lock").push(request);
        let reply = self
            .replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or(Reply::Status(599));

        match reply {
            Reply::Body(body) => Ok(body),
            Reply::Status(status) => Err(Error::Status { url, status }),
        }
    }
}

impl Transport for StubTransport {
    fn post(&self, url: &str, token: &str, body: Vec<u8>) -> Result<String> {
        let body = serde_json::from_slice(&body).expect("client posts JSON");
        self.answer(Request::Post {
            url: url.to_string(),
            token: token.to_string(),
            body,
        })
    }

    fn get(&self, url: &str, token: &str) -> Result<String> {
        self.answer(Request::Get {
            url: url.to_string(),
            token: token.to_string(),
        })
    }
}

/// Records requested waits instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingWait {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingWait {
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().expect("waits lock").clone()
    }
}

impl Wait for RecordingWait {
    fn wait(&self, duration: Duration) {
        self.waits.lock().expect("waits lock").push(duration);
    }
}

/// Client wired to the stubs, using the default Routific endpoints.
pub fn stub_client<'a>(
    transport: &'a StubTransport,
    wait: &'a RecordingWait,
) -> Routific<&'a StubTransport, &'a RecordingWait> {
    Routific::from_parts(transport, wait, Endpoints::default())
}

/// Body of a job-status poll that has not resolved yet.
pub fn pending(status: &str) -> String {
    serde_json::json!({ "status": status, "id": JOB_ID }).to_string()
}

/// Body of a finished job wrapping `schedule_json`.
pub fn finished(schedule_json: &str) -> String {
    let output: serde_json::Value =
        serde_json::from_str(schedule_json).expect("schedule fixture is JSON");
    serde_json::json!({ "status": "finished", "id": JOB_ID, "output": output }).to_string()
}

/// Body of a job the optimizer rejected.
pub fn failed(message: &str) -> String {
    serde_json::json!({ "status": "error", "output": message }).to_string()
}

pub const JOB_ID: &str = "4nbeocbfd";

pub fn submitted() -> String {
    serde_json::json!({ "job_id": JOB_ID }).to_string()
}

pub fn job_url() -> String {
    Endpoints::default().job_url(JOB_ID)
}
