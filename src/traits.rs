//! Seams between the client and the outside world.
//!
//! The orchestration code only talks to the network through [`Transport`]
//! and only pauses through [`Wait`]. Tests and embedding applications swap
//! either one out without touching the polling logic.

use std::time::Duration;

use crate::error::Result;

/// Issues a single authenticated request and returns the raw response body.
///
/// Implementations must treat any status other than 200 or 202 as
/// [`crate::Error::Status`] and must not retry.
pub trait Transport {
    /// POST a JSON body to `url` with `Authorization: bearer <token>`.
    fn post(&self, url: &str, token: &str, body: Vec<u8>) -> Result<String>;

    /// GET `url` with `Authorization: bearer <token>`.
    fn get(&self, url: &str, token: &str) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, url: &str, token: &str, body: Vec<u8>) -> Result<String> {
        (**self).post(url, token, body)
    }

    fn get(&self, url: &str, token: &str) -> Result<String> {
        (**self).get(url, token)
    }
}

/// Pauses the calling job between status polls.
pub trait Wait {
    fn wait(&self, duration: Duration);
}

impl<W: Wait + ?Sized> Wait for &W {
    fn wait(&self, duration: Duration) {
        (**self).wait(duration);
    }
}

/// Blocks the current thread with [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Wait for ThreadSleep {
    fn wait(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
