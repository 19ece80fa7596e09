//! Test fixtures for the routific client.
//!
//! Provides:
//! - Request/response payloads from the Routific documentation (Vancouver)
//!   and the equivalent literal plans and schedules
//! - A scripted transport and a recording waiter for driving the client
//!   without a network

#![allow(dead_code)]

pub mod stubs;

pub use stubs::*;
pub use vancouver::*;
