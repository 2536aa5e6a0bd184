mod client;
mod outcome;

pub use client::{ApiClient, HttpResponse, ReqwestTransport, Transport};
pub use outcome::{ClientError, RemoteOutcome};

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod client_tests;
