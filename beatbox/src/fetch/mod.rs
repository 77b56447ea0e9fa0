//! Style document retrieval.
//!
//! The fetch step is the only I/O in BeatBox. It sits behind the
//! [`AsyncHttpClient`] trait so tests can substitute a mock client.

mod http;

pub use http::{AsyncHttpClient, HttpResponse, ReqwestClient};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
