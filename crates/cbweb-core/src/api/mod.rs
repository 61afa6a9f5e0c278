//! Content API access.
//!
//! [`Transport`] is the seam to the network: [`CurlTransport`] talks to the
//! live API, tests script responses. [`ContentClient`] layers the endpoint
//! methods, the session cache and the asset normalizers on top.

mod client;
mod error;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ContentClient, MAIN_NAVIGATION};
pub use error::FetchError;
pub use transport::{CurlTransport, Transport};
