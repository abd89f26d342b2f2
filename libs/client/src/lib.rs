//! HTTP client for the portfolio API
//!
//! An explicit client object replaces the process-wide singleton the
//! dashboard frontend used to carry: the caller constructs one
//! [`ApiClient`] at startup and injects the token storage it should use.
//! The dashboard's fixed-interval stats refresh lives in [`poller`].

mod client;
pub mod error;
pub mod poller;
pub mod token;

pub use client::ApiClient;
pub use error::ApiClientError;
pub use poller::{DashboardPoller, DashboardSnapshot, PollerHandle};
pub use token::{MemoryTokenStore, TokenStore};
