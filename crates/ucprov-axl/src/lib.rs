//! AXL SOAP/XML transport for the provisioning core.
//!
//! Implements [`ucprov_core::DirectoryOps`] against a Cisco Unified CM-style
//! AXL endpoint: HTTP Basic auth, SOAP 1.1 envelopes, and event-stream
//! parsing of the response documents. The client distinguishes three failure
//! classes — network/timeout, malformed response, and remote-reported fault —
//! even though the core treats them all as "the operation failed".

pub mod auth;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod ops;
pub mod response;

pub use auth::AxlCredentials;
pub use client::AxlClient;
pub use config::{AxlTarget, DeviceTemplate};
pub use error::{AxlError, AxlResult};
pub use response::AxlResponse;
