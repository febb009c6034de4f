//! Routing Director REST API client.
//!
//! This module holds everything the tools share when talking to RD:
//!
//! - **credentials**: credential variants and the two auth header shapes
//! - **auth**: credential resolution with a write-once token cache
//! - **endpoints**: the static endpoint descriptor table
//! - **envelope**: response normalization and failure policies
//! - **client**: the request executor that ties the above together
//!
//! Tools never talk to `reqwest` directly; they hand an [`Endpoint`] and its
//! path parameters to [`RdClient::call`] and get an envelope back.

pub mod auth;
pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod envelope;
mod error;

pub use auth::AuthResolver;
pub use client::{RdClient, RdRequest};
pub use credentials::{AuthHeaders, Credential};
pub use endpoints::{Endpoint, HttpMethod, RequestWeight, SuccessCodes};
pub use envelope::{FailurePolicy, Normalization};
pub use error::{AuthError, RdError, RdResult};
