//! Remote auth service boundary.
//!
//! `AuthGateway` is the seam the session repository talks to; `HttpAuthGateway`
//! is the reqwest implementation and `api::mock` a scripted one for tests.

pub mod api;
pub mod config;
pub mod http;

pub use api::AuthGateway;
pub use config::{GatewayConfig, TimeoutConfig};
pub use http::{GatewayError, HttpAuthGateway};
