//! HTTP plumbing for the AkashML API.

mod http;

pub use http::{HttpTransport, TransportError};
