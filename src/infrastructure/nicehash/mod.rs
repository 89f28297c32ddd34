//! NiceHash API v2 infrastructure
//!
//! - `signer`: HMAC-SHA256 request signing and auth headers
//! - `client`: reqwest-based implementation of the `NiceHashApi` port

pub mod client;
pub mod signer;

pub use client::NiceHashClient;
pub use signer::{RequestSigner, SignedRequest};
