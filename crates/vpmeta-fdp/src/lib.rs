//! FAIR Data Point registry client.
//!
//! Authenticates against the registry, submits Turtle documents built by
//! `vpmeta-rdf` as drafts, publishes them, and checks whether a resource URL
//! resolves. Requests are awaited one after the other; nothing is cached
//! between calls.

pub mod client;
pub mod config;
pub mod error;

pub use client::FdpClient;
pub use config::RegistryConfig;
pub use error::{Error, Result};
