//! qs-core - Core library for QueryShape
//!
//! Shared configuration parsing, error types, and the default fingerprint
//! digest used by the extraction engine and the CLI.

pub mod config;
pub mod error;
pub mod fingerprint;

pub use config::{Config, Dialect, PoolConfig, UnhandledPolicy};
pub use error::{CoreError, CoreResult};
pub use fingerprint::{compute_fingerprint, sha256_hex};
