//! The boundary to the HR backend.
//!
//! [`PayrollBackend`] is the contract every backend implements; the HTTP
//! implementation lives in the `payroll-http` crate, the in-memory one here.

pub mod client;
pub mod factory;
pub mod memory;

pub use client::{BackendError, PayrollBackend};
pub use factory::{BackendConfig, BackendFactory, BackendRegistry};
pub use memory::{MemoryBackend, MemoryBackendFactory};
