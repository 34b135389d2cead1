mod client;
mod factory;
mod wire;

pub use client::HttpBackend;
pub use factory::HttpBackendFactory;
