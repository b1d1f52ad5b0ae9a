pub mod advisor;
pub mod config;
pub mod error;
pub mod fetch;
pub mod orchestrator;
pub mod publish;
pub mod remote;
pub mod server;
pub mod staging;

pub use error::{Error, Result};
