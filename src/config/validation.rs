//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the bind address has a host part and a parsable port
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: HostConfig → Result<(), Vec<ValidationError>>
//! - Hostnames are accepted; resolution happens at bind time

use crate::config::schema::HostConfig;

/// A single semantic configuration error.
#[derive(Debug)]
pub enum ValidationError {
    InvalidBindAddress(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "invalid bind address '{}': expected host:port", addr)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &HostConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !has_host_and_port(&config.bind_address) {
        errors.push(ValidationError::InvalidBindAddress(
            config.bind_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn has_host_and_port(address: &str) -> bool {
    match address.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}
