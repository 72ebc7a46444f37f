//! Controller configuration validation.
//!
//! Serde handles the syntactic side; this module checks the semantics a
//! controller needs to start at all. Returns every violation, not just
//! the first.

use thiserror::Error;

use crate::config::schema::ControllerConfig;

/// A semantic problem in a [`ControllerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("namespace must not be empty")]
    EmptyNamespace,
    #[error("resource name must not be empty")]
    EmptyName,
    #[error("log key must not be empty")]
    EmptyLogKey,
    #[error("queue capacity must be at least 1")]
    ZeroQueueCapacity,
}

/// Validate a configuration, collecting all violations.
pub fn validate_config(config: &ControllerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    if config.namespace.trim().is_empty() {
        errors.push(ValidationError::EmptyNamespace);
    }
    if config.name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    }
    if config.log_key.trim().is_empty() {
        errors.push(ValidationError::EmptyLogKey);
    }
    if config.queue_capacity == 0 {
        errors.push(ValidationError::ZeroQueueCapacity);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ControllerConfig::default()).is_ok());
    }

    #[test]
    fn test_all_violations_collected() {
        let config = ControllerConfig {
            namespace: " ".to_string(),
            name: String::new(),
            queue_capacity: 0,
            ..ControllerConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::EmptyNamespace));
        assert!(errors.contains(&ValidationError::EmptyName));
        assert!(errors.contains(&ValidationError::ZeroQueueCapacity));
    }
}
