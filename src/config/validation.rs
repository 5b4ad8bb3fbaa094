use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Worker pool '{pool}' must have at least one lane")]
    ZeroWorkerPool { pool: String },

    #[error("Storage profile path at index {index} is empty")]
    EmptyProfilePath { index: usize },

    #[error("Storage base path is empty (omit it instead to use relative paths)")]
    EmptyBasePath,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_pools(config)?;
    validate_storage(config)?;
    Ok(())
}

fn validate_pools(config: &Config) -> Result<(), ValidationError> {
    if config.offload.orchestration_workers == 0 {
        return Err(ValidationError::ZeroWorkerPool {
            pool: "offload-orchestration".to_string(),
        });
    }
    if config.offload.append_workers == 0 {
        return Err(ValidationError::ZeroWorkerPool {
            pool: "offload-assignment".to_string(),
        });
    }
    Ok(())
}

fn validate_storage(config: &Config) -> Result<(), ValidationError> {
    if let Some(base_path) = &config.storage.base_path {
        if base_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyBasePath);
        }
    }
    for (index, profile) in config.storage.profiles.iter().enumerate() {
        if profile.as_os_str().is_empty() {
            return Err(ValidationError::EmptyProfilePath { index });
        }
    }
    Ok(())
}
