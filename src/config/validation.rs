use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("max_payload_bytes must be positive")]
    ZeroPayloadLimit,

    #[error("max_latest_limit must be positive")]
    ZeroLatestLimit,

    #[error("default_latest_limit ({default}) exceeds max_latest_limit ({max})")]
    LatestLimitInverted { default: usize, max: usize },

    #[error("store_path must not be empty")]
    EmptyStorePath,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    let api = &config.server.api;

    if api.max_payload_bytes.as_u64() == 0 {
        return Err(ValidationError::ZeroPayloadLimit);
    }

    if api.max_latest_limit == 0 {
        return Err(ValidationError::ZeroLatestLimit);
    }

    if api.default_latest_limit > api.max_latest_limit {
        return Err(ValidationError::LatestLimitInverted {
            default: api.default_latest_limit,
            max: api.max_latest_limit,
        });
    }

    if config.server.store_path.as_os_str().is_empty() {
        return Err(ValidationError::EmptyStorePath);
    }

    Ok(())
}
