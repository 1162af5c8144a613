//! Top-level error type for corruption runs

use pathfault_bank::BankError;
use pathfault_pathway::PathwayError;
use pathfault_sampler::SamplerError;

/// Any failure of an end-to-end corruption run
///
/// Nothing here is retried; a run either fully succeeds or aborts before
/// its outputs are written.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Pathway loading or writing failed
    #[error("pathway error: {0}")]
    Pathway(#[from] PathwayError),

    /// Bank loading, ingestion, or validation failed
    #[error("bank error: {0}")]
    Bank(#[from] BankError),

    /// Budgeting, planning, or application failed
    #[error("sampler error: {0}")]
    Sampler(#[from] SamplerError),

    /// Run configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),

    /// Output persistence failed
    #[error("output I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_sampler_error() {
        let err: CoreError = SamplerError::InvalidParameter("fraction".to_string()).into();
        assert!(err.to_string().contains("sampler error"));
    }
}
