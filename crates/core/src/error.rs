use providers::ProviderError;
use thiserror::Error;

/// Failures surfaced to whoever triggered an interaction.
#[derive(Debug, Error)]
pub enum RiskError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("could not extract text: {0}")]
    Extraction(String),
    #[error("classification service unavailable: {0}")]
    ClassificationUnavailable(String),
    #[error("alert delivery failed: {0}")]
    Delivery(String),
    #[error("invalid input: {0}")]
    InputValidation(String),
    #[error("reference file unavailable: {0}")]
    Asset(String),
}

impl RiskError {
    pub fn classification(err: ProviderError) -> Self {
        RiskError::ClassificationUnavailable(err.to_string())
    }

    pub fn delivery(err: ProviderError) -> Self {
        RiskError::Delivery(err.to_string())
    }

    /// Missing reference files degrade the affected view instead of failing it.
    pub fn is_warning(&self) -> bool {
        matches!(self, RiskError::Asset(_))
    }
}

pub type Result<T, E = RiskError> = std::result::Result<T, E>;
