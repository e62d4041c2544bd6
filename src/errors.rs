// src/errors.rs

/// Everything that can go wrong while pricing.
/// All failures are local and synchronous; nothing here is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("invalid option type: {0:?} (expected \"Call Option\" or \"Put Option\")")]
    InvalidOptionType(String),

    #[error("invalid pricing method: {0:?}")]
    InvalidPricingMethod(String),

    #[error("monte carlo price requested before simulate() ran")]
    NotSimulatedYet,

    #[error("degenerate market input '{parameter}': {reason}")]
    DegenerateMarketInput {
        parameter: &'static str,
        reason: String,
    },

    #[error("invalid pricing request: {0}")]
    InvalidRequest(String),
}

impl PricingError {
    pub(crate) fn degenerate(parameter: &'static str, reason: impl Into<String>) -> Self {
        PricingError::DegenerateMarketInput {
            parameter,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(e: serde_json::Error) -> Self {
        PricingError::InvalidRequest(e.to_string())
    }
}

pub type PricingResult<T> = Result<T, PricingError>;
