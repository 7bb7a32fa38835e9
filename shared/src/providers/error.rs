use thiserror::Error;

/// Errors surfaced by the optional third-party providers (rank, clan, ping,
/// vanish)
///
/// The engine never propagates these: every failure degrades to "absent" for
/// the one agent being evaluated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider is installed but not ready to answer
    #[error("{provider} is not available")]
    Unavailable { provider: &'static str },

    /// The provider answered with an error
    #[error("{provider} failed: {reason}")]
    Failed {
        provider: &'static str,
        reason: String,
    },
}
