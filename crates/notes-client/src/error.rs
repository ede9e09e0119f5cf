/// Why a submission ended in the failed state. The display text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    ExtractionFailed(String),

    #[error("{0}")]
    RequestFailed(String),
}
