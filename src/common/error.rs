use thiserror::Error;

/// Crate-wide error type.
///
/// `FormatMismatch` is the only recoverable variant: the dispatcher catches
/// it and moves on to the next reader. Everything else propagates out of
/// [`crate::read`] as the failure of the whole call.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The stream does not carry this reader's format signature.
    #[error("format signature mismatch")]
    FormatMismatch,

    /// No registered reader recognized the stream.
    #[error("unsupported source format")]
    Unsupported,

    /// A recognized format violated its own binary contract.
    #[error("malformed header: {0}")]
    Malformed(String),

    /// The stream ended before a required field could be read.
    #[error("unexpected end of data")]
    UnexpectedEof,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProbeError>;
