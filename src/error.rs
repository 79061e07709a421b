use std::io;

/// Errors from BMP decoding, encoding and filtering.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unrecognized format magic bytes (expected \"BM\")")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u64, height: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,
}

/// Coarse classification of a [`BitmapError`].
///
/// Callers that only need to decide what to do with a failure (for example,
/// which exit code to return) match on this instead of the full error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Opening, reading, creating or writing a file failed.
    Io,
    /// The data is not a well-formed BMP.
    Format,
    /// A well-formed BMP variant this codec does not decode.
    Unsupported,
    /// The caller passed something unusable (empty bitmap, bad strength).
    InvalidInput,
}

impl BitmapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::UnrecognizedFormat
            | Self::InvalidHeader(_)
            | Self::UnexpectedEof
            | Self::DimensionsTooLarge { .. }
            | Self::LimitExceeded(_) => ErrorKind::Format,
            Self::UnsupportedVariant(_) => ErrorKind::Unsupported,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        let io = BitmapError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.kind(), ErrorKind::Io);
        assert_eq!(BitmapError::UnrecognizedFormat.kind(), ErrorKind::Format);
        assert_eq!(BitmapError::UnexpectedEof.kind(), ErrorKind::Format);
        assert_eq!(
            BitmapError::UnsupportedVariant("rle".into()).kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            BitmapError::InvalidInput("empty".into()).kind(),
            ErrorKind::InvalidInput
        );
    }
}
