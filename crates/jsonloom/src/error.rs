use thiserror::Error;

/// A codec failure, positioned at the symbol offset where it was detected.
///
/// Offsets count symbols of the active encoding: bytes for UTF-8 surfaces,
/// code units for UTF-16 surfaces. Write-side failures carry the writer
/// position at the point the formatter gave up.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct JsonError {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl JsonError {
    #[must_use]
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// What went wrong.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The reader found a structural token the current formatter did not
    /// expect.
    #[error("unexpected token '{0}'")]
    UnexpectedToken(char),
    /// The input view ended before the current value was complete.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// A `true`, `false`, `null` (or quoted non-finite float) literal was
    /// malformed.
    #[error("invalid literal")]
    InvalidLiteral,
    /// A malformed `\u` escape, including lone surrogate halves.
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// Ill-formed UTF-8 / UTF-16 inside a string payload.
    #[error("ill-formed text payload")]
    InvalidText,
    /// A JSON string did not name any declared member of the enumeration.
    #[error("unknown enumeration name {0:?}")]
    InvalidEnumName(String),
    /// An enumeration value outside the declared set was serialized.
    #[error("enumeration value {0} has no declared name")]
    InvalidEnumValue(i64),
    /// The composite recursion counter crossed the configured bound.
    #[error("nesting deeper than {0} levels")]
    NestingExceeded(u32),
    /// A numeric scalar overflowed the requested type.
    #[error("number out of range for {0}")]
    OutOfRange(&'static str),
    /// The async façade observed cancellation at an I/O boundary.
    #[error("operation cancelled")]
    Cancelled,
    /// An async source or sink failed.
    #[error("i/o failure: {0}")]
    Io(String),
}
