use thiserror::Error;

use super::value::ValueKind;

/// Grammar and canonical-form violations found while decoding.
///
/// The decoder stops at the first violation; the position in the input is
/// not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("leading zero in number")]
    LeadingZero,

    #[error("trailing data after root value")]
    TooMuchData,

    #[error("missing postfix 'e'")]
    MissingPostfix,

    #[error("invalid value prefix")]
    BadPrefix,

    #[error("negative string length")]
    NegativeStringLength,

    #[error("missing colon in string")]
    StringMissingColon,

    #[error("empty integer value")]
    IntegerEmpty,

    #[error("expected decimal digit in integer")]
    IntegerNonDecimal,

    #[error("integer does not fit in 64 bits")]
    IntegerOverflow,

    #[error("dictionary key is not a string")]
    DictKeyNotString,

    #[error("dictionary key without value")]
    DictIncompletePair,

    #[error("duplicate dictionary keys")]
    DictDuplicateKeys,

    #[error("dictionary keys out of order")]
    DictBadOrder,

    #[error("nesting too deep")]
    NestingTooDeep,
}

/// Failure to produce a wire encoding for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DumpError {
    #[error("null value has no encoding")]
    Null,
}

/// Misuse of the [`Value`](super::Value) accessor API.
///
/// These indicate a caller bug (wrong accessor for the value's tag, or a
/// missing index/key), not a malformed document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: ValueKind, found: ValueKind },

    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("key not found: {0}")]
    KeyNotFound(String),
}

/// Failure of a reader/writer based entry point.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("decode error: {0}")]
    Parse(#[from] ParseError),

    #[error("encode error: {0}")]
    Dump(#[from] DumpError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
