use snafu::Snafu;

pub use crate::parsing::{Error as ParsingError, RemainingError};

pub type Result<T, E = Error> = ::std::result::Result<T, E>;

/// Every way decoding SSH key or signature material can fail.
///
/// Each variant is a cause of the same failure kind: the input could not be
/// decoded. A signature that decodes but does not verify is not an error.
pub type DecodeError = Error;

/// Error types
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("unrecognized algorithm: {name}"))]
    UnknownAlgorithm { name: String },
    #[snafu(display("unknown curve: {name}"))]
    UnknownCurve { name: String },
    #[snafu(display("bad DSA signature size: {size} (expected {expected})"))]
    InvalidSignatureSize { size: usize, expected: usize },
    #[snafu(display("bad asn1 signature: {reason}"))]
    BadAsn1Signature { reason: &'static str },
    #[snafu(display("unexpected trailing data: consumed {consumed} of {len} bytes"))]
    TrailingData { consumed: usize, len: usize },
    #[snafu(display("signature algorithm mismatch: expected {expected}, found {found}"))]
    AlgorithmMismatch { expected: String, found: String },
    #[snafu(display("signature component too long: {len} bytes (max {max})"))]
    ComponentTooLong { len: usize, max: usize },
    #[snafu(display("invalid public point: {reason}"))]
    InvalidPoint { reason: &'static str },
    /// Signals algorithms we recognize but do not handle in this position
    #[snafu(display("Unsupported: {message}"))]
    Unsupported { message: String },
    #[snafu(display("{message}"))]
    Message { message: String },
    #[snafu(display("SHA1 hash collision detected"))]
    Sha1HashCollision,
    #[snafu(transparent)]
    Parsing { source: ParsingError },
    #[snafu(transparent)]
    Der { source: der::Error },
    #[snafu(transparent)]
    Spki { source: spki::Error },
    #[snafu(transparent)]
    SignatureError { source: signature::Error },
    #[snafu(transparent)]
    IO { source: std::io::Error },
    #[snafu(transparent)]
    Utf8Error { source: std::str::Utf8Error },
    #[snafu(transparent)]
    TryFromInt { source: std::num::TryFromIntError },
}

impl From<String> for Error {
    fn from(err: String) -> Error {
        Error::Message { message: err }
    }
}

macro_rules! unsupported_err {
    ($e:expr) => {
        return Err($crate::errors::Error::Unsupported { message: $e.to_string() })
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::Unsupported { message: format!($fmt, $($arg)+) })
    };
}

macro_rules! bail {
    ($e:expr) => {
        return Err($crate::errors::Error::Message { message: $e.to_string() })
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::Message { message: format!($fmt, $($arg)+) })
    };
}

macro_rules! format_err {
    ($e:expr) => {
        $crate::errors::Error::Message { message: $e.to_string() }
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::errors::Error::Message { message: format!($fmt, $($arg)+) }
    };
}

macro_rules! ensure {
    ($cond:expr, $e:expr) => {
        if !($cond) {
            $crate::errors::bail!($e);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)+) => {
        if !($cond) {
            $crate::errors::bail!($fmt, $($arg)+);
        }
    };
}

pub(crate) use {bail, ensure, format_err, unsupported_err};
