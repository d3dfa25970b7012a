//! Parsing functions to parse SSH wire data using [Buf].
//!
//! Ref: <https://www.rfc-editor.org/rfc/rfc4251#section-5>

use bytes::{Buf, Bytes};
use snafu::{Backtrace, Snafu};

/// Parsing errors
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{}: reading {:?}", context, typ))]
    TooShort {
        typ: Typ,
        context: &'static str,
        #[snafu(backtrace)]
        source: RemainingError,
    },
    #[snafu(display("{}: length {} exceeds limit {}", context, len, max))]
    TooLong {
        len: usize,
        max: usize,
        context: &'static str,
        backtrace: Option<Backtrace>,
    },
}

impl Error {
    /// Returns true if the error indictates that the input was too short.
    pub fn is_incomplete(&self) -> bool {
        match self {
            Self::TooShort { .. } => true,
            Self::TooLong { .. } => false,
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("needed {}, remaining {}", needed, remaining))]
pub struct RemainingError {
    pub needed: usize,
    pub remaining: usize,
    backtrace: Option<Backtrace>,
}

#[derive(Debug)]
pub enum Typ {
    U32Be,
    Take(usize),
}

/// Upper bound for a single length-prefixed field.
///
/// Key and signature material never comes close, this only keeps a corrupt
/// length prefix from being taken at face value.
const MAX_FIELD_LEN: usize = 256 * 1024;

pub trait BufParsing: Buf + Sized {
    fn read_be_u32(&mut self, context: &'static str) -> Result<u32, Error> {
        self.ensure_remaining(4).map_err(|e| Error::TooShort {
            typ: Typ::U32Be,
            source: e,
            context,
        })?;
        Ok(self.get_u32())
    }

    fn read_take(&mut self, size: usize, context: &'static str) -> Result<Bytes, Error> {
        self.ensure_remaining(size).map_err(|e| Error::TooShort {
            typ: Typ::Take(size),
            source: e,
            context,
        })?;
        Ok(self.copy_to_bytes(size))
    }

    /// Reads an SSH `string`: a `uint32` length followed by that many bytes.
    fn read_string(&mut self, context: &'static str) -> Result<Bytes, Error> {
        let len = self.read_be_u32(context)? as usize;
        if len > MAX_FIELD_LEN {
            return Err(Error::TooLong {
                len,
                max: MAX_FIELD_LEN,
                context,
                backtrace: snafu::GenerateImplicitData::generate(),
            });
        }
        self.read_take(len, context)
    }

    fn ensure_remaining(&self, size: usize) -> Result<(), RemainingError> {
        if self.remaining() < size {
            return Err(RemainingError {
                needed: size,
                remaining: self.remaining(),
                backtrace: snafu::GenerateImplicitData::generate(),
            });
        }

        Ok(())
    }
}

impl<B: Buf> BufParsing for B {}
