use std::io;

use bytes::{Buf, Bytes};

use crate::errors::{Error, Result};
use crate::parsing::BufParsing;
use crate::ser::{self, Serialize};

/// An SSH signature blob: the signature algorithm name followed by the
/// algorithm specific payload.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc4253#section-6.6>
#[derive(derive_more::Debug, PartialEq, Eq, Clone)]
pub struct SignatureEnvelope {
    algorithm: String,
    #[debug("{}", hex::encode(payload))]
    payload: Bytes,
}

impl SignatureEnvelope {
    pub fn new(algorithm: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            algorithm: algorithm.into(),
            payload: payload.into(),
        }
    }

    /// Reads an envelope from the front of `i`, leaving anything after it in place.
    pub fn try_from_buf<B: Buf>(mut i: B) -> Result<Self> {
        let algorithm = i.read_string("signature algorithm")?;
        let algorithm = std::str::from_utf8(&algorithm)?.to_string();
        let payload = i.read_string("signature payload")?;

        Ok(Self { algorithm, payload })
    }

    /// Decodes an envelope from the start of `blob`.
    ///
    /// Returns the envelope and the number of bytes it occupied.
    pub fn decode(blob: &[u8]) -> Result<(Self, usize)> {
        let mut i = blob;
        let envelope = Self::try_from_buf(&mut i)?;
        let consumed = blob.len() - i.remaining();

        Ok((envelope, consumed))
    }

    /// Decodes an envelope that must span all of `blob`.
    pub fn from_slice(blob: &[u8]) -> Result<Self> {
        let (envelope, consumed) = Self::decode(blob)?;
        if consumed != blob.len() {
            return Err(Error::TrailingData {
                consumed,
                len: blob.len(),
            });
        }

        Ok(envelope)
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl Serialize for SignatureEnvelope {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        ser::write_string(writer, self.algorithm.as_bytes())?;
        ser::write_string(writer, &self.payload)?;

        Ok(())
    }

    fn write_len(&self) -> usize {
        ser::string_len(self.algorithm.as_bytes()) + ser::string_len(&self.payload)
    }
}
