use std::io;

use bytes::{Buf, Bytes};
use num_bigint::BigUint;
use zeroize::Zeroize;

use crate::errors::Result;
use crate::parsing::BufParsing;
use crate::ser::{self, Serialize};

/// Represents an owned SSH `mpint` value.
///
/// The inner value is the minimal two's complement, big-endian representation and
/// is ready to be serialized. Zero is represented by the empty string.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc4251#section-5>
#[derive(Default, Clone, PartialEq, Eq, derive_more::Debug)]
pub struct Mpint(#[debug("{}", hex::encode(_0))] Bytes);

impl Mpint {
    /// Parses the given buffer as an `mpint`.
    ///
    /// The buffer is expected to be length-prefixed. Redundant sign padding is
    /// dropped, so the result is always minimal.
    pub fn from_buf<B: Buf>(mut i: B) -> Result<Self> {
        let n = i.read_string("mpint")?;
        let n_stripped = strip_sign_padding(&n);
        let n_stripped = n.slice_ref(n_stripped);

        Ok(Mpint(n_stripped))
    }

    /// Represent the two's complement data in `raw` as an `mpint`.
    /// Note that `raw` is not expected to be length-prefixed!
    pub fn from_slice(raw: &[u8]) -> Self {
        Self(strip_sign_padding(raw).to_vec().into())
    }

    /// Represent the unsigned big-endian magnitude in `raw` as an `mpint`.
    ///
    /// A zero byte is prepended when the most significant bit is set, so the
    /// value stays non-negative.
    pub fn from_positive_bytes(raw: &[u8]) -> Self {
        let raw = strip_leading_zeros(raw);
        match raw.first() {
            Some(b) if b & 0x80 != 0 => {
                let mut out = Vec::with_capacity(raw.len() + 1);
                out.push(0);
                out.extend_from_slice(raw);
                Self(out.into())
            }
            _ => Self(raw.to_vec().into()),
        }
    }

    /// Builds an `mpint` from the content octets of a DER `INTEGER`.
    pub(crate) fn from_der_content(content: &[u8]) -> Self {
        Self::from_slice(content)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.0.first().is_some_and(|b| b & 0x80 != 0)
    }

    /// The wire representation, without the length prefix.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The unsigned magnitude, without any sign padding.
    ///
    /// Returns `None` for negative values.
    pub fn positive_bytes(&self) -> Option<&[u8]> {
        if self.is_negative() {
            return None;
        }
        Some(strip_leading_zeros(&self.0))
    }

    /// The content octets of the equivalent DER `INTEGER`.
    ///
    /// Identical to the wire bytes, except that zero is encoded as a single octet.
    pub(crate) fn der_content(&self) -> &[u8] {
        if self.0.is_empty() {
            &[0]
        } else {
            &self.0
        }
    }

    pub fn to_biguint(&self) -> Option<BigUint> {
        self.positive_bytes().map(BigUint::from_bytes_be)
    }
}

/// Drops leading `0x00` / `0xff` octets that only repeat the sign bit.
#[inline]
fn strip_sign_padding(bytes: &[u8]) -> &[u8] {
    let mut start = 0;
    while start + 1 < bytes.len() {
        let (b, next) = (bytes[start], bytes[start + 1]);
        let redundant = (b == 0x00 && next & 0x80 == 0) || (b == 0xff && next & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }

    match &bytes[start..] {
        [0x00] => &[],
        rest => rest,
    }
}

#[inline]
fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    bytes
        .iter()
        .position(|b| b != &0)
        .map_or(&[], |offset| &bytes[offset..])
}

/// Wipes the value, leaving zero behind.
///
/// The octets are overwritten in place when this is the only handle on the
/// underlying buffer. Shared buffers are only released.
impl Zeroize for Mpint {
    fn zeroize(&mut self) {
        let bytes = std::mem::take(&mut self.0);
        if let Ok(mut unique) = bytes.try_into_mut() {
            unique.as_mut().zeroize();
        }
    }
}

impl AsRef<[u8]> for Mpint {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Serialize for Mpint {
    fn to_writer<W: io::Write>(&self, w: &mut W) -> Result<()> {
        ser::write_string(w, &self.0)
    }

    fn write_len(&self) -> usize {
        ser::string_len(&self.0)
    }
}

impl From<BigUint> for Mpint {
    fn from(other: BigUint) -> Self {
        Mpint::from_positive_bytes(&other.to_bytes_be())
    }
}

impl From<&BigUint> for Mpint {
    fn from(other: &BigUint) -> Self {
        Mpint::from_positive_bytes(&other.to_bytes_be())
    }
}
