//! DER form of two-integer signatures, shared by DSA and ECDSA.
//!
//! ```text
//! Signature ::= SEQUENCE {
//!     r   INTEGER,
//!     s   INTEGER
//! }
//! ```

use der::asn1::AnyRef;
use der::{Decode, Encode, Tag, Tagged};

use crate::errors::{Error, Result};
use crate::types::Mpint;

/// Encodes `r` and `s` as a DER `SEQUENCE` of two `INTEGER`s.
pub(crate) fn encode_signature(r: &Mpint, s: &Mpint) -> Result<Vec<u8>> {
    let nodes = vec![
        AnyRef::new(Tag::Integer, r.der_content())?,
        AnyRef::new(Tag::Integer, s.der_content())?,
    ];

    Ok(nodes.to_der()?)
}

/// Decodes a DER signature into its `r` and `s` components.
///
/// Only a universal `SEQUENCE` holding exactly two universal `INTEGER`s is accepted.
pub(crate) fn decode_signature(der_signature: &[u8]) -> Result<(Mpint, Mpint)> {
    let nodes = Vec::<AnyRef<'_>>::from_der(der_signature).map_err(|err| {
        log::debug!("rejecting DER signature: {err}");
        Error::BadAsn1Signature {
            reason: "not a DER SEQUENCE",
        }
    })?;

    let [r, s] = nodes.as_slice() else {
        return Err(Error::BadAsn1Signature {
            reason: "expected exactly two elements",
        });
    };

    Ok((integer(r)?, integer(s)?))
}

fn integer(node: &AnyRef<'_>) -> Result<Mpint> {
    if node.tag() != Tag::Integer {
        return Err(Error::BadAsn1Signature {
            reason: "element is not an INTEGER",
        });
    }
    if node.value().is_empty() {
        return Err(Error::BadAsn1Signature {
            reason: "empty INTEGER",
        });
    }

    Ok(Mpint::from_der_content(node.value()))
}
