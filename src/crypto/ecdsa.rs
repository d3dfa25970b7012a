use std::io;

use bytes::{Buf, Bytes};
use const_oid::ObjectIdentifier;
use der::asn1::BitString;
use der::{Any, Encode};
use log::debug;
use spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};

use crate::crypto::asn1::{decode_signature, encode_signature};
use crate::crypto::ecc_curve::EcdsaCurve;
use crate::crypto::handle::KeyHandle;
use crate::crypto::public_key::{KeyAlgorithm, KeyFamily};
use crate::crypto::{SignatureCodec, Verifier};
use crate::errors::{Error, Result};
use crate::parsing::BufParsing;
use crate::ser::{self, Serialize};
use crate::types::{Mpint, SignatureEnvelope};

/// `id-ecPublicKey`
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc5480#section-2.1.1>
pub const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// An `ecdsa-sha2-*` public key.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc5656#section-3.1>
#[derive(Clone, derive_more::Debug)]
pub struct EcdsaPublicKey {
    algorithm: KeyAlgorithm,
    curve: EcdsaCurve,
    #[debug("{}", hex::encode(point))]
    point: Bytes,
    #[debug(skip)]
    handle: KeyHandle,
}

impl EcdsaPublicKey {
    /// Creates a key from its decoded wire fields.
    ///
    /// `point` is the uncompressed SEC1 encoding of the public point.
    pub fn new(algorithm: &str, curve: &str, point: impl Into<Bytes>) -> Result<Self> {
        let algorithm = KeyAlgorithm::resolve_in(algorithm, KeyFamily::Ecdsa)?;
        let curve: EcdsaCurve = curve.parse()?;
        let point = point.into();

        if point.len() != curve.point_len() {
            return Err(Error::InvalidPoint {
                reason: "invalid length",
            });
        }
        if point[0] != 0x04 {
            return Err(Error::InvalidPoint {
                reason: "not uncompressed",
            });
        }

        let structure = build_key_structure(curve, &point)?;
        let handle = KeyHandle::from_ecdsa_der(curve, &structure)?;
        debug!("loaded {} key on {}", algorithm, curve.backend_name());

        Ok(Self {
            algorithm,
            curve,
            point,
            handle,
        })
    }

    /// Parses the fields following the algorithm name in a public key blob.
    pub fn try_from_buf<B: Buf>(algorithm: &str, mut i: B) -> Result<Self> {
        let curve = i.read_string("ecdsa curve")?;
        let curve = std::str::from_utf8(&curve)?;
        let point = i.read_string("ecdsa public point")?;

        Self::new(algorithm, curve, point)
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }

    /// Uncompressed SEC1 public point.
    pub fn point(&self) -> &[u8] {
        &self.point
    }
}

/// ```text
/// SubjectPublicKeyInfo ::= SEQUENCE {
///     algorithm          SEQUENCE { id-ecPublicKey, namedCurve },
///     subjectPublicKey   BIT STRING
/// }
/// ```
fn build_key_structure(curve: EcdsaCurve, point: &[u8]) -> Result<Vec<u8>> {
    let info = SubjectPublicKeyInfoOwned {
        algorithm: AlgorithmIdentifierOwned {
            oid: EC_PUBLIC_KEY_OID,
            parameters: Some(Any::encode_from(&curve.oid())?),
        },
        subject_public_key: BitString::from_bytes(point)?,
    };

    Ok(info.to_der()?)
}

impl SignatureCodec for EcdsaPublicKey {
    /// The payload is `mpint r || mpint s`, and nothing else.
    ///
    /// Ref: <https://www.rfc-editor.org/rfc/rfc5656#section-3.1.2>
    fn to_der(payload: &[u8]) -> Result<Vec<u8>> {
        let mut i = payload;
        let r = Mpint::from_buf(&mut i)?;
        let s = Mpint::from_buf(&mut i)?;

        if i.has_remaining() {
            return Err(Error::TrailingData {
                consumed: payload.len() - i.remaining(),
                len: payload.len(),
            });
        }

        encode_signature(&r, &s)
    }

    fn to_wire(der_signature: &[u8]) -> Result<Vec<u8>> {
        let (r, s) = decode_signature(der_signature)?;

        let mut out = Vec::with_capacity(r.write_len() + s.write_len());
        r.to_writer(&mut out)?;
        s.to_writer(&mut out)?;

        Ok(out)
    }
}

impl Verifier for EcdsaPublicKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool> {
        let envelope = SignatureEnvelope::from_slice(signature)?;

        let expected = self.curve.signature_algorithm();
        if envelope.algorithm() != expected {
            return Err(Error::AlgorithmMismatch {
                expected: expected.to_string(),
                found: envelope.algorithm().to_string(),
            });
        }

        let der_signature = Self::to_der(envelope.payload())?;
        self.handle
            .verify(self.curve.hash_algorithm(), &der_signature, data)
    }

    fn crypto_handle(&self) -> &KeyHandle {
        &self.handle
    }

    fn key_structure(&self) -> Result<Vec<u8>> {
        build_key_structure(self.curve, &self.point)
    }
}

impl Serialize for EcdsaPublicKey {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        ser::write_string(writer, self.algorithm.as_str().as_bytes())?;
        ser::write_string(writer, self.curve.ssh_name().as_bytes())?;
        ser::write_string(writer, &self.point)?;

        Ok(())
    }

    fn write_len(&self) -> usize {
        ser::string_len(self.algorithm.as_str().as_bytes())
            + ser::string_len(self.curve.ssh_name().as_bytes())
            + ser::string_len(&self.point)
    }
}
