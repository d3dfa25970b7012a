use std::str::FromStr;

use const_oid::ObjectIdentifier;

use crate::crypto::hash::HashAlgorithm;
use crate::errors::Error;

/// `secp256r1` / `prime256v1`
pub const P256_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
/// `secp384r1`
pub const P384_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
/// `secp521r1`
pub const P521_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");

/// The NIST curves usable with `ecdsa-sha2-*` keys.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc5656#section-10.1>
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, derive_more::Display)]
pub enum EcdsaCurve {
    #[display("nistp256")]
    NistP256,
    #[display("nistp384")]
    NistP384,
    #[display("nistp521")]
    NistP521,
}

impl EcdsaCurve {
    pub const ALL: [EcdsaCurve; 3] = [Self::NistP256, Self::NistP384, Self::NistP521];

    /// Identifier used in SSH wire encodings.
    pub const fn ssh_name(&self) -> &'static str {
        match self {
            EcdsaCurve::NistP256 => "nistp256",
            EcdsaCurve::NistP384 => "nistp384",
            EcdsaCurve::NistP521 => "nistp521",
        }
    }

    /// Name the curve goes by in ASN.1 / X9.62 land.
    pub const fn backend_name(&self) -> &'static str {
        match self {
            EcdsaCurve::NistP256 => "prime256v1",
            EcdsaCurve::NistP384 => "secp384r1",
            EcdsaCurve::NistP521 => "secp521r1",
        }
    }

    /// Named curve OID.
    pub const fn oid(&self) -> ObjectIdentifier {
        match self {
            EcdsaCurve::NistP256 => P256_OID,
            EcdsaCurve::NistP384 => P384_OID,
            EcdsaCurve::NistP521 => P521_OID,
        }
    }

    /// Digest paired with the curve for `ecdsa-sha2-*` signatures.
    pub const fn hash_algorithm(&self) -> HashAlgorithm {
        match self {
            EcdsaCurve::NistP256 => HashAlgorithm::Sha256,
            EcdsaCurve::NistP384 => HashAlgorithm::Sha384,
            EcdsaCurve::NistP521 => HashAlgorithm::Sha512,
        }
    }

    /// Size of a field element in bytes.
    pub const fn field_size(&self) -> usize {
        match self {
            EcdsaCurve::NistP256 => 32,
            EcdsaCurve::NistP384 => 48,
            EcdsaCurve::NistP521 => 66,
        }
    }

    /// Length of an uncompressed SEC1 point on this curve.
    pub const fn point_len(&self) -> usize {
        1 + 2 * self.field_size()
    }

    /// Name of the signature algorithm, and of the key type.
    pub const fn signature_algorithm(&self) -> &'static str {
        match self {
            EcdsaCurve::NistP256 => "ecdsa-sha2-nistp256",
            EcdsaCurve::NistP384 => "ecdsa-sha2-nistp384",
            EcdsaCurve::NistP521 => "ecdsa-sha2-nistp521",
        }
    }
}

impl FromStr for EcdsaCurve {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.ssh_name() == s)
            .ok_or_else(|| Error::UnknownCurve { name: s.to_string() })
    }
}
