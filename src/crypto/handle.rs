use std::fmt;

use log::{debug, warn};
use signature::hazmat::PrehashVerifier;
use spki::DecodePublicKey;

use crate::crypto::ecc_curve::EcdsaCurve;
use crate::crypto::hash::HashAlgorithm;
use crate::errors::Result;

/// Verification key object held by the crypto provider.
///
/// Always constructed from DER `SubjectPublicKeyInfo` bytes.
#[derive(Clone)]
pub enum KeyHandle {
    Dsa(dsa::VerifyingKey),
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
    P521(p521::ecdsa::VerifyingKey),
}

impl KeyHandle {
    /// Builds a DSA handle from a DER `SubjectPublicKeyInfo`.
    pub fn from_dsa_der(der: &[u8]) -> Result<Self> {
        let key = dsa::VerifyingKey::from_public_key_der(der)?;
        Ok(KeyHandle::Dsa(key))
    }

    /// Builds an ECDSA handle on `curve` from a DER `SubjectPublicKeyInfo`.
    ///
    /// Fails if the structure names a different curve.
    pub fn from_ecdsa_der(curve: EcdsaCurve, der: &[u8]) -> Result<Self> {
        let handle = match curve {
            EcdsaCurve::NistP256 => {
                let key = p256::PublicKey::from_public_key_der(der)?;
                KeyHandle::P256(p256::ecdsa::VerifyingKey::from_affine(*key.as_affine())?)
            }
            EcdsaCurve::NistP384 => {
                let key = p384::PublicKey::from_public_key_der(der)?;
                KeyHandle::P384(p384::ecdsa::VerifyingKey::from_affine(*key.as_affine())?)
            }
            EcdsaCurve::NistP521 => {
                let key = p521::PublicKey::from_public_key_der(der)?;
                KeyHandle::P521(p521::ecdsa::VerifyingKey::from_affine(*key.as_affine())?)
            }
        };

        Ok(handle)
    }

    /// Verifies a DER encoded signature over `message`, hashed with `hash`.
    ///
    /// A signature the provider refuses to decode counts as not verifying: the
    /// caller already checked that it is structurally a pair of integers.
    pub fn verify(&self, hash: HashAlgorithm, der_signature: &[u8], message: &[u8]) -> Result<bool> {
        let hashed = hash.digest(message)?;

        let valid = match self {
            KeyHandle::Dsa(key) => check(key, &hashed, dsa::Signature::try_from(der_signature)),
            KeyHandle::P256(key) => check(
                key,
                &hashed,
                p256::ecdsa::Signature::from_der(der_signature),
            ),
            KeyHandle::P384(key) => check(
                key,
                &hashed,
                p384::ecdsa::Signature::from_der(der_signature),
            ),
            KeyHandle::P521(key) => check(
                key,
                &hashed,
                p521::ecdsa::Signature::from_der(der_signature),
            ),
        };

        debug!("{} signature with {}: valid={}", self.name(), hash, valid);
        Ok(valid)
    }

    fn name(&self) -> &'static str {
        match self {
            KeyHandle::Dsa(_) => "DSA",
            KeyHandle::P256(_) => "ECDSA P-256",
            KeyHandle::P384(_) => "ECDSA P-384",
            KeyHandle::P521(_) => "ECDSA P-521",
        }
    }
}

impl fmt::Debug for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyHandle").field(&self.name()).finish()
    }
}

fn check<K, S>(key: &K, hashed: &[u8], signature: signature::Result<S>) -> bool
where
    K: PrehashVerifier<S>,
{
    match signature {
        Ok(signature) => key.verify_prehash(hashed, &signature).is_ok(),
        Err(err) => {
            warn!("provider rejected signature encoding: {err}");
            false
        }
    }
}
