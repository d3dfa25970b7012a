//! # Cryptography module

use self::handle::KeyHandle;
use crate::errors::Result;

pub mod asn1;
pub mod dsa;
pub mod ecc_curve;
pub mod ecdsa;
pub mod handle;
pub mod hash;
pub mod public_key;

/// Converts signature payloads between their SSH wire form and DER.
///
/// Both directions are associated functions, usable without a key instance.
pub trait SignatureCodec {
    /// SSH wire signature payload to a DER `SEQUENCE { r INTEGER, s INTEGER }`.
    fn to_der(payload: &[u8]) -> Result<Vec<u8>>;

    /// DER signature to the SSH wire signature payload.
    fn to_wire(der_signature: &[u8]) -> Result<Vec<u8>>;
}

/// Describes keys that can verify SSH signatures.
pub trait Verifier {
    /// Verifies `signature`, a complete SSH signature blob, over `data`.
    ///
    /// Returns `Ok(false)` when the signature is well formed but does not verify,
    /// and an error when it cannot be decoded at all.
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool>;

    /// The provider key object built from this key's DER structure.
    fn crypto_handle(&self) -> &KeyHandle;

    /// DER `SubjectPublicKeyInfo` of this key.
    fn key_structure(&self) -> Result<Vec<u8>>;
}
