//! SSH public and private keys, dispatched on their algorithm name.

use std::io;

use bytes::Buf;
use log::debug;

use crate::crypto::dsa::{DsaPrivateKey, DsaPublicKey};
use crate::crypto::ecdsa::EcdsaPublicKey;
use crate::crypto::handle::KeyHandle;
use crate::crypto::public_key::{resolve, KeyAlgorithm, KeyFamily};
use crate::crypto::Verifier;
use crate::errors::{unsupported_err, Error, Result};
use crate::parsing::BufParsing;
use crate::ser::Serialize;

/// A public key of any supported algorithm.
#[derive(Debug, Clone, derive_more::From)]
pub enum PublicKey {
    Dsa(DsaPublicKey),
    Ecdsa(EcdsaPublicKey),
}

impl PublicKey {
    /// Parses a complete public key blob.
    ///
    /// Ref: <https://www.rfc-editor.org/rfc/rfc4253#section-6.6>
    pub fn from_bytes(blob: &[u8]) -> Result<Self> {
        let mut i = blob;
        let key = Self::try_from_buf(&mut i)?;
        if i.has_remaining() {
            return Err(Error::TrailingData {
                consumed: blob.len() - i.remaining(),
                len: blob.len(),
            });
        }

        Ok(key)
    }

    /// Reads a public key blob from the front of `i`.
    pub fn try_from_buf<B: Buf>(mut i: B) -> Result<Self> {
        let name = i.read_string("key algorithm")?;
        let name = std::str::from_utf8(&name)?;
        let algorithm = resolve(name)?;
        debug!("parsing {} public key", algorithm);

        let key = match algorithm.family() {
            KeyFamily::Dsa => DsaPublicKey::try_from_buf(name, &mut i)?.into(),
            KeyFamily::Ecdsa => {
                let key = EcdsaPublicKey::try_from_buf(name, &mut i)?;
                if algorithm.curve() != Some(key.curve()) {
                    return Err(Error::AlgorithmMismatch {
                        expected: algorithm.to_string(),
                        found: key.curve().signature_algorithm().to_string(),
                    });
                }
                key.into()
            }
        };

        Ok(key)
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PublicKey::Dsa(key) => key.algorithm(),
            PublicKey::Ecdsa(key) => key.algorithm(),
        }
    }
}

impl Verifier for PublicKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool> {
        match self {
            PublicKey::Dsa(key) => key.verify(data, signature),
            PublicKey::Ecdsa(key) => key.verify(data, signature),
        }
    }

    fn crypto_handle(&self) -> &KeyHandle {
        match self {
            PublicKey::Dsa(key) => key.crypto_handle(),
            PublicKey::Ecdsa(key) => key.crypto_handle(),
        }
    }

    fn key_structure(&self) -> Result<Vec<u8>> {
        match self {
            PublicKey::Dsa(key) => key.key_structure(),
            PublicKey::Ecdsa(key) => key.key_structure(),
        }
    }
}

impl Serialize for PublicKey {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        match self {
            PublicKey::Dsa(key) => key.to_writer(writer),
            PublicKey::Ecdsa(key) => key.to_writer(writer),
        }
    }

    fn write_len(&self) -> usize {
        match self {
            PublicKey::Dsa(key) => key.write_len(),
            PublicKey::Ecdsa(key) => key.write_len(),
        }
    }
}

/// A private key of any supported algorithm.
#[derive(Debug, Clone, derive_more::From)]
pub enum PrivateKey {
    Dsa(DsaPrivateKey),
}

impl PrivateKey {
    /// Parses a private key in the OpenSSH private section layout: the
    /// algorithm name, the algorithm's key fields and the comment.
    pub fn from_bytes(blob: &[u8]) -> Result<Self> {
        let mut i = blob;
        let name = i.read_string("key algorithm")?;
        let name = std::str::from_utf8(&name)?;

        let key = match resolve(name)?.family() {
            KeyFamily::Dsa => DsaPrivateKey::try_from_buf(name, &mut i)?,
            KeyFamily::Ecdsa => unsupported_err!("{} private keys", name),
        };

        if i.has_remaining() {
            return Err(Error::TrailingData {
                consumed: blob.len() - i.remaining(),
                len: blob.len(),
            });
        }

        Ok(key.into())
    }

    /// The public half, derived when the key was constructed.
    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::Dsa(key) => key.public_key().clone().into(),
        }
    }

    pub fn comment(&self) -> &str {
        match self {
            PrivateKey::Dsa(key) => key.comment(),
        }
    }

    /// Signs `data`, returning a complete SSH signature blob.
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            PrivateKey::Dsa(key) => key.sign(data),
        }
    }
}
