use std::str::FromStr;

use crate::crypto::ecc_curve::EcdsaCurve;
use crate::errors::{Error, Result};

/// SSH public key algorithm identifiers.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc4253#section-6.6>,
/// <https://www.rfc-editor.org/rfc/rfc5656#section-3.1>
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, derive_more::Display)]
pub enum KeyAlgorithm {
    /// DSA (Digital Signature Algorithm)
    #[display("ssh-dss")]
    Dsa,
    #[display("ecdsa-sha2-nistp256")]
    EcdsaSha2NistP256,
    #[display("ecdsa-sha2-nistp384")]
    EcdsaSha2NistP384,
    #[display("ecdsa-sha2-nistp521")]
    EcdsaSha2NistP521,
}

/// Which key variant is responsible for an algorithm.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum KeyFamily {
    Dsa,
    Ecdsa,
}

impl KeyAlgorithm {
    /// Every identifier the registry knows about.
    pub const ALL: [KeyAlgorithm; 4] = [
        Self::Dsa,
        Self::EcdsaSha2NistP256,
        Self::EcdsaSha2NistP384,
        Self::EcdsaSha2NistP521,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            KeyAlgorithm::Dsa => "ssh-dss",
            KeyAlgorithm::EcdsaSha2NistP256 => EcdsaCurve::NistP256.signature_algorithm(),
            KeyAlgorithm::EcdsaSha2NistP384 => EcdsaCurve::NistP384.signature_algorithm(),
            KeyAlgorithm::EcdsaSha2NistP521 => EcdsaCurve::NistP521.signature_algorithm(),
        }
    }

    pub const fn family(&self) -> KeyFamily {
        match self {
            KeyAlgorithm::Dsa => KeyFamily::Dsa,
            KeyAlgorithm::EcdsaSha2NistP256
            | KeyAlgorithm::EcdsaSha2NistP384
            | KeyAlgorithm::EcdsaSha2NistP521 => KeyFamily::Ecdsa,
        }
    }

    /// The curve named by an `ecdsa-sha2-*` identifier.
    pub const fn curve(&self) -> Option<EcdsaCurve> {
        match self {
            KeyAlgorithm::Dsa => None,
            KeyAlgorithm::EcdsaSha2NistP256 => Some(EcdsaCurve::NistP256),
            KeyAlgorithm::EcdsaSha2NistP384 => Some(EcdsaCurve::NistP384),
            KeyAlgorithm::EcdsaSha2NistP521 => Some(EcdsaCurve::NistP521),
        }
    }

    /// Resolves `name`, requiring it to belong to `family`.
    pub(crate) fn resolve_in(name: &str, family: KeyFamily) -> Result<Self> {
        let algorithm = resolve(name)?;
        if algorithm.family() != family {
            return Err(Error::UnknownAlgorithm {
                name: name.to_string(),
            });
        }

        Ok(algorithm)
    }
}

impl FromStr for KeyAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        resolve(s)
    }
}

/// Looks up the algorithm, and with it the key variant, for an SSH identifier.
pub fn resolve(identifier: &str) -> Result<KeyAlgorithm> {
    KeyAlgorithm::ALL
        .into_iter()
        .find(|algorithm| algorithm.as_str() == identifier)
        .ok_or_else(|| Error::UnknownAlgorithm {
            name: identifier.to_string(),
        })
}
