use std::str::FromStr;

use sha1_checked::{CollisionResult, Sha1};

use crate::errors::{bail, Error, Result};

/// Digest algorithms used by the supported SSH signature algorithms.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc5656#section-6.2.1>
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, derive_more::Display)]
pub enum HashAlgorithm {
    /// Fixed digest of `ssh-dss`.
    #[display("SHA1")]
    Sha1,
    #[display("SHA256")]
    Sha256,
    #[display("SHA384")]
    Sha384,
    #[display("SHA512")]
    Sha512,
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha384" | "sha-384" => Ok(Self::Sha384),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            _ => bail!("unknown hash"),
        }
    }
}

impl HashAlgorithm {
    /// Calculate the digest of the given input data.
    pub fn digest(self, data: &[u8]) -> Result<Vec<u8>> {
        use digest::Digest;

        Ok(match self {
            HashAlgorithm::Sha1 => match Sha1::try_digest(data) {
                CollisionResult::Ok(output) => output.to_vec(),
                CollisionResult::Collision(_) | CollisionResult::Mitigated(_) => {
                    return Err(Error::Sha1HashCollision)
                }
            },
            HashAlgorithm::Sha256 => sha2::Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha384 => sha2::Sha384::digest(data).to_vec(),
            HashAlgorithm::Sha512 => sha2::Sha512::digest(data).to_vec(),
        })
    }

    /// Returns the expected digest size for the given algorithm.
    pub fn digest_size(self) -> usize {
        use digest::Digest;

        match self {
            HashAlgorithm::Sha1 => <Sha1 as Digest>::output_size(),
            HashAlgorithm::Sha256 => <sha2::Sha256 as Digest>::output_size(),
            HashAlgorithm::Sha384 => <sha2::Sha384 as Digest>::output_size(),
            HashAlgorithm::Sha512 => <sha2::Sha512 as Digest>::output_size(),
        }
    }
}
