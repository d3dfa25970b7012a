//! # ssh-der
//!
//! Translates SSH wire encodings of DSA and ECDSA keys and signatures into the
//! ASN.1 DER structures the RustCrypto providers consume, and back, and drives
//! signature verification through them.
//!
//! ## Verifying a signature
//!
//! ```no_run
//! use ssh_der::{PublicKey, Verifier};
//!
//! # fn run(key_blob: &[u8], signature_blob: &[u8]) -> ssh_der::errors::Result<()> {
//! let key = PublicKey::from_bytes(key_blob)?;
//! if key.verify(b"signed data", signature_blob)? {
//!     println!("signature is valid");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Converting signature payloads
//!
//! ```
//! use ssh_der::crypto::dsa::DsaPublicKey;
//! use ssh_der::SignatureCodec;
//!
//! let payload = [0x11u8; 40];
//! let der = DsaPublicKey::to_der(&payload).unwrap();
//! assert_eq!(DsaPublicKey::to_wire(&der).unwrap(), payload);
//! ```

#![deny(unsafe_code)]

pub mod crypto;
pub mod errors;
pub mod key;
pub mod parsing;
pub mod ser;
pub mod types;

pub use self::crypto::dsa::{DsaPrivateKey, DsaPublicKey};
pub use self::crypto::ecdsa::EcdsaPublicKey;
pub use self::crypto::{SignatureCodec, Verifier};
pub use self::errors::{DecodeError, Error, Result};
pub use self::key::{PrivateKey, PublicKey};
