use std::io;

use bytes::Buf;
use const_oid::ObjectIdentifier;
use der::asn1::{BitString, UintRef};
use der::{Any, Decode, Encode, Sequence};
use dsa::{Components, SigningKey};
use log::debug;
use num_bigint::BigUint;
use signature::SignatureEncoding;
use spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};
use zeroize::Zeroizing;

use crate::crypto::asn1::{decode_signature, encode_signature};
use crate::crypto::handle::KeyHandle;
use crate::crypto::hash::HashAlgorithm;
use crate::crypto::public_key::{KeyAlgorithm, KeyFamily};
use crate::crypto::{SignatureCodec, Verifier};
use crate::errors::{ensure, format_err, Error, Result};
use crate::parsing::BufParsing;
use crate::ser::{self, Serialize};
use crate::types::{Mpint, SignatureEnvelope};

/// `id-dsa`
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc3279#section-2.3.2>
pub const DSA_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10040.4.1");

/// Width of each of `r` and `s` in an `ssh-dss` signature.
const COMPONENT_LEN: usize = 20;

/// Size of an `ssh-dss` signature payload.
pub const SIGNATURE_LEN: usize = 2 * COMPONENT_LEN;

/// ```text
/// Dss-Parms ::= SEQUENCE {
///     p   INTEGER,
///     q   INTEGER,
///     g   INTEGER
/// }
/// ```
#[derive(Sequence)]
struct DssParams<'a> {
    p: UintRef<'a>,
    q: UintRef<'a>,
    g: UintRef<'a>,
}

/// The OpenSSL `DSAPrivateKey` layout.
///
/// ```text
/// DSAPrivateKey ::= SEQUENCE {
///     version INTEGER,  -- 0
///     p INTEGER, q INTEGER, g INTEGER,
///     y INTEGER,
///     x INTEGER
/// }
/// ```
#[derive(Sequence)]
struct DsaPrivateKeyInfo<'a> {
    version: u8,
    p: UintRef<'a>,
    q: UintRef<'a>,
    g: UintRef<'a>,
    y: UintRef<'a>,
    x: UintRef<'a>,
}

/// An `ssh-dss` public key.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc4253#section-6.6>
#[derive(Clone, derive_more::Debug)]
pub struct DsaPublicKey {
    algorithm: KeyAlgorithm,
    p: Mpint,
    q: Mpint,
    g: Mpint,
    y: Mpint,
    #[debug(skip)]
    handle: KeyHandle,
}

impl DsaPublicKey {
    // FIPS 186-4 (Section 4.2) stops at 3072/256 for L/N, but 4096 bit keys
    // exist in the wild.
    const MAX_L_BITS: usize = 4096;
    const MAX_N_BITS: usize = 256;

    pub fn new(algorithm: &str, p: Mpint, q: Mpint, g: Mpint, y: Mpint) -> Result<Self> {
        let algorithm = KeyAlgorithm::resolve_in(algorithm, KeyFamily::Dsa)?;

        let structure = build_key_structure(&p, &q, &g, &y)?;
        let handle = KeyHandle::from_dsa_der(&structure)?;
        debug!("loaded {} key, p: {} bytes", algorithm, p.len());

        Ok(Self {
            algorithm,
            p,
            q,
            g,
            y,
            handle,
        })
    }

    /// Parses the fields following the algorithm name in a public key blob.
    pub fn try_from_buf<B: Buf>(algorithm: &str, mut i: B) -> Result<Self> {
        let (p, q, g, y) = read_public_fields(&mut i)?;
        Self::new(algorithm, p, q, g, y)
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    pub fn p(&self) -> &Mpint {
        &self.p
    }

    pub fn q(&self) -> &Mpint {
        &self.q
    }

    pub fn g(&self) -> &Mpint {
        &self.g
    }

    pub fn y(&self) -> &Mpint {
        &self.y
    }
}

fn read_public_fields<B: Buf>(mut i: B) -> Result<(Mpint, Mpint, Mpint, Mpint)> {
    let p = Mpint::from_buf(&mut i)?;
    let q = Mpint::from_buf(&mut i)?;
    let g = Mpint::from_buf(&mut i)?;
    let y = Mpint::from_buf(&mut i)?;

    // Cap the sizes before any of them reach the provider.
    ensure!(
        p.len() * 8 <= DsaPublicKey::MAX_L_BITS + 8,
        "p is too long ({} bytes)",
        p.len()
    );
    ensure!(
        q.len() * 8 <= DsaPublicKey::MAX_N_BITS + 8,
        "q is too long ({} bytes)",
        q.len()
    );
    // `g` and `y` are both "mod p"
    ensure!(g.len() <= p.len(), "g is longer than p ({} bytes)", g.len());
    ensure!(y.len() <= p.len(), "y is longer than p ({} bytes)", y.len());

    Ok((p, q, g, y))
}

/// Unsigned view of a key integer, as DER wants it.
fn magnitude<'a>(name: &str, value: &'a Mpint) -> Result<UintRef<'a>> {
    let bytes = value
        .positive_bytes()
        .ok_or_else(|| format_err!("DSA {} is negative", name))?;

    Ok(UintRef::new(bytes)?)
}

/// ```text
/// SubjectPublicKeyInfo ::= SEQUENCE {
///     algorithm          SEQUENCE { id-dsa, Dss-Parms },
///     subjectPublicKey   BIT STRING  -- DER INTEGER y
/// }
/// ```
fn build_key_structure(p: &Mpint, q: &Mpint, g: &Mpint, y: &Mpint) -> Result<Vec<u8>> {
    let params = DssParams {
        p: magnitude("p", p)?,
        q: magnitude("q", q)?,
        g: magnitude("g", g)?,
    };
    let y = magnitude("y", y)?.to_der()?;

    let info = SubjectPublicKeyInfoOwned {
        algorithm: AlgorithmIdentifierOwned {
            oid: DSA_OID,
            parameters: Some(Any::encode_from(&params)?),
        },
        subject_public_key: BitString::from_bytes(&y)?,
    };

    Ok(info.to_der()?)
}

impl SignatureCodec for DsaPublicKey {
    /// The payload is `r` and `s`, each a 20 byte unsigned big-endian integer.
    fn to_der(payload: &[u8]) -> Result<Vec<u8>> {
        if payload.len() != SIGNATURE_LEN {
            return Err(Error::InvalidSignatureSize {
                size: payload.len(),
                expected: SIGNATURE_LEN,
            });
        }

        let (r, s) = payload.split_at(COMPONENT_LEN);
        encode_signature(&Mpint::from_positive_bytes(r), &Mpint::from_positive_bytes(s))
    }

    fn to_wire(der_signature: &[u8]) -> Result<Vec<u8>> {
        let (r, s) = decode_signature(der_signature)?;

        let mut out = vec![0u8; SIGNATURE_LEN];
        let (r_out, s_out) = out.split_at_mut(COMPONENT_LEN);
        pad_component(&r, r_out)?;
        pad_component(&s, s_out)?;

        Ok(out)
    }
}

/// Right-aligns the magnitude of `value` in `out`.
fn pad_component(value: &Mpint, out: &mut [u8]) -> Result<()> {
    let bytes = value.positive_bytes().ok_or(Error::BadAsn1Signature {
        reason: "negative INTEGER",
    })?;
    if bytes.len() > out.len() {
        return Err(Error::ComponentTooLong {
            len: bytes.len(),
            max: out.len(),
        });
    }

    let offset = out.len() - bytes.len();
    out[offset..].copy_from_slice(bytes);

    Ok(())
}

impl Verifier for DsaPublicKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool> {
        let envelope = SignatureEnvelope::from_slice(signature)?;

        let expected = self.algorithm.as_str();
        if envelope.algorithm() != expected {
            return Err(Error::AlgorithmMismatch {
                expected: expected.to_string(),
                found: envelope.algorithm().to_string(),
            });
        }

        let der_signature = Self::to_der(envelope.payload())?;
        self.handle
            .verify(HashAlgorithm::Sha1, &der_signature, data)
    }

    fn crypto_handle(&self) -> &KeyHandle {
        &self.handle
    }

    fn key_structure(&self) -> Result<Vec<u8>> {
        build_key_structure(&self.p, &self.q, &self.g, &self.y)
    }
}

impl Serialize for DsaPublicKey {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        ser::write_string(writer, self.algorithm.as_str().as_bytes())?;
        self.p.to_writer(writer)?;
        self.q.to_writer(writer)?;
        self.g.to_writer(writer)?;
        self.y.to_writer(writer)?;

        Ok(())
    }

    fn write_len(&self) -> usize {
        let mut sum = ser::string_len(self.algorithm.as_str().as_bytes());
        sum += self.p.write_len();
        sum += self.q.write_len();
        sum += self.g.write_len();
        sum += self.y.write_len();
        sum
    }
}

/// An `ssh-dss` private key, together with the public key derived from it.
#[derive(Clone, derive_more::Debug)]
pub struct DsaPrivateKey {
    comment: String,
    public_key: DsaPublicKey,
    #[debug("..")]
    structure: Zeroizing<Vec<u8>>,
    #[debug("..")]
    handle: SigningKey,
}

impl DsaPrivateKey {
    pub fn new(
        algorithm: &str,
        p: Mpint,
        q: Mpint,
        g: Mpint,
        x: Mpint,
        y: Mpint,
        comment: impl Into<String>,
    ) -> Result<Self> {
        let x = Zeroizing::new(x);
        let public_key = DsaPublicKey::new(algorithm, p, q, g, y)?;

        let info = DsaPrivateKeyInfo {
            version: 0,
            p: magnitude("p", &public_key.p)?,
            q: magnitude("q", &public_key.q)?,
            g: magnitude("g", &public_key.g)?,
            y: magnitude("y", &public_key.y)?,
            x: magnitude("x", &x)?,
        };
        let structure = Zeroizing::new(info.to_der()?);
        let handle = signing_key_from_der(&structure)?;

        Ok(Self {
            comment: comment.into(),
            public_key,
            structure,
            handle,
        })
    }

    /// Parses the fields following the algorithm name in a private key blob:
    /// `mpint p, q, g, y, x` and `string comment`.
    pub fn try_from_buf<B: Buf>(algorithm: &str, mut i: B) -> Result<Self> {
        let (p, q, g, y) = read_public_fields(&mut i)?;
        let mut x = Zeroizing::new(Mpint::from_buf(&mut i)?);
        ensure!(x.len() <= q.len(), "x is longer than q ({} bytes)", x.len());
        let comment = i.read_string("comment")?;
        let comment = std::str::from_utf8(&comment)?;

        Self::new(algorithm, p, q, g, std::mem::take(&mut *x), y, comment)
    }

    pub fn public_key(&self) -> &DsaPublicKey {
        &self.public_key
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn crypto_handle(&self) -> &SigningKey {
        &self.handle
    }

    /// DER `DSAPrivateKey` the signing key was built from.
    pub fn key_structure(&self) -> &[u8] {
        &self.structure
    }

    /// Signs `data` with SHA-1 and deterministic nonces (RFC 6979), returning a
    /// complete `ssh-dss` signature blob.
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let digest = HashAlgorithm::Sha1.digest(data)?;

        // FIXME: Use sha1_checked once it implements BlockSizeUser
        // (See https://github.com/RustCrypto/hashes/pull/582)
        let signature = self
            .handle
            .sign_prehashed_rfc6979::<sha1::Sha1>(&digest)?;

        let payload = DsaPublicKey::to_wire(&signature.to_vec())?;
        SignatureEnvelope::new(self.public_key.algorithm.as_str(), payload).to_bytes()
    }
}

fn signing_key_from_der(der: &[u8]) -> Result<SigningKey> {
    let info = DsaPrivateKeyInfo::from_der(der)?;
    if info.version != 0 {
        return Err(Error::Unsupported {
            message: format!("DSA private key version {}", info.version),
        });
    }

    let uint = |value: UintRef<'_>| BigUint::from_bytes_be(value.as_bytes());
    let components = Components::from_components(uint(info.p), uint(info.q), uint(info.g))?;
    let verifying_key = dsa::VerifyingKey::from_components(components, uint(info.y))?;

    Ok(SigningKey::from_components(verifying_key, uint(info.x))?)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use proptest::prelude::*;

    use super::*;

    // RFC 6979, A.2.1
    const P: [u8; 128] = hex!(
        "86F5CA03DCFEB225063FF830A0C769B9DD9D6153AD91D7CE27F787C43278B447"
        "E6533B86B18BED6E8A48B784A14C252C5BE0DBF60B86D6385BD2F12FB763ED88"
        "73ABFD3F5BA2E0A8C0A59082EAC056935E529DAF7C610467899C77ADEDFC846C"
        "881870B7B19B2B58F9BE0521A17002E3BDD6B86685EE90B3D9A1B02B782B1779"
    );
    const Q: [u8; 20] = hex!("996F967F6C8E388D9E28D01E205FBA957A5698B1");
    const G: [u8; 128] = hex!(
        "07B0F92546150B62514BB771E2A0C0CE387F03BDA6C56B505209FF25FD3C133D"
        "89BBCD97E904E09114D9A7DEFDEADFC9078EA544D2E401AEECC40BB9FBBF78FD"
        "87995A10A1C27CB7789B594BA7EFB5C4326A9FE59A070E136DB77175464ADCA4"
        "17BE5DCE2F40D10A46A3A3943F26AB7FD9C0398FF8C76EE0A56826A8A88F1DBD"
    );
    const X: [u8; 20] = hex!("411602CB19A6CCC34494D79D98EF1E7ED5AF25F7");
    const Y: [u8; 128] = hex!(
        "5DF5E01DED31D0297E274E1691C192FE5868FEF9E19A84776454B100CF16F653"
        "92195A38B90523E2542EE61871C0440CB87C322FC4B4D2EC5E1E7EC766E1BE8D"
        "4CE935437DC11C3C8FD426338933EBFE739CB3465F4D3668C5E473508253B1E6"
        "82F65CBDC4FAE93C2EA212390E54905A86E2223170B44EAA7DA5DD9FFCFB7F3B"
    );

    fn mpint(bytes: &[u8]) -> Mpint {
        Mpint::from_positive_bytes(bytes)
    }

    fn public_key() -> DsaPublicKey {
        DsaPublicKey::new("ssh-dss", mpint(&P), mpint(&Q), mpint(&G), mpint(&Y)).unwrap()
    }

    fn private_key() -> DsaPrivateKey {
        DsaPrivateKey::new(
            "ssh-dss",
            mpint(&P),
            mpint(&Q),
            mpint(&G),
            mpint(&X),
            mpint(&Y),
            "test key",
        )
        .unwrap()
    }

    #[test]
    fn test_to_der() {
        let payload = hex!(
            "2E1A0C2562B2912CAAF89186FB0F42001585DA55"
            "29EFB6B0AFF2D7A68EB70CA313022253B9A88DF5"
        );
        let der = DsaPublicKey::to_der(&payload).unwrap();
        assert_eq!(
            der,
            hex!(
                "302C"
                "0214 2E1A0C2562B2912CAAF89186FB0F42001585DA55"
                "0214 29EFB6B0AFF2D7A68EB70CA313022253B9A88DF5"
            )
        );
        assert_eq!(DsaPublicKey::to_wire(&der).unwrap(), payload);
    }

    #[test]
    fn test_to_der_high_bit_and_leading_zeros() {
        let mut payload = [0u8; 40];
        payload[0] = 0x80;
        payload[39] = 0x01;
        let der = DsaPublicKey::to_der(&payload).unwrap();

        assert_eq!(&der[..4], &hex!("301A 0215"));
        assert_eq!(&der[4..6], &hex!("0080"));
        assert_eq!(&der[der.len() - 3..], &hex!("020101"));
        assert_eq!(DsaPublicKey::to_wire(&der).unwrap(), payload);
    }

    #[test]
    fn test_to_wire_rejects() {
        // 21 byte magnitude
        let der = hex!(
            "302F"
            "0215 01 2E1A0C2562B2912CAAF89186FB0F42001585DA55"
            "0216 0001 29EFB6B0AFF2D7A68EB70CA313022253B9A88DF5"
        );
        assert!(matches!(
            DsaPublicKey::to_wire(&der),
            Err(Error::ComponentTooLong { len: 21, max: 20 })
        ));

        // negative r
        assert!(matches!(
            DsaPublicKey::to_wire(&hex!("3006 0201ff 020101")),
            Err(Error::BadAsn1Signature { .. })
        ));

        // SET
        assert!(matches!(
            DsaPublicKey::to_wire(&hex!("3106 020101 020101")),
            Err(Error::BadAsn1Signature { .. })
        ));
    }

    #[test]
    fn test_invalid_algorithm() {
        for algorithm in ["ecdsa-sha2-nistp256", "ssh-rsa", "dsa"] {
            let err = DsaPublicKey::new(algorithm, mpint(&P), mpint(&Q), mpint(&G), mpint(&Y))
                .unwrap_err();
            assert!(matches!(err, Error::UnknownAlgorithm { .. }), "{algorithm}");

            let err = DsaPrivateKey::new(
                algorithm,
                mpint(&P),
                mpint(&Q),
                mpint(&G),
                mpint(&X),
                mpint(&Y),
                "",
            )
            .unwrap_err();
            assert!(matches!(err, Error::UnknownAlgorithm { .. }), "{algorithm}");
        }
    }

    #[test]
    fn test_key_structure() {
        let key = public_key();
        let der = key.key_structure().unwrap();

        let spki = spki::SubjectPublicKeyInfoRef::try_from(der.as_slice()).unwrap();
        assert_eq!(spki.algorithm.oid, DSA_OID);

        let params = spki.algorithm.parameters.unwrap();
        let params: DssParams<'_> = params.decode_as().unwrap();
        assert_eq!(params.p.as_bytes(), &P);
        assert_eq!(params.q.as_bytes(), &Q);
        assert_eq!(params.g.as_bytes(), &G);

        let y = UintRef::from_der(spki.subject_public_key.raw_bytes()).unwrap();
        assert_eq!(y.as_bytes(), &Y);
    }

    #[test]
    fn test_private_key_structure() {
        let key = private_key();
        let info = DsaPrivateKeyInfo::from_der(key.key_structure()).unwrap();

        assert_eq!(info.version, 0);
        assert_eq!(info.y.as_bytes(), &Y);
        assert_eq!(info.x.as_bytes(), &X);
        assert_eq!(key.comment(), "test key");
        assert!(!format!("{key:?}").contains(&hex::encode(X)));
    }

    #[test]
    fn test_private_key_from_buf() {
        let mut blob = Vec::new();
        for field in [&P[..], &Q, &G, &Y, &X] {
            mpint(field).to_writer(&mut blob).unwrap();
        }
        ser::write_string(&mut blob, b"test key").unwrap();

        let key = DsaPrivateKey::try_from_buf("ssh-dss", &blob[..]).unwrap();
        assert_eq!(key.comment(), "test key");
        assert_eq!(key.key_structure(), private_key().key_structure());

        // x wider than q
        let mut blob = Vec::new();
        for field in [&P[..], &Q, &G, &Y, &[0x7f; 32]] {
            mpint(field).to_writer(&mut blob).unwrap();
        }
        ser::write_string(&mut blob, b"").unwrap();
        assert!(matches!(
            DsaPrivateKey::try_from_buf("ssh-dss", &blob[..]),
            Err(Error::Message { .. })
        ));
    }

    #[test]
    fn test_sign_rfc6979() {
        let _ = pretty_env_logger::try_init();

        let key = private_key();
        let check = |text: &str, payload: [u8; 40]| {
            let blob = key.sign(text.as_bytes()).unwrap();
            let envelope = SignatureEnvelope::from_slice(&blob).unwrap();
            assert_eq!(envelope.algorithm(), "ssh-dss");
            assert_eq!(envelope.payload(), &payload);
        };

        check(
            "sample",
            hex!(
                "2E1A0C2562B2912CAAF89186FB0F42001585DA55"
                "29EFB6B0AFF2D7A68EB70CA313022253B9A88DF5"
            ),
        );
        check(
            "test",
            hex!(
                "42AB2052FD43E123F0607F115052A67DCD9C5C77"
                "183916B0230D45B9931491D4C6B0BD2FB4AAF088"
            ),
        );
    }

    #[test]
    fn test_verify() {
        let _ = pretty_env_logger::try_init();

        let private = private_key();
        let public = private.public_key();

        let signature = private.sign(b"hello").unwrap();
        assert!(public.verify(b"hello", &signature).unwrap());
        assert!(!public.verify(b"world", &signature).unwrap());

        // the standalone public key agrees with the derived one
        assert!(public_key().verify(b"hello", &signature).unwrap());
    }

    #[test]
    fn test_verify_malformed() {
        let key = public_key();

        let short = SignatureEnvelope::new("ssh-dss", vec![1u8; 39]).to_bytes().unwrap();
        assert!(matches!(
            key.verify(b"hello", &short),
            Err(Error::InvalidSignatureSize {
                size: 39,
                expected: 40
            })
        ));

        let relabeled = SignatureEnvelope::new("ecdsa-sha2-nistp256", vec![1u8; 40])
            .to_bytes()
            .unwrap();
        assert!(matches!(
            key.verify(b"hello", &relabeled),
            Err(Error::AlgorithmMismatch { .. })
        ));

        // all zero components decode, they just never verify
        let zero = SignatureEnvelope::new("ssh-dss", vec![0u8; 40]).to_bytes().unwrap();
        assert!(!key.verify(b"hello", &zero).unwrap());
    }

    #[test]
    fn test_serialize() {
        let key = public_key();
        let bytes = key.to_bytes().unwrap();
        assert_eq!(bytes.len(), key.write_len());

        let mut i = &bytes[..];
        let name = i.read_string("name").unwrap();
        assert_eq!(&name[..], b"ssh-dss");
        let parsed = DsaPublicKey::try_from_buf("ssh-dss", &mut i).unwrap();
        assert_eq!(parsed.y(), key.y());
        assert_eq!(parsed.p(), key.p());
        assert!(!i.has_remaining());
    }

    #[test]
    fn test_oversized_params() {
        let mut blob = Vec::new();
        mpint(&[0x7f; 600]).to_writer(&mut blob).unwrap();
        mpint(&Q).to_writer(&mut blob).unwrap();
        mpint(&G).to_writer(&mut blob).unwrap();
        mpint(&Y).to_writer(&mut blob).unwrap();

        assert!(matches!(
            DsaPublicKey::try_from_buf("ssh-dss", &blob[..]),
            Err(Error::Message { .. })
        ));
    }

    proptest! {
        #[test]
        fn to_der_requires_40_bytes(payload in proptest::collection::vec(any::<u8>(), 0..100)) {
            let res = DsaPublicKey::to_der(&payload);
            if payload.len() == SIGNATURE_LEN {
                prop_assert_eq!(DsaPublicKey::to_wire(&res?)?, payload);
            } else {
                let is_size_error = matches!(res, Err(Error::InvalidSignatureSize { .. }));
                prop_assert!(is_size_error);
            }
        }

        #[test]
        fn provider_der_roundtrip(msg in proptest::collection::vec(any::<u8>(), 0..64)) {
            let key = private_key();
            let digest = HashAlgorithm::Sha1.digest(&msg)?;
            let signature = key
                .crypto_handle()
                .sign_prehashed_rfc6979::<sha1::Sha1>(&digest)?;
            let der = signature.to_vec();

            let wire = DsaPublicKey::to_wire(&der)?;
            prop_assert_eq!(wire.len(), SIGNATURE_LEN);
            prop_assert_eq!(DsaPublicKey::to_der(&wire)?, der);
        }
    }
}
