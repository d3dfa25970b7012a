use criterion::{black_box, criterion_group, Criterion};
use p256::ecdsa::signature::Signer;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::SeedableRng;
use ssh_der::ser::Serialize;
use ssh_der::types::SignatureEnvelope;
use ssh_der::{EcdsaPublicKey, PublicKey, SignatureCodec, Verifier};

fn bench_verify(c: &mut Criterion) {
    let mut g = c.benchmark_group("verify");

    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
    let secret = p256::SecretKey::random(&mut rng);
    let point = secret.public_key().to_encoded_point(false);
    let key =
        EcdsaPublicKey::new("ecdsa-sha2-nistp256", "nistp256", point.as_bytes().to_vec()).unwrap();
    let key_blob = key.to_bytes().unwrap();

    let signature: p256::ecdsa::Signature =
        p256::ecdsa::SigningKey::from(&secret).sign(b"bench");
    let payload = EcdsaPublicKey::to_wire(signature.to_der().as_bytes()).unwrap();
    let blob = SignatureEnvelope::new("ecdsa-sha2-nistp256", payload)
        .to_bytes()
        .unwrap();

    g.bench_function("p256_parse_key", |b| {
        b.iter(|| black_box(PublicKey::from_bytes(black_box(&key_blob)).unwrap()))
    });
    g.bench_function("p256_verify", |b| {
        b.iter(|| black_box(key.verify(b"bench", black_box(&blob)).unwrap()))
    });

    g.finish();
}

criterion_group!(benches, bench_verify);
