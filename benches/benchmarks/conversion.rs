use criterion::{black_box, criterion_group, Criterion};
use p256::ecdsa::signature::Signer;
use rand::SeedableRng;
use ssh_der::{DsaPublicKey, EcdsaPublicKey, SignatureCodec};

fn bench_conversion(c: &mut Criterion) {
    let mut g = c.benchmark_group("conversion");

    let dsa_payload = [0x5au8; 40];
    let dsa_der = DsaPublicKey::to_der(&dsa_payload).unwrap();

    g.bench_function("dsa_to_der", |b| {
        b.iter(|| black_box(DsaPublicKey::to_der(black_box(&dsa_payload)).unwrap()))
    });
    g.bench_function("dsa_to_wire", |b| {
        b.iter(|| black_box(DsaPublicKey::to_wire(black_box(&dsa_der)).unwrap()))
    });

    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
    let signing_key = p256::ecdsa::SigningKey::random(&mut rng);
    let signature: p256::ecdsa::Signature = signing_key.sign(b"bench");
    let ecdsa_der = signature.to_der().as_bytes().to_vec();
    let ecdsa_payload = EcdsaPublicKey::to_wire(&ecdsa_der).unwrap();

    g.bench_function("ecdsa_to_der", |b| {
        b.iter(|| black_box(EcdsaPublicKey::to_der(black_box(&ecdsa_payload)).unwrap()))
    });
    g.bench_function("ecdsa_to_wire", |b| {
        b.iter(|| black_box(EcdsaPublicKey::to_wire(black_box(&ecdsa_der)).unwrap()))
    });

    g.finish();
}

criterion_group!(benches, bench_conversion);
