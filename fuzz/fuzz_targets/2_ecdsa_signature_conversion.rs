#![no_main]

use libfuzzer_sys::fuzz_target;
use ssh_der::{EcdsaPublicKey, SignatureCodec};

fuzz_target!(|data: &[u8]| {
    if let Ok(der) = EcdsaPublicKey::to_der(data) {
        let wire = EcdsaPublicKey::to_wire(&der).expect("own DER output");
        // non-minimal mpints are normalized, so compare after one pass
        let der_again = EcdsaPublicKey::to_der(&wire).expect("own wire output");
        assert_eq!(der, der_again);
    }

    let _ = EcdsaPublicKey::to_wire(data);
});
