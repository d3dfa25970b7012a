#![no_main]

use libfuzzer_sys::fuzz_target;
use ssh_der::{DsaPublicKey, SignatureCodec};

// DER -> wire -> DER must be stable for anything to_wire accepts
fuzz_target!(|data: &[u8]| {
    let _ = DsaPublicKey::to_der(data);

    if let Ok(wire) = DsaPublicKey::to_wire(data) {
        assert_eq!(wire.len(), 40);
        let der = DsaPublicKey::to_der(&wire).expect("40 byte payload");
        let again = DsaPublicKey::to_wire(&der).expect("own DER output");
        assert_eq!(wire, again);
    }
});
