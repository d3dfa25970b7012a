#![no_main]

use libfuzzer_sys::fuzz_target;
use ssh_der::ser::Serialize;
use ssh_der::{PublicKey, Verifier};

fuzz_target!(|data: &[u8]| {
    let Ok(key) = PublicKey::from_bytes(data) else {
        return;
    };

    let _ = key.key_structure();
    let _ = key.verify(b"fuzz", data);

    let bytes = key.to_bytes().expect("serialize");
    let reparsed = PublicKey::from_bytes(&bytes).expect("reparse own output");
    assert_eq!(reparsed.algorithm(), key.algorithm());
});
