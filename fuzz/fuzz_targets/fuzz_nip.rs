#![no_main]

use libfuzzer_sys::fuzz_target;
use vatpl::core::{is_valid_nip, normalize_nip, partition_nips};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let nip = normalize_nip(s);
        assert_eq!(normalize_nip(&nip), nip);
        let _ = is_valid_nip(&nip);
        let raw: Vec<&str> = s.split(',').collect();
        let p = partition_nips(&raw[..]);
        assert!(p.valid.keys().all(|k| !p.invalid.contains_key(k)));
    }
});
