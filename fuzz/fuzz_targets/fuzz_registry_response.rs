#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic: errors are fine, panics are bugs.
        match vatpl::registry::decode_subject(s) {
            Ok(result) => {
                let _ = result.subject.map(|subject| subject.status());
            }
            Err(e) => {
                let _ = (e.is_permanent(), e.is_retryable());
            }
        }
        match vatpl::registry::decode_subjects(s) {
            Ok(result) => {
                for subject in &result.subjects {
                    let _ = subject.status();
                }
            }
            Err(e) => {
                let _ = (e.is_permanent(), e.is_retryable());
            }
        }
    }
});
