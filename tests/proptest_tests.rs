//! Property-based tests for NIP handling and batching.
//!
//! Run with: `cargo test --test proptest_tests`

#![cfg(feature = "core")]

use std::collections::BTreeSet;

use proptest::prelude::*;
use vatpl::core::*;

const WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];

fn reference_checksum(digits: &str) -> u32 {
    digits
        .bytes()
        .take(9)
        .zip(WEIGHTS)
        .map(|(b, w)| u32::from(b - b'0') * w)
        .sum::<u32>()
        % 11
}

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Any ten digit string.
fn arb_ten_digits() -> impl Strategy<Value = String> {
    "[0-9]{10}"
}

/// A NIP with a valid checksum.
fn arb_valid_nip() -> impl Strategy<Value = String> {
    "[0-9]{9}".prop_filter_map("remainder 10 has no check digit", |prefix| {
        let check = reference_checksum(&prefix);
        (check < 10).then(|| format!("{prefix}{check}"))
    })
}

/// A NIP as a human might type it: hyphens anywhere, whitespace around.
fn arb_dirty(nip: String) -> impl Strategy<Value = String> {
    (
        prop::collection::vec(any::<bool>(), nip.len()),
        "[ \t\r\n]{0,3}",
        "[ \t\r\n]{0,3}",
    )
        .prop_map(move |(hyphens, lead, trail)| {
            let mut s = lead;
            for (c, h) in nip.chars().zip(hyphens) {
                s.push(c);
                if h {
                    s.push('-');
                }
            }
            s.push_str(&trail);
            s
        })
}

// ── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn validity_matches_weighted_checksum(digits in arb_ten_digits()) {
        let expected = reference_checksum(&digits) == u32::from(digits.as_bytes()[9] - b'0');
        prop_assert_eq!(is_valid_nip(&digits), expected);
        // Pure: asking twice gives the same answer
        prop_assert_eq!(is_valid_nip(&digits), is_valid_nip(&digits));
    }

    #[test]
    fn generated_nips_are_valid(nip in arb_valid_nip()) {
        prop_assert!(is_valid_nip(&nip));
    }

    #[test]
    fn non_ten_digit_strings_are_invalid(s in "[0-9]{0,9}|[0-9]{11,14}|[0-9]{4}[a-z-][0-9]{5}") {
        prop_assert!(!is_valid_nip(&s));
    }

    #[test]
    fn normalize_is_idempotent(s in "\\PC{0,20}") {
        let once = normalize_nip(&s);
        prop_assert_eq!(normalize_nip(&once), once);
    }

    #[test]
    fn dirty_spelling_normalizes_back(dirty in arb_valid_nip().prop_flat_map(arb_dirty)) {
        let nip = normalize_nip(&dirty);
        prop_assert!(!nip.contains('-'));
        prop_assert!(is_valid_nip(&nip));
    }

    #[test]
    fn partition_keeps_every_raw_key(raw in prop::collection::vec("[0-9 -]{0,14}", 0..50)) {
        let p = partition_nips(&raw[..]);
        let distinct: BTreeSet<&String> = raw.iter().collect();
        prop_assert_eq!(p.len(), distinct.len());
        for key in distinct {
            prop_assert!(p.valid.contains_key(key) != p.invalid.contains_key(key));
        }
    }

    #[test]
    fn batches_cover_each_nip_once(n in 0usize..200) {
        let nips: Vec<String> = (0..n).map(|i| format!("{i:010}")).collect();
        let batches = nip_batches(nips.clone(), NIP_BATCH_SIZE);

        prop_assert_eq!(batches.len(), n.div_ceil(NIP_BATCH_SIZE));
        prop_assert!(batches.iter().all(|b| !b.is_empty() && b.len() <= NIP_BATCH_SIZE));
        let flat: Vec<String> = batches.into_iter().flatten().collect();
        prop_assert_eq!(flat, nips);
    }

    #[test]
    fn date_display_parses_back(days in 0i64..40_000) {
        let base = chrono::NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
        let date = LookupDate::from(base + chrono::Duration::days(days));
        let parsed: LookupDate = date.to_string().parse().unwrap();
        prop_assert_eq!(parsed, date);
    }
}
