//! NIP (Polish tax identifier) normalization, checksum validation and batching.

use std::collections::BTreeMap;

/// Maximum number of NIPs the registry accepts in a single bulk request.
pub const NIP_BATCH_SIZE: usize = 30;

/// Checksum weights applied to the first nine digits.
const NIP_WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];

/// Clean a NIP as typed by a human: drop every hyphen and trim surrounding
/// whitespace (space, tab, CR, LF).
///
/// Hyphens go first so that the result is stable under a second pass.
///
/// ```
/// assert_eq!(vatpl::core::normalize_nip(" 692-00-00-013\t"), "6920000013");
/// ```
pub fn normalize_nip(raw: &str) -> String {
    let without_hyphens: String = raw.chars().filter(|&c| c != '-').collect();
    without_hyphens
        .trim_matches([' ', '\t', '\r', '\n'])
        .to_string()
}

/// Check that `nip` is exactly ten ASCII digits with a valid checksum.
///
/// The weighted sum of the first nine digits modulo 11 must equal the
/// tenth digit. A remainder of 10 can never match, so such numbers are
/// rejected. The input is expected to be normalized already.
pub fn is_valid_nip(nip: &str) -> bool {
    let bytes = nip.as_bytes();
    if bytes.len() != 10 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    let sum: u32 = bytes[..9]
        .iter()
        .zip(NIP_WEIGHTS)
        .map(|(&b, w)| u32::from(b - b'0') * w)
        .sum();

    sum % 11 == u32::from(bytes[9] - b'0')
}

/// Raw NIPs split by validity.
///
/// Both maps are keyed by the raw input and hold its normalized form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NipPartition {
    /// NIPs that pass format and checksum validation.
    pub valid: BTreeMap<String, String>,
    /// NIPs that fail validation.
    pub invalid: BTreeMap<String, String>,
}

impl NipPartition {
    /// Total number of distinct raw keys across both partitions.
    pub fn len(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }

    /// `true` when no NIPs were partitioned.
    pub fn is_empty(&self) -> bool {
        self.valid.is_empty() && self.invalid.is_empty()
    }

    /// Index from normalized NIP to every raw spelling that produced it.
    ///
    /// Only valid NIPs are indexed.
    pub fn raw_keys_by_nip(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut index: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (raw, nip) in &self.valid {
            index.entry(nip.as_str()).or_default().push(raw.as_str());
        }
        index
    }
}

/// Normalize every raw NIP and split the set into valid and invalid ones.
///
/// Each distinct raw key lands in exactly one of the two maps.
pub fn partition_nips<S: AsRef<str>>(raw_nips: &[S]) -> NipPartition {
    let mut partition = NipPartition::default();
    for raw in raw_nips {
        let raw = raw.as_ref();
        let nip = normalize_nip(raw);
        if is_valid_nip(&nip) {
            partition.valid.insert(raw.to_string(), nip);
        } else {
            partition.invalid.insert(raw.to_string(), nip);
        }
    }
    partition
}

/// Group NIPs into batches of at most `size` entries, preserving order.
///
/// A `size` of zero is treated as one.
pub fn nip_batches<I, S>(nips: I, size: usize) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let size = size.max(1);
    let mut batches: Vec<Vec<String>> = Vec::new();
    for nip in nips {
        match batches.last_mut() {
            Some(batch) if batch.len() < size => batch.push(nip.into()),
            _ => batches.push(vec![nip.into()]),
        }
    }
    batches
}

/// Render NIPs as comma-separated request segments of [`NIP_BATCH_SIZE`] entries.
pub fn nip_portions<I, S>(nips: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    nip_batches(nips, NIP_BATCH_SIZE)
        .into_iter()
        .map(|batch| batch.join(","))
        .collect()
}
