//! Fingerprint — the chained-Bloom-filter fuzzy digest of a byte stream.

use std::fmt;

use crate::algo::{filter_overlap_score, fnv1a64, BloomFilter, Chunker, LABEL_MAX_LEN, MAXBLOCKS};
use crate::CoreParams;

use super::error::CapacityError;

/// A chained-Bloom-filter similarity digest of a byte stream.
///
/// A fresh `Fingerprint` holds exactly one empty filter (the "tail"). Every
/// filter before the tail always has `block_count == MAXBLOCKS`; the tail has
/// `0 ..= MAXBLOCKS` blocks. This is enforced purely by construction: no
/// method ever leaves a non-tail filter under-full.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fingerprint {
    label: String,
    filesize: u64,
    filters: Vec<BloomFilter>,
}

impl Fingerprint {
    /// Create a new, empty fingerprint with the given label.
    pub fn new(label: impl Into<String>) -> Result<Self, CapacityError> {
        let label = label.into();
        validate_label(&label)?;
        Ok(Self {
            label,
            filesize: 0,
            filters: vec![BloomFilter::new()],
        })
    }

    /// Build a fingerprint from a byte slice in one step.
    pub fn from_bytes(
        data: &[u8],
        label: impl Into<String>,
        params: &CoreParams,
    ) -> Result<Self, CapacityError> {
        let mut fp = Self::new(label)?;
        fp.insert_bytes(data, params);
        Ok(fp)
    }

    /// Reconstruct a fingerprint directly from its parts (used by the wire
    /// codec). Not exposed outside the crate: callers go through
    /// `from_bytes`/`from_text`.
    pub(crate) fn from_raw_parts(label: String, filesize: u64, filters: Vec<BloomFilter>) -> Self {
        Self {
            label,
            filesize,
            filters,
        }
    }

    /// The fingerprint's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The cumulative number of bytes absorbed via `insert_bytes` calls.
    pub fn filesize(&self) -> u64 {
        self.filesize
    }

    /// The ordered filter chain.
    pub fn filters(&self) -> &[BloomFilter] {
        &self.filters
    }

    /// Number of filters in the chain (always at least 1).
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Block count of the tail (active, possibly partially filled) filter.
    pub fn tail_block_count(&self) -> u32 {
        self.filters
            .last()
            .expect("filter chain always has a tail")
            .block_count()
    }

    /// True if no chunk digest has ever been inserted.
    pub fn is_empty(&self) -> bool {
        self.filters.len() == 1 && self.filters[0].block_count() == 0
    }

    /// Total serialized size in bytes (see the wire format in `crate::wire`).
    pub fn size(&self) -> usize {
        crate::wire::encoded_len(self)
    }

    /// Insert a single chunk digest, rolling over to a fresh filter if the
    /// tail has reached `MAXBLOCKS`.
    fn insert_key(&mut self, key: u64) {
        if self
            .filters
            .last()
            .expect("filter chain always has a tail")
            .block_count()
            >= MAXBLOCKS
        {
            self.filters.push(BloomFilter::new());
        }
        self.filters
            .last_mut()
            .expect("filter chain always has a tail")
            .insert(key);
    }

    /// Chunk `data`, digest each chunk with FNV-1a 64, and insert every
    /// digest into the filter chain. The label is unchanged; `filesize`
    /// grows by `data.len()`.
    pub fn insert_bytes(&mut self, data: &[u8], params: &CoreParams) {
        self.filesize += data.len() as u64;

        let chunker = Chunker::new(params.block_trigger, params.skip, params.mode);
        for (start, end) in chunker.chunk_ranges(data) {
            let digest = fnv1a64(&data[start..end]);
            self.insert_key(digest);
        }
    }

    /// Serialize to the textual wire format (see `crate::wire`).
    pub fn to_text(&self) -> String {
        crate::wire::encode_fingerprint(self)
    }

    /// Parse from the textual wire format.
    pub fn from_text(text: &str) -> Result<Self, super::error::ParseError> {
        crate::wire::decode_fingerprint(text)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fingerprint({}, filesize={}, filters={}, tail_blocks={})",
            self.label,
            self.filesize,
            self.filter_count(),
            self.tail_block_count()
        )
    }
}

fn validate_label(label: &str) -> Result<(), CapacityError> {
    if label.len() > LABEL_MAX_LEN {
        return Err(CapacityError::LabelTooLong {
            actual: label.len(),
            max: LABEL_MAX_LEN,
        });
    }
    if label.contains(':') {
        return Err(CapacityError::LabelContainsSeparator);
    }
    Ok(())
}

/// Asymmetric similarity score between two fingerprints, 0..=100.
///
/// Per §4.6: `a` always plays the role of "A" — for each of its filters, the
/// best match against any filter of `b` is taken, and the final score is the
/// rounded mean of those per-filter scores. The caller's argument order picks
/// the direction: `fingerprint_compare(a, b)` answers "how much of `a` is
/// contained in `b`", which is not generally the same as `fingerprint_compare(b, a)`.
pub fn fingerprint_compare(a: &Fingerprint, b: &Fingerprint) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let total: u32 = a
        .filters()
        .iter()
        .map(|a_filter| {
            b.filters()
                .iter()
                .map(|b_filter| filter_overlap_score(a_filter, b_filter) as u32)
                .max()
                .unwrap_or(0)
        })
        .sum();

    let mean = total as f64 / a.filter_count() as f64;
    mean.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChunkMode;

    fn params() -> CoreParams {
        CoreParams::default()
    }

    #[test]
    fn new_fingerprint_is_empty() {
        let fp = Fingerprint::new("label").unwrap();
        assert!(fp.is_empty());
        assert_eq!(fp.filter_count(), 1);
        assert_eq!(fp.tail_block_count(), 0);
        assert_eq!(fp.filesize(), 0);
    }

    #[test]
    fn rejects_oversized_label() {
        let label = "x".repeat(LABEL_MAX_LEN + 1);
        let err = Fingerprint::new(label).unwrap_err();
        assert!(matches!(err, CapacityError::LabelTooLong { .. }));
    }

    #[test]
    fn rejects_label_with_colon() {
        let err = Fingerprint::new("bad:label").unwrap_err();
        assert_eq!(err, CapacityError::LabelContainsSeparator);
    }

    #[test]
    fn empty_bytes_produce_empty_fingerprint() {
        let fp = Fingerprint::from_bytes(b"", "e", &params()).unwrap();
        assert!(fp.is_empty());
        assert_eq!(fp.filter_count(), 1);
        assert_eq!(fp.tail_block_count(), 0);
    }

    #[test]
    fn deterministic_across_runs() {
        let data = vec![7u8; 50_000];
        let fp1 = Fingerprint::from_bytes(&data, "a", &params()).unwrap();
        let fp2 = Fingerprint::from_bytes(&data, "a", &params()).unwrap();
        assert_eq!(fp1, fp2);
    }

    #[test]
    fn chain_grows_with_insertions() {
        // Force enough chunks to exceed one filter's MAXBLOCKS.
        let data: Vec<u8> = (0..2_000_000u32).map(|i| (i % 251) as u8).collect();
        let p = CoreParams::new(16, 0, ChunkMode::File);
        let fp = Fingerprint::from_bytes(&data, "big", &p).unwrap();
        assert!(fp.filter_count() >= 2);
    }

    #[test]
    fn self_comparison_is_perfect() {
        let data: Vec<u8> = (0..50_000u32).map(|i| ((i * 17) % 256) as u8).collect();
        let fp = Fingerprint::from_bytes(&data, "self", &params()).unwrap();
        assert_eq!(fingerprint_compare(&fp, &fp), 100);
    }

    #[test]
    fn empty_vs_nonempty_scores_zero() {
        let empty = Fingerprint::from_bytes(b"", "e", &params()).unwrap();
        let full = Fingerprint::from_bytes(b"hello world, a bit of content here", "h", &params())
            .unwrap();
        assert_eq!(fingerprint_compare(&empty, &full), 0);
    }

    #[test]
    fn disjoint_random_inputs_score_low() {
        let a: Vec<u8> = (0..200_000u32).map(|i| ((i * 2654435761u32) % 256) as u8).collect();
        let b: Vec<u8> = (0..200_000u32)
            .map(|i| (((i.wrapping_add(99991)) * 2654435761u32) % 256) as u8)
            .collect();

        let fp_a = Fingerprint::from_bytes(&a, "a", &params()).unwrap();
        let fp_b = Fingerprint::from_bytes(&b, "b", &params()).unwrap();

        assert!(fingerprint_compare(&fp_a, &fp_b) <= 15);
    }

    #[test]
    fn display_includes_label() {
        let fp = Fingerprint::new("mylabel").unwrap();
        let text = format!("{}", fp);
        assert!(text.contains("mylabel"));
    }
}
