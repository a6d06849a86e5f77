//! Per-filter Bloom overlap scoring used by the fingerprint comparator.

use super::bloom::{BloomFilter, FILTERSIZE, K_HASHES};

const FILTER_BITS: f64 = (FILTERSIZE * 8) as f64;

/// Score the overlap between two individual Bloom filters on a 0..=100
/// scale, correcting for the random-collision noise floor expected from
/// `k · min(block_count_a, block_count_b)` insertions into a filter of
/// `FILTER_BITS` bits.
///
/// This is the single expected-noise variant this crate implements (see
/// `DESIGN.md` for the rationale); it is part of the wire/comparison
/// contract, not a per-call tunable.
pub fn filter_overlap_score(a: &BloomFilter, b: &BloomFilter) -> u8 {
    let k = K_HASHES as f64;
    let blocks_a = a.block_count() as f64;
    let blocks_b = b.block_count() as f64;
    let min_blocks = blocks_a.min(blocks_b);
    let max_blocks = blocks_a.max(blocks_b);

    let max_possible = k * min_blocks;
    if max_possible <= 0.0 {
        return 0;
    }

    let common = a.and_population(b) as f64;
    let p_single_miss = 1.0 - 1.0 / FILTER_BITS;
    let expected_noise = k * min_blocks * (1.0 - p_single_miss.powf(k * max_blocks));

    if max_possible <= expected_noise {
        return 0;
    }

    let raw = 100.0 * (common - expected_noise) / (max_possible - expected_noise);
    raw.round().clamp(0.0, 100.0) as u8
}
