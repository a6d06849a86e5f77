//! Fixed-size Bloom filter for MRSH-v2 content fingerprinting.
//!
//! Each filter is a `FILTERSIZE`-byte (2048-bit) bit array. A 64-bit chunk
//! digest is inserted by slicing it into `K_HASHES` non-overlapping 11-bit
//! windows, each of which addresses one bit directly — no auxiliary hash
//! function is needed since the digest itself is already well mixed by
//! FNV-1a.

/// Bloom filter size in bytes (256 bytes = 2048 bits).
pub const FILTERSIZE: usize = 256;

/// Bloom filter size in bits.
const FILTER_BITS: usize = FILTERSIZE * 8;

/// Number of independent bit positions derived per inserted key.
pub const K_HASHES: usize = 5;

/// Bits consumed per slice: ceil(log2(FILTER_BITS)) = 11 for 2048 bits.
const SLICE_BITS: u32 = 11;

/// Mask selecting the low `SLICE_BITS` bits of a `u64`.
const SLICE_MASK: u64 = (1u64 << SLICE_BITS) - 1;

/// A single fixed-size Bloom filter with its own insertion count.
///
/// `block_count` tracks how many 64-bit keys have been inserted into this
/// specific filter instance; the owning [`crate::model::Fingerprint`] is
/// responsible for rolling over to a fresh filter once `block_count` reaches
/// `MAXBLOCKS` (see [`crate::algo::MAXBLOCKS`]) — this type does not enforce
/// that cap itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BloomFilter {
    bits: Vec<u8>,
    block_count: u32,
}

impl BloomFilter {
    /// Create a new, empty Bloom filter.
    #[inline]
    pub fn new() -> Self {
        Self {
            bits: vec![0u8; FILTERSIZE],
            block_count: 0,
        }
    }

    /// Reconstruct a filter from its raw byte array and a known block count
    /// (used by the wire codec).
    pub fn from_parts(bits: Vec<u8>, block_count: u32) -> Self {
        debug_assert_eq!(bits.len(), FILTERSIZE);
        Self { bits, block_count }
    }

    /// Derive the `K_HASHES` bit indices addressed by a 64-bit key.
    #[inline]
    fn indices(key: u64) -> [usize; K_HASHES] {
        let mut out = [0usize; K_HASHES];
        for (i, slot) in out.iter_mut().enumerate() {
            let slice = (key >> (i as u32 * SLICE_BITS)) & SLICE_MASK;
            *slot = (slice as usize) % FILTER_BITS;
        }
        out
    }

    #[inline]
    fn set_bit(&mut self, index: usize) {
        self.bits[index / 8] |= 1u8 << (index % 8);
    }

    #[inline]
    fn get_bit(&self, index: usize) -> bool {
        (self.bits[index / 8] & (1u8 << (index % 8))) != 0
    }

    /// Insert a 64-bit chunk digest, setting its `K_HASHES` bits and
    /// incrementing `block_count`.
    pub fn insert(&mut self, key: u64) {
        for idx in Self::indices(key) {
            self.set_bit(idx);
        }
        self.block_count += 1;
    }

    /// Approximate-membership query: true if every bit addressed by `key`
    /// is set. May false-positive; never false-negatives a key that was
    /// actually inserted.
    #[inline]
    pub fn contains(&self, key: u64) -> bool {
        Self::indices(key).iter().all(|&idx| self.get_bit(idx))
    }

    /// Number of 64-bit keys inserted into this filter.
    #[inline]
    pub fn block_count(&self) -> u32 {
        self.block_count
    }

    /// Population count: number of set bits in the filter.
    #[inline]
    pub fn population(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    /// Population count of the bitwise AND with another filter — the number
    /// of bit positions set in both filters.
    #[inline]
    pub fn and_population(&self, other: &BloomFilter) -> u32 {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .map(|(a, b)| (a & b).count_ones())
            .sum()
    }

    /// The raw bit array, in insertion byte order.
    #[inline]
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Render the bit array as uppercase two-hex-digit pairs, in byte order.
    pub fn to_hex(&self) -> String {
        let mut s = String::with_capacity(FILTERSIZE * 2);
        for byte in &self.bits {
            s.push_str(&format!("{:02X}", byte));
        }
        s
    }

    /// Parse exactly `FILTERSIZE * 2` hex characters into a filter's bit
    /// array with the given block count. Returns `None` on malformed hex.
    pub fn from_hex(hex: &str, block_count: u32) -> Option<Self> {
        if hex.len() != FILTERSIZE * 2 {
            return None;
        }
        let mut bits = Vec::with_capacity(FILTERSIZE);
        let hex_bytes = hex.as_bytes();
        for chunk in hex_bytes.chunks_exact(2) {
            let hi = (chunk[0] as char).to_digit(16)?;
            let lo = (chunk[1] as char).to_digit(16)?;
            bits.push(((hi << 4) | lo) as u8);
        }
        Some(Self::from_parts(bits, block_count))
    }
}

impl Default for BloomFilter {
    fn default() -> Self {
        Self::new()
    }
}
