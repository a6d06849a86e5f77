//! Core algorithms for MRSH-v2 similarity hashing

pub mod bloom;
pub mod chunker;
pub mod compare;
pub mod fnv;
pub mod rolling;

pub use bloom::{BloomFilter, FILTERSIZE, K_HASHES};
pub use chunker::{ChunkMode, Chunker};
pub use compare::filter_overlap_score;
pub use fnv::fnv1a64;
pub use rolling::{RollingHash, ROLLING_WINDOW};

/// Default rolling-hash trigger modulus (file mode default `BLOCK_SIZE`)
pub const BLOCK_SIZE: u64 = 320;

/// Default post-boundary skip in network mode; file mode uses 0
pub const SKIPPED_BYTES: usize = 0;

/// Maximum number of 64-bit chunk digests absorbed by one Bloom filter
pub const MAXBLOCKS: u32 = 160;

/// Maximum byte length of a fingerprint label
pub const LABEL_MAX_LEN: usize = 200;
