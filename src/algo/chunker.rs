//! Content-defined chunker.
//!
//! Feeds bytes through a [`RollingHash`] and emits chunk boundaries whenever
//! the rolling value hits the trigger residue. Two runtime modes govern the
//! edges of the byte stream:
//!
//! - [`ChunkMode::File`]: after the last boundary, any remaining bytes form a
//!   trailing partial chunk that is still emitted.
//! - [`ChunkMode::Network`]: the leading segment (up to and including the
//!   first boundary) and the trailing partial chunk are both suppressed,
//!   since a network capture may start or end mid-stream.

use super::rolling::RollingHash;

/// Selects whether a trailing partial chunk is emitted at end-of-input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkMode {
    /// Whole-file hashing: the final partial chunk is digested and inserted.
    File,
    /// Streamed/network hashing: the leading partial chunk (up to the first
    /// boundary) and the final partial chunk are both dropped.
    Network,
}

impl Default for ChunkMode {
    fn default() -> Self {
        ChunkMode::File
    }
}

/// Drives content-defined chunk-boundary detection over a byte slice.
pub struct Chunker {
    rolling: RollingHash,
    block_trigger: u64,
    skip: usize,
    mode: ChunkMode,
    last_boundary: usize,
}

impl Chunker {
    /// Create a chunker with the given trigger modulus, post-boundary skip,
    /// and edge-of-stream mode.
    ///
    /// `block_trigger` must be nonzero; a value of `1` would trigger on
    /// every byte and is never useful, but is not itself invalid.
    pub fn new(block_trigger: u64, skip: usize, mode: ChunkMode) -> Self {
        Self {
            rolling: RollingHash::new(),
            block_trigger: block_trigger.max(1),
            skip,
            mode,
            last_boundary: 0,
        }
    }

    /// Partition `data` into chunk byte ranges `[start, end)`.
    ///
    /// Consumes the chunker: each call starts from a fresh rolling-hash
    /// window over exactly the bytes given here (the core does not model
    /// incremental chunking across separate, non-contiguous byte buffers).
    pub fn chunk_ranges(mut self, data: &[u8]) -> Vec<(usize, usize)> {
        let n = data.len();
        let mut ranges = Vec::new();
        let mut i = 0usize;
        let mut first_boundary = true;

        while i < n {
            let r = self.rolling.update(data[i]);
            if r % self.block_trigger == self.block_trigger - 1 {
                // Network mode never digests the leading segment: there is no
                // way to know it wasn't truncated before the capture started.
                let suppress_leading = self.mode == ChunkMode::Network && first_boundary;
                first_boundary = false;

                if !suppress_leading {
                    ranges.push((self.last_boundary, i + 1));
                }
                self.last_boundary = i + 1;

                if self.skip > 0 && i + self.skip < n {
                    i += self.skip;
                }
            }
            i += 1;
        }

        if self.mode == ChunkMode::File && self.last_boundary < n {
            ranges.push((self.last_boundary, n));
        }

        ranges
    }
}
