//! Textual wire codec: `<label>:<filesize>:<filter_count>:<tail_block_count>:<HEXDATA>`
//!
//! Grounded in `fp_str`/`str_fp` (`original_source/bindings/mrsh/mrsh_wrapper.c`):
//! the original builds this line with `snprintf("%s:%d:%d:%d:", ...)` followed
//! by the raw filter bytes rendered as hex, and parses it back by walking the
//! string and splitting on the first four colons. This module reproduces that
//! discipline with `str::splitn`/`str::find` instead of pointer arithmetic.

use crate::algo::{BloomFilter, FILTERSIZE, MAXBLOCKS};
use crate::model::error::ParseError;
use crate::model::Fingerprint;

/// Serialize a fingerprint to a single wire-format line (no trailing
/// newline).
pub fn encode_fingerprint(fp: &Fingerprint) -> String {
    let mut hex = String::with_capacity(fp.filters().len() * FILTERSIZE * 2);
    for filter in fp.filters() {
        hex.push_str(&filter.to_hex());
    }

    format!(
        "{}:{}:{}:{}:{}",
        fp.label(),
        fp.filesize(),
        fp.filter_count(),
        fp.tail_block_count(),
        hex
    )
}

/// The exact encoded length `encode_fingerprint` would produce, without
/// building the string.
pub fn encoded_len(fp: &Fingerprint) -> usize {
    fp.label().len()
        + 1
        + decimal_len(fp.filesize())
        + 1
        + decimal_len(fp.filter_count() as u64)
        + 1
        + decimal_len(fp.tail_block_count() as u64)
        + 1
        + fp.filters().len() * FILTERSIZE * 2
}

fn decimal_len(mut n: u64) -> usize {
    if n == 0 {
        return 1;
    }
    let mut len = 0;
    while n > 0 {
        len += 1;
        n /= 10;
    }
    len
}

/// Parse a single wire-format line into a fingerprint.
///
/// Splits on the first four colons (the label itself may not contain a
/// colon — see [`crate::model::CapacityError::LabelContainsSeparator`] —
/// so the first colon unambiguously ends it), validates the three decimal
/// fields, and reconstitutes the filter chain from the trailing hex blob:
/// every filter but the last is assigned `block_count = MAXBLOCKS`, and the
/// last is assigned the parsed `tail_block_count`.
pub fn decode_fingerprint(line: &str) -> Result<Fingerprint, ParseError> {
    let mut parts = line.splitn(5, ':');

    let label = parts.next().ok_or(ParseError::MissingField("label"))?;
    let filesize_str = parts.next().ok_or(ParseError::MissingField("filesize"))?;
    let filter_count_str = parts
        .next()
        .ok_or(ParseError::MissingField("filter_count"))?;
    let tail_block_count_str = parts
        .next()
        .ok_or(ParseError::MissingField("tail_block_count"))?;
    let hex = parts.next().ok_or(ParseError::MissingField("hexdata"))?;

    let filesize = parse_u64("filesize", filesize_str)?;
    let filter_count = parse_u64("filter_count", filter_count_str)?;
    let tail_block_count = parse_u64("tail_block_count", tail_block_count_str)?;

    if filter_count == 0 {
        return Err(ParseError::ZeroFilterCount(filter_count));
    }
    if tail_block_count > MAXBLOCKS as u64 {
        return Err(ParseError::InconsistentTail {
            filter_count,
            tail_block_count,
        });
    }

    let expected_hex_len = filter_count as usize * FILTERSIZE * 2;
    if hex.len() != expected_hex_len {
        return Err(ParseError::HexLengthMismatch {
            expected: expected_hex_len,
            actual: hex.len(),
        });
    }

    let mut filters = Vec::with_capacity(filter_count as usize);
    for i in 0..filter_count as usize {
        let start = i * FILTERSIZE * 2;
        let end = start + FILTERSIZE * 2;
        let block_count = if i + 1 == filter_count as usize {
            tail_block_count as u32
        } else {
            MAXBLOCKS
        };
        let filter =
            BloomFilter::from_hex(&hex[start..end], block_count).ok_or(ParseError::InvalidHex)?;
        filters.push(filter);
    }

    Ok(Fingerprint::from_raw_parts(
        label.to_string(),
        filesize,
        filters,
    ))
}

fn parse_u64(field: &'static str, value: &str) -> Result<u64, ParseError> {
    value.parse::<u64>().map_err(|_| ParseError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChunkMode, CoreParams};

    fn params() -> CoreParams {
        CoreParams::default()
    }

    #[test]
    fn round_trips_single_filter_fingerprint() {
        let fp = Fingerprint::from_bytes(b"hello world, some sample content", "sample", &params())
            .unwrap();
        let text = encode_fingerprint(&fp);
        let decoded = decode_fingerprint(&text).unwrap();

        assert_eq!(decoded.label(), fp.label());
        assert_eq!(decoded.filesize(), fp.filesize());
        assert_eq!(decoded.filter_count(), fp.filter_count());
        assert_eq!(decoded.tail_block_count(), fp.tail_block_count());
        assert_eq!(decoded.filters(), fp.filters());
    }

    #[test]
    fn round_trips_multi_filter_fingerprint() {
        let data: Vec<u8> = (0..2_000_000u32).map(|i| (i % 251) as u8).collect();
        let p = CoreParams::new(16, 0, ChunkMode::File);
        let fp = Fingerprint::from_bytes(&data, "big", &p).unwrap();
        assert!(fp.filter_count() >= 2);

        let text = encode_fingerprint(&fp);
        let decoded = decode_fingerprint(&text).unwrap();
        assert_eq!(decoded.filter_count(), fp.filter_count());
        assert_eq!(decoded.filters(), fp.filters());
    }

    #[test]
    fn round_trips_empty_fingerprint() {
        let fp = Fingerprint::from_bytes(b"", "empty", &params()).unwrap();
        let text = encode_fingerprint(&fp);
        let decoded = decode_fingerprint(&text).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(decoded.label(), "empty");
    }

    #[test]
    fn encoded_len_matches_actual_encoding() {
        let fp = Fingerprint::from_bytes(b"measure me please", "m", &params()).unwrap();
        assert_eq!(encoded_len(&fp), encode_fingerprint(&fp).len());
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(
            decode_fingerprint("label:1:1"),
            Err(ParseError::MissingField("tail_block_count"))
        );
    }

    #[test]
    fn rejects_non_integer_filesize() {
        let err = decode_fingerprint("label:notanumber:1:0:00").unwrap_err();
        assert!(matches!(err, ParseError::InvalidInteger { field: "filesize", .. }));
    }

    #[test]
    fn rejects_zero_filter_count() {
        let err = decode_fingerprint("label:0:0:0:").unwrap_err();
        assert_eq!(err, ParseError::ZeroFilterCount(0));
    }

    #[test]
    fn rejects_tail_block_count_exceeding_maxblocks() {
        let hex = "00".repeat(FILTERSIZE);
        let line = format!("label:0:1:{}:{}", MAXBLOCKS + 1, hex);
        let err = decode_fingerprint(&line).unwrap_err();
        assert_eq!(
            err,
            ParseError::InconsistentTail {
                filter_count: 1,
                tail_block_count: MAXBLOCKS as u64 + 1
            }
        );
    }

    #[test]
    fn rejects_hex_length_mismatch() {
        let err = decode_fingerprint("label:0:1:0:ABCD").unwrap_err();
        assert!(matches!(err, ParseError::HexLengthMismatch { .. }));
    }

    #[test]
    fn rejects_non_hex_payload() {
        let bad_hex = "ZZ".repeat(FILTERSIZE);
        let line = format!("label:0:1:0:{}", bad_hex);
        let err = decode_fingerprint(&line).unwrap_err();
        assert_eq!(err, ParseError::InvalidHex);
    }

    #[test]
    fn label_may_be_empty_but_not_absent() {
        let line = format!(":0:1:0:{}", "00".repeat(FILTERSIZE));
        let decoded = decode_fingerprint(&line).unwrap();
        assert_eq!(decoded.label(), "");
    }
}
