//! mrsh2 - chained-Bloom-filter fuzzy hashing for digital forensics
//!
//! Implements MRSH-v2 similarity-preserving hashing: a content-defined
//! chunker drives an FNV-1a digest into a chained-Bloom-filter fingerprint,
//! compared with an asymmetric, noise-corrected overlap score.

#![allow(clippy::missing_safety_doc)]

pub mod algo;
pub mod model;
pub mod utils;
pub mod wire;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use algo::ChunkMode;
pub use model::{fingerprint_compare, CapacityError, CompareResult, Fingerprint, FingerprintList, ParseError};

/// Runtime parameters governing a single fingerprinting run.
///
/// The original C implementation reads these from process-global state
/// (`BLOCK_SIZE` literals, a compile-time `#ifdef` for network mode);
/// here they are bundled into an explicit, reusable value so concurrent
/// callers with different settings never interfere with one another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoreParams {
    /// Rolling-hash trigger modulus; a boundary fires when `r % block_trigger
    /// == block_trigger - 1`.
    pub block_trigger: u64,
    /// Bytes skipped immediately after a chunk boundary before resuming the
    /// rolling hash. `0` in file mode; network mode historically skips a
    /// fixed span to avoid re-triggering on bytes just scanned.
    pub skip: usize,
    /// Whether a trailing partial chunk is flushed at end-of-input.
    pub mode: ChunkMode,
}

impl CoreParams {
    /// Build explicit parameters.
    pub fn new(block_trigger: u64, skip: usize, mode: ChunkMode) -> Self {
        Self {
            block_trigger: block_trigger.max(1),
            skip,
            mode,
        }
    }
}

impl Default for CoreParams {
    fn default() -> Self {
        Self {
            block_trigger: algo::BLOCK_SIZE,
            skip: algo::SKIPPED_BYTES,
            mode: ChunkMode::default(),
        }
    }
}

/// Fingerprint a byte slice under a label in one step.
pub fn fingerprint_from_bytes(
    data: &[u8],
    label: impl Into<String>,
    params: &CoreParams,
) -> Result<Fingerprint, CapacityError> {
    Fingerprint::from_bytes(data, label, params)
}

/// Absorb more bytes into an existing fingerprint.
pub fn fingerprint_insert_bytes(fp: &mut Fingerprint, data: &[u8], params: &CoreParams) {
    fp.insert_bytes(data, params);
}

/// Serialize a fingerprint to the textual wire format.
pub fn fingerprint_to_text(fp: &Fingerprint) -> String {
    fp.to_text()
}

/// Parse a fingerprint from the textual wire format.
pub fn fingerprint_from_text(text: &str) -> Result<Fingerprint, ParseError> {
    Fingerprint::from_text(text)
}

/// All unordered pairs within a list scoring at least `threshold`.
pub fn fingerprint_list_compare_all(list: &FingerprintList, threshold: u8) -> Vec<CompareResult> {
    list.compare_all(threshold)
}

/// The Cartesian product of two lists, filtered to `threshold`.
pub fn fingerprint_list_compare_cross(
    a: &FingerprintList,
    b: &FingerprintList,
    threshold: u8,
) -> Vec<CompareResult> {
    a.compare_cross(b, threshold)
}

/// One fingerprint against every member of a list, filtered to `threshold`.
pub fn fingerprint_vs_list(
    fp: &Fingerprint,
    list: &FingerprintList,
    threshold: u8,
) -> Vec<CompareResult> {
    list.compare_against(fp, threshold)
}

// ============================================================================
// FFI Layer - C-compatible exports
// ============================================================================
//
// The fingerprint itself is variable-length (a growing filter chain), so the
// FFI surface exchanges the textual wire format (UTF-8 bytes) rather than a
// fixed-size binary struct.

/// Result structure for FFI.
#[repr(C)]
pub struct HFResult {
    pub buffer: *const u8,
    pub len: usize,
    pub error_code: i8,
}

const ERROR_OK: i8 = 0;
const ERROR_INVALID_INPUT: i8 = -1;
const ERROR_PROCESSING: i8 = -2;

/// C-compatible mirror of [`CoreParams`].
#[repr(C)]
#[derive(Clone, Copy)]
pub struct HFConfig {
    pub block_trigger: u64,
    pub skip: usize,
    /// `0` = file mode, `1` = network mode.
    pub network_mode: u8,
}

impl From<&HFConfig> for CoreParams {
    fn from(cfg: &HFConfig) -> Self {
        let mode = if cfg.network_mode != 0 {
            ChunkMode::Network
        } else {
            ChunkMode::File
        };
        CoreParams::new(cfg.block_trigger, cfg.skip, mode)
    }
}

/// Create a new configuration with defaults.
#[no_mangle]
pub extern "C" fn hf_config_new() -> *mut HFConfig {
    Box::into_raw(Box::new(HFConfig {
        block_trigger: algo::BLOCK_SIZE,
        skip: algo::SKIPPED_BYTES,
        network_mode: 0,
    }))
}

/// Set the trigger modulus.
#[no_mangle]
pub extern "C" fn hf_config_set_block_trigger(cfg: *mut HFConfig, block_trigger: u64) {
    if !cfg.is_null() {
        unsafe {
            (*cfg).block_trigger = block_trigger.max(1);
        }
    }
}

/// Set network mode (drops the trailing partial chunk).
#[no_mangle]
pub extern "C" fn hf_config_set_network_mode(cfg: *mut HFConfig, enable: bool) {
    if !cfg.is_null() {
        unsafe {
            (*cfg).network_mode = enable as u8;
        }
    }
}

/// Free configuration.
#[no_mangle]
pub extern "C" fn hf_config_free(cfg: *mut HFConfig) {
    if !cfg.is_null() {
        unsafe {
            let _ = Box::from_raw(cfg);
        }
    }
}

/// Generate a fingerprint from data and serialize it to the textual wire
/// format. The label is fixed to `"data"`; callers needing a custom label
/// should use the Rust API directly.
///
/// # Safety
/// - `data` must be valid for reads of `len` bytes
/// - `cfg` must be a valid config or null (uses default)
/// - Caller must call `hf_result_free` to free the result
#[no_mangle]
pub extern "C" fn hf_hash(data: *const u8, len: usize, cfg: *const HFConfig) -> HFResult {
    if data.is_null() {
        return HFResult {
            buffer: std::ptr::null(),
            len: 0,
            error_code: ERROR_INVALID_INPUT,
        };
    }

    let params = if cfg.is_null() {
        CoreParams::default()
    } else {
        unsafe { CoreParams::from(&*cfg) }
    };

    let data_slice = match unsafe { utils::slice_from_raw_parts(data, len) } {
        Some(s) => s,
        None if len == 0 => &[][..],
        None => {
            return HFResult {
                buffer: std::ptr::null(),
                len: 0,
                error_code: ERROR_INVALID_INPUT,
            };
        }
    };

    match fingerprint_from_bytes(data_slice, "data", &params) {
        Ok(fp) => {
            let text = fp.to_text().into_bytes();
            let (ptr, len) = utils::box_byte_vec(text);
            HFResult {
                buffer: ptr,
                len,
                error_code: ERROR_OK,
            }
        }
        Err(_) => HFResult {
            buffer: std::ptr::null(),
            len: 0,
            error_code: ERROR_PROCESSING,
        },
    }
}

/// Compare two wire-format fingerprints.
///
/// # Safety
/// - `hash_a` and `hash_b` must point to valid UTF-8 wire-format text of the
///   given lengths
/// - Returns 0-100 similarity score, or 0 on error
#[no_mangle]
pub extern "C" fn hf_compare(
    hash_a: *const u8,
    len_a: usize,
    hash_b: *const u8,
    len_b: usize,
) -> u8 {
    if hash_a.is_null() || hash_b.is_null() {
        return 0;
    }

    let slice_a = unsafe { utils::slice_from_raw_parts(hash_a, len_a) };
    let slice_b = unsafe { utils::slice_from_raw_parts(hash_b, len_b) };

    match (slice_a, slice_b) {
        (Some(a), Some(b)) => {
            let (Ok(text_a), Ok(text_b)) = (std::str::from_utf8(a), std::str::from_utf8(b)) else {
                return 0;
            };
            match (Fingerprint::from_text(text_a), Fingerprint::from_text(text_b)) {
                (Ok(fp_a), Ok(fp_b)) => fingerprint_compare(&fp_a, &fp_b),
                _ => 0,
            }
        }
        _ => 0,
    }
}

/// Free a result buffer allocated by `hf_hash`.
///
/// # Safety
/// - `result.buffer` must have been allocated by `hf_hash`
/// - Must only be called once per result
#[no_mangle]
pub extern "C" fn hf_result_free(result: HFResult) {
    unsafe {
        utils::free_byte_buffer(result.buffer, result.len);
    }
}
