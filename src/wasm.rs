//! WebAssembly bindings for mrsh2

use wasm_bindgen::prelude::*;
use crate::{fingerprint_compare, fingerprint_from_bytes, CoreParams, Fingerprint};

// When the `console_error_panic_hook` feature is enabled, we can call the
// `set_panic_hook` function at least once during initialization, and then
// we will get better error messages if our code ever panics.
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    set_panic_hook();
}

/// Generate a fingerprint from data and return its textual wire format.
///
/// # Arguments
/// * `data` - Input data as Uint8Array
/// * `label` - Fingerprint label
///
/// # Returns
/// The fingerprint serialized as a wire-format string.
#[wasm_bindgen]
pub fn wasm_generate_hash(data: &[u8], label: String) -> Result<String, JsValue> {
    let fp = fingerprint_from_bytes(data, label, &CoreParams::default())
        .map_err(|e| JsValue::from_str(&format!("Error generating hash: {e}")))?;

    Ok(fp.to_text())
}

/// Compare two wire-format fingerprints.
///
/// # Arguments
/// * `hash_a` - First fingerprint, wire-format text
/// * `hash_b` - Second fingerprint, wire-format text
///
/// # Returns
/// Similarity score 0-100
#[wasm_bindgen]
pub fn wasm_compare_hashes(hash_a: &str, hash_b: &str) -> Result<u8, JsValue> {
    let fp_a = Fingerprint::from_text(hash_a)
        .map_err(|e| JsValue::from_str(&format!("Error parsing hash A: {e}")))?;

    let fp_b = Fingerprint::from_text(hash_b)
        .map_err(|e| JsValue::from_str(&format!("Error parsing hash B: {e}")))?;

    Ok(fingerprint_compare(&fp_a, &fp_b))
}

/// Generate hashes for two inputs and compare in one step.
///
/// # Arguments
/// * `data_a` - First data as Uint8Array
/// * `data_b` - Second data as Uint8Array
///
/// # Returns
/// Similarity score 0-100
#[wasm_bindgen]
pub fn wasm_compare_data(data_a: &[u8], data_b: &[u8]) -> Result<u8, JsValue> {
    let params = CoreParams::default();

    let hash_a = fingerprint_from_bytes(data_a, "a", &params)
        .map_err(|e| JsValue::from_str(&format!("Error generating hash A: {e}")))?;

    let hash_b = fingerprint_from_bytes(data_b, "b", &params)
        .map_err(|e| JsValue::from_str(&format!("Error generating hash B: {e}")))?;

    Ok(fingerprint_compare(&hash_a, &hash_b))
}

/// Get fingerprint size in bytes, from its wire-format text.
#[wasm_bindgen]
pub fn wasm_fingerprint_size(hash: &str) -> Result<usize, JsValue> {
    let fp = Fingerprint::from_text(hash)
        .map_err(|e| JsValue::from_str(&format!("Error parsing hash: {e}")))?;

    Ok(fp.size())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasm_generate_hash_succeeds() {
        let data = b"Hello, WASM!";
        let result = wasm_generate_hash(data, "greeting".to_string());
        assert!(result.is_ok());
    }

    #[test]
    fn wasm_compare_data_identical_is_100() {
        let data1 = b"The quick brown fox, repeated enough to chunk reliably over and over.";
        let data2 = b"The quick brown fox, repeated enough to chunk reliably over and over.";

        let result = wasm_compare_data(data1, data2);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 100);
    }

    #[test]
    fn wasm_compare_hashes_round_trips_through_text() {
        let data = b"round trip content for the wasm text codec test, long enough to chunk";
        let text = wasm_generate_hash(data, "rt".to_string()).unwrap();
        let score = wasm_compare_hashes(&text, &text).unwrap();
        assert_eq!(score, 100);
    }
}
