//! Basic usage example for mrsh2
//!
//! Demonstrates generating fingerprints, comparing them, using custom
//! chunking parameters, and round-tripping through the textual wire format.

use mrsh2::{fingerprint_compare, fingerprint_from_bytes, ChunkMode, CoreParams, Fingerprint};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("mrsh2 Basic Usage Example\n");

    // Example 1: Fingerprint two similar texts
    println!("=== Example 1: Similar Texts ===");
    let text1 = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
    let text2 = b"The quick brown fox leaps over the lazy dog. ".repeat(20);

    let params = CoreParams::default();

    let fp1 = fingerprint_from_bytes(&text1, "text1", &params)?;
    let fp2 = fingerprint_from_bytes(&text2, "text2", &params)?;

    let similarity = fingerprint_compare(&fp1, &fp2);
    println!("Text 1: {:?}", String::from_utf8_lossy(&text1[..45]));
    println!("Text 2: {:?}", String::from_utf8_lossy(&text2[..45]));
    println!("Similarity: {similarity}%\n");

    // Example 2: Fingerprint identical data
    println!("=== Example 2: Identical Data ===");
    let data = b"This is test data for fuzzy hashing, repeated for length. ".repeat(10);

    let fp_a = fingerprint_from_bytes(&data, "a", &params)?;
    let fp_b = fingerprint_from_bytes(&data, "b", &params)?;

    let similarity = fingerprint_compare(&fp_a, &fp_b);
    println!("Similarity (should be 100%): {similarity}%\n");

    // Example 3: Fingerprint completely different data
    println!("=== Example 3: Different Data ===");
    let data1 = b"Hello, World! Hello, World! Hello, World!";
    let data2 = b"ZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZ";

    let fp1 = fingerprint_from_bytes(data1, "d1", &params)?;
    let fp2 = fingerprint_from_bytes(data2, "d2", &params)?;

    let similarity = fingerprint_compare(&fp1, &fp2);
    println!("Similarity (should be low): {similarity}%\n");

    // Example 4: Custom chunking parameters
    println!("=== Example 4: Custom Configuration ===");
    let custom_params = CoreParams::new(64, 8, ChunkMode::Network);
    let fp = fingerprint_from_bytes(b"Custom config test data", "custom", &custom_params)?;
    println!("Generated fingerprint with custom config");
    println!("Fingerprint size: {} bytes\n", fp.size());

    // Example 5: Serialize and deserialize
    println!("=== Example 5: Serialization ===");
    let data = b"Serialization test data, long enough to be interesting.";
    let fp = fingerprint_from_bytes(data, "ser", &params)?;

    let text = fp.to_text();
    println!("Wire-format length: {} bytes", text.len());

    let restored = Fingerprint::from_text(&text)?;
    println!("Deserialized successfully");

    let similarity = fingerprint_compare(&fp, &restored);
    println!("Similarity after deserialization: {similarity}%");

    Ok(())
}
