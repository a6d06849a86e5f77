//! FingerprintList — an in-memory collection of fingerprints plus the
//! batch-compare operations built on top of it.
//!
//! Grounded in the original `FINGERPRINT_LIST`/`cl_fpl_all` C glue
//! (`original_source/bindings/glue/mrsh_glue.c`): a single-owner container
//! driving pairwise comparisons, reworked from a linked list with a
//! preallocated `n*(n+1)/2` output array into a `Vec` with iterator-based
//! pair enumeration.

use super::error::ParseError;
use super::fingerprint::{fingerprint_compare, Fingerprint};

/// One thresholded comparison result: the two source labels (owned copies,
/// never borrows — see `DESIGN.md`) and the similarity score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompareResult {
    pub label_a: String,
    pub label_b: String,
    pub score: u8,
}

/// A single-owner, insertion-ordered collection of fingerprints.
#[derive(Clone, Debug, Default)]
pub struct FingerprintList {
    fingerprints: Vec<Fingerprint>,
}

impl FingerprintList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            fingerprints: Vec::new(),
        }
    }

    /// Append a fingerprint, taking ownership of it.
    pub fn push(&mut self, fp: Fingerprint) {
        self.fingerprints.push(fp);
    }

    /// Number of fingerprints in the list.
    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    /// True if the list holds no fingerprints.
    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    /// Iterate over the fingerprints in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Fingerprint> {
        self.fingerprints.iter()
    }

    /// All unordered pairs within this list scoring at least `threshold`.
    ///
    /// Mirrors the original's nested `fp1` / `fp2 = fp1->next` double loop
    /// over a singly-linked list.
    pub fn compare_all(&self, threshold: u8) -> Vec<CompareResult> {
        let mut results = Vec::new();
        for i in 0..self.fingerprints.len() {
            for j in (i + 1)..self.fingerprints.len() {
                let score = fingerprint_compare(&self.fingerprints[i], &self.fingerprints[j]);
                if score >= threshold {
                    results.push(CompareResult {
                        label_a: self.fingerprints[i].label().to_string(),
                        label_b: self.fingerprints[j].label().to_string(),
                        score,
                    });
                }
            }
        }
        results
    }

    /// The Cartesian product of `self` against `other`, filtered to
    /// `threshold`. Not present in the original glue, but the natural peer
    /// of `compare_all` for "compare these two corpora against each other"
    /// workflows.
    pub fn compare_cross(&self, other: &FingerprintList, threshold: u8) -> Vec<CompareResult> {
        let mut results = Vec::new();
        for a in &self.fingerprints {
            for b in &other.fingerprints {
                let score = fingerprint_compare(a, b);
                if score >= threshold {
                    results.push(CompareResult {
                        label_a: a.label().to_string(),
                        label_b: b.label().to_string(),
                        score,
                    });
                }
            }
        }
        results
    }

    /// One fingerprint against every member of this list, filtered to
    /// `threshold`.
    pub fn compare_against(&self, fp: &Fingerprint, threshold: u8) -> Vec<CompareResult> {
        self.fingerprints
            .iter()
            .filter_map(|member| {
                let score = fingerprint_compare(fp, member);
                (score >= threshold).then(|| CompareResult {
                    label_a: fp.label().to_string(),
                    label_b: member.label().to_string(),
                    score,
                })
            })
            .collect()
    }

    /// Serialize every fingerprint to the textual wire format, one per line,
    /// joined by a single `\n` with no trailing newline. Mirrors `fpl_str`'s
    /// newline-separated output, built from the single-fingerprint codec
    /// rather than a hand-rolled buffer-offset walk.
    pub fn to_text(&self) -> String {
        self.fingerprints
            .iter()
            .map(|fp| fp.to_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parse a newline-separated document of fingerprint lines.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        if text.is_empty() {
            return Ok(Self::new());
        }
        let fingerprints = text
            .split('\n')
            .map(Fingerprint::from_text)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { fingerprints })
    }
}
