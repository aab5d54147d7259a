use ahash::AHashMap;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Default cosine similarity at or above which a candidate counts as
/// matching the reference corpus.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

// Tokens are lowercased runs of two or more word characters; single
// characters and punctuation carry no signal for log text.
static RE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    NoMatch,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Match => write!(f, "MATCH"),
            Verdict::NoMatch => write!(f, "NO MATCH"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub line: String,
    pub verdict: Verdict,
    /// Best cosine similarity against the reference set; 0.0 when the
    /// reference set is empty or either side has no tokens.
    pub similarity: f64,
}

pub(crate) fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    RE_TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Term-frequency vector space shared by every document of one
/// classification run.
///
/// The vocabulary must be fit jointly over the reference and candidate sets
/// so both sides share dimensionality. Fitting the two sides separately
/// yields vectors that are not comparable, and nothing downstream detects
/// it: the scores are simply wrong. `classify` is the only caller and
/// always fits over the union.
struct VectorSpace {
    index: AHashMap<String, usize>,
}

impl VectorSpace {
    fn fit<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let index = docs
            .into_iter()
            .flat_map(tokenize)
            .unique()
            .enumerate()
            .map(|(i, token)| (token, i))
            .collect();
        Self { index }
    }

    fn vectorize(&self, text: &str) -> Vec<f64> {
        let mut counts = vec![0.0; self.index.len()];
        for token in tokenize(text) {
            if let Some(&i) = self.index.get(&token) {
                counts[i] += 1.0;
            }
        }
        counts
    }
}

fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Scores each candidate line against the reference sample set and labels
/// it by the best similarity found.
///
/// An empty reference set means no valid comparison exists, so every
/// candidate is labeled `NoMatch` rather than erroring. An empty candidate
/// set yields an empty result. Candidate order is preserved.
pub fn classify(
    reference: &[String],
    candidates: &[String],
    threshold: f64,
) -> Vec<Classification> {
    if candidates.is_empty() {
        return Vec::new();
    }
    let space = VectorSpace::fit(
        reference
            .iter()
            .map(String::as_str)
            .chain(candidates.iter().map(String::as_str)),
    );
    let reference_vectors: Vec<Vec<f64>> =
        reference.iter().map(|s| space.vectorize(s)).collect();

    candidates
        .iter()
        .map(|line| {
            let v = space.vectorize(line);
            let similarity = reference_vectors
                .iter()
                .map(|r| cosine_similarity(&v, r))
                .fold(0.0_f64, f64::max);
            let verdict = if !reference_vectors.is_empty() && similarity >= threshold {
                Verdict::Match
            } else {
                Verdict::NoMatch
            };
            Classification {
                line: line.clone(),
                verdict,
                similarity,
            }
        })
        .collect()
}
