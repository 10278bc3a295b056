//! Lexical primitives shared by the ranking engine: tokenization, content
//! hashing, and the cheap resume heuristics the fallback scorer is built on.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Common English function words dropped during tokenization.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "else", "for", "of", "on", "in", "to",
    "from", "by", "with", "as", "at", "is", "are", "was", "were", "be", "been", "being", "it",
    "this", "that", "those", "these", "we", "you", "they", "he", "she", "him", "her", "them", "i",
    "me", "my", "our", "your", "their", "so", "not", "no", "yes", "do", "did", "done", "does",
    "can", "could", "should", "would", "will", "just", "about", "over", "under", "than", "too",
    "very", "more", "most", "such", "per", "via",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOPWORDS.iter().copied().collect());

static YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\+?\s*(?:years|yrs)").unwrap());

/// Indicators counted by `count_certifications`. Overlapping patterns
/// double-count (e.g. "AWS Certified" also hits "certified"); the result is a
/// coarse signal, not a unique-entity count.
static CERT_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)certified",
        r"(?i)certification",
        r"(?i)certificate",
        r"(?i)aws\s*certified",
        r"(?i)pmp",
        r"(?i)scrum\s*master",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Splits text into comparable lexical tokens: lowercased, punctuation other
/// than `+ . #` collapsed to spaces (so "c++" and "node.js" survive), tokens
/// of length <= 2 and stopwords dropped. Total function; empty input yields an
/// empty vec. Tokens appear in text order and may repeat.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '.' | '#' | ' ') {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .filter(|t| t.len() > 2 && !STOPWORD_SET.contains(t))
        .map(str::to_string)
        .collect()
}

/// Token set for membership tests and Jaccard computation.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Tokens deduplicated in first-occurrence order. Keeps matched/missing
/// keyword lists deterministic for a given input text.
pub fn unique_tokens(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Jaccard similarity of the token sets of two texts, in [0, 1]. Either side
/// empty yields 0 rather than dividing by zero.
pub fn jaccard_similarity(a_text: &str, b_text: &str) -> f64 {
    let a = token_set(a_text);
    let b = token_set(b_text);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(&b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Scans for `<n>(+) years|yrs` mentions and returns the **maximum** figure
/// found. Resumes tend to restate total experience several times; the largest
/// single mention is a better estimate than the sum of all of them.
pub fn estimate_years_of_experience(text: &str) -> u32 {
    YEARS_RE
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Total number of certification-indicator matches across the fixed pattern
/// set.
pub fn count_certifications(text: &str) -> u32 {
    CERT_RES
        .iter()
        .map(|re| re.find_iter(text).count() as u32)
        .sum()
}

/// Hex SHA-256 of the trimmed text. Cache entries are validated against these
/// digests, so trimming must stay consistent with what was hashed at store
/// time.
pub fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.trim().as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
