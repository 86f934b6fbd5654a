//! Plain-text word lists: `word [frequency]` per line.

use std::fs;
use std::path::Path;

use super::DictError;

/// Word lists longer than this are truncated.
pub const DEFAULT_MAX_WORDS: usize = 50_000;

/// Frequencies are stored in one byte in packed dictionaries, so word lists
/// saturate at this value.
pub const MAX_WORD_FREQUENCY: u32 = 255;

/// Parse a word list into `(word, frequency)` pairs in file order.
///
/// Blank lines and `#` comments are skipped. Tabs and commas separate
/// fields like spaces do. A missing or non-numeric frequency defaults to
/// `1000 + ordinal`, and every frequency is clamped to
/// `0..=MAX_WORD_FREQUENCY`.
pub fn parse_word_list(text: &str, max_words: usize) -> Vec<(String, u32)> {
    let mut words = Vec::new();
    for raw in text.lines() {
        if words.len() >= max_words {
            break;
        }
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let normalized = line.replace(['\t', ','], " ");
        let mut parts = normalized.split_whitespace();
        let Some(word) = parts.next() else {
            continue;
        };
        let frequency = match parts.next() {
            Some(f) if !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()) => {
                f.parse::<u64>().unwrap_or(u64::MAX)
            }
            _ => 1000 + words.len() as u64,
        };
        let frequency = frequency.min(u64::from(MAX_WORD_FREQUENCY)) as u32;
        words.push((word.to_string(), frequency));
    }
    words
}

/// Read and parse a word list file.
pub fn read_word_list(path: &Path, max_words: usize) -> Result<Vec<(String, u32)>, DictError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_word_list(&text, max_words))
}
