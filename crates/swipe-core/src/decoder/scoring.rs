//! Final word scoring applied once the gesture has been consumed.
//!
//! `word_penalty` compensates for dictionaries whose frequencies are
//! coarse or saturated (one-byte word lists). It lives behind
//! `WordScorer` so a proper frequency model can replace it without
//! touching the beam search.

use crate::settings::{PenaltySettings, Settings};

/// Turns a completed hypothesis into its ranking score.
pub trait WordScorer: Send + Sync {
    fn final_score(&self, path_score: f64, word: &str, frequency: u32) -> f64;
}

/// `path + ln(max(freq, 1)) + length bonus - word penalty`.
pub struct DefaultWordScorer<'a> {
    length_bonus_weight: f64,
    penalty: &'a PenaltySettings,
}

impl<'a> DefaultWordScorer<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            length_bonus_weight: settings.scoring.length_bonus_weight,
            penalty: &settings.penalty,
        }
    }
}

impl WordScorer for DefaultWordScorer<'_> {
    fn final_score(&self, path_score: f64, word: &str, frequency: u32) -> f64 {
        let unigram = f64::from(frequency.max(1)).ln();
        let length_bonus = word.chars().count() as f64 * self.length_bonus_weight;
        path_score + unigram + length_bonus - word_penalty(word, self.penalty)
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn longest_consonant_run(chars: &[char]) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for &c in chars {
        if c.is_alphabetic() && !is_vowel(c) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Heuristic penalty (never negative) for implausible-looking words.
///
/// - no vowel in a word of 3+ letters
/// - each doubled letter
/// - consonant clusters longer than two
/// - minus a bonus for common short words, floored at zero
pub fn word_penalty(word: &str, settings: &PenaltySettings) -> f64 {
    let lower = word.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();
    let mut penalty = 0.0;

    if chars.len() >= 3 && !chars.iter().copied().any(is_vowel) {
        penalty += settings.vowelless;
    }

    let doubled = chars
        .windows(2)
        .filter(|w| w[0] == w[1] && w[0].is_alphabetic())
        .count();
    penalty += doubled as f64 * settings.double_letter;

    let run = longest_consonant_run(&chars);
    if run >= 3 {
        penalty += settings.consonant_run * (run - 2) as f64;
    }

    if settings.is_common_word(&lower) {
        penalty -= settings.common_word_bonus;
    }

    penalty.max(0.0)
}
