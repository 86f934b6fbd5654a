#![cfg(test)]

use crate::dict::TrieDictionary;
use crate::layout::{KeyLayout, Point};
use crate::settings::{parse_settings_toml, Settings, DEFAULT_SETTINGS_TOML};

use super::{SpatialModel, StepParams};

/// `t h e` in a row with `q` below `t`.
pub fn fixture_layout() -> KeyLayout {
    [
        ('t', Point::new(0.0, 0.0)),
        ('h', Point::new(1.0, 0.0)),
        ('e', Point::new(2.0, 0.0)),
        ('q', Point::new(0.0, 1.0)),
    ]
    .into_iter()
    .collect()
}

pub fn word_dict(words: &[(&str, u32)]) -> TrieDictionary {
    TrieDictionary::from_words(words.iter().copied())
}

/// Shared dictionary for decoder tests on the QWERTY layout.
pub fn english_dict() -> TrieDictionary {
    word_dict(&[
        ("the", 255),
        ("then", 120),
        ("they", 200),
        ("there", 180),
        ("he", 220),
        ("hen", 20),
        ("tea", 60),
        ("ten", 90),
        ("to", 250),
        ("too", 150),
        ("top", 80),
        ("hello", 140),
        ("help", 130),
        ("world", 110),
        ("word", 100),
        ("swipe", 40),
        ("keyboard", 35),
        ("rhythm", 10),
        ("good", 160),
        ("god", 70),
    ])
}

pub fn default_settings() -> Settings {
    parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap()
}

pub fn params(beam_width: usize) -> StepParams {
    StepParams {
        spatial: SpatialModel::new(0.11),
        idle_penalty: 0.5,
        beam_width,
    }
}

/// Ideal gesture through `word`: one sample per key centroid.
pub fn trace(layout: &KeyLayout, word: &str) -> Vec<Point> {
    layout.trace(word)
}

/// Same gesture with every sample repeated `times` times.
pub fn trace_lingering(layout: &KeyLayout, word: &str, times: usize) -> Vec<Point> {
    layout
        .trace(word)
        .into_iter()
        .flat_map(|p| std::iter::repeat(p).take(times))
        .collect()
}
