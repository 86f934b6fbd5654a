//! Key layout: the reference centroid of every key in gesture coordinates.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// A point in the shared keyboard/gesture coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("key {0:?} must be exactly one character")]
    InvalidKey(String),
    #[error("key {0:?} has a non-finite coordinate")]
    NonFinite(char),
}

/// Mapping from character to key centroid.
///
/// Characters without an entry cannot be produced by a gesture.
#[derive(Debug, Clone, Default)]
pub struct KeyLayout {
    keys: HashMap<char, Point>,
}

#[derive(Deserialize)]
struct LayoutFile {
    keys: BTreeMap<String, [f64; 2]>,
}

/// Rows of the QWERTY letter block with their horizontal stagger, in key widths.
const QWERTY_ROWS: [(&str, f64); 3] = [("qwertyuiop", 0.0), ("asdfghjkl", 0.5), ("zxcvbnm", 1.5)];
const QWERTY_KEY_WIDTH: f64 = 0.1;
const QWERTY_ROW_HEIGHT: f64 = 0.15;

impl KeyLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: char, centroid: Point) -> Option<Point> {
        self.keys.insert(key, centroid)
    }

    pub fn centroid(&self, key: char) -> Option<Point> {
        self.keys.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Lowercase QWERTY letters on a keyboard normalized to width 1.0.
    pub fn qwerty() -> Self {
        let mut layout = Self::new();
        for (row, (keys, stagger)) in QWERTY_ROWS.iter().enumerate() {
            for (col, key) in keys.chars().enumerate() {
                let x = (stagger + col as f64 + 0.5) * QWERTY_KEY_WIDTH;
                let y = (row as f64 + 0.5) * QWERTY_ROW_HEIGHT;
                layout.insert(key, Point::new(x, y));
            }
        }
        layout
    }

    /// Parse a `[keys]` table of `char = [x, y]` entries.
    pub fn from_toml(toml_str: &str) -> Result<Self, LayoutError> {
        let file: LayoutFile =
            toml::from_str(toml_str).map_err(|e| LayoutError::Parse(e.to_string()))?;
        let mut layout = Self::new();
        for (key, [x, y]) in file.keys {
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(LayoutError::InvalidKey(key));
            };
            if !x.is_finite() || !y.is_finite() {
                return Err(LayoutError::NonFinite(c));
            }
            layout.insert(c, Point::new(x, y));
        }
        Ok(layout)
    }

    /// Centroids for each character of `word`, skipping unmapped ones.
    ///
    /// Handy for synthesizing an ideal gesture through a word.
    pub fn trace(&self, word: &str) -> Vec<Point> {
        word.chars().filter_map(|c| self.centroid(c)).collect()
    }
}

impl FromIterator<(char, Point)> for KeyLayout {
    fn from_iter<I: IntoIterator<Item = (char, Point)>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
