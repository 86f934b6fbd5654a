//! Gesture paths given on the command line or in JSON files.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use swipe_core::layout::Point;

#[derive(Debug, thiserror::Error)]
pub enum PathInputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid point {0:?} (expected x,y)")]
    InvalidPoint(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse `"x,y x,y ..."` (whitespace or `;` between points, optional
/// whitespace around the comma).
pub fn parse_points(text: &str) -> Result<Vec<Point>, PathInputError> {
    pair_tokens(text)
        .into_iter()
        .map(|pair| {
            let invalid = || PathInputError::InvalidPoint(pair.clone());
            let (x, y) = pair.split_once(',').ok_or_else(invalid)?;
            let x: f64 = x.parse().map_err(|_| invalid())?;
            let y: f64 = y.parse().map_err(|_| invalid())?;
            Ok(Point::new(x, y))
        })
        .collect()
}

/// Split into `x,y` tokens, joining pieces that a space after or before a
/// comma tore apart.
fn pair_tokens(text: &str) -> Vec<String> {
    let mut pairs: Vec<String> = Vec::new();
    let pieces = text
        .split(|c: char| c.is_whitespace() || c == ';')
        .filter(|s| !s.is_empty());
    for piece in pieces {
        match pairs.last_mut() {
            Some(last) if last.ends_with(',') || piece.starts_with(',') => last.push_str(piece),
            _ => pairs.push(piece.to_string()),
        }
    }
    pairs
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPoint {
    Pair([f64; 2]),
    Object(Point),
}

/// Read a JSON array of `[x, y]` pairs or `{"x": .., "y": ..}` objects.
pub fn read_path_json(path: &Path) -> Result<Vec<Point>, PathInputError> {
    let text = fs::read_to_string(path)?;
    parse_path_json(&text)
}

pub fn parse_path_json(text: &str) -> Result<Vec<Point>, PathInputError> {
    let raw: Vec<JsonPoint> = serde_json::from_str(text)?;
    Ok(raw
        .into_iter()
        .map(|p| match p {
            JsonPoint::Pair([x, y]) => Point::new(x, y),
            JsonPoint::Object(p) => p,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_separated_points() {
        let pts = parse_points("0.1,0.2  0.3,0.4;0.5, 0.6").unwrap();
        assert_eq!(
            pts,
            vec![
                Point::new(0.1, 0.2),
                Point::new(0.3, 0.4),
                Point::new(0.5, 0.6)
            ]
        );
    }

    #[test]
    fn comma_may_be_surrounded_by_spaces() {
        let pts = parse_points("0.5, 0.6 0.7 ,0.8 1 , 2").unwrap();
        assert_eq!(
            pts,
            vec![
                Point::new(0.5, 0.6),
                Point::new(0.7, 0.8),
                Point::new(1.0, 2.0)
            ]
        );
    }

    #[test]
    fn empty_input_is_empty_path() {
        assert!(parse_points("   ").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_points() {
        assert!(matches!(
            parse_points("0.1,0.2 0.3"),
            Err(PathInputError::InvalidPoint(p)) if p == "0.3"
        ));
        assert!(matches!(
            parse_points("a,b"),
            Err(PathInputError::InvalidPoint(_))
        ));
    }

    #[test]
    fn parses_json_pairs_and_objects() {
        let pts = parse_path_json(r#"[[0.0, 1.0], {"x": 2.0, "y": 3.0}]"#).unwrap();
        assert_eq!(pts, vec![Point::new(0.0, 1.0), Point::new(2.0, 3.0)]);
    }

    #[test]
    fn reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("path.json");
        fs::write(&file, "[[0.45, 0.075], [0.6, 0.225], [0.25, 0.075]]").unwrap();
        assert_eq!(read_path_json(&file).unwrap().len(), 3);
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(
            parse_path_json("[1, 2"),
            Err(PathInputError::Json(_))
        ));
    }
}
