use std::fs;
use std::path::Path;
use std::process;

use swipe_core::decoder::SwipeDecoder;
use swipe_core::layout::KeyLayout;
use swipe_core::settings::{parse_settings_toml, settings, Settings};
use tracing::info;

use super::dict_ops::open_dict;
use crate::path_input::{parse_points, read_path_json};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub struct DecodeOptions<'a> {
    /// Inline `x,y x,y ...` points.
    pub points: Option<&'a str>,
    /// JSON file with the gesture path.
    pub path_file: Option<&'a str>,
    /// Layout TOML; QWERTY when absent.
    pub layout_file: Option<&'a str>,
    /// Settings TOML; built-in defaults when absent.
    pub settings_file: Option<&'a str>,
    pub max_results: Option<usize>,
}

fn load_settings(file: Option<&str>) -> Settings {
    match file {
        Some(file) => {
            let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
            die!(parse_settings_toml(&content), "Error: {}")
        }
        None => settings().clone(),
    }
}

fn load_layout(file: Option<&str>) -> KeyLayout {
    match file {
        Some(file) => {
            let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
            die!(KeyLayout::from_toml(&content), "Error parsing layout: {}")
        }
        None => KeyLayout::qwerty(),
    }
}

pub fn decode_cmd(dict_file: &str, opts: &DecodeOptions) {
    let path = match (opts.points, opts.path_file) {
        (Some(points), None) => die!(parse_points(points), "Error: {}"),
        (None, Some(file)) => die!(read_path_json(Path::new(file)), "Error reading path: {}"),
        _ => {
            eprintln!("Error: give exactly one of --points or --path-file");
            process::exit(1);
        }
    };
    let dict = open_dict(dict_file);
    let layout = load_layout(opts.layout_file);
    let mut settings = load_settings(opts.settings_file);
    if let Some(n) = opts.max_results {
        settings.decoder.max_results = n.max(1);
    }

    info!(points = path.len(), keys = layout.len(), "decoding");
    let candidates = SwipeDecoder::new(&settings).decode(&path, &layout, &dict);
    if candidates.is_empty() {
        println!("(no candidates)");
        return;
    }
    for (i, c) in candidates.iter().enumerate() {
        println!("#{:>2}: {:<20} {:>9.3}", i + 1, c.word, c.score);
    }
}

/// Decode the ideal gesture through `word`'s keys (one sample per key,
/// each repeated `linger` times) to see how the dictionary ranks it.
pub fn trace_cmd(dict_file: &str, word: &str, linger: usize, layout_file: Option<&str>) {
    let dict = open_dict(dict_file);
    let layout = load_layout(layout_file);
    let path: Vec<_> = layout
        .trace(word)
        .into_iter()
        .flat_map(|p| std::iter::repeat(p).take(linger.max(1)))
        .collect();
    let points: Vec<String> = path.iter().map(|p| format!("{:.3},{:.3}", p.x, p.y)).collect();
    println!("path: {}", points.join(" "));

    let candidates = SwipeDecoder::new(settings()).decode(&path, &layout, &dict);
    let rank = candidates.iter().position(|c| c.word == word);
    for (i, c) in candidates.iter().enumerate() {
        let marker = if Some(i) == rank { "*" } else { " " };
        println!("{marker}#{:>2}: {:<20} {:>9.3}", i + 1, c.word, c.score);
    }
    if rank.is_none() {
        println!("{word} is not among the candidates");
    }
}
