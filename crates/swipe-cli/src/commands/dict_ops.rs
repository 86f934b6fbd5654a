use std::path::Path;
use std::process;

use swipe_core::dict::{read_word_list, Dictionary, TrieDictionary};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub(crate) fn open_dict(dict_file: &str) -> TrieDictionary {
    die!(
        TrieDictionary::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    )
}

pub fn compile(words_file: &str, output_file: &str, max_words: usize, packed: bool) {
    let words = die!(
        read_word_list(Path::new(words_file), max_words),
        "Error reading word list: {}"
    );
    eprintln!("Building trie from {} words...", words.len());

    let dict = TrieDictionary::from_words(words);
    let output = Path::new(output_file);
    if packed {
        die!(dict.save_packed(output), "Error writing dictionary: {}");
    } else {
        die!(dict.save(output), "Error writing dictionary: {}");
    }

    let (nodes, word_count) = dict.stats();
    let size = std::fs::metadata(output).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {output_file}: {word_count} words, {nodes} nodes ({:.1} KB)",
        size as f64 / 1024.0
    );
}

pub fn info(file: &str) {
    let dict = open_dict(file);
    let (nodes, words) = dict.stats();
    println!("Dictionary: {file}");
    println!("  nodes: {nodes}");
    println!("  words: {words}");
    if let Some((word, freq)) = dict.iter().max_by_key(|(_, f)| *f) {
        println!("  most frequent: {word} ({freq})");
    }
}

pub fn lookup(dict_file: &str, word: &str) {
    let dict = open_dict(dict_file);
    match dict.find(word) {
        Some(node) => {
            let freq = dict.frequency(node);
            let next: String = dict.children(node).iter().map(|(c, _)| *c).collect();
            if freq > 0 {
                println!("{word}: node {node}, frequency {freq}");
            } else {
                println!("{word}: node {node}, prefix only");
            }
            if !next.is_empty() {
                println!("  continues with: {next}");
            }
        }
        None => {
            println!("{word}: not found");
            process::exit(1);
        }
    }
}

pub fn dump(dict_file: &str, prefix: Option<&str>) {
    let dict = open_dict(dict_file);
    for (word, freq) in dict.iter() {
        if prefix.is_some_and(|p| !word.starts_with(p)) {
            continue;
        }
        println!("{word}\t{freq}");
    }
}

pub fn export_packed(dict_file: &str, output_file: &str) {
    let dict = open_dict(dict_file);
    die!(
        dict.save_packed(Path::new(output_file)),
        "Error writing packed dictionary: {}"
    );
    eprintln!("Wrote {output_file}");
}
