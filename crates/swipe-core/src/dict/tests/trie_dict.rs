use crate::dict::{DictError, Dictionary, TrieDictionary, ROOT};

fn sample_dict() -> TrieDictionary {
    TrieDictionary::from_words([
        ("the", 200),
        ("then", 90),
        ("they", 120),
        ("to", 180),
        ("tea", 40),
        ("a", 250),
    ])
}

fn labels(dict: &TrieDictionary, node: u32) -> Vec<char> {
    dict.children(node).into_iter().map(|(c, _)| c).collect()
}

#[test]
fn test_root_children_sorted() {
    let dict = sample_dict();
    assert_eq!(labels(&dict, ROOT), vec!['a', 't']);
}

#[test]
fn test_children_sorted_below_root() {
    let dict = sample_dict();
    let t = dict.find("t").unwrap();
    assert_eq!(labels(&dict, t), vec!['e', 'h', 'o']);
    let the = dict.find("the").unwrap();
    assert_eq!(labels(&dict, the), vec!['n', 'y']);
}

#[test]
fn test_frequency_words_and_prefixes() {
    let dict = sample_dict();
    assert_eq!(dict.frequency(dict.find("the").unwrap()), 200);
    assert_eq!(dict.frequency(dict.find("they").unwrap()), 120);
    // "th" and "te" are prefixes only
    assert_eq!(dict.frequency(dict.find("th").unwrap()), 0);
    assert_eq!(dict.frequency(dict.find("te").unwrap()), 0);
    assert_eq!(dict.frequency(ROOT), 0);
}

#[test]
fn test_find_missing() {
    let dict = sample_dict();
    assert!(dict.find("thx").is_none());
    assert!(dict.find("b").is_none());
    assert_eq!(dict.find(""), Some(ROOT));
}

#[test]
fn test_leaf_has_no_children() {
    let dict = sample_dict();
    let they = dict.find("they").unwrap();
    assert!(dict.children(they).is_empty());
}

#[test]
fn test_out_of_range_node_is_dead_end() {
    let dict = sample_dict();
    let (node_count, _) = dict.stats();
    let bogus = node_count as u32 + 5;
    assert!(dict.children(bogus).is_empty());
    assert_eq!(dict.frequency(bogus), 0);
    assert!(dict.children(u32::MAX).is_empty());
}

#[test]
fn test_at_most_one_edge_per_label() {
    let dict = TrieDictionary::from_words([("ab", 1), ("ab", 2), ("ac", 3), ("a", 4)]);
    let a = dict.find("a").unwrap();
    let mut seen = labels(&dict, a);
    let before = seen.len();
    seen.dedup();
    assert_eq!(seen.len(), before);
    // last duplicate wins
    assert_eq!(dict.frequency(dict.find("ab").unwrap()), 2);
}

#[test]
fn test_empty_words_ignored() {
    let dict = TrieDictionary::from_words([("", 10), ("x", 1)]);
    assert_eq!(dict.frequency(ROOT), 0);
    assert_eq!(dict.stats(), (2, 1));
}

#[test]
fn test_empty_dictionary() {
    let dict = TrieDictionary::from_words(Vec::<(String, u32)>::new());
    assert_eq!(dict.stats(), (1, 0));
    assert!(dict.children(ROOT).is_empty());
    assert_eq!(dict.iter().count(), 0);
}

#[test]
fn test_iter_lexicographic() {
    let dict = sample_dict();
    let words: Vec<(String, u32)> = dict.iter().collect();
    let expected: Vec<(String, u32)> = [
        ("a", 250),
        ("tea", 40),
        ("the", 200),
        ("then", 90),
        ("they", 120),
        ("to", 180),
    ]
    .into_iter()
    .map(|(w, f)| (w.to_string(), f))
    .collect();
    assert_eq!(words, expected);
}

#[test]
fn test_non_ascii_labels() {
    let dict = TrieDictionary::from_words([("café", 12), ("cafe", 30)]);
    let node = dict.find("café").unwrap();
    assert_eq!(dict.frequency(node), 12);
    let words: Vec<String> = dict.iter().map(|(w, _)| w).collect();
    assert_eq!(words, vec!["cafe", "café"]);
}

#[test]
fn test_stats() {
    let dict = sample_dict();
    let (nodes, words) = dict.stats();
    assert_eq!(words, 6);
    // root + a + t + (e,h,o) + (ea, he) + (then, they)
    assert_eq!(nodes, 1 + 2 + 3 + 2 + 2);
}

#[test]
fn test_dictionary_is_shareable_across_threads() {
    let dict = std::sync::Arc::new(sample_dict());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let dict = std::sync::Arc::clone(&dict);
            std::thread::spawn(move || dict.find("they").map(|n| dict.frequency(n)))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), Some(120));
    }
}

#[test]
fn test_roundtrip_bytes() {
    let dict = sample_dict();
    let bytes = dict.to_bytes().unwrap();
    let loaded = TrieDictionary::from_bytes(&bytes).unwrap();
    assert_eq!(
        loaded.iter().collect::<Vec<_>>(),
        dict.iter().collect::<Vec<_>>()
    );
}

#[test]
fn test_save_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("en.swdx");
    let dict = sample_dict();
    dict.save(&path).unwrap();

    let loaded = TrieDictionary::open(&path).unwrap();
    assert_eq!(loaded.stats(), dict.stats());
    assert_eq!(loaded.frequency(loaded.find("to").unwrap()), 180);
}

#[test]
fn test_open_nonexistent() {
    let err = TrieDictionary::open(std::path::Path::new("/nonexistent/en.swdx")).unwrap_err();
    assert!(matches!(err, DictError::Io(_)));
}

#[test]
fn test_invalid_magic() {
    let mut bytes = sample_dict().to_bytes().unwrap();
    bytes[0] = b'X';
    assert!(matches!(
        TrieDictionary::from_bytes(&bytes),
        Err(DictError::InvalidMagic)
    ));
}

#[test]
fn test_unsupported_version() {
    let mut bytes = sample_dict().to_bytes().unwrap();
    bytes[4] = 99;
    assert!(matches!(
        TrieDictionary::from_bytes(&bytes),
        Err(DictError::UnsupportedVersion(99))
    ));
}

#[test]
fn test_truncated() {
    let bytes = sample_dict().to_bytes().unwrap();
    assert!(matches!(
        TrieDictionary::from_bytes(&bytes[..3]),
        Err(DictError::InvalidHeader)
    ));
    assert!(matches!(
        TrieDictionary::from_bytes(&bytes[..bytes.len() - 1]),
        Err(DictError::InvalidHeader)
    ));
}

#[test]
fn test_checksum_mismatch() {
    let mut bytes = sample_dict().to_bytes().unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    assert!(matches!(
        TrieDictionary::from_bytes(&bytes),
        Err(DictError::ChecksumMismatch { .. })
    ));
}

/// Encode raw `(char, frequency, first_child, next_sibling)` records as SWDX.
fn swdx(records: &[(char, u32, u32, u32)]) -> Vec<u8> {
    let mut body = Vec::new();
    for &(ch, freq, child, sibling) in records {
        body.extend_from_slice(&(ch as u32).to_le_bytes());
        body.extend_from_slice(&freq.to_le_bytes());
        body.extend_from_slice(&child.to_le_bytes());
        body.extend_from_slice(&sibling.to_le_bytes());
    }
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"SWDX");
    bytes.push(1);
    bytes.extend_from_slice(&[0; 3]);
    bytes.extend_from_slice(&(records.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
    bytes.extend_from_slice(&body);
    bytes
}

#[test]
fn test_handmade_tree_accepted() {
    // root -> a -> b, root -> c
    let bytes = swdx(&[
        ('^', 0, 1, 0),
        ('a', 5, 3, 2),
        ('c', 7, 0, 0),
        ('b', 9, 0, 0),
    ]);
    let dict = TrieDictionary::from_bytes(&bytes).unwrap();
    let words: Vec<(String, u32)> = dict.iter().collect();
    assert_eq!(
        words,
        vec![
            ("a".to_string(), 5),
            ("ab".to_string(), 9),
            ("c".to_string(), 7)
        ]
    );
}

#[test]
fn test_backward_link_rejected() {
    // node 1's child points back at its own slot
    let bytes = swdx(&[('^', 0, 1, 0), ('a', 5, 1, 0)]);
    let err = TrieDictionary::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, DictError::Corrupt(_)));
}

#[test]
fn test_shared_child_rejected() {
    // node 2 is both the first child and the next sibling of node 1
    let bytes = swdx(&[('^', 0, 1, 0), ('a', 5, 2, 2), ('b', 5, 0, 0)]);
    let err = TrieDictionary::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, DictError::Corrupt(_)));
    assert!(err.to_string().contains("already linked"));
}

#[test]
fn test_overlapping_chain_rejected() {
    // every node links forward to i+1 and i+2: acyclic, but subtrees are
    // shared so iteration would blow up
    let n = 40u32;
    let records: Vec<(char, u32, u32, u32)> = (0..n)
        .map(|i| {
            let child = if i + 1 < n { i + 1 } else { 0 };
            let sibling = if i >= 1 && i + 2 < n { i + 2 } else { 0 };
            (if i == 0 { '^' } else { 'a' }, 1, child, sibling)
        })
        .collect();
    let err = TrieDictionary::from_bytes(&swdx(&records)).unwrap_err();
    assert!(matches!(err, DictError::Corrupt(_)));
}

#[test]
fn test_orphan_node_rejected() {
    // node 2 is never linked
    let bytes = swdx(&[('^', 0, 1, 0), ('a', 5, 0, 0), ('b', 5, 0, 0)]);
    let err = TrieDictionary::from_bytes(&bytes).unwrap_err();
    assert!(err.to_string().contains("not linked"));
}

#[test]
fn test_trailing_bytes_rejected() {
    let mut bytes = sample_dict().to_bytes().unwrap();
    bytes.push(0);
    assert!(matches!(
        TrieDictionary::from_bytes(&bytes),
        Err(DictError::Corrupt(_))
    ));
}

#[test]
fn test_packed_shared_child_rejected() {
    // root -> node 1; node 1 has child and sibling both at node 2
    let mut bytes = Vec::new();
    for (unit, child, sibling) in [(b'^', 10u8, 0u8), (b'a', 20, 20), (b'b', 0, 0)] {
        bytes.extend_from_slice(&[0, unit, 1, 0, 0, child, 0, 0, sibling, 0]);
    }
    let err = TrieDictionary::from_packed_bytes(&bytes).unwrap_err();
    assert!(matches!(err, DictError::Corrupt(_)));
}
