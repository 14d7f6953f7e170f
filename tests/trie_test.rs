//! Integration tests for the trie.
//!
//! Exercises the public API end to end: mutation and counters, cursors across
//! structural changes, correction search, and loading settings into a trie.

use std::sync::Arc;

use triez_lib::config::{ConfigLoader, Validate};
use triez_lib::data_structures::trie::{Trie, TrieConfig, TrieError};

const WORDS: [&str; 8] = ["A", "to", "tea", "ted", "ten", "i", "in", "inn"];

fn sample() -> Trie<usize> {
    let mut trie = Trie::new();
    for (i, word) in WORDS.iter().enumerate() {
        assert!(trie.add(*word, i).unwrap().is_none());
    }
    trie
}

#[test]
fn test_trie_lifecycle() {
    let mut trie = sample();
    assert_eq!(trie.len(), 8);
    assert_eq!(trie.node_count(), 11);
    assert_eq!(trie.height(), 3);

    // Overwrite keeps the structure
    let generation = trie.generation();
    let previous = trie.add("ten", 99).unwrap();
    assert_eq!(previous.as_deref(), Some(&4));
    assert_eq!(*trie.search("ten").unwrap(), 99);
    assert_eq!(trie.generation(), generation);
    assert_eq!(trie.len(), 8);

    // Deleting an inner key prunes nothing
    assert_eq!(*trie.delete("in").unwrap(), 6);
    assert_eq!(trie.node_count(), 11);
    assert_eq!(trie.generation(), generation);
    assert!(trie.contains("inn"));

    // Deleting a leaf prunes its vacant branch
    trie.delete("inn").unwrap();
    assert_eq!(trie.node_count(), 9);
    assert_eq!(trie.generation(), generation + 2);
    assert_eq!(trie.prefixes("inn", None).unwrap(), vec!["i"]);

    assert!(matches!(trie.delete("inn"), Err(TrieError::NotFound(_))));
    assert_eq!(trie.len(), 6);
}

#[test]
fn test_value_handles_outlive_deletion() {
    let mut trie = Trie::new();
    let shared = Arc::new(String::from("payload"));
    trie.add_shared("key", shared.clone()).unwrap();
    trie.add_shared("other", shared.clone()).unwrap();

    let held = trie.search("key").unwrap();
    trie.delete("key").unwrap();
    trie.clear();

    assert_eq!(held.as_str(), "payload");
    assert_eq!(Arc::strong_count(&shared), 2);
}

#[test]
fn test_cursor_goes_stale_on_structural_change() {
    let mut trie = sample();
    let mut prefixes = trie.iter_prefixes("inn", None).unwrap();
    let mut suffixes = trie.iter_suffixes("te", Some(2)).unwrap();

    assert_eq!(prefixes.next_key(&trie).unwrap().as_deref(), Some("i"));
    let keys: Vec<String> = suffixes.iter(&trie).unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(keys, vec!["tea", "ted"]);

    // A value-only update leaves cursors usable
    trie.add("tea", 100).unwrap();
    assert_eq!(prefixes.next_key(&trie).unwrap().as_deref(), Some("in"));

    // An unrelated branch still invalidates them
    trie.add("zebra", 0).unwrap();
    assert!(matches!(
        prefixes.next_key(&trie),
        Err(TrieError::StaleIterator { .. })
    ));
    assert!(matches!(
        suffixes.restart(&trie),
        Err(TrieError::StaleIterator { .. })
    ));

    // A fresh cursor sees the new state
    let mut cursor = trie.cursor();
    assert_eq!(cursor.iter(&trie).unwrap().count(), 9);
}

#[test]
fn test_cursor_rejects_other_trie() {
    let first = sample();
    let second = sample();
    let mut cursor = first.iter_suffixes("", None).unwrap();
    assert_eq!(cursor.next_key(&second), Err(TrieError::ForeignCursor));
    assert_eq!(cursor.next_key(&first).unwrap().as_deref(), Some("A"));
}

#[test]
fn test_corrections_examples() {
    let trie = sample();

    let mut one: Vec<String> = trie.corrections("i", Some(1)).unwrap().into_iter().collect();
    one.sort();
    assert_eq!(one, vec!["A", "i", "in"]);

    let mut two: Vec<String> = trie.corrections("i", Some(2)).unwrap().into_iter().collect();
    two.sort();
    assert_eq!(two, vec!["A", "i", "in", "inn", "to"]);

    assert_eq!(trie.corrections("", None).unwrap().len(), 8);
}

#[test]
fn test_key_length_limit() {
    let mut trie: Trie<()> = Trie::with_config(TrieConfig::new().with_max_key_length(4));
    trie.add("four", ()).unwrap();
    assert_eq!(
        trie.add("fives", ()),
        Err(TrieError::KeyTooLong {
            length: 5,
            max_length: 4
        })
    );
    assert_eq!(trie.len(), 1);
    assert_eq!(trie.node_count(), 5);
}

#[test]
fn test_settings_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("triez.toml");
    std::fs::write(&path, "[trie]\nmax_key_length = 3\n").unwrap();

    let config = ConfigLoader::new(Some(&path), "TRIE_TEST").load().unwrap();
    assert!(config.validate().is_ok());

    let mut trie: Trie<u8> = Trie::with_config(config.trie.to_trie_config());
    assert!(trie.add("abc", 1).is_ok());
    assert!(matches!(
        trie.add("abcd", 2),
        Err(TrieError::KeyTooLong { .. })
    ));
}

#[test]
fn test_stats_serialize() {
    let trie = sample();
    let stats = trie.stats();
    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["len"], 8);
    assert_eq!(json["node_count"], 11);
    assert!(stats.mem_usage >= std::mem::size_of::<Trie<usize>>());
}
