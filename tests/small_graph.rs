#![cfg(feature = "builder")]

use dawg_dot::builder::{dump_to_dot, AddError, Dawg, DawgState, Dump};
use dawg_dot::{EdgeDescriptor, NodeDescriptor};
use pretty_assertions::assert_eq;

const COLORS: &[&str] = &["beige", "black", "blue", "gray", "green", "red"];

fn build(words: &[&str]) -> Dawg {
    let mut dawg = Dawg::new();
    for word in words {
        assert!(dawg.add(word).unwrap());
    }
    dawg.close();
    dawg
}

#[test]
fn smoke() {
    let dawg = build(COLORS);

    assert_eq!(dawg.state(), DawgState::Closed);
    assert_eq!(dawg.len(), 6);
    assert_eq!(dawg.longest_word(), 5);

    for color in COLORS {
        assert!(dawg.exists(color), "{}", color);
    }

    assert!(!dawg.exists("reddish"));
    assert!(!dawg.exists("re"));
    assert!(!dawg.exists(""));
    assert!(!dawg.exists("indigo"));

    let words: Vec<Vec<u8>> = COLORS.iter().map(|c| c.as_bytes().to_vec()).collect();
    assert_eq!(dawg.words(), words);
}

#[test]
fn shared_suffixes() {
    let dawg = build(&["tap", "taps", "top", "tops"]);

    let stats = dawg.stats();
    assert_eq!(
        (stats.nodes, stats.edges, stats.words, stats.longest_word),
        (5, 5, 4, 4)
    );
    assert_eq!(
        stats.graph_size,
        5 * stats.node_size + 5 * core::mem::size_of::<(u8, usize)>()
    );

    let mut out = String::new();
    dump_to_dot(&dawg, &mut out).unwrap();

    assert_eq!(
        out,
        "digraph DAWG {\n\
         node0 [shape=circle, label=\"\"]\n\
         node1 [shape=circle, label=\"\"]\n\
         node2 [shape=circle, label=\"\"]\n\
         node3 [shape=doublecircle, label=\"\"]\n\
         node4 [shape=doublecircle, label=\"\"]\n\
         node0 -> node1 [label=\"t\"]\n\
         node1 -> node2 [label=\"a\"]\n\
         node1 -> node2 [label=\"o\"]\n\
         node2 -> node3 [label=\"p\"]\n\
         node3 -> node4 [label=\"s\"]\n\
         }\n"
    );
}

#[test]
fn dump() {
    let dawg = build(&["ab", "b"]);
    let (nodes, edges) = dawg.dump();

    assert_eq!(
        nodes,
        vec![
            NodeDescriptor::new(0, false),
            NodeDescriptor::new(1, false),
            NodeDescriptor::new(2, true),
        ]
    );
    assert_eq!(
        edges,
        vec![
            EdgeDescriptor::new(0, b'a', 1),
            EdgeDescriptor::new(0, b'b', 2),
            EdgeDescriptor::new(1, b'b', 2),
        ]
    );
}

#[test]
fn empty_graph() {
    let mut dawg = Dawg::new();
    assert_eq!(dawg.state(), DawgState::Empty);
    assert!(dawg.is_empty());

    let mut out = String::new();
    dump_to_dot(&dawg, &mut out).unwrap();
    assert_eq!(out, "digraph DAWG {\nnode0 [shape=circle, label=\"\"]\n}\n");

    dawg.close();
    assert_eq!(dawg.state(), DawgState::Closed);
    assert_eq!(dawg.stats().nodes, 1);
}

#[test]
fn add_errors() {
    let mut dawg = Dawg::new();

    assert_eq!(dawg.add(""), Err(AddError::Empty));
    assert_eq!(dawg.add("cat"), Ok(true));
    assert_eq!(dawg.state(), DawgState::Active);
    assert_eq!(dawg.add("cat"), Ok(false));
    assert_eq!(dawg.add("bat"), Err(AddError::Unsorted(b"bat".to_vec())));
    assert_eq!(dawg.add("ca"), Err(AddError::Unsorted(b"ca".to_vec())));
    assert_eq!(dawg.add("cats"), Ok(true));
    assert_eq!(dawg.len(), 2);

    dawg.close();
    dawg.close();
    assert_eq!(dawg.add("dog"), Err(AddError::Closed(b"dog".to_vec())));
    assert_eq!(
        AddError::Unsorted(b"b\xffat".to_vec()).to_string(),
        "Cannot add a word out of order: b\\xffat"
    );

    dawg.clear();
    assert_eq!(dawg.state(), DawgState::Empty);
    assert!(dawg.is_empty());
    assert_eq!(dawg.add("bat"), Ok(true));
}

#[test]
fn prefixes() {
    let dawg = build(&["car", "card", "care", "cat"]);

    assert_eq!(dawg.find("cards").0, 4);
    assert_eq!(dawg.find("cow").0, 1);
    assert_eq!(dawg.find("").0, 0);

    assert_eq!(dawg.longest_prefix("careful"), 4);
    assert_eq!(dawg.longest_prefix("ca"), 2);
    assert_eq!(dawg.longest_prefix("dog"), 0);

    assert!(dawg.exists("car"));
    assert!(!dawg.exists("ca"));
}

#[test]
fn perfect_hashing() {
    let mut dawg = Dawg::new();
    for word in COLORS {
        dawg.add(word).unwrap();
    }

    // Ranks are only known once the graph is closed.
    assert_eq!(dawg.word_index("red"), None);
    assert_eq!(dawg.index_word(1), None);

    dawg.close();

    for (i, color) in COLORS.iter().enumerate() {
        assert_eq!(dawg.word_index(color), Some(i + 1));
        assert_eq!(dawg.index_word(i + 1), Some(color.as_bytes().to_vec()));
    }

    assert_eq!(dawg.word_index("bl"), None);
    assert_eq!(dawg.word_index("purple"), None);
    assert_eq!(dawg.index_word(0), None);
    assert_eq!(dawg.index_word(7), None);
}

#[test]
fn unminimized_dump() {
    // Before closing, the pending path is still a plain trie branch.
    let mut dawg = Dawg::new();
    dawg.add("ab").unwrap();
    dawg.add("b").unwrap();

    let (nodes, edges) = dawg.dump();
    assert_eq!(nodes.len(), 4);
    assert_eq!(edges.len(), 3);
    assert_eq!(nodes.iter().filter(|n| n.terminal).count(), 2);
}

#[test]
fn shared_interior_state() {
    // "c" is reached from "a" first and later from "bb", which shares the
    // state below "a".
    let dawg = build(&["ac", "bbc"]);

    let (nodes, edges) = dawg.dump();
    assert_eq!(
        nodes,
        vec![
            NodeDescriptor::new(0, false),
            NodeDescriptor::new(1, false),
            NodeDescriptor::new(2, true),
            NodeDescriptor::new(3, false),
        ]
    );
    assert_eq!(
        edges,
        vec![
            EdgeDescriptor::new(0, b'a', 1),
            EdgeDescriptor::new(0, b'b', 3),
            EdgeDescriptor::new(1, b'c', 2),
            EdgeDescriptor::new(3, b'b', 1),
        ]
    );

    assert_eq!(dawg.word_index("ac"), Some(1));
    assert_eq!(dawg.word_index("bbc"), Some(2));
    assert_eq!(dawg.index_word(1), Some(b"ac".to_vec()));
    assert_eq!(dawg.index_word(2), Some(b"bbc".to_vec()));
}

#[test]
fn replaced_states_are_reused() {
    let mut dawg = Dawg::new();
    for i in 0..20_000 {
        assert!(dawg.add(format!("{:08}x", i)).unwrap());
    }

    // Before closing, ids are arena slots, so they stay close to the size
    // of the minimized graph plus the pending word.
    let (nodes, _) = dawg.dump();
    let highest = nodes.iter().map(|n| n.id).max().unwrap();
    assert!(highest < 100, "highest slot {}", highest);

    dawg.close();

    // Once closed, ids are dense.
    let (nodes, edges) = dawg.dump();
    let ids: Vec<usize> = nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids, (0..nodes.len()).collect::<Vec<_>>());
    assert!(edges.iter().all(|e| e.destination < nodes.len()));
    assert_eq!(dawg.stats().nodes, nodes.len());

    assert_eq!(dawg.word_index("00012345x"), Some(12_346));
    assert_eq!(dawg.index_word(20_000), Some(b"00019999x".to_vec()));
}
