//! A builder for word graphs.
//!
//! [`Dawg`] builds a minimal automaton from a sorted list of words, one
//! word at a time. Its [`Dump`] is what the renderer consumes, so a word
//! list can go straight to a dot file:
//!
//! ```
//! use dawg_dot::builder::{dump_to_dot, Dawg};
//!
//! let mut dawg = Dawg::new();
//! dawg.add("tap").unwrap();
//! dawg.add("taps").unwrap();
//! dawg.add("top").unwrap();
//! dawg.add("tops").unwrap();
//! dawg.close();
//!
//! let mut out = String::new();
//! dump_to_dot(&dawg, &mut out).unwrap();
//! assert!(out.starts_with("digraph DAWG {\n"));
//! ```
//!
//! This builder uses an allocator and is not thread-safe.

use super::{EdgeDescriptor, NodeDescriptor, RenderError, Renderer};

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use core::{fmt, mem};

/// The index of a state in a [`Dawg`].
pub type NodeId = usize;

/// The index of the start state.
const ROOT: NodeId = 0;

/// A directed acyclic word graph.
#[derive(Debug, Clone)]
pub struct Dawg {
    /// The states of the graph. Once closed, these are exactly the
    /// reachable states, numbered in depth-first preorder.
    nodes: Vec<Node>,

    /// Slots of states dropped during minimization, ready for reuse.
    free: Vec<NodeId>,

    /// States that are known to be unique, keyed by their contents.
    registry: BTreeMap<Node, NodeId>,

    /// The path of the previous word that has not been minimized yet, as
    /// `(parent, label, child)` triples.
    unchecked: Vec<(NodeId, u8, NodeId)>,

    /// The previously added word.
    previous: Vec<u8>,

    /// The number of distinct words.
    count: usize,

    /// The length of the longest word.
    longest_word: usize,

    /// The current state of the graph.
    state: DawgState,
}

/// A state in the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
struct Node {
    /// Whether a word ends here.
    eow: bool,

    /// The outgoing edges, sorted by label.
    children: Vec<(u8, NodeId)>,

    /// The number of words accepted from this state. Only valid once the
    /// graph is closed.
    number: usize,
}

/// The lifecycle of a [`Dawg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DawgState {
    /// No words have been added.
    Empty,

    /// Words are being added.
    Active,

    /// The graph is minimal and no more words can be added.
    Closed,
}

/// Counts describing the reachable part of a [`Dawg`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DawgStats {
    /// The number of states.
    pub nodes: usize,

    /// The number of edges.
    pub edges: usize,

    /// The number of words.
    pub words: usize,

    /// The length of the longest word.
    pub longest_word: usize,

    /// The size of one state in bytes, not counting its edges.
    pub node_size: usize,

    /// The approximate heap size of the reachable states and edges in
    /// bytes.
    pub graph_size: usize,
}

impl Default for Dawg {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    fn child(&self, label: u8) -> Option<NodeId> {
        self.children
            .binary_search_by(|(l, _)| l.cmp(&label))
            .ok()
            .map(|i| self.children[i].1)
    }
}

impl Dawg {
    /// Create a new, empty graph.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            free: Vec::new(),
            registry: BTreeMap::new(),
            unchecked: Vec::new(),
            previous: Vec::new(),
            count: 0,
            longest_word: 0,
            state: DawgState::Empty,
        }
    }

    /// Add a word to the graph.
    ///
    /// Words must be added in lexicographic byte order. Returns `false` if
    /// the word is the same as the previous one.
    pub fn add(&mut self, word: impl AsRef<[u8]>) -> Result<bool, AddError> {
        let word = word.as_ref();

        if self.state == DawgState::Closed {
            return Err(AddError::Closed(word.to_vec()));
        }

        if word.is_empty() {
            return Err(AddError::Empty);
        }

        if word < &self.previous[..] {
            return Err(AddError::Unsorted(word.to_vec()));
        }

        if word == &self.previous[..] {
            return Ok(false);
        }

        // Everything below the shared prefix can no longer change.
        let common = prefix_len(word, &self.previous);
        self.minimize(common);

        // Hang the rest of the word off the end of the shared prefix.
        let mut node = self.unchecked.last().map_or(ROOT, |&(_, _, child)| child);
        for &label in &word[common..] {
            let next = self.alloc_node();
            self.nodes[node].children.push((label, next));
            self.unchecked.push((node, label, next));
            node = next;
        }
        self.nodes[node].eow = true;

        log::trace!("added word of {} bytes, {} shared", word.len(), common);

        self.previous.clear();
        self.previous.extend_from_slice(word);
        self.count += 1;
        self.longest_word = self.longest_word.max(word.len());
        self.state = DawgState::Active;

        Ok(true)
    }

    /// Minimize the remaining states and stop accepting new words.
    ///
    /// Closing an already closed graph does nothing.
    pub fn close(&mut self) {
        if self.state == DawgState::Closed {
            return;
        }

        self.minimize(0);
        self.compact();
        self.numerate();
        self.state = DawgState::Closed;

        log::debug!(
            "closed graph with {} words in {} states",
            self.count,
            self.nodes.len()
        );
    }

    /// Remove every word from the graph.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Get the current state of the graph.
    pub fn state(&self) -> DawgState {
        self.state
    }

    /// Get the number of words in the graph.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Tell if the graph contains no words.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the length of the longest word.
    pub fn longest_word(&self) -> usize {
        self.longest_word
    }

    /// Follow `word` from the start state as far as possible.
    ///
    /// Returns the number of bytes consumed and the state reached.
    pub fn find(&self, word: impl AsRef<[u8]>) -> (usize, NodeId) {
        let mut node = ROOT;

        for (i, &label) in word.as_ref().iter().enumerate() {
            match self.nodes[node].child(label) {
                Some(next) => node = next,
                None => return (i, node),
            }
        }

        (word.as_ref().len(), node)
    }

    /// Tell if the word was added to the graph.
    pub fn exists(&self, word: impl AsRef<[u8]>) -> bool {
        let word = word.as_ref();
        let (len, node) = self.find(word);
        len == word.len() && self.nodes[node].eow
    }

    /// Get the length of the longest prefix of `word` that is a path in
    /// the graph.
    pub fn longest_prefix(&self, word: impl AsRef<[u8]>) -> usize {
        self.find(word).0
    }

    /// Get every word in the graph, in lexicographic order.
    pub fn words(&self) -> Vec<Vec<u8>> {
        let mut words = Vec::with_capacity(self.count);
        let mut word = Vec::with_capacity(self.longest_word);
        self.collect_words(ROOT, &mut word, &mut words);
        words
    }

    fn collect_words(&self, node: NodeId, word: &mut Vec<u8>, words: &mut Vec<Vec<u8>>) {
        if self.nodes[node].eow {
            words.push(word.clone());
        }

        for &(label, child) in &self.nodes[node].children {
            word.push(label);
            self.collect_words(child, word, words);
            word.pop();
        }
    }

    /// Count the states and edges reachable from the start state.
    pub fn stats(&self) -> DawgStats {
        let mut stats = DawgStats {
            words: self.count,
            longest_word: self.longest_word,
            node_size: mem::size_of::<Node>(),
            ..DawgStats::default()
        };

        for node in self.preorder() {
            stats.nodes += 1;
            stats.edges += self.nodes[node].children.len();
        }

        stats.graph_size =
            stats.nodes * stats.node_size + stats.edges * mem::size_of::<(u8, NodeId)>();

        stats
    }

    /// Get the 1-based rank of `word` among all words in the graph.
    ///
    /// Returns `None` if the word is absent or the graph is not closed.
    pub fn word_index(&self, word: impl AsRef<[u8]>) -> Option<usize> {
        if self.state != DawgState::Closed {
            return None;
        }

        let mut index = 0;
        let mut node = &self.nodes[ROOT];

        for &label in word.as_ref() {
            let next = node.child(label)?;

            // Skip over every word that branches off before this label.
            index += node
                .children
                .iter()
                .take_while(|(l, _)| *l < label)
                .map(|&(_, child)| self.nodes[child].number)
                .sum::<usize>();

            node = &self.nodes[next];
            if node.eow {
                index += 1;
            }
        }

        if node.eow {
            Some(index)
        } else {
            None
        }
    }

    /// Get the word with the given 1-based rank.
    ///
    /// Returns `None` if the index is out of range or the graph is not
    /// closed.
    pub fn index_word(&self, index: usize) -> Option<Vec<u8>> {
        if self.state != DawgState::Closed || index < 1 || index > self.count {
            return None;
        }

        let mut word = Vec::with_capacity(self.longest_word);
        let mut node = &self.nodes[ROOT];
        let mut count = index;

        while count > 0 {
            let mut descended = false;

            for &(label, child) in &node.children {
                let number = self.nodes[child].number;
                if number < count {
                    count -= number;
                } else {
                    word.push(label);
                    node = &self.nodes[child];
                    if node.eow {
                        count -= 1;
                    }
                    descended = true;
                    break;
                }
            }

            if !descended {
                return None;
            }
        }

        Some(word)
    }

    /// Replace or register every unchecked state deeper than `depth`.
    fn minimize(&mut self, depth: usize) {
        while self.unchecked.len() > depth {
            let (parent, label, child) = match self.unchecked.pop() {
                Some(edge) => edge,
                None => break,
            };

            let existing = self.registry.get(&self.nodes[child]).copied();
            match existing {
                Some(existing) => {
                    // The child is new, so it is always the parent's last edge.
                    if let Some(edge) = self.nodes[parent].children.last_mut() {
                        debug_assert_eq!(edge.0, label);
                        edge.1 = existing;
                    }

                    // Nothing else points at the replaced state.
                    self.nodes[child] = Node::default();
                    self.free.push(child);
                }
                None => {
                    let key = self.nodes[child].clone();
                    self.registry.insert(key, child);
                }
            }
        }
    }

    /// Get an empty state, reusing a dropped slot if there is one.
    fn alloc_node(&mut self) -> NodeId {
        match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.nodes.push(Node::default());
                self.nodes.len() - 1
            }
        }
    }

    /// Drop unreachable slots and renumber the states in preorder.
    ///
    /// The registry is only needed while words are added, so it goes too.
    fn compact(&mut self) {
        let order = self.preorder();

        let mut remap = vec![usize::MAX; self.nodes.len()];
        for (new, &old) in order.iter().enumerate() {
            remap[old] = new;
        }

        let mut nodes = Vec::with_capacity(order.len());
        for &old in &order {
            let mut node = mem::take(&mut self.nodes[old]);
            for edge in &mut node.children {
                edge.1 = remap[edge.1];
            }
            nodes.push(node);
        }

        self.nodes = nodes;
        self.free = Vec::new();
        self.registry = BTreeMap::new();
    }

    /// Compute the number of words accepted from every reachable state.
    fn numerate(&mut self) {
        for node in self.postorder() {
            let number = self.nodes[node]
                .children
                .iter()
                .map(|&(_, child)| self.nodes[child].number)
                .sum::<usize>()
                + usize::from(self.nodes[node].eow);
            self.nodes[node].number = number;
        }
    }

    /// The reachable states, each once, with every state after all of its
    /// children.
    fn postorder(&self) -> Vec<NodeId> {
        let mut visited = vec![false; self.nodes.len()];
        let mut order = Vec::new();

        // Each entry is a state and the index of its next child to visit.
        let mut stack = vec![(ROOT, 0)];
        visited[ROOT] = true;

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            match self.nodes[node].children.get(next) {
                Some(&(_, child)) => {
                    top.1 += 1;
                    if !visited[child] {
                        visited[child] = true;
                        stack.push((child, 0));
                    }
                }
                None => {
                    order.push(node);
                    stack.pop();
                }
            }
        }

        order
    }

    /// The reachable states, each once, in depth-first preorder with
    /// children taken in label order.
    fn preorder(&self) -> Vec<NodeId> {
        let mut visited = vec![false; self.nodes.len()];
        let mut order = Vec::new();
        let mut stack = vec![ROOT];

        while let Some(node) = stack.pop() {
            if visited[node] {
                continue;
            }
            visited[node] = true;
            order.push(node);

            stack.extend(
                self.nodes[node]
                    .children
                    .iter()
                    .rev()
                    .map(|&(_, child)| child)
                    .filter(|&child| !visited[child]),
            );
        }

        order
    }
}

/// A word graph that can list its nodes and edges.
pub trait Dump {
    /// Get the nodes and edges of the graph.
    fn dump(&self) -> (Vec<NodeDescriptor>, Vec<EdgeDescriptor>);
}

impl Dump for Dawg {
    fn dump(&self) -> (Vec<NodeDescriptor>, Vec<EdgeDescriptor>) {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        for id in self.preorder() {
            let node = &self.nodes[id];
            nodes.push(NodeDescriptor::new(id, node.eow));
            edges.extend(
                node.children
                    .iter()
                    .map(|&(label, child)| EdgeDescriptor::new(id, label, child)),
            );
        }

        log::debug!("dumped {} nodes and {} edges", nodes.len(), edges.len());

        (nodes, edges)
    }
}

/// Dump a graph and write it into a text sink with the default settings.
pub fn dump_to_dot<D: Dump + ?Sized, W: fmt::Write + ?Sized>(
    graph: &D,
    out: &mut W,
) -> Result<(), RenderError> {
    let (nodes, edges) = graph.dump();
    Renderer::new().render(&nodes, &edges, out)
}

/// Dump a graph and write it into a byte sink with the default settings.
#[cfg(feature = "std")]
pub fn dump_to_dot_io<D: Dump + ?Sized, W: std::io::Write + ?Sized>(
    graph: &D,
    out: &mut W,
) -> std::io::Result<()> {
    let (nodes, edges) = graph.dump();
    Renderer::new().render_io(&nodes, &edges, out)
}

/// An error that occurs when adding a word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AddError {
    /// The word is empty.
    Empty,

    /// The word sorts before the previous word.
    Unsorted(Vec<u8>),

    /// The graph is closed.
    Closed(Vec<u8>),
}

impl fmt::Display for AddError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddError::Empty => f.write_str("Cannot add an empty word to the graph"),
            AddError::Unsorted(word) => write!(
                f,
                "Cannot add a word out of order: {}",
                Bytes(word)
            ),
            AddError::Closed(word) => write!(
                f,
                "Cannot add a word to a closed graph: {}",
                Bytes(word)
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AddError {}

/// Get the length of the shared prefix of two words.
fn prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(a, b)| a == b).count()
}

struct Bytes<'a>(&'a [u8]);

impl fmt::Display for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.0 {
            fmt::Display::fmt(&core::ascii::escape_default(byte), f)?;
        }

        Ok(())
    }
}
