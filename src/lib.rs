//! Render directed acyclic word graphs as GraphViz dot files.
//!
//! A DAWG (directed acyclic word graph) is a minimal automaton that
//! accepts a set of words. `dawg-dot` takes a dump of such a graph, a
//! list of nodes and a list of labeled edges, and writes it out in the
//! [DOT] language so it can be laid out by GraphViz and friends.
//!
//! [DOT]: https://graphviz.org/doc/info/lang.html
//!
//! The renderer is `no_std`, `forbid(unsafe_code)` and writes into any
//! [`core::fmt::Write`] sink. With the `std` feature, [`render_io`] writes
//! into a [`std::io::Write`] instead.
//!
//! ```
//! use dawg_dot::{render, EdgeDescriptor, NodeDescriptor};
//!
//! let nodes = [NodeDescriptor::new(0, false), NodeDescriptor::new(1, true)];
//! let edges = [EdgeDescriptor::new(0, b'a', 1)];
//!
//! let mut out = String::new();
//! render(&nodes, &edges, &mut out).unwrap();
//!
//! assert_eq!(
//!     out,
//!     "digraph DAWG {\n\
//!      node0 [shape=circle, label=\"\"]\n\
//!      node1 [shape=doublecircle, label=\"\"]\n\
//!      node0 -> node1 [label=\"a\"]\n\
//!      }\n"
//! );
//! ```
//!
//! To build a graph from a word list in the first place, see the
//! [`builder`] module.
//!
//! ## Output
//!
//! Node lines come first, then edge lines, each in input order. Nothing
//! is sorted, deduplicated or validated beyond the edge labels, which
//! must be printable ASCII. By default labels are written verbatim, so a
//! `"` or `\` label produces a file GraphViz will reject; use
//! [`Renderer::escape_labels`] to escape them.

#![no_std]
#![forbid(
    unsafe_code,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    future_incompatible,
    rust_2018_idioms
)]

#[cfg(feature = "builder")]
pub mod builder;

#[cfg(all(feature = "builder", not(dawg_dot_no_alloc)))]
extern crate alloc;
#[cfg(all(feature = "builder", dawg_dot_no_alloc))]
extern crate std as alloc;

#[cfg(feature = "std")]
extern crate std;

use core::fmt::{self, Write};

/// A node in a dumped graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeDescriptor {
    /// The identifier of this node, unique within one dump.
    pub id: usize,

    /// Whether a word ends at this node.
    pub terminal: bool,
}

/// A labeled edge in a dumped graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeDescriptor {
    /// The identifier of the node this edge leaves.
    pub source: usize,

    /// The byte consumed by following this edge.
    pub label: u8,

    /// The identifier of the node this edge enters.
    pub destination: usize,
}

impl NodeDescriptor {
    /// Create a new node descriptor.
    pub const fn new(id: usize, terminal: bool) -> Self {
        Self { id, terminal }
    }
}

impl EdgeDescriptor {
    /// Create a new edge descriptor.
    pub const fn new(source: usize, label: u8, destination: usize) -> Self {
        Self {
            source,
            label,
            destination,
        }
    }
}

impl From<(usize, bool)> for NodeDescriptor {
    fn from((id, terminal): (usize, bool)) -> Self {
        Self::new(id, terminal)
    }
}

impl From<(usize, u8, usize)> for EdgeDescriptor {
    fn from((source, label, destination): (usize, u8, usize)) -> Self {
        Self::new(source, label, destination)
    }
}

/// Settings for writing a graph.
///
/// The default settings reproduce the classic `dump2dot` output exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Renderer<'a> {
    /// The identifier of the digraph.
    name: &'a str,

    /// The string prepended to every node identifier.
    prefix: &'a str,

    /// Whether to escape `"` and `\` in edge labels.
    escape: bool,
}

impl Default for Renderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Renderer<'a> {
    /// Create a renderer with the default settings.
    pub const fn new() -> Self {
        Self {
            name: "DAWG",
            prefix: "node",
            escape: false,
        }
    }

    /// Set the identifier of the digraph.
    pub const fn name(mut self, name: &'a str) -> Self {
        self.name = name;
        self
    }

    /// Set the prefix used for node identifiers.
    pub const fn prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = prefix;
        self
    }

    /// Escape quotes and backslashes in edge labels.
    ///
    /// This is off by default, which keeps the output identical to older
    /// tools at the cost of emitting broken dot files for those labels.
    pub const fn escape_labels(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    /// Write a graph into a text sink.
    ///
    /// On error, everything written before the failing line stays in the
    /// sink.
    pub fn render<W: Write + ?Sized>(
        &self,
        nodes: &[NodeDescriptor],
        edges: &[EdgeDescriptor],
        out: &mut W,
    ) -> Result<(), RenderError> {
        log::debug!(
            "rendering digraph {} with {} nodes and {} edges",
            self.name,
            nodes.len(),
            edges.len()
        );

        writeln!(out, "digraph {} {{", self.name)?;

        // Write out each node.
        for node in nodes {
            let shape = if node.terminal {
                "doublecircle"
            } else {
                "circle"
            };

            writeln!(
                out,
                "{} [shape={}, label=\"\"]",
                NodeName(self.prefix, node.id),
                shape
            )?;
        }

        // Write out each connection.
        for (index, edge) in edges.iter().enumerate() {
            if !is_printable(edge.label) {
                log::trace!("edge {} has unprintable label {:#04x}", index, edge.label);
                return Err(RenderError::Label {
                    index,
                    byte: edge.label,
                });
            }

            writeln!(
                out,
                "{} -> {} [label=\"{}\"]",
                NodeName(self.prefix, edge.source),
                NodeName(self.prefix, edge.destination),
                Label {
                    byte: edge.label,
                    escape: self.escape,
                },
            )?;
        }

        writeln!(out, "}}")?;

        Ok(())
    }

    /// Write a graph into a byte sink.
    ///
    /// Errors from the sink are returned unchanged. An invalid label is
    /// reported as [`std::io::ErrorKind::InvalidData`] wrapping a
    /// [`RenderError`].
    #[cfg(feature = "std")]
    pub fn render_io<W: std::io::Write + ?Sized>(
        &self,
        nodes: &[NodeDescriptor],
        edges: &[EdgeDescriptor],
        out: &mut W,
    ) -> std::io::Result<()> {
        let mut adapter = IoAdapter {
            inner: out,
            error: None,
        };

        match self.render(nodes, edges, &mut adapter) {
            Ok(()) => Ok(()),
            Err(RenderError::Write) => Err(adapter.error.take().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, RenderError::Write)
            })),
            Err(err) => Err(std::io::Error::new(std::io::ErrorKind::InvalidData, err)),
        }
    }
}

/// Write a graph into a text sink using the default settings.
///
/// See [`Renderer::render`].
pub fn render<W: Write + ?Sized>(
    nodes: &[NodeDescriptor],
    edges: &[EdgeDescriptor],
    out: &mut W,
) -> Result<(), RenderError> {
    Renderer::new().render(nodes, edges, out)
}

/// Write a graph into a byte sink using the default settings.
///
/// See [`Renderer::render_io`].
#[cfg(feature = "std")]
pub fn render_io<W: std::io::Write + ?Sized>(
    nodes: &[NodeDescriptor],
    edges: &[EdgeDescriptor],
    out: &mut W,
) -> std::io::Result<()> {
    Renderer::new().render_io(nodes, edges, out)
}

/// An error that occurs while rendering a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderError {
    /// An edge label is not a printable ASCII character.
    Label {
        /// The position of the edge in the input.
        index: usize,

        /// The offending label.
        byte: u8,
    },

    /// The sink refused a write.
    Write,
}

impl From<fmt::Error> for RenderError {
    fn from(_: fmt::Error) -> Self {
        RenderError::Write
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Label { index, byte } => write!(
                f,
                "Edge {} has a label that is not printable ASCII: {:#04x}",
                index, byte
            ),
            RenderError::Write => f.write_str("Failed to write to the output"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RenderError {}

/// Tell if a label can be written as a single visible character.
fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

struct NodeName<'a>(&'a str, usize);

impl fmt::Display for NodeName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

struct Label {
    byte: u8,
    escape: bool,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.escape && (self.byte == b'"' || self.byte == b'\\') {
            f.write_char('\\')?;
        }

        f.write_char(char::from(self.byte))
    }
}

/// Forwards formatted text to an `io::Write`, keeping the real error.
#[cfg(feature = "std")]
struct IoAdapter<'a, W: ?Sized> {
    inner: &'a mut W,
    error: Option<std::io::Error>,
}

#[cfg(feature = "std")]
impl<W: std::io::Write + ?Sized> Write for IoAdapter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}
