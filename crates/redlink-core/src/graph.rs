//! Annotation graphs
//!
//! An [`AnnotationGraph`] is an unordered set of RDF statements. Inserting a
//! statement that is already present has no effect.

use oxrdf::{Graph, NamedNodeRef, TermRef, Triple, TripleRef};
use std::fmt;

/// Set of subject-predicate-object statements
#[derive(Clone)]
pub struct AnnotationGraph {
    graph: Graph,
}

impl Default for AnnotationGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AnnotationGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationGraph")
            .field("statements", &self.len())
            .finish()
    }
}

impl fmt::Display for AnnotationGraph {
    /// N-Triples rendering, one statement per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for triple in self.iter() {
            writeln!(f, "{} .", triple)?;
        }
        Ok(())
    }
}

// Set equality: same size and every statement of one is in the other.
impl PartialEq for AnnotationGraph {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|t| other.contains(t))
    }
}

impl Eq for AnnotationGraph {}

impl AnnotationGraph {
    /// Empty graph
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
        }
    }

    /// Add a statement; returns `false` if it was already present
    pub fn insert<'a>(&mut self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.graph.insert(triple)
    }

    /// Whether the statement is present
    pub fn contains<'a>(&self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.graph.contains(triple)
    }

    /// Number of statements
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// Whether the graph holds no statements
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Iterate all statements
    pub fn iter(&self) -> impl Iterator<Item = TripleRef<'_>> {
        self.graph.iter()
    }

    /// Objects of every statement using `predicate`
    pub fn objects_for_predicate(&self, predicate: NamedNodeRef<'_>) -> Vec<TermRef<'_>> {
        self.graph
            .iter()
            .filter(|t| t.predicate.as_str() == predicate.as_str())
            .map(|t| t.object)
            .collect()
    }
}

impl From<Graph> for AnnotationGraph {
    fn from(graph: Graph) -> Self {
        Self { graph }
    }
}

impl FromIterator<Triple> for AnnotationGraph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl Extend<Triple> for AnnotationGraph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.graph.insert(&triple);
        }
    }
}
