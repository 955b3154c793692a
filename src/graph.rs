//! Weighted adjacency-list graph with shortest-path algorithms
//!
//! This module provides a directed or undirected graph over payload
//! values, plus the priority-driven traversals built on it: Dijkstra's
//! shortest path, A* search, and a Prim-style minimum spanning tree.
//!
//! # Design
//!
//! Vertices are identified by payload equality: creating a vertex for a
//! payload that is already registered hands back the existing vertex
//! rather than a duplicate. The graph keeps vertices in insertion order
//! (which fixes iteration and rendering order) while a hash index maps
//! each vertex to its slot for O(1) keying.
//!
//! Note: Dijkstra and A* are the same algorithm - A* just adds a
//! heuristic estimate to each frontier candidate's accumulated cost.
//! Dijkstra is A* with h(n) = 0. Both tolerate stale frontier entries
//! and discard them on dequeue (lazy deletion) instead of reordering
//! the queue on every improvement; with non-negative weights the first
//! dequeue of a vertex is its cheapest, so the predecessor record is
//! written at most once per vertex.
//!
//! # Example
//!
//! ```rust
//! use rust_classic_collections::graph::AdjacencyList;
//!
//! let mut graph = AdjacencyList::new(false);
//! let a = graph.create_vertex("A");
//! let b = graph.create_vertex("B");
//! let c = graph.create_vertex("C");
//! graph.add(&a, &b, 1.0);
//! graph.add(&b, &c, 2.0);
//!
//! let path = graph.dijkstra(&a, &c).unwrap();
//! assert_eq!(path, vec![("A", 0.0), ("B", 1.0), ("C", 3.0)]);
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::priority_queue::PriorityQueue;

/// Error type for graph traversals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// Dijkstra/A* was given a start or end vertex that is not
    /// registered in this graph.
    NoSuchVertex,
    /// The destination is unreachable from the start.
    NoPathExists,
    /// A minimum spanning tree was requested on a directed graph.
    DirectedGraph,
    /// A minimum spanning tree was requested on a graph with no
    /// vertices.
    EmptyGraph,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::NoSuchVertex => {
                write!(f, "start or end vertex is not registered in this graph")
            }
            GraphError::NoPathExists => {
                write!(f, "no path exists between the requested vertices")
            }
            GraphError::DirectedGraph => {
                write!(f, "cannot create a minimum spanning tree out of a directed graph")
            }
            GraphError::EmptyGraph => {
                write!(f, "cannot create a minimum spanning tree out of an empty graph")
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// A graph vertex wrapping a payload value.
///
/// Equality and hashing are the payload's: two vertices with equal
/// payloads are the same vertex, in any graph that registered the
/// payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vertex<T> {
    data: T,
}

impl<T> Vertex<T> {
    /// The wrapped payload.
    pub fn data(&self) -> &T {
        &self.data
    }
}

impl<T: fmt::Display> fmt::Display for Vertex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

/// A directed weighted edge. An undirected connection is stored as two
/// of these, one per direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<T> {
    pub source: Vertex<T>,
    pub destination: Vertex<T>,
    pub weight: f64,
}

impl<T> Edge<T> {
    // Frontier rule for Prim: lowest weight first, nothing else.
    fn lighter(a: &Self, b: &Self) -> bool {
        a.weight < b.weight
    }
}

impl<T: fmt::Display> fmt::Display for Edge<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -({})-> {}", self.source, self.weight, self.destination)
    }
}

// A frontier entry during Dijkstra/A*: a destination reachable at
// `weight` accumulated cost, with a heuristic `estimate` of the cost
// still remaining (zero for plain Dijkstra).
struct Candidate<T> {
    source: Vertex<T>,
    destination: Vertex<T>,
    weight: f64,
    estimate: f64,
}

impl<T> Candidate<T> {
    fn closer(a: &Self, b: &Self) -> bool {
        a.weight + a.estimate < b.weight + b.estimate
    }
}

/// A weighted graph stored as adjacency lists, directed or undirected.
///
/// The mode is fixed at construction: [`add`](AdjacencyList::add)
/// dispatches to directed or reciprocal insertion based on it and it
/// cannot be changed afterward.
#[derive(Debug)]
pub struct AdjacencyList<T> {
    directed: bool,
    index: FxHashMap<Vertex<T>, usize>,
    table: Vec<(Vertex<T>, Vec<Edge<T>>)>,
}

impl<T: Clone + Eq + Hash> AdjacencyList<T> {
    /// Creates an empty graph; `directed` fixes the edge-insertion mode
    /// for the lifetime of the graph.
    pub fn new(directed: bool) -> Self {
        AdjacencyList {
            directed,
            index: FxHashMap::default(),
            table: Vec::new(),
        }
    }

    /// Creates a graph pre-registered with the given vertex payloads.
    pub fn with_vertices<I>(items: I, directed: bool) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut graph = Self::new(directed);
        for item in items {
            graph.create_vertex(item);
        }
        graph
    }

    /// Whether edges are inserted one-way or reciprocally.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of registered vertices.
    pub fn vertex_count(&self) -> usize {
        self.table.len()
    }

    /// Registers a payload as a vertex and returns it.
    ///
    /// Idempotent: a payload that is already registered yields the
    /// existing vertex, never a duplicate slot.
    pub fn create_vertex(&mut self, data: T) -> Vertex<T> {
        let vertex = Vertex { data };
        self.slot_for(&vertex);
        vertex
    }

    /// Adds an edge of the given weight.
    ///
    /// Directed graphs get a single `source -> destination` edge;
    /// undirected graphs get both directions with the same weight, as
    /// one logical operation.
    pub fn add(&mut self, source: &Vertex<T>, destination: &Vertex<T>, weight: f64) {
        if self.directed {
            self.add_directed(source, destination, weight);
        } else {
            self.add_directed(source, destination, weight);
            self.add_directed(destination, source, weight);
        }
    }

    /// Weight of the edge `source -> destination`, if any.
    ///
    /// A linear scan of the source's outgoing edges, O(degree); `None`
    /// when the source is unregistered or no matching edge exists.
    pub fn weight(&self, source: &Vertex<T>, destination: &Vertex<T>) -> Option<f64> {
        self.edges(source)?
            .iter()
            .find(|edge| edge.destination == *destination)
            .map(|edge| edge.weight)
    }

    /// The outgoing edges of `source`, in insertion order; `None` when
    /// the vertex is unregistered.
    pub fn edges(&self, source: &Vertex<T>) -> Option<&[Edge<T>]> {
        self.index
            .get(source)
            .map(|&slot| self.table[slot].1.as_slice())
    }

    /// Registered vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<T>> {
        self.table.iter().map(|(vertex, _)| vertex)
    }

    /// The vertex at `position` in insertion order.
    pub fn vertex_at(&self, position: usize) -> Option<&Vertex<T>> {
        self.table.get(position).map(|(vertex, _)| vertex)
    }

    /// Looks a vertex up by its rendered label.
    pub fn find_vertex(&self, label: &str) -> Option<&Vertex<T>>
    where
        T: fmt::Display,
    {
        self.vertices().find(|vertex| vertex.to_string() == label)
    }

    /// Whether the payload of `vertex` is registered here.
    pub fn contains_vertex(&self, vertex: &Vertex<T>) -> bool {
        self.index.contains_key(vertex)
    }

    /// Shortest path from `start` to `end` by accumulated edge weight.
    ///
    /// Returns the path as `(payload, cost-so-far)` pairs, starting at
    /// `(start, 0)` and ending at `(end, total cost)`. Edge weights
    /// must be non-negative for the result to be minimal.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoSuchVertex`] when either endpoint is not
    /// registered; [`GraphError::NoPathExists`] when no edge sequence
    /// connects the endpoints.
    pub fn dijkstra(
        &self,
        start: &Vertex<T>,
        end: &Vertex<T>,
    ) -> Result<Vec<(T, f64)>, GraphError> {
        self.a_star(start, end, |_, _| 0.0)
    }

    /// A* search: Dijkstra guided by a heuristic estimate of the cost
    /// remaining from a candidate payload to the end payload.
    ///
    /// The heuristic must be admissible (never overestimate the true
    /// remaining cost) for the result to be minimal; this is not
    /// validated, and a non-admissible heuristic silently yields a
    /// suboptimal path.
    ///
    /// # Errors
    ///
    /// Same as [`dijkstra`](AdjacencyList::dijkstra).
    pub fn a_star<H>(
        &self,
        start: &Vertex<T>,
        end: &Vertex<T>,
        heuristic: H,
    ) -> Result<Vec<(T, f64)>, GraphError>
    where
        H: Fn(&T, &T) -> f64,
    {
        if !self.contains_vertex(start) || !self.contains_vertex(end) {
            return Err(GraphError::NoSuchVertex);
        }

        let record = self.visit_vertices(start, end, heuristic);
        self.build_path(&record, start, end)
    }

    /// Prim-style minimum spanning tree, grown from the first vertex in
    /// insertion order.
    ///
    /// The result is a new undirected graph whose edges are recorded
    /// destination -> source with their original weights.
    ///
    /// # Errors
    ///
    /// [`GraphError::DirectedGraph`] when this graph is directed;
    /// [`GraphError::EmptyGraph`] when it has no vertices.
    pub fn minimum_spanning_tree(&self) -> Result<AdjacencyList<T>, GraphError> {
        if self.directed {
            return Err(GraphError::DirectedGraph);
        }
        let (start, seed_edges) = self.table.first().ok_or(GraphError::EmptyGraph)?;

        let mut visited = FxHashSet::default();
        visited.insert(start.clone());

        let mut tree = AdjacencyList::new(false);
        let mut frontier =
            PriorityQueue::from_vec_with_priority(seed_edges.clone(), Edge::lighter);

        while let Some(edge) = frontier.dequeue() {
            // Lazy deletion: a stale entry whose destination was
            // claimed by a lighter edge in the meantime.
            if visited.contains(&edge.destination) {
                continue;
            }
            visited.insert(edge.destination.clone());

            tree.add(&edge.destination, &edge.source, edge.weight);
            for next in self.outgoing(&edge.destination) {
                frontier.enqueue(next.clone());
            }
        }

        Ok(tree)
    }

    fn slot_for(&mut self, vertex: &Vertex<T>) -> usize {
        if let Some(&slot) = self.index.get(vertex) {
            return slot;
        }
        let slot = self.table.len();
        self.index.insert(vertex.clone(), slot);
        self.table.push((vertex.clone(), Vec::new()));
        slot
    }

    fn add_directed(&mut self, source: &Vertex<T>, destination: &Vertex<T>, weight: f64) {
        let slot = self.slot_for(source);
        self.table[slot].1.push(Edge {
            source: source.clone(),
            destination: destination.clone(),
            weight,
        });
    }

    // Like `edges` but tolerant: an unregistered vertex simply has no
    // outgoing edges.
    fn outgoing(&self, vertex: &Vertex<T>) -> &[Edge<T>] {
        self.edges(vertex).unwrap_or(&[])
    }

    // The shared frontier expansion behind Dijkstra and A*.
    //
    // The queue is seeded with a zero-weight self-loop at `start` and
    // ordered by accumulated weight plus heuristic estimate. Each
    // dequeue settles its destination: the first time a vertex comes
    // off the queue its (predecessor, cost) pair is recorded and never
    // overwritten afterward; with non-negative weights that first
    // dequeue carries the minimal cost, so later (stale) entries are
    // discarded by the record check. The start vertex itself never
    // receives a record; reconstruction recognizes it by that absence.
    fn visit_vertices<H>(
        &self,
        start: &Vertex<T>,
        end: &Vertex<T>,
        heuristic: H,
    ) -> FxHashMap<Vertex<T>, (Vertex<T>, f64)>
    where
        H: Fn(&T, &T) -> f64,
    {
        let seed = Candidate {
            source: start.clone(),
            destination: start.clone(),
            weight: 0.0,
            estimate: 0.0,
        };
        let mut frontier =
            PriorityQueue::from_vec_with_priority(vec![seed], Candidate::closer);
        let mut visited: FxHashSet<Vertex<T>> = FxHashSet::default();
        let mut record: FxHashMap<Vertex<T>, (Vertex<T>, f64)> = FxHashMap::default();

        while let Some(candidate) = frontier.dequeue() {
            let Candidate {
                source,
                destination,
                weight,
                ..
            } = candidate;
            visited.insert(destination.clone());

            if destination != *start && !record.contains_key(&destination) {
                record.insert(destination.clone(), (source, weight));
            }

            if destination == *end {
                break;
            }

            for edge in self.outgoing(&destination) {
                if visited.contains(&edge.destination) {
                    continue;
                }
                frontier.enqueue(Candidate {
                    source: edge.source.clone(),
                    destination: edge.destination.clone(),
                    weight: edge.weight + weight,
                    estimate: heuristic(edge.destination.data(), end.data()),
                });
            }
        }

        record
    }

    // Walks the predecessor record backward from `end`, then reverses.
    //
    // Hitting an unrecorded vertex before collecting any step means the
    // destination was never reached; hitting one afterward means the
    // walk arrived back at the start, which is appended at cost 0.
    fn build_path(
        &self,
        record: &FxHashMap<Vertex<T>, (Vertex<T>, f64)>,
        start: &Vertex<T>,
        end: &Vertex<T>,
    ) -> Result<Vec<(T, f64)>, GraphError> {
        let mut path: Vec<(T, f64)> = Vec::new();
        let mut current = end;

        loop {
            match record.get(current) {
                Some((previous, cost)) => {
                    path.push((current.data.clone(), *cost));
                    current = previous;
                }
                None => {
                    if path.is_empty() {
                        return Err(GraphError::NoPathExists);
                    }
                    path.push((start.data.clone(), 0.0));
                    break;
                }
            }
        }

        path.reverse();
        Ok(path)
    }
}

/// Brace-wrapped per-vertex edge listing, in insertion order. Cosmetic
/// only; algorithmic results do not depend on this ordering.
impl<T: Clone + Eq + Hash + fmt::Display> fmt::Display for AdjacencyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (vertex, edges) in &self.table {
            write!(f, "\n    {vertex}: [")?;
            if edges.is_empty() {
                write!(f, "]")?;
            } else {
                for edge in edges {
                    write!(f, "\n          {}, cost: {}", edge.destination, edge.weight)?;
                }
                write!(f, "\n        ]")?;
            }
        }
        write!(f, "\n}}")
    }
}
