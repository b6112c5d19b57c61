use crate::config::{GraphConfig, Orientation};
use crate::edge::{Edge, EdgeId};
use crate::edges::{Edges, EdgesFrom};
use crate::matrix::AdjacencyMatrix;
use crate::node::{Node, NodeId};
use crate::nodes::Nodes;
use crate::Result;
use std::fmt;
use std::ops::Deref;

/// A directed or undirected graph with dense ids and O(1) adjacency tests
///
/// Node and edge records live in block-allocated storage, so references
/// obtained from the graph stay valid while it grows. Moving the graph (or
/// [`Graph::take`]) keeps every record in place; copying it allocates new
/// records and rebuilds every cross reference against them.
pub struct Graph<N, E> {
    nodes: Nodes<N>,
    edges: Edges<E>,
    config: GraphConfig,
}

impl<N, E> Graph<N, E> {
    pub fn new(orientation: Orientation) -> Self {
        Self::build(orientation, GraphConfig::default())
    }

    pub fn directed() -> Self {
        Self::new(Orientation::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(Orientation::Undirected)
    }

    pub fn with_config(orientation: Orientation, config: GraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(orientation, config))
    }

    fn build(orientation: Orientation, config: GraphConfig) -> Self {
        Self {
            nodes: Nodes::with_config(&config),
            edges: Edges::new(orientation, &config),
            config,
        }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.edges.orientation()
    }

    #[inline]
    pub fn is_undirected(&self) -> bool {
        self.orientation().is_undirected()
    }

    #[inline]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    #[inline]
    pub fn nodes(&self) -> &Nodes<N> {
        &self.nodes
    }

    #[inline]
    pub fn edges(&self) -> EdgesView<'_, N, E> {
        EdgesView {
            nodes: &self.nodes,
            edges: &self.edges,
        }
    }

    #[inline]
    pub fn nodes_mut(&mut self) -> NodesMut<'_, N, E> {
        NodesMut {
            nodes: &mut self.nodes,
            edges: &mut self.edges,
        }
    }

    #[inline]
    pub fn edges_mut(&mut self) -> EdgesMut<'_, N, E> {
        EdgesMut {
            nodes: &self.nodes,
            edges: &mut self.edges,
        }
    }

    /// Move the contents out, leaving an empty graph with the same orientation and config
    ///
    /// Records keep their addresses in the returned graph.
    pub fn take(&mut self) -> Self {
        Self {
            nodes: self.nodes.take(),
            edges: self.edges.take(),
            config: self.config,
        }
    }

    /// Copy the graph into freshly allocated stores
    ///
    /// The node records are copied first, then the edge records; the edge
    /// endpoints are checked against the new node store and only then is
    /// the adjacency matrix rebuilt from the new edge records.
    pub fn try_clone(&self) -> Result<Self>
    where
        N: Clone,
        E: Clone,
    {
        let nodes = self.nodes.try_clone()?;
        let mut edges = self.edges.copy_records()?;
        edges.update_source_and_target_pointers(&nodes)?;
        edges.construct_adjacency_matrix(nodes.len())?;
        Ok(Self {
            nodes,
            edges,
            config: self.config,
        })
    }
}

impl<N: Clone, E: Clone> Clone for Graph<N, E> {
    /// # Panics
    ///
    /// Panics if the copy cannot be allocated, like `Vec::clone` would.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(graph) => graph,
            Err(e) => panic!("failed to copy graph: {}", e),
        }
    }
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::directed()
    }
}

impl<N: PartialEq, E: PartialEq> PartialEq for Graph<N, E> {
    fn eq(&self, other: &Self) -> bool {
        self.orientation() == other.orientation()
            && self.nodes == other.nodes
            && self.edges == other.edges
    }
}

impl<N: fmt::Debug, E: fmt::Debug> fmt::Debug for Graph<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("orientation", &self.orientation())
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .finish()
    }
}

/// Snapshot text: every node line, then every edge line
impl<N: fmt::Display, E: fmt::Display> fmt::Display for Graph<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes.iter() {
            writeln!(f, "{}", node)?;
        }
        for edge in self.edges.iter() {
            writeln!(f, "{}", edge)?;
        }
        Ok(())
    }
}

/// An edge together with the node store it resolves its endpoints in
pub struct EdgeRef<'g, N, E> {
    edge: &'g Edge<E>,
    nodes: &'g Nodes<N>,
}

impl<'g, N, E> EdgeRef<'g, N, E> {
    #[inline]
    pub fn edge(&self) -> &'g Edge<E> {
        self.edge
    }

    #[inline]
    pub fn source(&self) -> &'g Node<N> {
        &self.nodes[self.edge.source_id()]
    }

    #[inline]
    pub fn target(&self) -> &'g Node<N> {
        &self.nodes[self.edge.target_id()]
    }
}

impl<N, E> Clone for EdgeRef<'_, N, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, E> Copy for EdgeRef<'_, N, E> {}

impl<N, E> Deref for EdgeRef<'_, N, E> {
    type Target = Edge<E>;

    fn deref(&self) -> &Edge<E> {
        self.edge
    }
}

impl<N, E: fmt::Display> fmt::Display for EdgeRef<'_, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.edge, f)
    }
}

impl<N: fmt::Debug, E: fmt::Debug> fmt::Debug for EdgeRef<'_, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeRef")
            .field("edge", self.edge)
            .field("source", self.source())
            .field("target", self.target())
            .finish()
    }
}

/// Read access to the edges of a graph
pub struct EdgesView<'g, N, E> {
    nodes: &'g Nodes<N>,
    edges: &'g Edges<E>,
}

impl<N, E> Clone for EdgesView<'_, N, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, E> Copy for EdgesView<'_, N, E> {}

impl<'g, N, E> EdgesView<'g, N, E> {
    #[inline]
    fn wrap(&self, edge: &'g Edge<E>) -> EdgeRef<'g, N, E> {
        EdgeRef {
            edge,
            nodes: self.nodes,
        }
    }

    /// The underlying edge store
    #[inline]
    pub fn store(&self) -> &'g Edges<E> {
        self.edges
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn exists(&self, id: EdgeId) -> bool {
        self.edges.exists(id)
    }

    pub fn exists_between(&self, source: NodeId, target: NodeId) -> Result<bool> {
        self.edges.exists_between(source, target)
    }

    pub fn get(&self, id: EdgeId) -> Result<EdgeRef<'g, N, E>> {
        Ok(self.wrap(self.edges.get(id)?))
    }

    pub fn get_between(&self, source: NodeId, target: NodeId) -> Result<EdgeRef<'g, N, E>> {
        Ok(self.wrap(self.edges.get_between(source, target)?))
    }

    /// Two-stage lookup: `graph.edges().from(s)?.to(t)?`
    pub fn from(&self, source: NodeId) -> Result<EdgeLookup<'g, N, E>> {
        Ok(EdgeLookup {
            pending: self.edges.from(source)?,
            nodes: self.nodes,
        })
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = EdgeRef<'g, N, E>> + ExactSizeIterator + 'g {
        let nodes = self.nodes;
        self.edges.iter().map(move |edge| EdgeRef { edge, nodes })
    }

    #[inline]
    pub fn matrix(&self) -> &'g AdjacencyMatrix {
        self.edges.matrix()
    }

    pub fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>> {
        self.edges.neighbors(id)
    }

    pub fn out_degree(&self, id: NodeId) -> Result<usize> {
        self.edges.out_degree(id)
    }

    pub fn in_degree(&self, id: NodeId) -> Result<usize> {
        self.edges.in_degree(id)
    }
}

/// Second stage of a two-stage edge lookup
#[derive(Debug)]
pub struct EdgeLookup<'g, N, E> {
    pending: EdgesFrom<'g, E>,
    nodes: &'g Nodes<N>,
}

impl<'g, N, E> EdgeLookup<'g, N, E> {
    pub fn to(&self, target: NodeId) -> Result<EdgeRef<'g, N, E>> {
        Ok(EdgeRef {
            edge: self.pending.to(target)?,
            nodes: self.nodes,
        })
    }
}

/// Node insertion and mutation; grows the edge store's matrix alongside
pub struct NodesMut<'g, N, E> {
    nodes: &'g mut Nodes<N>,
    edges: &'g mut Edges<E>,
}

impl<N, E> NodesMut<'_, N, E> {
    /// Add a node whose id must equal the current node count
    pub fn add(&mut self, id: NodeId, payload: N) -> Result<&mut Node<N>> {
        self.nodes.add(id, payload, self.edges)
    }

    /// Add a node with the next free id
    pub fn push(&mut self, payload: N) -> Result<&mut Node<N>> {
        let id = self.nodes.len();
        self.nodes.add(id, payload, self.edges)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node<N>> {
        self.nodes.get_mut(id)
    }
}

impl<N, E> Deref for NodesMut<'_, N, E> {
    type Target = Nodes<N>;

    fn deref(&self) -> &Nodes<N> {
        self.nodes
    }
}

/// Edge insertion and mutation against the graph's own node store
pub struct EdgesMut<'g, N, E> {
    nodes: &'g Nodes<N>,
    edges: &'g mut Edges<E>,
}

impl<N, E> EdgesMut<'_, N, E> {
    /// Add an edge whose id must equal the current edge count
    pub fn add(&mut self, id: EdgeId, source: NodeId, target: NodeId, payload: E) -> Result<&mut Edge<E>> {
        self.edges.add(id, source, target, payload, self.nodes)
    }

    /// Add an edge with the next free id
    pub fn push(&mut self, source: NodeId, target: NodeId, payload: E) -> Result<&mut Edge<E>> {
        let id = self.edges.len();
        self.edges.add(id, source, target, payload, self.nodes)
    }

    pub fn get_mut(&mut self, id: EdgeId) -> Result<&mut Edge<E>> {
        self.edges.get_mut(id)
    }

    pub fn get_between_mut(&mut self, source: NodeId, target: NodeId) -> Result<&mut Edge<E>> {
        self.edges.get_between_mut(source, target)
    }
}

impl<N, E> Deref for EdgesMut<'_, N, E> {
    type Target = Edges<E>;

    fn deref(&self) -> &Edges<E> {
        self.edges
    }
}
