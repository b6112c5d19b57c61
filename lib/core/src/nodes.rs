use crate::array::{BlockArray, Iter};
use crate::config::GraphConfig;
use crate::edges::Edges;
use crate::node::{Node, NodeId};
use crate::{Error, Result};
use std::ops::Index;

/// The node store of a graph
///
/// Ids are dense: the node at position `i` has id `i`. Adding a node also
/// grows the adjacency matrix of the edge store it is paired with, so the
/// two always agree on the node count.
pub struct Nodes<N> {
    nodes: BlockArray<Node<N>>,
}

impl<N> Nodes<N> {
    pub(crate) fn with_config(config: &GraphConfig) -> Self {
        Self {
            nodes: BlockArray::with_limits(config.block_size, config.max_blocks),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids are 0..n-1, so membership is a bounds check
    #[inline]
    pub fn exists(&self, id: NodeId) -> bool {
        id < self.len()
    }

    pub fn get(&self, id: NodeId) -> Result<&Node<N>> {
        self.nodes
            .get(id)
            .map_err(|_| Error::nonexistent_node(id, self.len()))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node<N>> {
        let size = self.len();
        self.nodes
            .get_mut(id)
            .map_err(|_| Error::nonexistent_node(id, size))
    }

    pub fn iter(&self) -> Iter<'_, Node<N>> {
        self.nodes.iter()
    }

    pub fn last(&self) -> Option<&Node<N>> {
        self.nodes.last()
    }

    /// Insert a node with an explicit id, which must equal the current size
    ///
    /// The matrix of `edges` is grown in the same step; if that fails the
    /// node is removed again and nothing changes.
    pub(crate) fn add<E>(&mut self, id: NodeId, payload: N, edges: &mut Edges<E>) -> Result<&mut Node<N>> {
        let expected = self.len();
        if id > expected {
            return Err(Error::node_invalid_identifier(id, expected));
        }
        if id < expected {
            return Err(Error::node_conflicting_identifier(id));
        }

        self.nodes
            .push(Node::new(id, payload))
            .map_err(|_| Error::node_container_unable_to_insert())?;

        if let Err(e) = edges.grow_adjacency_matrix() {
            self.nodes.pop().ok();
            return Err(e);
        }

        self.nodes.get_mut(id)
    }

    pub(crate) fn try_clone(&self) -> Result<Self>
    where
        N: Clone,
    {
        Ok(Self {
            nodes: self.nodes.try_clone()?,
        })
    }

    pub(crate) fn take(&mut self) -> Self {
        Self {
            nodes: self.nodes.take(),
        }
    }
}

impl<N> Index<NodeId> for Nodes<N> {
    type Output = Node<N>;

    fn index(&self, id: NodeId) -> &Node<N> {
        match self.get(id) {
            Ok(node) => node,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, N> IntoIterator for &'a Nodes<N> {
    type Item = &'a Node<N>;
    type IntoIter = Iter<'a, Node<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: PartialEq> PartialEq for Nodes<N> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<N: std::fmt::Debug> std::fmt::Debug for Nodes<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
