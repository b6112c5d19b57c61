use crate::array::{BlockArray, Iter};
use crate::config::{GraphConfig, Orientation};
use crate::edge::{Edge, EdgeId};
use crate::matrix::AdjacencyMatrix;
use crate::node::NodeId;
use crate::nodes::Nodes;
use crate::{Error, Result};

/// The edge store of a graph
///
/// Holds the edge records plus an n x n adjacency matrix, n being the size
/// of the paired node store. There is at most one edge per ordered
/// (source, target) pair; for undirected graphs both cells of a pair refer
/// to the same edge.
pub struct Edges<E> {
    edges: BlockArray<Edge<E>>,
    matrix: AdjacencyMatrix,
    orientation: Orientation,
}

impl<E> Edges<E> {
    pub(crate) fn new(orientation: Orientation, config: &GraphConfig) -> Self {
        Self {
            edges: BlockArray::with_limits(config.block_size, config.max_blocks),
            matrix: AdjacencyMatrix::new(config.max_matrix_dim),
            orientation,
        }
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
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Read-only view of the adjacency matrix, mainly for diagnostics
    #[inline]
    pub fn matrix(&self) -> &AdjacencyMatrix {
        &self.matrix
    }

    #[inline]
    pub fn exists(&self, id: EdgeId) -> bool {
        id < self.len()
    }

    /// Whether an edge connects `source` to `target`
    ///
    /// Fails when either node does not exist, which is different from the
    /// nodes existing but being unconnected.
    pub fn exists_between(&self, source: NodeId, target: NodeId) -> Result<bool> {
        if !self.matrix.contains(source, target) {
            return Err(Error::testing_edge_nonexistent_nodes(source, target, self.matrix.dim()));
        }
        Ok(self.matrix.get(source, target).is_some())
    }

    pub fn get(&self, id: EdgeId) -> Result<&Edge<E>> {
        self.edges
            .get(id)
            .map_err(|_| Error::nonexistent_edge(id, self.len()))
    }

    pub fn get_mut(&mut self, id: EdgeId) -> Result<&mut Edge<E>> {
        let size = self.len();
        self.edges
            .get_mut(id)
            .map_err(|_| Error::nonexistent_edge(id, size))
    }

    /// Id of the edge from `source` to `target`
    pub fn id_between(&self, source: NodeId, target: NodeId) -> Result<EdgeId> {
        if !self.matrix.contains(source, target) {
            return Err(Error::accessing_edge_nonexistent_nodes(source, target, self.matrix.dim()));
        }
        self.matrix
            .get(source, target)
            .ok_or_else(|| Error::nonexistent_edge_between(source, target))
    }

    pub fn get_between(&self, source: NodeId, target: NodeId) -> Result<&Edge<E>> {
        let id = self.id_between(source, target)?;
        self.get(id)
    }

    pub fn get_between_mut(&mut self, source: NodeId, target: NodeId) -> Result<&mut Edge<E>> {
        let id = self.id_between(source, target)?;
        self.get_mut(id)
    }

    /// First stage of a (source, target) lookup
    pub fn from(&self, source: NodeId) -> Result<EdgesFrom<'_, E>> {
        let size = self.matrix.dim();
        if source >= size {
            return Err(Error::edge_nonexistent_source(source, size));
        }
        Ok(EdgesFrom { edges: self, source })
    }

    pub fn iter(&self) -> Iter<'_, Edge<E>> {
        self.edges.iter()
    }

    /// Ids of the nodes reachable over one edge from `id`
    ///
    /// For undirected graphs these are all adjacent nodes.
    pub fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>> {
        self.check_node(id)?;
        Ok(self.matrix.row(id).map(|(target, _)| target).collect())
    }

    pub fn out_degree(&self, id: NodeId) -> Result<usize> {
        self.check_node(id)?;
        Ok(self.matrix.row(id).count())
    }

    pub fn in_degree(&self, id: NodeId) -> Result<usize> {
        self.check_node(id)?;
        Ok(self.matrix.column(id).count())
    }

    fn check_node(&self, id: NodeId) -> Result<()> {
        let size = self.matrix.dim();
        if id >= size {
            return Err(Error::nonexistent_node(id, size));
        }
        Ok(())
    }

    /// Insert an edge with an explicit id, which must equal the current size
    ///
    /// Both endpoints must be nodes of `nodes` and the ordered pair must not
    /// be connected yet. On failure nothing changes.
    pub(crate) fn add<N>(
        &mut self,
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        payload: E,
        nodes: &Nodes<N>,
    ) -> Result<&mut Edge<E>> {
        let expected = self.len();
        if id > expected {
            return Err(Error::edge_invalid_identifier(id, expected));
        }
        if id < expected {
            return Err(Error::edge_conflicting_identifier(id));
        }

        let node_count = nodes.len();
        if source >= node_count || target >= node_count || !self.matrix.contains(source, target) {
            return Err(Error::adding_edge_nonexistent_nodes(source, target, node_count));
        }
        if self.matrix.get(source, target).is_some() {
            return Err(Error::edge_conflicting_nodes(source, target));
        }

        let source_id = nodes.get(source)?.id();
        let target_id = nodes.get(target)?.id();
        self.edges
            .push(Edge::new(id, source_id, target_id, payload))
            .map_err(|_| Error::edge_container_unable_to_insert())?;

        self.matrix.set(source_id, target_id, Some(id));
        if self.orientation.is_undirected() {
            self.matrix.set(target_id, source_id, Some(id));
        }

        self.edges.get_mut(id)
    }

    /// Add one row and one column of absent cells for a new node
    pub(crate) fn grow_adjacency_matrix(&mut self) -> Result<()> {
        self.matrix.grow()
    }

    /// Rebuild the matrix from the stored edges for a node store of `node_count` nodes
    pub(crate) fn construct_adjacency_matrix(&mut self, node_count: usize) -> Result<()> {
        let cells = self.edges.iter().map(|edge| (edge.source_id(), edge.target_id(), edge.id()));
        self.matrix.construct(node_count, cells, self.orientation)
    }

    /// Check every edge endpoint against `nodes`
    ///
    /// Needed whenever this store gets paired with a node store other than
    /// the one its edges were created against. Endpoints are node ids that
    /// resolve against whichever store is passed at the point of use, so
    /// nothing is rewritten here; the store is only verified to hold every
    /// endpoint.
    pub(crate) fn update_source_and_target_pointers<N>(&self, nodes: &Nodes<N>) -> Result<()> {
        for edge in self.edges.iter() {
            nodes.get(edge.source_id())?;
            nodes.get(edge.target_id())?;
        }
        Ok(())
    }

    /// Copy the edge records into fresh storage; the matrix starts empty
    /// and must be rebuilt against the new node store
    pub(crate) fn copy_records(&self) -> Result<Self>
    where
        E: Clone,
    {
        Ok(Self {
            edges: self.edges.try_clone()?,
            matrix: AdjacencyMatrix::new(self.matrix_limit()),
            orientation: self.orientation,
        })
    }

    fn matrix_limit(&self) -> Option<usize> {
        self.matrix.max_dim()
    }

    pub(crate) fn take(&mut self) -> Self {
        let empty = Self {
            edges: BlockArray::with_limits(self.edges.block_size(), self.edges.max_blocks()),
            matrix: AdjacencyMatrix::new(self.matrix_limit()),
            orientation: self.orientation,
        };
        std::mem::replace(self, empty)
    }
}

impl<'a, E> IntoIterator for &'a Edges<E> {
    type Item = &'a Edge<E>;
    type IntoIter = Iter<'a, Edge<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: PartialEq> PartialEq for Edges<E> {
    fn eq(&self, other: &Self) -> bool {
        self.orientation == other.orientation
            && self.len() == other.len()
            && self.iter().eq(other.iter())
    }
}

impl<E: std::fmt::Debug> std::fmt::Debug for Edges<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Edges")
            .field("orientation", &self.orientation)
            .field("edges", &self.edges)
            .finish()
    }
}

/// Pending lookup that already knows its source node
#[derive(Debug)]
pub struct EdgesFrom<'a, E> {
    edges: &'a Edges<E>,
    source: NodeId,
}

impl<'a, E> EdgesFrom<'a, E> {
    #[inline]
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Second stage of a (source, target) lookup
    pub fn to(&self, target: NodeId) -> Result<&'a Edge<E>> {
        let size = self.edges.matrix.dim();
        if target >= size {
            return Err(Error::edge_nonexistent_target(target, size));
        }
        self.edges.get_between(self.source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_stores(orientation: Orientation, node_count: usize) -> (Nodes<u32>, Edges<&'static str>) {
        let config = GraphConfig::default();
        let mut nodes = Nodes::with_config(&config);
        let mut edges = Edges::new(orientation, &config);
        for i in 0..node_count {
            nodes.add(i, i as u32, &mut edges).unwrap();
        }
        (nodes, edges)
    }

    #[test]
    fn test_add_and_lookup_directed() {
        let (nodes, mut edges) = graph_stores(Orientation::Directed, 3);
        edges.add(0, 0, 1, "x", &nodes).unwrap();
        edges.add(1, 1, 2, "y", &nodes).unwrap();

        assert!(edges.exists_between(0, 1).unwrap());
        assert!(!edges.exists_between(1, 0).unwrap());
        assert!(!edges.exists_between(0, 2).unwrap());
        assert_eq!(*edges.get_between(1, 2).unwrap().payload(), "y");
        assert_eq!(edges.get(1).unwrap().endpoints(), (1, 2));
        assert!(edges.exists(1));
        assert!(!edges.exists(2));
    }

    #[test]
    fn test_undirected_mirrors_one_edge() {
        let (nodes, mut edges) = graph_stores(Orientation::Undirected, 2);
        edges.add(0, 0, 1, "x", &nodes).unwrap();

        assert!(edges.exists_between(1, 0).unwrap());
        let forward = edges.get_between(0, 1).unwrap() as *const Edge<&str>;
        let backward = edges.get_between(1, 0).unwrap() as *const Edge<&str>;
        assert_eq!(forward, backward);

        // the reverse pair is already taken
        assert!(matches!(edges.add(1, 1, 0, "z", &nodes), Err(Error::ConflictingItem(_))));
    }

    #[test]
    fn test_add_rejects_bad_ids() {
        let (nodes, mut edges) = graph_stores(Orientation::Directed, 3);
        edges.add(0, 0, 1, "a", &nodes).unwrap();
        edges.add(1, 1, 2, "b", &nodes).unwrap();

        assert!(matches!(edges.add(5, 0, 2, "c", &nodes), Err(Error::InvalidIdentifier(_))));
        assert!(matches!(edges.add(1, 0, 2, "c", &nodes), Err(Error::ConflictingItem(_))));
        assert!(matches!(edges.add(2, 0, 7, "c", &nodes), Err(Error::NonexistentItem(_))));
        assert!(matches!(edges.add(2, 0, 1, "c", &nodes), Err(Error::ConflictingItem(_))));
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_pair_lookup_errors_are_distinct() {
        let (nodes, mut edges) = graph_stores(Orientation::Directed, 2);
        edges.add(0, 0, 1, "a", &nodes).unwrap();

        let out_of_range = edges.get_between(0, 9).unwrap_err().to_string();
        let missing = edges.get_between(1, 0).unwrap_err().to_string();
        assert!(out_of_range.contains("nonexisting pair of nodes"));
        assert!(missing.contains("nonexisting edge between"));
        assert!(matches!(edges.exists_between(3, 0), Err(Error::NonexistentItem(_))));
    }

    #[test]
    fn test_two_stage_lookup() {
        let (nodes, mut edges) = graph_stores(Orientation::Directed, 3);
        edges.add(0, 2, 0, "back", &nodes).unwrap();

        assert_eq!(*edges.from(2).unwrap().to(0).unwrap().payload(), "back");
        assert!(edges.from(3).unwrap_err().to_string().contains("nonexisting source"));
        assert!(edges.from(0).unwrap().to(3).unwrap_err().to_string().contains("nonexisting target"));
        assert!(matches!(edges.from(0).unwrap().to(2), Err(Error::NonexistentItem(_))));
    }

    #[test]
    fn test_edge_container_failure_leaves_matrix() {
        let config = GraphConfig::default().with_block_size(1).with_max_blocks(2);
        let mut nodes = Nodes::with_config(&GraphConfig::default());
        let mut edges = Edges::new(Orientation::Undirected, &config);
        for i in 0..3 {
            nodes.add(i, (), &mut edges).unwrap();
        }
        edges.add(0, 0, 1, 'a', &nodes).unwrap();
        edges.add(1, 1, 2, 'b', &nodes).unwrap();

        let err = edges.add(2, 0, 2, 'c', &nodes).unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(edges.len(), 2);
        assert!(!edges.exists_between(0, 2).unwrap());
        assert!(!edges.exists_between(2, 0).unwrap());
    }

    #[test]
    fn test_degrees_and_neighbors() {
        let (nodes, mut edges) = graph_stores(Orientation::Directed, 4);
        edges.add(0, 0, 1, "a", &nodes).unwrap();
        edges.add(1, 0, 2, "b", &nodes).unwrap();
        edges.add(2, 3, 2, "c", &nodes).unwrap();

        assert_eq!(edges.neighbors(0).unwrap(), vec![1, 2]);
        assert_eq!(edges.out_degree(0).unwrap(), 2);
        assert_eq!(edges.in_degree(2).unwrap(), 2);
        assert_eq!(edges.in_degree(0).unwrap(), 0);
        assert!(edges.neighbors(4).is_err());
    }

    #[test]
    fn test_rebuild_after_copy() {
        let (nodes, mut edges) = graph_stores(Orientation::Undirected, 3);
        edges.add(0, 0, 2, "a", &nodes).unwrap();

        let mut copy = edges.copy_records().unwrap();
        assert_eq!(copy.matrix().dim(), 0);
        copy.update_source_and_target_pointers(&nodes).unwrap();
        copy.construct_adjacency_matrix(nodes.len()).unwrap();
        assert_eq!(copy.matrix(), edges.matrix());
        assert_eq!(copy.id_between(2, 0).unwrap(), 0);
    }

    #[test]
    fn test_endpoint_check_against_other_stores() {
        let (nodes, mut edges) = graph_stores(Orientation::Directed, 3);
        edges.add(0, 0, 2, "a", &nodes).unwrap();

        let (small, _) = graph_stores(Orientation::Directed, 2);
        let err = edges.update_source_and_target_pointers(&small).unwrap_err();
        assert!(matches!(err, Error::NonexistentItem(_)));
        assert_eq!(edges.get(0).unwrap().endpoints(), (0, 2));

        let (large, _) = graph_stores(Orientation::Directed, 5);
        edges.update_source_and_target_pointers(&large).unwrap();
        assert_eq!(edges.get(0).unwrap().endpoints(), (0, 2));
    }

    #[test]
    fn test_matrix_display() {
        let (nodes, mut edges) = graph_stores(Orientation::Directed, 3);
        edges.add(0, 0, 1, "x", &nodes).unwrap();
        edges.add(1, 1, 2, "y", &nodes).unwrap();
        assert_eq!(edges.matrix().to_string(), "-|0|-\n-|-|1\n-|-|-\n");
    }
}
