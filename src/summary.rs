use blockgraph_core::{Graph, Orientation};
use serde::Serialize;

/// Size and shape of a graph, printed by `blockgraph --stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub orientation: Orientation,
    pub nodes: usize,
    pub edges: usize,
    pub matrix_dim: usize,
    pub block_size: usize,
    /// Largest out-degree over all nodes, 0 for an empty graph
    pub max_out_degree: usize,
}

impl GraphSummary {
    pub fn of<N, E>(graph: &Graph<N, E>) -> Self {
        let edges = graph.edges();
        let max_out_degree = (0..graph.node_count())
            .filter_map(|id| edges.out_degree(id).ok())
            .max()
            .unwrap_or(0);
        Self {
            orientation: graph.orientation(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            matrix_dim: edges.matrix().dim(),
            block_size: graph.config().block_size,
            max_out_degree,
        }
    }
}
