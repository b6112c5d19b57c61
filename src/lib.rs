//! # blockgraph
//!
//! Directed and undirected graphs with dense ids, O(1) id lookup and O(1)
//! adjacency tests, stored so that node and edge records never move once
//! inserted.
//!
//! ## Quick Start
//!
//! ### As a Library
//!
//! ```rust
//! use blockgraph::prelude::*;
//!
//! let mut graph: Graph<String, String> = Graph::undirected();
//! graph.nodes_mut().add(0, "a".to_string()).unwrap();
//! graph.nodes_mut().add(1, "b".to_string()).unwrap();
//! graph.edges_mut().add(0, 0, 1, "x".to_string()).unwrap();
//!
//! // one edge, visible from both sides
//! assert_eq!(graph.edges().get_between(1, 0).unwrap().id(), 0);
//!
//! // copies rebuild every cross reference against their own records
//! let copy = graph.clone();
//! assert_eq!(copy, graph);
//! ```
//!
//! ### From the Command Line
//!
//! ```bash
//! blockgraph graph.txt --matrix --stats
//! ```
//!
//! ## Crate Structure
//!
//! - [`blockgraph-core`](https://docs.rs/blockgraph-core) - Block storage, node and edge stores, graph
//! - [`blockgraph-storage`](https://docs.rs/blockgraph-storage) - Text snapshot import and export

pub mod summary;

// Re-export core types
pub use blockgraph_core::{
    AdjacencyMatrix, BlockArray, Edge, EdgeId, EdgeRef, Edges, Error, ErrorKind, Graph,
    GraphConfig, Node, NodeId, Nodes, Orientation, Result,
};

// Re-export storage
pub use blockgraph_storage::{
    export_to_path, import_from_path, load_graph, read_graph, write_graph, SnapshotError,
};

pub use summary::GraphSummary;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        export_to_path, import_from_path, load_graph, read_graph, write_graph, Edge, EdgeId,
        Error, Graph, GraphConfig, GraphSummary, Node, NodeId, Orientation, Result,
        SnapshotError,
    };
}
