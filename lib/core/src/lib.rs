//! # blockgraph Core
//!
//! Graph storage with dense ids, O(1) lookups and stable record addresses.
//!
//! This crate provides the storage engine:
//!
//! - [`BlockArray`] - growable array built from fixed-size blocks that never relocates elements
//! - [`Nodes`] - node store with dense sequential ids
//! - [`Edges`] - edge store plus an n x n [`AdjacencyMatrix`]
//! - [`Graph`] - owns one node store and one edge store, directed or undirected
//!
//! ## Example
//!
//! ```rust
//! use blockgraph_core::Graph;
//!
//! let mut graph: Graph<&str, &str> = Graph::directed();
//! graph.nodes_mut().add(0, "a").unwrap();
//! graph.nodes_mut().add(1, "b").unwrap();
//! graph.edges_mut().add(0, 0, 1, "x").unwrap();
//!
//! assert!(graph.edges().exists_between(0, 1).unwrap());
//! assert!(!graph.edges().exists_between(1, 0).unwrap());
//! assert_eq!(*graph.edges().get(0).unwrap().target().payload(), "b");
//! ```

pub mod array;
pub mod config;
pub mod edge;
pub mod edges;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod node;
pub mod nodes;

pub use array::BlockArray;
pub use config::{GraphConfig, Orientation, DEFAULT_BLOCK_SIZE};
pub use edge::{Edge, EdgeId};
pub use edges::{Edges, EdgesFrom};
pub use error::{Error, ErrorKind, Result};
pub use graph::{EdgeLookup, EdgeRef, EdgesMut, EdgesView, Graph, NodesMut};
pub use matrix::AdjacencyMatrix;
pub use node::{Node, NodeId};
pub use nodes::Nodes;
