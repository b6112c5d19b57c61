use crate::node::NodeId;
use std::fmt;

pub type EdgeId = usize;

/// A single edge record
///
/// Endpoints are stored as node identifiers and resolved against the node
/// store of the graph that owns the edge, so a copied edge can never point
/// into the store it was copied from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<E> {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    payload: E,
}

impl<E> Edge<E> {
    #[inline]
    #[must_use]
    pub(crate) fn new(id: EdgeId, source: NodeId, target: NodeId, payload: E) -> Self {
        Self {
            id,
            source,
            target,
            payload,
        }
    }

    #[inline]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    #[inline]
    pub fn source_id(&self) -> NodeId {
        self.source
    }

    #[inline]
    pub fn target_id(&self) -> NodeId {
        self.target
    }

    #[inline]
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.source, self.target)
    }

    #[inline]
    pub fn payload(&self) -> &E {
        &self.payload
    }

    #[inline]
    pub fn payload_mut(&mut self) -> &mut E {
        &mut self.payload
    }

    #[inline]
    pub fn into_payload(self) -> E {
        self.payload
    }
}

/// Snapshot line form: `edge (<source>)-[<id> {<payload>}]->(<target>)`
impl<E: fmt::Display> fmt::Display for Edge<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "edge ({})-[{} {{{}}}]->({})",
            self.source, self.id, self.payload, self.target
        )
    }
}
