use std::fmt;

pub type NodeId = usize;

/// A single node: a dense identifier plus its payload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node<N> {
    id: NodeId,
    payload: N,
}

impl<N> Node<N> {
    #[inline]
    #[must_use]
    pub(crate) fn new(id: NodeId, payload: N) -> Self {
        Self { id, payload }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn payload(&self) -> &N {
        &self.payload
    }

    #[inline]
    pub fn payload_mut(&mut self) -> &mut N {
        &mut self.payload
    }

    #[inline]
    pub fn into_payload(self) -> N {
        self.payload
    }
}

/// Snapshot line form: `node (<id> {<payload>})`
impl<N: fmt::Display> fmt::Display for Node<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node ({} {{{}}})", self.id, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_display() {
        let node = Node::new(3, "abc");
        assert_eq!(node.to_string(), "node (3 {abc})");
    }

    #[test]
    fn test_payload_mut() {
        let mut node = Node::new(0, 1u32);
        *node.payload_mut() += 41;
        assert_eq!(*node.payload(), 42);
        assert_eq!(node.into_payload(), 42);
    }
}
