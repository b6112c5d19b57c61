use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Conflicting item: {0}")]
    ConflictingItem(String),

    #[error("Nonexistent item: {0}")]
    NonexistentItem(String),

    #[error("Allocation failure: {0}")]
    AllocationFailure(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Empty container: {0}")]
    EmptyContainer(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Fieldless classification of [`Error`], handy for matching in callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidIdentifier,
    ConflictingItem,
    NonexistentItem,
    AllocationFailure,
    OutOfRange,
    EmptyContainer,
    InvalidConfig,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            Error::ConflictingItem(_) => ErrorKind::ConflictingItem,
            Error::NonexistentItem(_) => ErrorKind::NonexistentItem,
            Error::AllocationFailure(_) => ErrorKind::AllocationFailure,
            Error::OutOfRange(_) => ErrorKind::OutOfRange,
            Error::EmptyContainer(_) => ErrorKind::EmptyContainer,
            Error::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }

    /// Only allocation failures can succeed on retry with the same arguments
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::AllocationFailure(_))
    }

    // Block array

    pub(crate) fn array_unable_to_insert() -> Self {
        Error::AllocationFailure("Memory allocation failed!".to_string())
    }

    pub(crate) fn array_invalid_index(index: usize) -> Self {
        Error::OutOfRange(format!("Invalid array index {} requested", index))
    }

    pub(crate) fn array_popping_empty() -> Self {
        Error::EmptyContainer("Tried to remove an element from an empty array!".to_string())
    }

    // Nodes

    pub(crate) fn node_invalid_identifier(id: usize, expected: usize) -> Self {
        Error::InvalidIdentifier(format!(
            "Attempting to add a new node with invalid identifier {}, expected {} instead",
            id, expected
        ))
    }

    pub(crate) fn node_conflicting_identifier(id: usize) -> Self {
        Error::ConflictingItem(format!(
            "Attempting to add a new node with identifier {} which already is associated with another existing node",
            id
        ))
    }

    pub(crate) fn nonexistent_node(id: usize, size: usize) -> Self {
        Error::NonexistentItem(format!(
            "Attempting to access a nonexisting node with identifier {}, only {} nodes are available",
            id, size
        ))
    }

    pub(crate) fn node_container_unable_to_insert() -> Self {
        Error::AllocationFailure(
            "Unable to insert a new node record into the underlying container of nodes".to_string(),
        )
    }

    // Edges

    pub(crate) fn edge_invalid_identifier(id: usize, expected: usize) -> Self {
        Error::InvalidIdentifier(format!(
            "Attempting to add a new edge with invalid identifier {}, expected {} instead",
            id, expected
        ))
    }

    pub(crate) fn edge_conflicting_identifier(id: usize) -> Self {
        Error::ConflictingItem(format!(
            "Attempting to add a new edge with identifier {} which already is associated with another existing edge",
            id
        ))
    }

    pub(crate) fn edge_conflicting_nodes(source: usize, target: usize) -> Self {
        Error::ConflictingItem(format!(
            "Attempting to add a new edge between a pair of nodes with identifiers {} and {} which already are connected with another existing edge",
            source, target
        ))
    }

    pub(crate) fn adding_edge_nonexistent_nodes(source: usize, target: usize, size: usize) -> Self {
        Error::NonexistentItem(format!(
            "Attempting to add a new edge between a nonexisting pair of nodes with identifiers {} and {}, only {} nodes are available",
            source, target, size
        ))
    }

    pub(crate) fn nonexistent_edge(id: usize, size: usize) -> Self {
        Error::NonexistentItem(format!(
            "Attempting to access a nonexisting edge with identifier {}, only {} edges are available",
            id, size
        ))
    }

    pub(crate) fn accessing_edge_nonexistent_nodes(source: usize, target: usize, size: usize) -> Self {
        Error::NonexistentItem(format!(
            "Attempting to access an edge between a nonexisting pair of nodes with identifiers {} and {}, only {} nodes are available",
            source, target, size
        ))
    }

    pub(crate) fn nonexistent_edge_between(source: usize, target: usize) -> Self {
        Error::NonexistentItem(format!(
            "Attempting to access a nonexisting edge between a pair of nodes with identifiers {} and {}",
            source, target
        ))
    }

    pub(crate) fn testing_edge_nonexistent_nodes(source: usize, target: usize, size: usize) -> Self {
        Error::NonexistentItem(format!(
            "Attempting to test the existence of an edge between a nonexisting pair of nodes with identifiers {} and {}, only {} nodes are available",
            source, target, size
        ))
    }

    pub(crate) fn edge_nonexistent_source(source: usize, size: usize) -> Self {
        Error::NonexistentItem(format!(
            "Attempting to access an edge outgoing from a nonexisting source node with identifier {}, only {} nodes are available",
            source, size
        ))
    }

    pub(crate) fn edge_nonexistent_target(target: usize, size: usize) -> Self {
        Error::NonexistentItem(format!(
            "Attempting to access an edge incoming to a nonexisting target node with identifier {}, only {} nodes are available",
            target, size
        ))
    }

    pub(crate) fn edge_container_unable_to_insert() -> Self {
        Error::AllocationFailure(
            "Unable to insert a new edge record into the underlying container of edges".to_string(),
        )
    }

    pub(crate) fn adjacency_matrix_unable_to_insert() -> Self {
        Error::AllocationFailure(
            "Unable to extend the underlying adjacency matrix container for edges".to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_allocation_failures_are_retryable() {
        assert!(Error::array_unable_to_insert().is_retryable());
        assert!(Error::adjacency_matrix_unable_to_insert().is_retryable());
        assert!(!Error::node_invalid_identifier(5, 2).is_retryable());
        assert!(!Error::edge_conflicting_nodes(0, 1).is_retryable());
        assert!(!Error::array_popping_empty().is_retryable());
    }

    #[test]
    fn test_messages() {
        let err = Error::edge_invalid_identifier(5, 2);
        assert_eq!(err.kind(), ErrorKind::InvalidIdentifier);
        assert_eq!(
            err.to_string(),
            "Invalid identifier: Attempting to add a new edge with invalid identifier 5, expected 2 instead"
        );
        assert_eq!(
            Error::array_invalid_index(3).to_string(),
            "Out of range: Invalid array index 3 requested"
        );
    }
}
