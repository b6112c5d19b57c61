use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default number of elements per storage block
pub const DEFAULT_BLOCK_SIZE: usize = 10;

/// Whether edges are one-directional or occupy both matrix cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Directed,
    Undirected,
}

impl Orientation {
    #[inline]
    pub fn is_undirected(self) -> bool {
        self == Orientation::Undirected
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Directed => write!(f, "directed"),
            Orientation::Undirected => write!(f, "undirected"),
        }
    }
}

/// Storage configuration for a graph
///
/// The budgets cap how far the stores may grow. Growth past a budget fails
/// with [`Error::AllocationFailure`] the same way a refused allocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Elements per block in the node and edge containers
    pub block_size: usize,
    /// Maximum number of blocks each container may allocate
    pub max_blocks: Option<usize>,
    /// Maximum adjacency matrix dimension
    pub max_matrix_dim: Option<usize>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            max_blocks: None,
            max_matrix_dim: None,
        }
    }
}

impl GraphConfig {
    #[inline]
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_max_blocks(mut self, max_blocks: usize) -> Self {
        self.max_blocks = Some(max_blocks);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_max_matrix_dim(mut self, max_matrix_dim: usize) -> Self {
        self.max_matrix_dim = Some(max_matrix_dim);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(Error::InvalidConfig("block_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GraphConfig::default();
        assert_eq!(config.block_size, DEFAULT_BLOCK_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let config = GraphConfig::default().with_block_size(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: GraphConfig = serde_json::from_str(r#"{"max_blocks": 4}"#).unwrap();
        assert_eq!(config.block_size, DEFAULT_BLOCK_SIZE);
        assert_eq!(config.max_blocks, Some(4));
        assert_eq!(config.max_matrix_dim, None);

        let orientation: Orientation = serde_json::from_str("\"undirected\"").unwrap();
        assert_eq!(orientation, Orientation::Undirected);
    }

    #[test]
    fn test_orientation_display() {
        assert_eq!(Orientation::Directed.to_string(), "directed");
        assert!(Orientation::Undirected.is_undirected());
        assert!(!Orientation::default().is_undirected());
    }
}
