use crate::config::Orientation;
use crate::edge::EdgeId;
use crate::node::NodeId;
use crate::{Error, Result};
use std::fmt;

/// Dense n x n table of optional edge ids, indexed by (source, target)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    rows: Vec<Vec<Option<EdgeId>>>,
    max_dim: Option<usize>,
}

impl AdjacencyMatrix {
    pub fn new(max_dim: Option<usize>) -> Self {
        Self {
            rows: Vec::new(),
            max_dim,
        }
    }

    /// Number of rows (and columns)
    #[inline]
    pub fn dim(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn max_dim(&self) -> Option<usize> {
        self.max_dim
    }

    #[inline]
    pub fn contains(&self, source: NodeId, target: NodeId) -> bool {
        source < self.dim() && target < self.dim()
    }

    #[inline]
    pub fn get(&self, source: NodeId, target: NodeId) -> Option<EdgeId> {
        self.rows.get(source).and_then(|row| row.get(target)).copied().flatten()
    }

    /// Callers guarantee both ids are inside the matrix
    #[inline]
    pub(crate) fn set(&mut self, source: NodeId, target: NodeId, edge: Option<EdgeId>) {
        self.rows[source][target] = edge;
    }

    /// Iterate one row as (target, edge id) pairs for present cells
    pub fn row(&self, source: NodeId) -> impl Iterator<Item = (NodeId, EdgeId)> + '_ {
        self.rows
            .get(source)
            .into_iter()
            .flat_map(|row| row.iter().enumerate())
            .filter_map(|(target, cell)| cell.map(|edge| (target, edge)))
    }

    /// Iterate one column as (source, edge id) pairs for present cells
    pub fn column(&self, target: NodeId) -> impl Iterator<Item = (NodeId, EdgeId)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(move |(source, row)| row.get(target).copied().flatten().map(|edge| (source, edge)))
    }

    fn shrink_to(&mut self, dim: usize) {
        self.rows.truncate(dim);
        for row in &mut self.rows {
            row.truncate(dim);
        }
    }

    /// Append one row and one column of absent cells
    ///
    /// Either the whole extension happens or the matrix keeps its previous shape.
    pub fn grow(&mut self) -> Result<()> {
        self.grow_with(|row, additional| row.try_reserve(additional).is_ok())
    }

    /// `reserve` is asked for room in each existing row in order, then in the new row
    fn grow_with<F>(&mut self, mut reserve: F) -> Result<()>
    where
        F: FnMut(&mut Vec<Option<EdgeId>>, usize) -> bool,
    {
        let dim = self.rows.len();
        if let Some(max) = self.max_dim {
            if dim >= max {
                return Err(Error::adjacency_matrix_unable_to_insert());
            }
        }

        for i in 0..dim {
            if !reserve(&mut self.rows[i], 1) {
                self.shrink_to(dim);
                return Err(Error::adjacency_matrix_unable_to_insert());
            }
            self.rows[i].push(None);
        }

        let mut row = Vec::new();
        if !reserve(&mut row, dim + 1) || self.rows.try_reserve(1).is_err() {
            self.shrink_to(dim);
            return Err(Error::adjacency_matrix_unable_to_insert());
        }
        row.resize(dim + 1, None);
        self.rows.push(row);
        Ok(())
    }

    /// Replace the matrix with one of `dim` rows built from `(source, target, id)` triples
    ///
    /// The previous contents are kept if building fails.
    pub fn construct<I>(&mut self, dim: usize, edges: I, orientation: Orientation) -> Result<()>
    where
        I: IntoIterator<Item = (NodeId, NodeId, EdgeId)>,
    {
        if let Some(max) = self.max_dim {
            if dim > max {
                return Err(Error::adjacency_matrix_unable_to_insert());
            }
        }

        let mut rows: Vec<Vec<Option<EdgeId>>> = Vec::new();
        rows.try_reserve_exact(dim)
            .map_err(|_| Error::adjacency_matrix_unable_to_insert())?;
        for _ in 0..dim {
            let mut row = Vec::new();
            row.try_reserve_exact(dim)
                .map_err(|_| Error::adjacency_matrix_unable_to_insert())?;
            row.resize(dim, None);
            rows.push(row);
        }

        for (source, target, edge) in edges {
            if source >= dim || target >= dim {
                return Err(Error::accessing_edge_nonexistent_nodes(source, target, dim));
            }
            rows[source][target] = Some(edge);
            if orientation.is_undirected() {
                rows[target][source] = Some(edge);
            }
        }

        self.rows = rows;
        Ok(())
    }
}

/// Diagnostic view: one row per line, `|` between cells, `-` for absent edges
impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, "|")?;
                }
                match cell {
                    Some(edge) => write!(f, "{}", edge)?,
                    None => write!(f, "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow() {
        let mut matrix = AdjacencyMatrix::new(None);
        for _ in 0..3 {
            matrix.grow().unwrap();
        }
        assert_eq!(matrix.dim(), 3);
        assert!(matrix.contains(2, 2));
        assert!(!matrix.contains(3, 0));
        assert_eq!(matrix.get(1, 2), None);
    }

    #[test]
    fn test_grow_past_limit_keeps_shape() {
        let mut matrix = AdjacencyMatrix::new(Some(2));
        matrix.grow().unwrap();
        matrix.grow().unwrap();
        matrix.set(0, 1, Some(0));

        let err = matrix.grow().unwrap_err();
        assert!(matches!(err, Error::AllocationFailure(_)));
        assert_eq!(matrix.dim(), 2);
        assert_eq!(matrix.get(0, 1), Some(0));
        assert_eq!(matrix.to_string(), "-|0\n-|-\n");
    }

    fn refuse_after(successes: usize) -> impl FnMut(&mut Vec<Option<EdgeId>>, usize) -> bool {
        let mut calls = 0;
        move |row: &mut Vec<Option<EdgeId>>, additional: usize| {
            calls += 1;
            calls <= successes && row.try_reserve(additional).is_ok()
        }
    }

    #[test]
    fn test_grow_failing_midway_reverts_rows() {
        let mut matrix = AdjacencyMatrix::new(None);
        for _ in 0..3 {
            matrix.grow().unwrap();
        }
        matrix.set(0, 2, Some(0));
        matrix.set(2, 1, Some(1));
        let before = matrix.clone();

        // rows 0 and 1 get their extra cell, row 2 is refused
        let err = matrix.grow_with(refuse_after(2)).unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(matrix, before);
        assert!(matrix.rows.iter().all(|row| row.len() == 3));
        assert_eq!(matrix.to_string(), "-|-|0\n-|-|-\n-|1|-\n");
    }

    #[test]
    fn test_grow_failing_on_new_row_reverts_columns() {
        let mut matrix = AdjacencyMatrix::new(None);
        matrix.grow().unwrap();
        matrix.grow().unwrap();
        let before = matrix.clone();

        let err = matrix.grow_with(refuse_after(2)).unwrap_err();
        assert!(matches!(err, Error::AllocationFailure(_)));
        assert_eq!(matrix, before);

        matrix.grow().unwrap();
        assert_eq!(matrix.dim(), 3);
        assert!(matrix.rows.iter().all(|row| row.len() == 3));
    }

    #[test]
    fn test_construct_mirrors_when_undirected() {
        let mut matrix = AdjacencyMatrix::new(None);
        matrix
            .construct(3, vec![(0, 1, 0), (2, 1, 1)], Orientation::Undirected)
            .unwrap();
        assert_eq!(matrix.get(0, 1), Some(0));
        assert_eq!(matrix.get(1, 0), Some(0));
        assert_eq!(matrix.get(1, 2), Some(1));
        assert_eq!(matrix.get(2, 1), Some(1));

        matrix
            .construct(3, vec![(0, 1, 0)], Orientation::Directed)
            .unwrap();
        assert_eq!(matrix.get(0, 1), Some(0));
        assert_eq!(matrix.get(1, 0), None);
    }

    #[test]
    fn test_construct_failure_keeps_previous() {
        let mut matrix = AdjacencyMatrix::new(None);
        matrix.construct(2, vec![(0, 1, 0)], Orientation::Directed).unwrap();

        let err = matrix
            .construct(2, vec![(0, 5, 0)], Orientation::Directed)
            .unwrap_err();
        assert!(matches!(err, Error::NonexistentItem(_)));
        assert_eq!(matrix.get(0, 1), Some(0));
    }

    #[test]
    fn test_rows_and_columns() {
        let mut matrix = AdjacencyMatrix::new(None);
        matrix
            .construct(3, vec![(0, 1, 0), (0, 2, 1), (2, 1, 2)], Orientation::Directed)
            .unwrap();
        assert_eq!(matrix.row(0).collect::<Vec<_>>(), vec![(1, 0), (2, 1)]);
        assert_eq!(matrix.column(1).collect::<Vec<_>>(), vec![(0, 0), (2, 2)]);
        assert_eq!(matrix.row(7).count(), 0);
    }
}
