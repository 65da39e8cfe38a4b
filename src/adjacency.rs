//! Encoding of a posed shape as connector pairings between adjacent modules.

use crate::connection::{ConnectionConfig, ConnectionLabel, ConnectionPair};
use crate::error::{Error, Result};
use crate::pose::{Direction, PoseAssignment};
use crate::shape::{Shape, neighbors};
use std::collections::HashMap;

/// The 4-connectivity graph of a shape, by cell index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyGraph {
    /// For each cell index, member neighbor indices in up/down/left/right order.
    adjacent: Vec<Vec<usize>>,
}

impl AdjacencyGraph {
    pub fn new(shape: &Shape) -> Self {
        let index: HashMap<_, _> = shape
            .cells()
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i))
            .collect();
        let adjacent = shape
            .cells()
            .iter()
            .map(|&cell| {
                neighbors(cell)
                    .iter()
                    .filter_map(|n| index.get(n).copied())
                    .collect()
            })
            .collect();
        Self { adjacent }
    }

    pub fn neighbors_of(&self, index: usize) -> &[usize] {
        self.adjacent.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacent.iter().map(Vec::len).sum::<usize>() / 2
    }
}

/// Turns pose assignments of one shape into [`ConnectionConfig`]s.
///
/// The adjacency graph is built once; each [`encode`](Self::encode) call is a
/// single pass over the cells.
#[derive(Debug)]
pub struct AdjacencyEncoder<'a> {
    shape: &'a Shape,
    graph: AdjacencyGraph,
}

impl<'a> AdjacencyEncoder<'a> {
    pub fn new(shape: &'a Shape) -> Self {
        Self {
            shape,
            graph: AdjacencyGraph::new(shape),
        }
    }

    pub fn graph(&self) -> &AdjacencyGraph {
        &self.graph
    }

    /// Emits one connector pair per adjacent cell pair.
    ///
    /// Cells are visited in shape order. Each edge is emitted when its first
    /// endpoint is visited, with that endpoint as the pair's first label.
    pub fn encode(&self, assignment: &PoseAssignment) -> Result<ConnectionConfig> {
        let cells = self.shape.cells();
        if assignment.len() != cells.len() {
            return Err(Error::InvalidShape(format!(
                "pose assignment has {} entries for a shape of {} cells",
                assignment.len(),
                cells.len()
            )));
        }
        let poses = assignment.poses();

        let mut visited = vec![false; cells.len()];
        let mut connections = Vec::with_capacity(self.graph.edge_count());
        for (current, &cell) in cells.iter().enumerate() {
            visited[current] = true;
            for &neighbor in self.graph.neighbors_of(current) {
                if visited[neighbor] {
                    continue;
                }
                let other = cells[neighbor];
                let (dir_current, dir_neighbor) = Direction::from_offset(cell - other).ok_or(
                    Error::AdjacencyInvariant {
                        current: cell,
                        neighbor: other,
                    },
                )?;
                connections.push(ConnectionPair(
                    ConnectionLabel::new(current, dir_current.side(poses[current])),
                    ConnectionLabel::new(neighbor, dir_neighbor.side(poses[neighbor])),
                ));
            }
        }

        Ok(ConnectionConfig {
            poses: assignment.clone(),
            connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Pose, PoseEnumerator};
    use glam::IVec2;

    fn shape(list: &[(i32, i32)]) -> Shape {
        Shape::new(list.iter().map(|&(r, c)| IVec2::new(r, c)).collect(), "").unwrap()
    }

    fn assignment(values: &[u8]) -> PoseAssignment {
        values
            .iter()
            .map(|&v| Pose::try_from(v).unwrap())
            .collect()
    }

    #[test]
    fn test_domino_worked_example() {
        let s = shape(&[(0, 0), (0, 1)]);
        let config = AdjacencyEncoder::new(&s).encode(&assignment(&[0, 1])).unwrap();
        assert_eq!(config.labels(), vec![["0R".to_string(), "1B".to_string()]]);
    }

    #[test]
    fn test_vertical_domino() {
        // dir = (0,0) - (1,0) = (-1, 0): up(0) = B, down(0) = T
        let s = shape(&[(0, 0), (1, 0)]);
        let config = AdjacencyEncoder::new(&s).encode(&assignment(&[0, 0])).unwrap();
        assert_eq!(config.labels(), vec![["0B".to_string(), "1T".to_string()]]);
    }

    #[test]
    fn test_single_cell_is_empty() {
        let s = shape(&[(0, 0)]);
        let config = AdjacencyEncoder::new(&s).encode(&assignment(&[2])).unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_one_pair_per_edge() {
        // 2x2 square has 4 edges, the T-tetromino 3.
        for (cells, edges) in [
            (&[(0, 0), (0, 1), (1, 0), (1, 1)][..], 4),
            (&[(0, 0), (0, 1), (0, 2), (1, 1)][..], 3),
        ] {
            let s = shape(cells);
            let encoder = AdjacencyEncoder::new(&s);
            assert_eq!(encoder.graph().edge_count(), edges);
            for a in PoseEnumerator::new(s.len()).unwrap() {
                assert_eq!(encoder.encode(&a).unwrap().len(), edges);
            }
        }
    }

    #[test]
    fn test_edge_attributed_to_first_visited() {
        // Cell 0 sits below cell 1, so cell 0 owns the edge with dir (1, 0).
        let s = shape(&[(1, 0), (0, 0)]);
        let config = AdjacencyEncoder::new(&s).encode(&assignment(&[1, 3])).unwrap();
        // down(1) = L, up(3) = L
        assert_eq!(config.labels(), vec![["0L".to_string(), "1L".to_string()]]);
    }

    #[test]
    fn test_diagonal_pair_violates_invariant() {
        let s = shape(&[(0, 0), (1, 1)]);
        let encoder = AdjacencyEncoder {
            shape: &s,
            graph: AdjacencyGraph {
                adjacent: vec![vec![1], vec![0]],
            },
        };
        let err = encoder.encode(&assignment(&[0, 0])).unwrap_err();
        assert!(matches!(
            err,
            Error::AdjacencyInvariant { current, neighbor }
                if current == IVec2::new(0, 0) && neighbor == IVec2::new(1, 1)
        ));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let s = shape(&[(0, 0), (0, 1)]);
        let err = AdjacencyEncoder::new(&s).encode(&assignment(&[0])).unwrap_err();
        assert!(matches!(err, Error::InvalidShape(_)));
    }
}
