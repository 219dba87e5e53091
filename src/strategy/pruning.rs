use grid_util::direction::Direction;
use grid_util::point::Point;
use smallvec::{smallvec, SmallVec};

use crate::error::JpsError;
use crate::strategy::{forced_neighbors, NeighborPruningStrategy, Neighbors};
use crate::tiled_graph::{Connection, TiledGraph};

/// Pruning rules of jump point search for graphs that allow a diagonal move whenever the
/// diagonal tile itself is connected, regardless of the two tiles beside it. On the map
///
/// ```text
///  01234
/// 0.#...
/// 1..#..
/// 2...#.
/// ```
///
/// moving from (1, 1) to (2, 0) is considered legal.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiagonalAlwaysPermittedPruning;

impl NeighborPruningStrategy for DiagonalAlwaysPermittedPruning {
    fn pruned_neighbors<G: TiledGraph>(
        &self,
        graph: &G,
        node: Point,
        parent: Option<Point>,
    ) -> Result<Neighbors, JpsError> {
        let connections = graph.connections(node)?;
        let parent = match parent {
            None => return Ok(connections.iter().map(|c| c.to_node()).collect()),
            Some(parent) if parent == node => {
                return Err(JpsError::invalid("parent node must be different than node"))
            }
            Some(parent) => parent,
        };

        let dir = parent.dir_obj(&node);
        let natural: SmallVec<[Direction; 3]> = if dir.diagonal() {
            smallvec![dir.y_dir(), dir.x_dir(), dir]
        } else {
            smallvec![dir]
        };
        let mut neighbors = natural
            .into_iter()
            .map(|d| node + d)
            .filter(|p| graph.is_connected(node, p.x, p.y))
            .collect::<Neighbors>();
        neighbors.extend(forced_neighbors(graph, node, dir));
        Ok(neighbors)
    }
}
