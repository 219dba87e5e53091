//! The two pluggable halves of jump point search: which neighbors of a node are worth looking at
//! given the direction it was entered from, and how far to jump in the direction of one of them.
//! Both rely on the same notion of a forced neighbor, defined once in [forced_neighbors].
use crate::error::JpsError;
use crate::tiled_graph::TiledGraph;
use crate::N_SMALLVEC_SIZE;
use grid_util::direction::Direction;
use grid_util::point::Point;
use smallvec::SmallVec;

pub mod jumping;
pub mod pruning;

pub use jumping::DiagonalAlwaysPermittedJumping;
pub use pruning::DiagonalAlwaysPermittedPruning;

pub type Neighbors = SmallVec<[Point; N_SMALLVEC_SIZE]>;

/// Decides which neighbors of a node are kept as candidates for jumping.
pub trait NeighborPruningStrategy {
    /// Returns the pruned neighbors of `node`, given the node it was reached from. Without a
    /// parent (the start of a search) nothing can be pruned and every connected neighbor is
    /// returned.
    fn pruned_neighbors<G: TiledGraph>(
        &self,
        graph: &G,
        node: Point,
        parent: Option<Point>,
    ) -> Result<Neighbors, JpsError>;
}

/// Finds the next jump point when moving from a source node towards one of its neighbors.
pub trait JumpingStrategy {
    /// Scans from `source` through `jump` and onwards in the same direction, returning the first
    /// node that is the `destination` or has a forced neighbor, or [None] on hitting a dead end.
    /// `jump` must be a connected neighbor of `source`.
    fn jump_point<G: TiledGraph>(
        &self,
        graph: &G,
        source: Point,
        jump: Point,
        destination: Point,
    ) -> Result<Option<Point>, JpsError>;
}

/// The neighbor at `node + open` is forced when it is connected while `node + blocked`, through
/// which it would otherwise be reached, is not.
fn is_forced<G: TiledGraph>(
    graph: &G,
    node: Point,
    open: Direction,
    blocked: Direction,
) -> bool {
    let (open, blocked) = (node + open, node + blocked);
    graph.is_connected(node, open.x, open.y) && !graph.is_connected(node, blocked.x, blocked.y)
}

/// Directions `(open, blocked)` of the two possible forced neighbors when moving in `dir`, one on
/// each side. Moving straight, the tile diagonally ahead is forced when the tile beside the node is
/// not connected. Moving diagonally, the tile diagonally behind on either side is forced when the
/// straight tile between it and the node is not connected.
fn forced_candidates(dir: Direction) -> [(Direction, Direction); 2] {
    let (open, blocked) = if dir.diagonal() { (2, 3) } else { (1, 2) };
    [
        (dir.rotate_cw(open), dir.rotate_cw(blocked)),
        (dir.rotate_ccw(open), dir.rotate_ccw(blocked)),
    ]
}

/// The forced neighbors of `node` when it is entered moving in `dir`.
pub fn forced_neighbors<G: TiledGraph>(graph: &G, node: Point, dir: Direction) -> Neighbors {
    forced_candidates(dir)
        .into_iter()
        .filter(|&(open, blocked)| is_forced(graph, node, open, blocked))
        .map(|(open, _)| node + open)
        .collect()
}

/// Whether `node` has any forced neighbor when entered moving in `dir`.
pub fn has_forced_neighbor<G: TiledGraph>(graph: &G, node: Point, dir: Direction) -> bool {
    forced_candidates(dir)
        .into_iter()
        .any(|(open, blocked)| is_forced(graph, node, open, blocked))
}
