//! # tiled_jps
//!
//! [Jump Point Search](https://en.wikipedia.org/wiki/Jump_point_search) over graphs whose nodes
//! live on the tiles of a grid. Instead of expanding every neighbor like A*, the search only
//! expands nodes where the optimal path may change direction: the goal, nodes with a
//! [forced neighbor](strategy::forced_neighbors) and dead ends. Which neighbors are kept and how
//! far a scan jumps are both pluggable through [NeighborPruningStrategy] and [JumpingStrategy].
//!
//! Edges carry no cost; the [Heuristic] passed to a search doubles as the distance between two
//! nodes on a straight or diagonal line. The adjacency queries issued while scanning are answered
//! from a per-node cache inside [DefaultTiledGraph].
//!
//! ```
//! use tiled_jps::{DefaultTiledGraph, JumpPointPathFinder, JumpPointSearch, Point};
//!
//! let graph = DefaultTiledGraph::from_ascii(".....\n..#..\n..#..\n###..\n.....").unwrap();
//! let octile = |a: Point, b: Point| {
//!     let (dx, dy) = ((a.x - b.x).abs(), (a.y - b.y).abs());
//!     (6 * (dx - dy).abs() + 14 * (dx + dy)) / 2
//! };
//! let mut jps = JumpPointSearch::<_, i32>::new(&graph);
//! let mut path = Vec::new();
//! assert!(jps
//!     .search_node_path(Point::new(0, 0), Point::new(4, 4), &octile, &mut path)
//!     .unwrap());
//! assert_eq!(path.last(), Some(&Point::new(4, 4)));
//! ```
pub mod error;
pub mod search_context;
pub mod solver;
pub mod strategy;
pub mod tiled_graph;

pub use error::JpsError;
pub use grid_util::point::Point;
pub use solver::jps::{jump_points_to_path, JumpPointSearch};
pub use solver::{Heuristic, JumpPointPathFinder};
pub use strategy::{
    DiagonalAlwaysPermittedJumping, DiagonalAlwaysPermittedPruning, JumpingStrategy,
    NeighborPruningStrategy,
};
pub use tiled_graph::{
    Connection, DefaultConnection, DefaultTiledGraph, GridNode, TiledGraph, TiledNode,
};

/// Inline capacity of the neighbor buffers filled by the pruning strategies. The 8-neighborhood
/// of a tile always fits.
pub const N_SMALLVEC_SIZE: usize = 8;
