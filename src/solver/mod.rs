use grid_util::point::Point;

use crate::error::JpsError;

pub mod jps;

/// Estimates the cost of travelling between two nodes. Jump point search also uses it as the
/// exact cost between a node and the jump point reached from it, so it should be exact for
/// straight and diagonal lines and never overestimate otherwise.
pub trait Heuristic<C> {
    fn estimate(&self, from: Point, to: Point) -> C;
}

impl<C, F> Heuristic<C> for F
where
    F: Fn(Point, Point) -> C,
{
    fn estimate(&self, from: Point, to: Point) -> C {
        self(from, to)
    }
}

/// Path finder over jump points. Each search appends its result to `out` and returns whether a
/// path was found; on `Ok(false)` and on errors `out` is left as it was.
pub trait JumpPointPathFinder<C> {
    type Connection;

    /// Finds a path as the sequence of graph connections leading from `start` to `goal`.
    fn search_connection_path<H: Heuristic<C>>(
        &mut self,
        start: Point,
        goal: Point,
        heuristic: &H,
        out: &mut Vec<Self::Connection>,
    ) -> Result<bool, JpsError>;

    /// Finds a path as every node visited between `start` and `goal`, both included.
    fn search_node_path<H: Heuristic<C>>(
        &mut self,
        start: Point,
        goal: Point,
        heuristic: &H,
        out: &mut Vec<Point>,
    ) -> Result<bool, JpsError>;

    /// Finds a path as only the jump points between `start` and `goal`, both included.
    fn search_jump_points<H: Heuristic<C>>(
        &mut self,
        start: Point,
        goal: Point,
        heuristic: &H,
        out: &mut Vec<Point>,
    ) -> Result<bool, JpsError>;
}
