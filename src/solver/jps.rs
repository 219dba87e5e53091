use core::fmt::Debug;
use grid_util::point::Point;
use itertools::Itertools;
use log::{debug, trace};
use num_traits::Zero;

use crate::error::JpsError;
use crate::search_context::{NodeRecordCategory, SearchContext};
use crate::solver::{Heuristic, JumpPointPathFinder};
use crate::strategy::{
    DiagonalAlwaysPermittedJumping, DiagonalAlwaysPermittedPruning, JumpingStrategy,
    NeighborPruningStrategy,
};
use crate::tiled_graph::{Connection, TiledGraph, TiledNode};

/// Turns a chain of jump points into a path on the grid which can be followed step by step.
/// Consecutive jump points are expected to lie on a shared straight or diagonal line.
pub fn jump_points_to_path(jump_points: &[Point]) -> Vec<Point> {
    let mut path = Vec::new();
    let Some((&first, rest)) = jump_points.split_first() else {
        return path;
    };
    path.push(first);
    let mut current = first;
    for &next in rest {
        let delta = next - current;
        debug_assert!(
            delta.x == 0 || delta.y == 0 || delta.x.abs() == delta.y.abs(),
            "jump points are not on a shared line"
        );
        while current.move_distance(&next) >= 1 {
            current = current + current.dir_obj(&next);
            path.push(current);
        }
    }
    path
}

/// Jump point search over a borrowed [TiledGraph]. Which neighbors get expanded and how far a
/// scan jumps are delegated to the pruning strategy `P` and the jumping strategy `J`; the engine
/// runs the A* loop over the resulting jump points.
///
/// The engine keeps its node records between searches, so reusing one engine for many searches
/// on the same graph avoids reallocating them.
pub struct JumpPointSearch<
    'g,
    G,
    C,
    P = DiagonalAlwaysPermittedPruning,
    J = DiagonalAlwaysPermittedJumping,
> {
    graph: &'g G,
    pruning: P,
    jumping: J,
    context: SearchContext<C>,
}

impl<'g, G, C> JumpPointSearch<'g, G, C>
where
    G: TiledGraph,
    C: Zero + Ord + Copy + Debug,
{
    pub fn new(graph: &'g G) -> Self {
        JumpPointSearch::with_strategies(
            graph,
            DiagonalAlwaysPermittedPruning,
            DiagonalAlwaysPermittedJumping,
        )
    }
}

impl<'g, G, C, P, J> JumpPointSearch<'g, G, C, P, J>
where
    G: TiledGraph,
    C: Zero + Ord + Copy + Debug,
    P: NeighborPruningStrategy,
    J: JumpingStrategy,
{
    pub fn with_strategies(graph: &'g G, pruning: P, jumping: J) -> Self {
        JumpPointSearch {
            graph,
            pruning,
            jumping,
            context: SearchContext::new(),
        }
    }

    /// Cost of reaching `goal` in the most recent search, if that search closed it.
    pub fn path_cost(&self, goal: Point) -> Option<C> {
        self.context
            .get(goal)
            .filter(|record| record.category == NodeRecordCategory::Closed)
            .map(|record| record.cost_so_far)
    }

    fn initialize_search<H: Heuristic<C>>(&mut self, start: Point, goal: Point, heuristic: &H) {
        self.context.initialize(start, heuristic.estimate(start, goal));
    }

    /// Runs the search loop until `goal` is closed or the open list runs dry.
    fn search<H: Heuristic<C>>(
        &mut self,
        start: Point,
        goal: Point,
        heuristic: &H,
    ) -> Result<bool, JpsError> {
        self.graph.require_node(start)?;
        self.graph.require_node(goal)?;
        debug!("Searching jump points from {:?} to {:?}", start, goal);
        self.initialize_search(start, goal, heuristic);
        let mut expanded = 0usize;
        while let Some(index) = self.context.pop_open() {
            let record = self.context.record(index);
            let (node, parent, cost) = (record.node, record.parent, record.cost_so_far);
            if node == goal {
                debug!(
                    "Reached {:?} at cost {:?} after expanding {} nodes",
                    goal, cost, expanded
                );
                return Ok(true);
            }
            expanded += 1;
            trace!("Expanding {:?} at cost {:?}", node, cost);
            self.identify_successors(node, parent, cost, goal, heuristic)?;
        }
        debug!(
            "No path from {:?} to {:?} after expanding {} nodes",
            start, goal, expanded
        );
        Ok(false)
    }

    fn identify_successors<H: Heuristic<C>>(
        &mut self,
        node: Point,
        parent: Option<Point>,
        cost: C,
        goal: Point,
        heuristic: &H,
    ) -> Result<(), JpsError> {
        let neighbors = self.pruning.pruned_neighbors(self.graph, node, parent)?;
        for neighbor in neighbors {
            let Some(jump) = self.jumping.jump_point(self.graph, node, neighbor, goal)? else {
                continue;
            };
            let index = self.context.record_index(jump);
            let record = self.context.record(index);
            let tentative_cost = cost + heuristic.estimate(node, jump);
            let improves = match record.category {
                NodeRecordCategory::Closed => false,
                NodeRecordCategory::Open => tentative_cost < record.cost_so_far,
                NodeRecordCategory::Unvisited => true,
            };
            if improves {
                let estimated_cost = tentative_cost + heuristic.estimate(jump, goal);
                self.context.open(index, Some(node), tentative_cost, estimated_cost);
            }
        }
        Ok(())
    }

    /// The jump points of the most recent search, if it reached `goal` from somewhere else.
    fn backtrack(&self, goal: Point) -> Option<Vec<Point>> {
        self.context.backtrack(goal)
    }
}

impl<'g, G, C, P, J> JumpPointPathFinder<C> for JumpPointSearch<'g, G, C, P, J>
where
    G: TiledGraph,
    C: Zero + Ord + Copy + Debug,
    P: NeighborPruningStrategy,
    J: JumpingStrategy,
{
    type Connection = <G::Node as TiledNode>::Connection;

    fn search_connection_path<H: Heuristic<C>>(
        &mut self,
        start: Point,
        goal: Point,
        heuristic: &H,
        out: &mut Vec<Self::Connection>,
    ) -> Result<bool, JpsError> {
        if !self.search(start, goal, heuristic)? {
            return Ok(false);
        }
        let Some(jump_points) = self.backtrack(goal) else {
            return Ok(false);
        };
        let path = jump_points_to_path(&jump_points);
        let mut connections = Vec::with_capacity(path.len() - 1);
        for (from, to) in path.into_iter().tuple_windows() {
            let connection = self
                .graph
                .connections(from)?
                .iter()
                .find(|connection| connection.to_node() == to)
                .cloned()
                .ok_or_else(|| {
                    JpsError::invalid(format!(
                        "no connection from [{}, {}] to [{}, {}]",
                        from.x, from.y, to.x, to.y
                    ))
                })?;
            connections.push(connection);
        }
        out.extend(connections);
        Ok(true)
    }

    fn search_node_path<H: Heuristic<C>>(
        &mut self,
        start: Point,
        goal: Point,
        heuristic: &H,
        out: &mut Vec<Point>,
    ) -> Result<bool, JpsError> {
        if !self.search(start, goal, heuristic)? {
            return Ok(false);
        }
        match self.backtrack(goal) {
            Some(jump_points) => {
                out.extend(jump_points_to_path(&jump_points));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn search_jump_points<H: Heuristic<C>>(
        &mut self,
        start: Point,
        goal: Point,
        heuristic: &H,
        out: &mut Vec<Point>,
    ) -> Result<bool, JpsError> {
        if !self.search(start, goal, heuristic)? {
            return Ok(false);
        }
        match self.backtrack(goal) {
            Some(jump_points) => {
                out.extend(jump_points);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
