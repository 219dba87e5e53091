use grid_util::point::Point;

use crate::error::JpsError;
use crate::strategy::{has_forced_neighbor, JumpingStrategy};
use crate::tiled_graph::TiledGraph;

/// Jumping counterpart of [DiagonalAlwaysPermittedPruning](crate::DiagonalAlwaysPermittedPruning).
#[derive(Clone, Copy, Debug, Default)]
pub struct DiagonalAlwaysPermittedJumping;

impl JumpingStrategy for DiagonalAlwaysPermittedJumping {
    fn jump_point<G: TiledGraph>(
        &self,
        graph: &G,
        source: Point,
        jump: Point,
        destination: Point,
    ) -> Result<Option<Point>, JpsError> {
        if source == jump {
            return Err(JpsError::invalid("jump node must be different than source"));
        }
        if !graph.has_connection(source, jump)? {
            return Err(JpsError::invalid("jump node must be a neighbor of source"));
        }
        Ok(scan(graph, source, jump, destination))
    }
}

/// Walks from `from` through `candidate` until reaching the destination, a node with a forced
/// neighbor or a dead end. Moving diagonally, a node also counts as a jump point when one of the
/// two straight scans leaving it finds one; those scans never branch further.
fn scan<G: TiledGraph>(
    graph: &G,
    mut from: Point,
    mut candidate: Point,
    destination: Point,
) -> Option<Point> {
    let dir = from.dir_obj(&candidate);
    debug_assert_eq!(
        from.move_distance(&candidate),
        1,
        "scan must start between adjacent tiles"
    );
    loop {
        if !graph.is_connected(from, candidate.x, candidate.y) {
            return None;
        }
        if candidate == destination || has_forced_neighbor(graph, candidate, dir) {
            return Some(candidate);
        }
        if dir.diagonal()
            && (scan(graph, candidate, candidate + dir.x_dir(), destination).is_some()
                || scan(graph, candidate, candidate + dir.y_dir(), destination).is_some())
        {
            return Some(candidate);
        }
        from = candidate;
        candidate = candidate + dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiled_graph::{DefaultTiledGraph, GridNode};

    const TEST_MAP: &str = "
        .........#..............
        .........#..#.#.........
        .........#............#.
        .........#..............
        .........#............#.
        ##########.......#.#....
        ........................
        ........................
        ..#.....................
        ..#.....................
        ........................
        ........................
        ........................
        ...####.................
        ........................
    ";

    fn graph() -> DefaultTiledGraph<GridNode> {
        DefaultTiledGraph::from_ascii(TEST_MAP).unwrap()
    }

    /// Runs every `(source, jump, destination, expected)` case against the test map.
    fn check(cases: &[((i32, i32), (i32, i32), (i32, i32), Option<(i32, i32)>)]) {
        let graph = graph();
        for &(source, jump, destination, expected) in cases {
            let result = DiagonalAlwaysPermittedJumping
                .jump_point(
                    &graph,
                    Point::new(source.0, source.1),
                    Point::new(jump.0, jump.1),
                    Point::new(destination.0, destination.1),
                )
                .unwrap();
            assert_eq!(
                result.map(|p| (p.x, p.y)),
                expected,
                "jumping from {:?} over {:?} towards {:?}",
                source,
                jump,
                destination
            );
        }
    }

    #[test]
    fn jump_onto_source() {
        let graph = graph();
        let p = Point::new(0, 0);
        let result = DiagonalAlwaysPermittedJumping.jump_point(&graph, p, p, Point::new(2, 0));
        assert!(matches!(result, Err(JpsError::InvalidArgument { .. })));
    }

    #[test]
    fn jump_over_non_neighbor() {
        let graph = graph();
        let result = DiagonalAlwaysPermittedJumping.jump_point(
            &graph,
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(3, 0),
        );
        assert!(matches!(result, Err(JpsError::InvalidArgument { .. })));
    }

    /// Blocked neighbors exist as nodes, but are not connected to anything.
    #[test]
    fn jump_into_wall() {
        let graph = graph();
        let result = DiagonalAlwaysPermittedJumping.jump_point(
            &graph,
            Point::new(8, 0),
            Point::new(9, 0),
            Point::new(12, 0),
        );
        assert!(matches!(result, Err(JpsError::InvalidArgument { .. })));
    }

    #[test]
    fn horizontal_towards_destination() {
        check(&[
            ((0, 0), (1, 0), (1, 0), Some((1, 0))),
            ((0, 0), (1, 0), (8, 0), Some((8, 0))),
            ((0, 0), (1, 0), (8, 2), None),
        ]);
    }

    /// Moving left along row 2, the wall at (14, 1) forces (13, 1) and stops the scan at (14, 2),
    /// whether the destination lies on the row or not.
    #[test]
    fn horizontal_forced_neighbors() {
        check(&[
            ((19, 2), (18, 2), (10, 2), Some((14, 2))),
            ((11, 4), (12, 4), (21, 4), Some((17, 4))),
            ((11, 3), (12, 3), (23, 3), Some((22, 3))),
            ((19, 2), (18, 2), (10, 1), Some((14, 2))),
            ((11, 4), (12, 4), (21, 5), Some((17, 4))),
            ((11, 3), (12, 3), (18, 5), Some((22, 3))),
        ]);
    }

    #[test]
    fn vertical_towards_destination() {
        check(&[
            ((0, 0), (0, 1), (0, 1), Some((0, 1))),
            ((0, 0), (0, 1), (0, 4), Some((0, 4))),
            ((0, 0), (0, 1), (8, 2), None),
        ]);
    }

    #[test]
    fn vertical_forced_neighbors() {
        check(&[
            ((15, 5), (15, 4), (15, 0), Some((15, 1))),
            ((11, 5), (11, 4), (11, 0), Some((11, 1))),
            ((13, 5), (13, 4), (13, 0), Some((13, 1))),
            ((20, 0), (20, 1), (23, 3), Some((20, 5))),
            ((16, 0), (16, 1), (23, 3), Some((16, 5))),
            ((18, 0), (18, 1), (12, 3), Some((18, 5))),
        ]);
    }

    /// A diagonal scan stops where one of its straight branches reaches the destination.
    #[test]
    fn diagonal_towards_destination() {
        check(&[
            ((0, 0), (1, 1), (1, 1), Some((1, 1))),
            ((0, 0), (1, 1), (4, 4), Some((4, 4))),
            ((0, 0), (1, 1), (8, 3), Some((3, 3))),
            ((0, 0), (1, 1), (3, 4), Some((3, 3))),
        ]);
    }

    #[test]
    fn diagonal_forced_neighbors() {
        check(&[
            ((7, 9), (6, 8), (0, 8), Some((5, 7))),
            ((3, 9), (4, 8), (6, 6), Some((6, 6))),
            ((3, 7), (4, 8), (5, 14), Some((7, 11))),
            ((4, 12), (5, 11), (9, 7), Some((9, 7))),
            ((3, 9), (4, 10), (23, 14), Some((7, 13))),
        ]);
    }

    #[test]
    fn scan_off_the_grid() {
        check(&[
            ((21, 0), (22, 0), (0, 14), None),
            ((22, 13), (23, 14), (0, 0), None),
        ]);
    }
}
