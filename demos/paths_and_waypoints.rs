use tiled_jps::{
    jump_points_to_path, Connection, DefaultTiledGraph, JpsError, JumpPointPathFinder,
    JumpPointSearch, Point,
};

/// This example illustrates the three kinds of output a search can produce. Jump points are the
/// minimal representation, which can be expanded using [jump_points_to_path].
/// A path is found on a 5x5 graph with shape
/// S....
/// .#...
/// .....
/// .....
/// ....E
/// where
/// - S marks the start
/// - E marks the end
fn main() -> Result<(), JpsError> {
    let graph = DefaultTiledGraph::from_passable(5, 5, |x, y| (x, y) != (1, 1))?;
    println!("{}", graph);
    let octile = |a: Point, b: Point| {
        let (dx, dy) = ((a.x - b.x).abs(), (a.y - b.y).abs());
        (6 * (dx - dy).abs() + 14 * (dx + dy)) / 2
    };
    let mut jps = JumpPointSearch::<_, i32>::new(&graph);
    let start = Point::new(0, 0);
    let end = Point::new(4, 4);

    let mut jump_points = Vec::new();
    if jps.search_jump_points(start, end, &octile, &mut jump_points)? {
        println!("Jump points:");
        for p in &jump_points {
            println!("{:?}", p);
        }
        println!("Expanded path:");
        for p in jump_points_to_path(&jump_points) {
            println!("{:?}", p);
        }
        println!("Cost: {:?}", jps.path_cost(end));
    }

    // The same path, expanded by the search itself
    let mut path = Vec::new();
    jps.search_node_path(start, end, &octile, &mut path)?;
    println!("{:?}", path);

    let mut connections = Vec::new();
    jps.search_connection_path(start, end, &octile, &mut connections)?;
    for connection in connections {
        println!("{:?} -> {:?}", connection.from_node(), connection.to_node());
    }
    Ok(())
}
