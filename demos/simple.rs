use tiled_jps::{DefaultTiledGraph, JpsError, JumpPointPathFinder, JumpPointSearch, Point};

// In this example a path is found on a graph with shape
// #####
// #S  #
// # # #
// #  E#
// #####
// S marks the start
// E marks the end
fn main() -> Result<(), JpsError> {
    let graph = DefaultTiledGraph::from_ascii(
        "
        #####
        #...#
        #.#.#
        #...#
        #####
        ",
    )?;
    let octile = |a: Point, b: Point| {
        let (dx, dy) = ((a.x - b.x).abs(), (a.y - b.y).abs());
        (6 * (dx - dy).abs() + 14 * (dx + dy)) / 2
    };
    let mut jps = JumpPointSearch::<_, i32>::new(&graph);
    let start = Point::new(1, 1);
    let end = Point::new(3, 3);
    let mut path = Vec::new();
    if jps.search_node_path(start, end, &octile, &mut path)? {
        println!("A path has been found:");
        for p in path {
            println!("{:?}", p);
        }
    }
    Ok(())
}
