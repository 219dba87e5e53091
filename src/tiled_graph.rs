use crate::error::JpsError;
use core::fmt;
use fxhash::{FxHashMap, FxHashSet};
use grid_util::point::Point;
use log::trace;
use std::cell::RefCell;

/// A directed edge between two nodes of a [TiledGraph]. Edges carry no cost of their own: the
/// heuristic passed to the search doubles as the distance between two nodes.
pub trait Connection: Clone {
    fn from_node(&self) -> Point;
    fn to_node(&self) -> Point;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DefaultConnection {
    from: Point,
    to: Point,
}

impl DefaultConnection {
    pub fn new(from: Point, to: Point) -> DefaultConnection {
        DefaultConnection { from, to }
    }
}

impl Connection for DefaultConnection {
    fn from_node(&self) -> Point {
        self.from
    }
    fn to_node(&self) -> Point {
        self.to
    }
}

/// A node living on a tile of a [TiledGraph]. Its coordinates double as its identity, so a
/// node must only ever be placed in the slot matching [x](Self::x) and [y](Self::y).
pub trait TiledNode {
    type Connection: Connection;

    fn x(&self) -> i32;
    fn y(&self) -> i32;
    /// The outgoing connections, in a stable order.
    fn connections(&self) -> &[Self::Connection];

    fn position(&self) -> Point {
        Point::new(self.x(), self.y())
    }
}

/// Plain [TiledNode] owning its outgoing [DefaultConnection]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridNode {
    x: i32,
    y: i32,
    connections: Vec<DefaultConnection>,
}

impl GridNode {
    pub fn new(x: i32, y: i32) -> GridNode {
        GridNode {
            x,
            y,
            connections: Vec::with_capacity(8),
        }
    }
    /// Adds an outgoing connection towards `to`.
    pub fn connect(&mut self, to: Point) {
        let from = self.position();
        self.connections.push(DefaultConnection::new(from, to));
    }
}

impl TiledNode for GridNode {
    type Connection = DefaultConnection;

    fn x(&self) -> i32 {
        self.x
    }
    fn y(&self) -> i32 {
        self.y
    }
    fn connections(&self) -> &[DefaultConnection] {
        &self.connections
    }
}

/// A graph whose nodes are laid out on a `width` x `height` grid of tiles.
pub trait TiledGraph {
    type Node: TiledNode;

    fn width(&self) -> i32;
    fn height(&self) -> i32;

    /// Returns the node at the given coordinates, [None] if the tile is empty.
    fn get_node(&self, x: i32, y: i32) -> Result<Option<&Self::Node>, JpsError>;

    /// Checks whether `source` has an outgoing connection towards `destination`. Both tiles must
    /// hold a node.
    fn has_connection(&self, source: Point, destination: Point) -> Result<bool, JpsError>;

    fn has_connection_at(&self, source: Point, x: i32, y: i32) -> Result<bool, JpsError> {
        self.has_connection(source, Point::new(x, y))
    }

    fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width() && y >= 0 && y < self.height()
    }

    /// Like [get_node](Self::get_node), but an empty tile is an error.
    fn require_node(&self, point: Point) -> Result<&Self::Node, JpsError> {
        self.get_node(point.x, point.y)?.ok_or_else(|| {
            JpsError::invalid(format!("no node at [{}, {}]", point.x, point.y))
        })
    }

    fn connections(
        &self,
        source: Point,
    ) -> Result<&[<Self::Node as TiledNode>::Connection], JpsError> {
        Ok(self.require_node(source)?.connections())
    }

    /// Checks for a connection from `source` to the tile at `(x, y)`, treating tiles outside the
    /// grid and empty tiles as unconnected.
    fn is_connected(&self, source: Point, x: i32, y: i32) -> bool {
        self.is_in_bounds(x, y) && self.has_connection_at(source, x, y).unwrap_or(false)
    }
}

#[derive(Clone, Debug, Default)]
struct ConnectionCache {
    processed: FxHashSet<Point>,
    connections: FxHashMap<(Point, Point), bool>,
}

/// [DefaultTiledGraph] stores its nodes in a flat array indexed by tile and answers adjacency
/// queries from a cache that is filled lazily, one source node at a time. Jump point search asks
/// for the same few connections over and over while scanning, which makes the cache pay off.
#[derive(Clone, Debug)]
pub struct DefaultTiledGraph<N> {
    width: i32,
    height: i32,
    nodes: Vec<Option<N>>,
    cache: RefCell<ConnectionCache>,
}

impl<N: TiledNode> DefaultTiledGraph<N> {
    pub fn new(width: i32, height: i32) -> Result<DefaultTiledGraph<N>, JpsError> {
        if width <= 0 {
            return Err(JpsError::invalid("width must be positive"));
        }
        if height <= 0 {
            return Err(JpsError::invalid("height must be positive"));
        }
        let len = width
            .checked_mul(height)
            .ok_or_else(|| JpsError::invalid(format!("a {width}x{height} grid is too large")))?;
        let mut nodes = Vec::new();
        nodes.resize_with(len as usize, || None);
        Ok(DefaultTiledGraph {
            width,
            height,
            nodes,
            cache: RefCell::new(ConnectionCache::default()),
        })
    }

    fn get_ix(&self, x: i32, y: i32) -> Result<usize, JpsError> {
        if self.is_in_bounds(x, y) {
            Ok((y * self.width + x) as usize)
        } else {
            Err(JpsError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Places a node on its tile, replacing any previous occupant. The cached connections of the
    /// tile are dropped, since the new node is a different source.
    pub fn set_node(&mut self, x: i32, y: i32, node: N) -> Result<(), JpsError> {
        let ix = self.get_ix(x, y)?;
        if node.x() != x || node.y() != y {
            return Err(JpsError::invalid(format!(
                "node at [{}, {}] cannot be placed at [{x}, {y}]",
                node.x(),
                node.y()
            )));
        }
        let point = Point::new(x, y);
        let cache = self.cache.get_mut();
        if cache.processed.remove(&point) {
            cache.connections.retain(|(source, _), _| *source != point);
        }
        self.nodes[ix] = Some(node);
        Ok(())
    }

    fn build_cached_connections(&self, source: Point, node: &N) {
        trace!("Caching connections of {:?}", source);
        let mut cache = self.cache.borrow_mut();
        for connection in node.connections() {
            cache.connections.insert((source, connection.to_node()), true);
        }
        cache.processed.insert(source);
    }
}

impl DefaultTiledGraph<GridNode> {
    /// Fills every tile with a [GridNode] and connects each passable tile to its passable
    /// 8-neighbors. Diagonal moves are always permitted, even between two blocked tiles.
    pub fn from_passable<F>(
        width: i32,
        height: i32,
        passable: F,
    ) -> Result<DefaultTiledGraph<GridNode>, JpsError>
    where
        F: Fn(i32, i32) -> bool,
    {
        let mut graph = DefaultTiledGraph::new(width, height)?;
        for x in 0..width {
            for y in 0..height {
                let mut node = GridNode::new(x, y);
                if passable(x, y) {
                    for neighbor in Point::new(x, y).moore_neighborhood() {
                        if graph.is_in_bounds(neighbor.x, neighbor.y)
                            && passable(neighbor.x, neighbor.y)
                        {
                            node.connect(neighbor);
                        }
                    }
                }
                graph.set_node(x, y, node)?;
            }
        }
        Ok(graph)
    }

    /// Builds a graph from rows of text, the first row being `y = 0`. A `#` marks a blocked tile,
    /// any other character a passable one.
    pub fn from_ascii(map: &str) -> Result<DefaultTiledGraph<GridNode>, JpsError> {
        let rows = map
            .lines()
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .map(|row| row.chars().map(|c| c != '#').collect::<Vec<bool>>())
            .collect::<Vec<_>>();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(JpsError::invalid("all rows must have the same length"));
        }
        let too_large = |_| JpsError::invalid("map is too large");
        let width = i32::try_from(width).map_err(too_large)?;
        let height = i32::try_from(rows.len()).map_err(too_large)?;
        DefaultTiledGraph::from_passable(width, height, |x, y| rows[y as usize][x as usize])
    }
}

impl<N: TiledNode> TiledGraph for DefaultTiledGraph<N> {
    type Node = N;

    fn width(&self) -> i32 {
        self.width
    }
    fn height(&self) -> i32 {
        self.height
    }
    fn get_node(&self, x: i32, y: i32) -> Result<Option<&N>, JpsError> {
        let ix = self.get_ix(x, y)?;
        Ok(self.nodes[ix].as_ref())
    }
    fn has_connection(&self, source: Point, destination: Point) -> Result<bool, JpsError> {
        let source_node = self
            .get_node(source.x, source.y)?
            .ok_or_else(|| JpsError::invalid("source node cannot be empty"))?;
        if self.get_node(destination.x, destination.y)?.is_none() {
            return Err(JpsError::invalid("destination node cannot be empty"));
        }
        if !self.cache.borrow().processed.contains(&source) {
            self.build_cached_connections(source, source_node);
        }
        let cache = self.cache.borrow();
        Ok(cache
            .connections
            .get(&(source, destination))
            .copied()
            .unwrap_or(false))
    }
}

impl<N: TiledNode> fmt::Display for DefaultTiledGraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height {
            let row = (0..self.width)
                .map(|x| match &self.nodes[(y * self.width + x) as usize] {
                    Some(node) if !node.connections().is_empty() => '.',
                    Some(_) => '#',
                    None => ' ',
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MAP: &str = "
        .....
        ..#..
        ..#..
        ###..
        .....
    ";

    fn test_graph() -> DefaultTiledGraph<GridNode> {
        DefaultTiledGraph::from_ascii(TEST_MAP).unwrap()
    }

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        for (w, h) in [(0, 10), (-1, 10), (10, 0), (10, -1)] {
            let result = DefaultTiledGraph::<GridNode>::new(w, h);
            assert!(matches!(result, Err(JpsError::InvalidArgument { .. })));
        }
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        for (w, h) in [(65536, 65536), (i32::MAX, 2), (2, i32::MAX)] {
            let result = DefaultTiledGraph::<GridNode>::new(w, h);
            assert!(matches!(result, Err(JpsError::InvalidArgument { .. })));
        }
    }

    #[test]
    fn set_node_out_of_bounds() {
        let mut graph = DefaultTiledGraph::new(10, 10).unwrap();
        for (x, y) in [(-1, 0), (10, 0), (0, -1), (0, 10)] {
            let result = graph.set_node(x, y, GridNode::new(x, y));
            assert!(matches!(result, Err(JpsError::OutOfBounds { .. })));
        }
    }

    #[test]
    fn get_node_out_of_bounds() {
        let graph = DefaultTiledGraph::<GridNode>::new(10, 10).unwrap();
        for (x, y) in [(-1, 0), (10, 0), (0, -1), (0, 10)] {
            assert!(matches!(
                graph.get_node(x, y),
                Err(JpsError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn set_node_with_mismatched_coordinates() {
        let mut graph = DefaultTiledGraph::new(10, 10).unwrap();
        let result = graph.set_node(1, 2, GridNode::new(2, 1));
        assert!(matches!(result, Err(JpsError::InvalidArgument { .. })));
        assert!(graph.get_node(1, 2).unwrap().is_none());
    }

    /// Every written node reads back unchanged and every other tile stays empty.
    #[test]
    fn set_then_get_node() {
        for (w, h) in [(1, 1), (3, 7), (8, 2)] {
            let mut graph = DefaultTiledGraph::new(w, h).unwrap();
            let mut node = GridNode::new(w - 1, h - 1);
            node.connect(p(0, 0));
            graph.set_node(w - 1, h - 1, node.clone()).unwrap();
            for x in 0..w {
                for y in 0..h {
                    let read = graph.get_node(x, y).unwrap();
                    if (x, y) == (w - 1, h - 1) {
                        assert_eq!(read, Some(&node));
                    } else {
                        assert!(read.is_none());
                    }
                }
            }
        }
    }

    #[test]
    fn has_connection_out_of_bounds() {
        let graph = test_graph();
        for (x, y) in [(-1, 0), (5, 0), (0, -1), (0, 5)] {
            assert!(matches!(
                graph.has_connection_at(p(0, 0), x, y),
                Err(JpsError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn has_connection_with_empty_tiles() {
        let mut graph = DefaultTiledGraph::new(3, 3).unwrap();
        let mut node = GridNode::new(0, 0);
        node.connect(p(1, 0));
        graph.set_node(0, 0, node).unwrap();
        assert!(matches!(
            graph.has_connection(p(2, 2), p(0, 0)),
            Err(JpsError::InvalidArgument { .. })
        ));
        assert!(matches!(
            graph.has_connection(p(0, 0), p(1, 0)),
            Err(JpsError::InvalidArgument { .. })
        ));
        assert!(!graph.is_connected(p(0, 0), 1, 0));
    }

    #[test]
    fn has_connection_when_connection_exists() {
        let graph = test_graph();
        assert!(graph.has_connection(p(0, 0), p(0, 1)).unwrap());
        assert!(graph.has_connection(p(0, 0), p(1, 0)).unwrap());
        assert!(graph.has_connection(p(0, 0), p(1, 1)).unwrap());

        assert!(graph.has_connection(p(0, 1), p(0, 0)).unwrap());
        assert!(graph.has_connection(p(1, 0), p(0, 0)).unwrap());
        assert!(graph.has_connection(p(1, 1), p(0, 0)).unwrap());
    }

    #[test]
    fn has_connection_when_connection_does_not_exist() {
        let graph = test_graph();
        assert!(!graph.has_connection(p(1, 1), p(2, 1)).unwrap());
        assert!(!graph.has_connection(p(2, 1), p(1, 1)).unwrap());
        assert!(!graph.has_connection(p(0, 0), p(2, 2)).unwrap());
    }

    /// The first query fills the cache, the following ones are served from it.
    #[test]
    fn has_connection_is_consistent() {
        let graph = test_graph();
        for _ in 0..10 {
            assert!(graph.has_connection(p(0, 0), p(0, 1)).unwrap());
            assert!(!graph.has_connection(p(0, 0), p(2, 2)).unwrap());
        }
        assert!(graph.cache.borrow().processed.contains(&p(0, 0)));
    }

    #[test]
    fn replacing_a_node_drops_its_cached_connections() {
        let mut graph = test_graph();
        assert!(graph.has_connection(p(0, 0), p(1, 0)).unwrap());
        graph.set_node(0, 0, GridNode::new(0, 0)).unwrap();
        assert!(!graph.has_connection(p(0, 0), p(1, 0)).unwrap());
        assert!(graph.has_connection(p(1, 0), p(0, 0)).unwrap());
    }

    #[test]
    fn ascii_rows_must_have_equal_length() {
        let result = DefaultTiledGraph::from_ascii("...\n..\n");
        assert!(matches!(result, Err(JpsError::InvalidArgument { .. })));
    }

    #[test]
    fn display_marks_blocked_tiles() {
        let graph = test_graph();
        let expected = ".....\n..#..\n..#..\n###..\n.....\n";
        assert_eq!(graph.to_string(), expected);
    }
}
