//! Per-engine bookkeeping for the jump point search loop: a pool of node records keyed by node,
//! and the open list ordering them. The open list follows the
//! [pathfinding astar](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! approach of pushing duplicate heap entries instead of decreasing keys in place; entries that no
//! longer match their record are skipped when popped.
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRecordCategory {
    Unvisited,
    Open,
    Closed,
}

/// Search state of a single node. Records outlive the search that created them and are reset
/// lazily once a later search touches them.
#[derive(Clone, Debug)]
pub struct NodeRecord<C> {
    pub node: Point,
    pub parent: Option<Point>,
    pub category: NodeRecordCategory,
    pub cost_so_far: C,
    search_id: u32,
}

impl<C: Zero> NodeRecord<C> {
    fn new(node: Point, search_id: u32) -> NodeRecord<C> {
        NodeRecord {
            node,
            parent: None,
            category: NodeRecordCategory::Unvisited,
            cost_so_far: C::zero(),
            search_id,
        }
    }

    fn reset(&mut self, search_id: u32) {
        self.parent = None;
        self.category = NodeRecordCategory::Unvisited;
        self.cost_so_far = C::zero();
        self.search_id = search_id;
    }
}

struct SmallestCostHolder<C> {
    estimated_cost: C,
    cost: C,
    index: usize,
}

impl<C: PartialEq> Eq for SmallestCostHolder<C> {}

impl<C: PartialEq> PartialEq for SmallestCostHolder<C> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.cost.eq(&other.cost)
    }
}

impl<C: Ord> PartialOrd for SmallestCostHolder<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for SmallestCostHolder<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first, ties go to the node furthest along
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => self.cost.cmp(&other.cost),
            s => s,
        }
    }
}

pub struct SearchContext<C> {
    open: BinaryHeap<SmallestCostHolder<C>>,
    records: FxIndexMap<Point, NodeRecord<C>>,
    search_id: u32,
}

impl<C> Default for SearchContext<C> {
    fn default() -> SearchContext<C> {
        SearchContext {
            open: BinaryHeap::new(),
            records: FxIndexMap::default(),
            search_id: 0,
        }
    }
}

impl<C: Zero + Ord + Copy> SearchContext<C> {
    pub fn new() -> SearchContext<C> {
        SearchContext::default()
    }

    /// Starts a new search generation with only `start` on the open list. Records of earlier
    /// searches are kept but no longer count as visited.
    pub fn initialize(&mut self, start: Point, estimated_cost: C) {
        self.open.clear();
        self.search_id = self.search_id.wrapping_add(1);
        let index = self.record_index(start);
        self.open(index, None, C::zero(), estimated_cost);
    }

    /// Index of the record of `node` in the pool, creating the record or resetting a stale one.
    pub fn record_index(&mut self, node: Point) -> usize {
        let search_id = self.search_id;
        let entry = self.records.entry(node);
        let index = entry.index();
        let record = entry.or_insert_with(|| NodeRecord::new(node, search_id));
        if record.search_id != search_id {
            record.reset(search_id);
        }
        index
    }

    pub fn record(&self, index: usize) -> &NodeRecord<C> {
        &self.records[index]
    }

    /// The record of `node` as left by the most recent search, if that search touched it.
    pub fn get(&self, node: Point) -> Option<&NodeRecord<C>> {
        self.records
            .get(&node)
            .filter(|record| record.search_id == self.search_id)
    }

    /// Marks a record open with the given parent and cost. Opening an already open record at a
    /// lower cost acts as a decrease-key.
    pub fn open(&mut self, index: usize, parent: Option<Point>, cost: C, estimated_cost: C) {
        let record = &mut self.records[index];
        debug_assert!(record.category != NodeRecordCategory::Closed);
        record.parent = parent;
        record.cost_so_far = cost;
        record.category = NodeRecordCategory::Open;
        self.open.push(SmallestCostHolder {
            estimated_cost,
            cost,
            index,
        });
    }

    /// Pops the open record with the smallest estimated cost and closes it.
    pub fn pop_open(&mut self) -> Option<usize> {
        while let Some(SmallestCostHolder { cost, index, .. }) = self.open.pop() {
            let record = &mut self.records[index];
            // Superseded by a cheaper entry for the same record
            if record.category != NodeRecordCategory::Open || cost > record.cost_so_far {
                continue;
            }
            record.category = NodeRecordCategory::Closed;
            return Some(index);
        }
        None
    }

    /// Follows parents from `goal` back to the start of the search, returning the chain in start
    /// to goal order. [None] if `goal` was not reached with a parent.
    pub fn backtrack(&self, goal: Point) -> Option<Vec<Point>> {
        self.get(goal)?.parent?;
        let mut chain: Vec<Point> = std::iter::successors(Some(goal), |&node| {
            self.get(node).and_then(|record| record.parent)
        })
        .collect();
        chain.reverse();
        Some(chain)
    }

    /// Number of records in the pool, across all searches so far.
    pub fn pool_size(&self) -> usize {
        self.records.len()
    }
}
