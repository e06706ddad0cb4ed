//! Lattice path search used by the opt-in path-following AI
//!
//! Best-first search over integer lattice points. Every node offers three
//! moves (step left, step right, hop up) at unit cost, ordered by cost so far
//! plus straight-line distance to the goal. The search only succeeds when it
//! lands on the goal's exact coordinates; it gives up when the frontier is
//! empty or the expansion budget runs out.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// One lattice move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    Left,
    Right,
    Up,
}

impl Step {
    const ALL: [Step; 3] = [Step::Left, Step::Right, Step::Up];
}

/// Integer lattice point (y grows downward)
pub type Point = (i32, i32);

/// Search parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    /// Horizontal step size
    pub step: i32,
    /// Vertical hop size for [`Step::Up`]
    pub jump: i32,
    /// Inclusive bounds: (min_x, min_y, max_x, max_y)
    pub bounds: (i32, i32, i32, i32),
    /// Maximum nodes to expand before giving up
    pub max_expansions: usize,
}

impl Lattice {
    fn apply(&self, (x, y): Point, step: Step) -> Point {
        match step {
            Step::Left => (x - self.step, y),
            Step::Right => (x + self.step, y),
            Step::Up => (x, y - self.jump),
        }
    }

    fn in_bounds(&self, (x, y): Point) -> bool {
        let (min_x, min_y, max_x, max_y) = self.bounds;
        x >= min_x && x <= max_x && y >= min_y && y <= max_y
    }
}

fn heuristic(a: Point, b: Point) -> f32 {
    let dx = (b.0 - a.0) as f32;
    let dy = (b.1 - a.1) as f32;
    (dx * dx + dy * dy).sqrt()
}

#[derive(Debug, Clone, Copy)]
struct Frontier {
    estimate: f32,
    cost: u32,
    /// Insertion order, breaks ties deterministically (FIFO)
    seq: u64,
    point: Point,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // Reversed: BinaryHeap is a max-heap, we want the lowest estimate first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Search from `start` to `goal`. Returns the moves in order, or an empty
/// list when no path was found (also when `start == goal`).
pub fn find_path(lattice: &Lattice, start: Point, goal: Point) -> Vec<Step> {
    if start == goal || lattice.step <= 0 || lattice.jump <= 0 {
        return Vec::new();
    }

    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<Point, (Point, Step)> = HashMap::new();
    let mut best_cost: HashMap<Point, u32> = HashMap::new();
    let mut closed: HashSet<Point> = HashSet::new();
    let mut seq = 0u64;

    best_cost.insert(start, 0);
    open.push(Frontier {
        estimate: heuristic(start, goal),
        cost: 0,
        seq,
        point: start,
    });

    let mut expansions = 0usize;
    while let Some(node) = open.pop() {
        if node.point == goal {
            return reconstruct(&came_from, start, goal);
        }
        if !closed.insert(node.point) {
            continue;
        }
        expansions += 1;
        if expansions > lattice.max_expansions {
            log::trace!("path search budget exhausted after {} expansions", expansions - 1);
            break;
        }

        for step in Step::ALL {
            let next = lattice.apply(node.point, step);
            if !lattice.in_bounds(next) || closed.contains(&next) {
                continue;
            }
            let cost = node.cost + 1;
            if best_cost.get(&next).is_some_and(|&c| c <= cost) {
                continue;
            }
            best_cost.insert(next, cost);
            came_from.insert(next, (node.point, step));
            seq += 1;
            open.push(Frontier {
                estimate: cost as f32 + heuristic(next, goal),
                cost,
                seq,
                point: next,
            });
        }
    }

    Vec::new()
}

fn reconstruct(came_from: &HashMap<Point, (Point, Step)>, start: Point, goal: Point) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&(prev, step)) => {
                steps.push(step);
                current = prev;
            }
            None => return Vec::new(),
        }
    }
    steps.reverse();
    steps
}
