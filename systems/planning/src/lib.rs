#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first path planning and move translation for a single drive.
//!
//! [`find_path`] explores the 4-connected grid outward from the start cell
//! against a frozen traversability predicate and reconstructs the first
//! shortest route it completes. [`to_moves`] and [`step_move`] turn planned
//! cells into the discrete move alphabet the simulator accepts.

use std::collections::{HashMap, HashSet, VecDeque};

use grid_drive_core::{DriveMove, GridState, PlanError};
use log::{debug, trace};

/// Fixed neighbor expansion order; keeps tie-breaking between equal-length
/// routes reproducible across runs.
const EXPANSION_ORDER: [DriveMove; 4] = [
    DriveMove::Up,
    DriveMove::Down,
    DriveMove::Left,
    DriveMove::Right,
];

/// Fallback bound on visited cells for callers that cannot derive one from
/// field geometry, as on a snapshot with no boundary cells at all.
pub const DEFAULT_SEARCH_LIMIT: usize = 16_384;

/// Computes a shortest 4-connected route from `start` to `goal`.
///
/// Explores at most [`DEFAULT_SEARCH_LIMIT`] cells; callers that know the
/// field's cell count should prefer [`find_path_limited`] with that tighter
/// bound.
pub fn find_path<F>(start: GridState, goal: GridState, is_traversable: F) -> Option<Vec<GridState>>
where
    F: Fn(GridState) -> bool,
{
    find_path_limited(start, goal, DEFAULT_SEARCH_LIMIT, is_traversable)
}

/// Computes a shortest 4-connected route, visiting at most `limit` cells.
///
/// The predicate is consulted once per candidate cell and must describe a
/// frozen obstacle snapshot for the duration of the call. The start cell is
/// never tested; the drive already stands on it. Returns `None` when the goal
/// is unreachable, including when it lies out of bounds or beyond the visit
/// limit. The limit keeps one search bounded within a tick even when the
/// predicate admits an unbounded field.
pub fn find_path_limited<F>(
    start: GridState,
    goal: GridState,
    limit: usize,
    is_traversable: F,
) -> Option<Vec<GridState>>
where
    F: Fn(GridState) -> bool,
{
    trace!(
        "searching ({}, {}) -> ({}, {})",
        start.x(),
        start.y(),
        goal.x(),
        goal.y()
    );

    if start == goal {
        return Some(vec![start]);
    }

    let mut frontier = VecDeque::new();
    let mut visited = HashSet::new();
    let mut parents: HashMap<GridState, GridState> = HashMap::new();

    frontier.push_back(start);
    let _ = visited.insert(start);

    while let Some(current) = frontier.pop_front() {
        if current == goal {
            return Some(reconstruct(&parents, goal));
        }

        for step in EXPANSION_ORDER {
            let neighbor = current.stepped(step);
            if visited.contains(&neighbor) || !is_traversable(neighbor) {
                continue;
            }

            if visited.len() >= limit {
                // Stop growing the frontier; already-queued cells may still
                // reach the goal before the search drains.
                break;
            }

            let _ = visited.insert(neighbor);
            let _ = parents.insert(neighbor, current);
            frontier.push_back(neighbor);
        }
    }

    debug!(
        "no route from ({}, {}) to ({}, {}); {} of at most {} cells explored",
        start.x(),
        start.y(),
        goal.x(),
        goal.y(),
        visited.len(),
        limit
    );
    None
}

/// Walks the parent map backward from the goal and reverses the result.
fn reconstruct(parents: &HashMap<GridState, GridState>, goal: GridState) -> Vec<GridState> {
    let mut path = vec![goal];
    let mut cursor = goal;
    while let Some(&parent) = parents.get(&cursor) {
        path.push(parent);
        cursor = parent;
    }
    path.reverse();
    path
}

/// Translates a planned path into one move per consecutive cell pair.
///
/// A single-cell path translates to no moves. Fails with
/// [`PlanError::InvalidPathSegment`] when two consecutive cells are not
/// 4-connected, which signals a planner defect rather than an environmental
/// condition.
pub fn to_moves(path: &[GridState]) -> Result<Vec<DriveMove>, PlanError> {
    path.windows(2)
        .map(|pair| step_move(pair[0], pair[1]))
        .collect()
}

/// Move that advances a drive from `from` to the 4-connected cell `to`.
pub fn step_move(from: GridState, to: GridState) -> Result<DriveMove, PlanError> {
    match (to.x() - from.x(), to.y() - from.y()) {
        (1, 0) => Ok(DriveMove::Right),
        (-1, 0) => Ok(DriveMove::Left),
        (0, 1) => Ok(DriveMove::Up),
        (0, -1) => Ok(DriveMove::Down),
        _ => Err(PlanError::InvalidPathSegment { from, to }),
    }
}
