#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick field snapshot and the traversability view derived from it.
//!
//! The simulator hands the controlled drive one [`FieldSnapshot`] per tick.
//! The snapshot is consumed read-only; the decision core derives a
//! [`FieldOccupancy`] from it once per decision and passes its traversability
//! test to the path planner as a frozen obstacle predicate.

use std::collections::HashSet;

use grid_drive_core::{DriveId, GridState, PodId};

/// Read-only world state delivered by the simulator each tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSnapshot {
    /// Boundary cells framing the traversable interior of the field.
    pub boundaries: Vec<GridState>,
    /// Cells occupied by every drive on the field, the controlled drive included.
    pub drives: Vec<GridState>,
    /// Cells occupied by pods.
    pub pods: Vec<GridState>,
    /// Cell currently occupied by the controlled drive.
    pub player: GridState,
    /// Active goal cell, absent while no goal is assigned.
    pub goal: Option<GridState>,
    /// Cell of the pod the drive should fetch (extended mode only).
    pub target_pod: Option<GridState>,
    /// Pairs of drives and the pods they currently carry (extended mode only).
    pub lifted: Vec<(DriveId, PodId)>,
}

impl FieldSnapshot {
    /// Creates a base-mode snapshot with no pod targeting information.
    #[must_use]
    pub fn new(
        boundaries: Vec<GridState>,
        drives: Vec<GridState>,
        pods: Vec<GridState>,
        player: GridState,
        goal: Option<GridState>,
    ) -> Self {
        Self {
            boundaries,
            drives,
            pods,
            player,
            goal,
            target_pod: None,
            lifted: Vec::new(),
        }
    }

    /// Pod carried by the provided drive, if any.
    #[must_use]
    pub fn carried_pod(&self, drive: DriveId) -> Option<PodId> {
        self.lifted
            .iter()
            .find(|(carrier, _)| *carrier == drive)
            .map(|(_, pod)| *pod)
    }
}

/// Rectangle implied by the boundary cells of a snapshot.
///
/// Traversable cells lie strictly inside the rectangle; the boundary frame
/// itself is never traversable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldBounds {
    min: GridState,
    max: GridState,
}

impl FieldBounds {
    /// Smallest rectangle enclosing the provided cells, if any exist.
    #[must_use]
    pub fn enclosing(cells: &[GridState]) -> Option<Self> {
        let first = cells.first()?;
        let mut min = (first.x(), first.y());
        let mut max = min;
        for cell in cells {
            min = (min.0.min(cell.x()), min.1.min(cell.y()));
            max = (max.0.max(cell.x()), max.1.max(cell.y()));
        }
        Some(Self {
            min: GridState::new(min.0, min.1),
            max: GridState::new(max.0, max.1),
        })
    }

    /// Reports whether the cell lies strictly inside the rectangle.
    #[must_use]
    pub fn contains(&self, cell: GridState) -> bool {
        self.min.x() < cell.x()
            && cell.x() < self.max.x()
            && self.min.y() < cell.y()
            && cell.y() < self.max.y()
    }

    /// Lower-left corner of the rectangle (a boundary cell).
    #[must_use]
    pub const fn min(&self) -> GridState {
        self.min
    }

    /// Upper-right corner of the rectangle (a boundary cell).
    #[must_use]
    pub const fn max(&self) -> GridState {
        self.max
    }

    /// Number of cells strictly inside the rectangle.
    ///
    /// Bounds the cells any path search over this field can ever visit.
    #[must_use]
    pub fn interior_cells(&self) -> usize {
        let width = i64::from(self.max.x()) - i64::from(self.min.x()) - 1;
        let height = i64::from(self.max.y()) - i64::from(self.min.y()) - 1;
        if width <= 0 || height <= 0 {
            return 0;
        }
        usize::try_from(width * height).unwrap_or(usize::MAX)
    }
}

/// Boundary cells framing a rectangular field whose traversable interior
/// spans `(0, 0)` through `(width - 1, height - 1)`.
///
/// Mirrors the frame the simulator publishes for a plain rectangular field;
/// the harness and scenario tests build their worlds from it.
#[must_use]
pub fn boundary_frame(width: i32, height: i32) -> Vec<GridState> {
    let mut cells = Vec::new();
    for x in -1..=width {
        cells.push(GridState::new(x, -1));
        cells.push(GridState::new(x, height));
    }
    for y in 0..height {
        cells.push(GridState::new(-1, y));
        cells.push(GridState::new(width, y));
    }
    cells
}

/// Blocked-cell view derived from one snapshot for one controlled drive.
///
/// A cell is traversable iff it lies inside the implied rectangle, is not a
/// boundary cell, and is not occupied. The controlled drive's own cell never
/// counts as occupied, and the active objective cell is exempt from pod
/// blocking so a targeted pod stays reachable.
#[derive(Clone, Debug)]
pub struct FieldOccupancy {
    bounds: Option<FieldBounds>,
    boundary: HashSet<GridState>,
    blocked: HashSet<GridState>,
}

impl FieldOccupancy {
    /// Captures the occupancy of a snapshot as seen by the controlled drive.
    #[must_use]
    pub fn from_snapshot(snapshot: &FieldSnapshot, objective: Option<GridState>) -> Self {
        let bounds = FieldBounds::enclosing(&snapshot.boundaries);
        let boundary: HashSet<GridState> = snapshot.boundaries.iter().copied().collect();

        let mut blocked = HashSet::new();
        for &cell in &snapshot.drives {
            if cell == snapshot.player {
                continue;
            }
            let _ = blocked.insert(cell);
        }
        for &cell in &snapshot.pods {
            // A carried pod rides on the player's own cell, and the targeted
            // pod must remain reachable as a goal.
            if cell == snapshot.player || objective == Some(cell) {
                continue;
            }
            let _ = blocked.insert(cell);
        }

        Self {
            bounds,
            boundary,
            blocked,
        }
    }

    /// Reports whether the controlled drive may occupy the provided cell.
    #[must_use]
    pub fn is_traversable(&self, cell: GridState) -> bool {
        if let Some(bounds) = self.bounds {
            if !bounds.contains(cell) {
                return false;
            }
        }
        !self.boundary.contains(&cell) && !self.blocked.contains(&cell)
    }

    /// Rectangle implied by the snapshot's boundary cells, if any.
    ///
    /// Absent when the snapshot listed no boundary cells; callers sizing a
    /// path search must then fall back to a fixed exploration limit.
    #[must_use]
    pub const fn bounds(&self) -> Option<FieldBounds> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::{boundary_frame, FieldBounds, FieldOccupancy, FieldSnapshot};
    use grid_drive_core::{DriveId, GridState, PodId};

    #[test]
    fn enclosing_rectangle_spans_boundary_cells() {
        let bounds = FieldBounds::enclosing(&boundary_frame(5, 5)).expect("bounds");
        assert_eq!(bounds.min(), GridState::new(-1, -1));
        assert_eq!(bounds.max(), GridState::new(5, 5));
        assert!(bounds.contains(GridState::new(0, 0)));
        assert!(bounds.contains(GridState::new(4, 4)));
        assert!(!bounds.contains(GridState::new(-1, 2)));
        assert!(!bounds.contains(GridState::new(5, 2)));
    }

    #[test]
    fn enclosing_rectangle_of_no_cells_is_absent() {
        assert_eq!(FieldBounds::enclosing(&[]), None);
    }

    #[test]
    fn interior_cell_count_matches_the_frame() {
        let bounds = FieldBounds::enclosing(&boundary_frame(5, 4)).expect("bounds");
        assert_eq!(bounds.interior_cells(), 20);

        let flat = FieldBounds::enclosing(&[GridState::new(0, 0), GridState::new(4, 0)])
            .expect("bounds");
        assert_eq!(flat.interior_cells(), 0);
    }

    #[test]
    fn boundary_and_exterior_cells_are_not_traversable() {
        let snapshot = FieldSnapshot::new(
            boundary_frame(3, 3),
            vec![GridState::new(0, 0)],
            Vec::new(),
            GridState::new(0, 0),
            None,
        );
        let occupancy = FieldOccupancy::from_snapshot(&snapshot, None);

        assert!(occupancy.is_traversable(GridState::new(1, 1)));
        assert!(!occupancy.is_traversable(GridState::new(-1, 1)));
        assert!(!occupancy.is_traversable(GridState::new(3, 0)));
        assert!(!occupancy.is_traversable(GridState::new(0, -2)));
    }

    #[test]
    fn other_drives_block_but_own_cell_stays_free() {
        let player = GridState::new(1, 1);
        let snapshot = FieldSnapshot::new(
            boundary_frame(4, 4),
            vec![player, GridState::new(2, 1)],
            Vec::new(),
            player,
            None,
        );
        let occupancy = FieldOccupancy::from_snapshot(&snapshot, None);

        assert!(occupancy.is_traversable(player));
        assert!(!occupancy.is_traversable(GridState::new(2, 1)));
    }

    #[test]
    fn pods_block_except_at_the_objective() {
        let player = GridState::new(0, 0);
        let target = GridState::new(2, 2);
        let snapshot = FieldSnapshot::new(
            boundary_frame(4, 4),
            vec![player],
            vec![target, GridState::new(1, 0)],
            player,
            None,
        );
        let occupancy = FieldOccupancy::from_snapshot(&snapshot, Some(target));

        assert!(occupancy.is_traversable(target));
        assert!(!occupancy.is_traversable(GridState::new(1, 0)));
    }

    #[test]
    fn missing_boundaries_impose_no_rectangle() {
        let snapshot = FieldSnapshot::new(
            Vec::new(),
            vec![GridState::new(0, 0)],
            Vec::new(),
            GridState::new(0, 0),
            None,
        );
        let occupancy = FieldOccupancy::from_snapshot(&snapshot, None);

        assert!(occupancy.is_traversable(GridState::new(1_000, -1_000)));
    }

    #[test]
    fn carried_pod_lookup_matches_lifted_pairs() {
        let mut snapshot = FieldSnapshot::new(
            boundary_frame(3, 3),
            vec![GridState::new(0, 0)],
            Vec::new(),
            GridState::new(0, 0),
            None,
        );
        snapshot.lifted = vec![(DriveId::new(3), PodId::new(9))];

        assert_eq!(snapshot.carried_pod(DriveId::new(3)), Some(PodId::new(9)));
        assert_eq!(snapshot.carried_pod(DriveId::new(4)), None);
    }
}
