#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core vocabulary shared across the Grid Drive decision core.
//!
//! This crate defines the value types that connect the field snapshot, the
//! path planner, and the agent controller: tile positions ([`GridState`]),
//! the discrete move alphabet ([`DriveMove`]), and the identifiers the
//! simulator uses for drives and pods. Positions carry structural equality
//! and hashing because the planner uses them as visited-set and parent-map
//! keys.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position on the tile field expressed as signed tile coordinates.
///
/// Boundary cells sit outside the traversable interior, so coordinates may be
/// negative (a field of width five is framed by cells at `x = -1` and
/// `x = 5`). Two states are equal iff both coordinates are equal; the derived
/// `Ord` gives planners a deterministic tie-break key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridState {
    x: i32,
    y: i32,
}

impl GridState {
    /// Creates a new grid state at the provided coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal tile coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical tile coordinate. Positive `y` points up.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Manhattan distance between two grid states.
    #[must_use]
    pub fn manhattan_distance(self, other: GridState) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Cell reached by applying the provided move from this cell.
    ///
    /// Moves without a translation component (`None`, `LiftPod`, `DropPod`)
    /// leave the position unchanged.
    #[must_use]
    pub const fn stepped(self, step: DriveMove) -> GridState {
        match step.offset() {
            Some((dx, dy)) => GridState::new(self.x + dx, self.y + dy),
            None => self,
        }
    }
}

/// Discrete move emitted by the decision core, one per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriveMove {
    /// Stay in place for this tick.
    None,
    /// Move one tile in the positive `y` direction.
    Up,
    /// Move one tile in the negative `y` direction.
    Down,
    /// Move one tile in the negative `x` direction.
    Left,
    /// Move one tile in the positive `x` direction.
    Right,
    /// Pick up the pod sharing the drive's tile (extended mode).
    LiftPod,
    /// Drop the carried pod onto the drive's tile (extended mode).
    DropPod,
}

impl DriveMove {
    /// Unit tile offset produced by the move, if it translates the drive.
    #[must_use]
    pub const fn offset(self) -> Option<(i32, i32)> {
        match self {
            Self::Up => Some((0, 1)),
            Self::Down => Some((0, -1)),
            Self::Left => Some((-1, 0)),
            Self::Right => Some((1, 0)),
            Self::None | Self::LiftPod | Self::DropPod => None,
        }
    }
}

/// Unique identifier assigned to a drive by the simulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DriveId(u32);

impl DriveId {
    /// Creates a new drive identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a pod by the simulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PodId(u32);

impl PodId {
    /// Creates a new pod identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Errors raised while translating or consuming a planned path.
///
/// A planned path must consist of 4-connected consecutive cells; anything
/// else indicates a planner defect upstream rather than a recoverable
/// condition, so the controller aborts the tick's plan when it sees one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Two consecutive path entries were not 4-connected.
    #[error("path entries ({}, {}) and ({}, {}) are not 4-connected", .from.x(), .from.y(), .to.x(), .to.y())]
    InvalidPathSegment {
        /// Earlier of the two offending path entries.
        from: GridState,
        /// Later of the two offending path entries.
        to: GridState,
    },
}

#[cfg(test)]
mod tests {
    use super::{DriveId, DriveMove, GridState, PlanError, PodId};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = GridState::new(-1, 2);
        let destination = GridState::new(3, -2);
        assert_eq!(origin.manhattan_distance(destination), 8);
        assert_eq!(destination.manhattan_distance(origin), 8);
        assert_eq!(origin.manhattan_distance(origin), 0);
    }

    #[test]
    fn stepped_applies_unit_offsets() {
        let origin = GridState::new(2, 2);
        assert_eq!(origin.stepped(DriveMove::Up), GridState::new(2, 3));
        assert_eq!(origin.stepped(DriveMove::Down), GridState::new(2, 1));
        assert_eq!(origin.stepped(DriveMove::Left), GridState::new(1, 2));
        assert_eq!(origin.stepped(DriveMove::Right), GridState::new(3, 2));
        assert_eq!(origin.stepped(DriveMove::None), origin);
        assert_eq!(origin.stepped(DriveMove::LiftPod), origin);
        assert_eq!(origin.stepped(DriveMove::DropPod), origin);
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(GridState::new(4, 7), GridState::new(4, 7));
        assert_ne!(GridState::new(4, 7), GridState::new(7, 4));
    }

    #[test]
    fn invalid_segment_reports_both_cells() {
        let error = PlanError::InvalidPathSegment {
            from: GridState::new(0, 0),
            to: GridState::new(2, 0),
        };
        assert_eq!(
            error.to_string(),
            "path entries (0, 0) and (2, 0) are not 4-connected"
        );
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn grid_state_round_trips_through_bincode() {
        assert_round_trip(&GridState::new(-3, 12));
    }

    #[test]
    fn drive_move_round_trips_through_bincode() {
        assert_round_trip(&DriveMove::LiftPod);
    }

    #[test]
    fn identifiers_round_trip_through_bincode() {
        assert_round_trip(&DriveId::new(42));
        assert_round_trip(&PodId::new(7));
    }
}
