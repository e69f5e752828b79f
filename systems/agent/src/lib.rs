#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick-level decision making for one controlled drive.
//!
//! The [`Agent`] owns the current [`Plan`] and the state machine around it.
//! Each tick it derives the active objective from the snapshot, checks
//! whether the held plan is still valid against the field's occupancy,
//! replans when it is not, and emits exactly one move. Search failures are
//! degraded behavior, not faults: the drive idles and retries once the
//! obstacles have moved.

use grid_drive_core::{DriveId, DriveMove, GridState};
use grid_drive_field::{FieldOccupancy, FieldSnapshot};
use grid_drive_system_planning as planning;
use log::{error, warn};

/// Phase of the agent's planning state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentState {
    /// No route is held; the agent searches when an objective exists.
    NoPlan,
    /// A route is held and consumed one cell per tick.
    FollowingPlan,
    /// The objective cell has been reached; the agent idles until the
    /// objective changes.
    GoalReached,
}

/// Route held across ticks, consumed one cell per tick.
#[derive(Clone, Debug)]
struct Plan {
    cells: Vec<GridState>,
    cursor: usize,
    objective: GridState,
}

impl Plan {
    fn current(&self) -> Option<GridState> {
        self.cells.get(self.cursor).copied()
    }

    fn next(&self) -> Option<GridState> {
        self.cells.get(self.cursor + 1).copied()
    }
}

/// Decision core for one controlled drive.
///
/// Separate controlled drives are separate `Agent` values; nothing is shared
/// between them. The agent never mutates the snapshot it is given.
#[derive(Debug)]
pub struct Agent {
    drive_id: DriveId,
    advanced_mode: bool,
    state: AgentState,
    plan: Option<Plan>,
}

impl Agent {
    /// Creates an idle agent for the drive with the provided identifier.
    ///
    /// In advanced mode the agent runs the fetch-and-deliver pod mission;
    /// otherwise it only travels to the goal cell.
    #[must_use]
    pub fn new(drive_id: DriveId, advanced_mode: bool) -> Self {
        Self {
            drive_id,
            advanced_mode,
            state: AgentState::NoPlan,
            plan: None,
        }
    }

    /// Current phase of the planning state machine.
    #[must_use]
    pub const fn state(&self) -> AgentState {
        self.state
    }

    /// Decides the move for one tick. Always resolves to a value.
    pub fn next_move(&mut self, snapshot: &FieldSnapshot) -> DriveMove {
        let Some(objective) = self.objective(snapshot) else {
            self.plan = None;
            self.state = AgentState::NoPlan;
            return DriveMove::None;
        };

        if snapshot.player == objective {
            self.plan = None;
            self.state = AgentState::GoalReached;
            return self.arrival_move(snapshot);
        }

        let occupancy = FieldOccupancy::from_snapshot(snapshot, Some(objective));

        match self.plan.take() {
            Some(plan) if plan_still_valid(&plan, snapshot, &occupancy, objective) => {
                self.advance(plan)
            }
            _ => self.replan(snapshot, &occupancy, objective),
        }
    }

    /// Cell the agent is currently trying to reach, if any.
    ///
    /// In advanced mode the objective is the target pod until it is carried
    /// and the goal afterwards; a target pod already sitting on the goal cell
    /// counts as delivered.
    fn objective(&self, snapshot: &FieldSnapshot) -> Option<GridState> {
        if !self.advanced_mode {
            return snapshot.goal;
        }

        if snapshot.carried_pod(self.drive_id).is_some() {
            return snapshot.goal;
        }

        match (snapshot.target_pod, snapshot.goal) {
            (Some(pod), Some(goal)) if pod == goal => None,
            (Some(pod), _) => Some(pod),
            (None, goal) => goal,
        }
    }

    /// Move emitted on arrival at the objective cell.
    fn arrival_move(&self, snapshot: &FieldSnapshot) -> DriveMove {
        if !self.advanced_mode {
            return DriveMove::None;
        }

        if snapshot.carried_pod(self.drive_id).is_some() {
            DriveMove::DropPod
        } else if snapshot.target_pod == Some(snapshot.player) {
            DriveMove::LiftPod
        } else {
            DriveMove::None
        }
    }

    /// Emits the next step of a validated plan and advances its cursor.
    fn advance(&mut self, mut plan: Plan) -> DriveMove {
        let (Some(from), Some(to)) = (plan.current(), plan.next()) else {
            // A validated plan always has an unconsumed step; treat anything
            // else like a planner defect and recover by replanning.
            self.state = AgentState::NoPlan;
            return DriveMove::None;
        };

        match planning::step_move(from, to) {
            Ok(step) => {
                plan.cursor += 1;
                self.plan = Some(plan);
                self.state = AgentState::FollowingPlan;
                step
            }
            Err(fault) => {
                error!("drive {}: discarding plan: {fault}", self.drive_id.get());
                self.state = AgentState::NoPlan;
                DriveMove::None
            }
        }
    }

    /// Runs the path search and emits the first step of the fresh plan.
    fn replan(
        &mut self,
        snapshot: &FieldSnapshot,
        occupancy: &FieldOccupancy,
        objective: GridState,
    ) -> DriveMove {
        // The implied rectangle caps how many cells one search can visit; a
        // snapshot without boundaries gets the planner's fixed limit instead.
        let limit = occupancy
            .bounds()
            .map(|bounds| bounds.interior_cells())
            .unwrap_or(planning::DEFAULT_SEARCH_LIMIT);

        let searched = planning::find_path_limited(snapshot.player, objective, limit, |cell| {
            occupancy.is_traversable(cell)
        });

        match searched {
            Some(cells) => self.advance(Plan {
                cells,
                cursor: 0,
                objective,
            }),
            None => {
                warn!(
                    "drive {}: no route to ({}, {}); idling this tick",
                    self.drive_id.get(),
                    objective.x(),
                    objective.y()
                );
                self.state = AgentState::NoPlan;
                DriveMove::None
            }
        }
    }
}

/// A held plan survives a tick only while it still leads to the active
/// objective, the drive stands on the expected cell, and the next cell
/// remains traversable.
fn plan_still_valid(
    plan: &Plan,
    snapshot: &FieldSnapshot,
    occupancy: &FieldOccupancy,
    objective: GridState,
) -> bool {
    if plan.objective != objective {
        return false;
    }

    if plan.current() != Some(snapshot.player) {
        return false;
    }

    match plan.next() {
        Some(next) => occupancy.is_traversable(next),
        None => false,
    }
}
