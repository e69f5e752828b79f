#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line harness that runs one controlled drive on a scripted field.
//!
//! The harness stands in for the real simulator: it frames a rectangular
//! field, scatters stationary drives and pods with a seeded generator, and
//! feeds the agent one snapshot per tick, applying whichever move comes back.

use anyhow::{bail, Result};
use clap::Parser;
use log::info;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use grid_drive_core::{DriveId, DriveMove, GridState, PodId};
use grid_drive_field::{boundary_frame, FieldSnapshot};
use grid_drive_system_agent::Agent;

/// Runs a single drive across a randomly furnished field.
#[derive(Debug, Parser)]
#[command(name = "grid-drive")]
struct Args {
    /// Field width in traversable tiles.
    #[arg(long, default_value_t = 8)]
    width: i32,

    /// Field height in traversable tiles.
    #[arg(long, default_value_t = 8)]
    height: i32,

    /// Number of stationary non-player drives scattered on the field.
    #[arg(long, default_value_t = 3)]
    drives: usize,

    /// Number of pods scattered on the field.
    #[arg(long, default_value_t = 4)]
    pods: usize,

    /// Seed for scenario generation.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 128)]
    ticks: u32,

    /// Run the pod fetch-and-deliver mission instead of plain goal seeking.
    #[arg(long)]
    advanced: bool,
}

/// Scripted stand-in for the simulator collaborator.
#[derive(Debug)]
struct ScriptedField {
    boundaries: Vec<GridState>,
    obstacles: Vec<GridState>,
    pods: Vec<GridState>,
    player: GridState,
    goal: GridState,
    target_pod: Option<GridState>,
    carried: Option<PodId>,
}

impl ScriptedField {
    fn generate(args: &Args) -> Result<Self> {
        if args.width < 2 || args.height < 2 {
            bail!("field must be at least 2x2 tiles");
        }

        let mut interior: Vec<GridState> = (0..args.width)
            .flat_map(|x| (0..args.height).map(move |y| GridState::new(x, y)))
            .collect();

        let player = GridState::new(0, 0);
        let goal = GridState::new(args.width - 1, args.height - 1);
        interior.retain(|cell| *cell != player && *cell != goal);

        let furniture = args.drives + args.pods;
        if furniture > interior.len() {
            bail!(
                "cannot place {furniture} objects on a {}x{} field",
                args.width,
                args.height
            );
        }

        let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
        interior.shuffle(&mut rng);
        let obstacles: Vec<GridState> = interior.drain(..args.drives).collect();
        let pods: Vec<GridState> = interior.drain(..args.pods).collect();
        let target_pod = args.advanced.then(|| pods.first().copied()).flatten();

        Ok(Self {
            boundaries: boundary_frame(args.width, args.height),
            obstacles,
            pods,
            player,
            goal,
            target_pod,
            carried: None,
        })
    }

    fn snapshot(&self) -> FieldSnapshot {
        let mut drives = vec![self.player];
        drives.extend_from_slice(&self.obstacles);

        let mut snapshot = FieldSnapshot::new(
            self.boundaries.clone(),
            drives,
            self.pods.clone(),
            self.player,
            Some(self.goal),
        );
        snapshot.target_pod = self.target_pod;
        if let Some(pod) = self.carried {
            snapshot.lifted = vec![(PLAYER, pod)];
        }
        snapshot
    }

    /// Applies one agent move, mirroring the simulator's side effects.
    fn apply(&mut self, decided: DriveMove) {
        match decided {
            DriveMove::None => {}
            DriveMove::LiftPod => {
                if self.pods.contains(&self.player) && self.carried.is_none() {
                    self.carried = Some(PodId::new(0));
                }
            }
            DriveMove::DropPod => {
                self.carried = None;
            }
            _ => {
                let destination = self.player.stepped(decided);
                if self.carried.is_some() {
                    let player = self.player;
                    if let Some(riding) = self.pods.iter_mut().find(|pod| **pod == player) {
                        *riding = destination;
                    }
                    self.target_pod = Some(destination);
                }
                self.player = destination;
            }
        }
    }

    fn mission_complete(&self, advanced: bool) -> bool {
        if advanced {
            self.carried.is_none() && self.target_pod == Some(self.goal)
        } else {
            self.player == self.goal
        }
    }
}

const PLAYER: DriveId = DriveId::new(0);

/// Entry point for the Grid Drive command-line harness.
fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut field = ScriptedField::generate(&args)?;
    let mut agent = Agent::new(PLAYER, args.advanced);

    info!(
        "field {}x{}, {} drives, {} pods, seed {}",
        args.width,
        args.height,
        args.drives,
        args.pods,
        args.seed
    );

    for tick in 0..args.ticks {
        let snapshot = field.snapshot();
        let decided = agent.next_move(&snapshot);
        println!(
            "tick {tick:3}  drive at ({:2}, {:2})  -> {decided:?}",
            field.player.x(),
            field.player.y()
        );
        field.apply(decided);

        if field.mission_complete(args.advanced) {
            println!("mission complete after {} ticks", tick + 1);
            return Ok(());
        }
    }

    println!("tick budget exhausted before the mission completed");
    Ok(())
}
