pub mod behaviors;
pub mod common;
pub mod config;
pub mod control;
pub mod error;
pub mod lifecycle;
pub mod navigation;
pub mod perception;
pub mod placement;

pub use crate::config::{ControllerScript, PusherConfig};
pub use crate::error::{PusherError, Result};

use crate::behaviors::{BehaviorInput, BehaviorVariant, RobotState};
use crate::common::WorldView;
use crate::config::BehaviorConfig;
use crate::control::{DifferentialDrive, MotionCommand};
use crate::lifecycle::{LifecycleNode, LifecycleNodeBase, State};
use crate::navigation::{TeleopNavigator, TeleopUpdate};
use crate::perception::sensors::RobotSensors;
use crate::perception::{PerceptionPipeline, RobotPercept};
use crate::placement::{Placement, PositionSampler};
use log::{debug, info, warn};
use rand::Rng;

/// Index of the robot driven by the planner in teleoperated episodes
pub const TELEOP_ROBOT: usize = 0;

/// Per-robot memory kept between ticks
#[derive(Debug, Clone)]
struct RobotController {
    pipeline: PerceptionPipeline,
    state: RobotState,
}

/// Decision-making core for every robot in one episode
///
/// The simulation engine owns the world and the rigid bodies. Each tick it
/// hands the core a read-only view of the world and the sensor readings of
/// every robot, and applies the returned motion commands.
pub struct SwarmCore {
    base: LifecycleNodeBase,
    config: PusherConfig,
    behavior: BehaviorConfig,
    drive: DifferentialDrive,
    teleop: TeleopNavigator,
    robot_count: usize,
    robots: Vec<RobotController>,
    last_teleop: Option<TeleopUpdate>,
}

impl SwarmCore {
    /// Create a core for `robot_count` robots
    pub fn new(config: PusherConfig, robot_count: usize) -> Result<Self> {
        config.validate()?;

        let mut behavior = config.behavior.clone();
        if config.script != ControllerScript::Landmark {
            behavior.variant = BehaviorVariant::Baseline;
        }

        Ok(SwarmCore {
            base: LifecycleNodeBase::new("swarm_core"),
            drive: DifferentialDrive::new(&config.motion),
            teleop: TeleopNavigator::new(&config.planner, &config.motion),
            behavior,
            config,
            robot_count,
            robots: Vec::new(),
            last_teleop: None,
        })
    }

    pub fn config(&self) -> &PusherConfig {
        &self.config
    }

    pub fn robot_count(&self) -> usize {
        self.robot_count
    }

    /// Draw starting poses for every robot
    pub fn place_robots<R: Rng + ?Sized>(&self, world: &WorldView, rng: &mut R) -> Vec<Placement> {
        PositionSampler::new(self.config.placement.clone()).sample(world, self.robot_count, rng)
    }

    fn is_teleoperated(&self, index: usize) -> bool {
        self.config.script == ControllerScript::Teleoperated && index == TELEOP_ROBOT
    }

    /// Compute the motion command of every robot for this tick
    ///
    /// Returns stop commands while the core is not active.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        world: &WorldView,
        sensors: &[RobotSensors<'_>],
        dt: f32,
        rng: &mut R,
    ) -> Vec<MotionCommand> {
        if self.base.get_state() != State::Active {
            warn!("tick called while {:?}", self.base.get_state());
            return vec![MotionCommand::stop(); sensors.len()];
        }
        if sensors.len() != self.robots.len() {
            warn!(
                "Got sensors for {} robots, expected {}",
                sensors.len(),
                self.robots.len()
            );
        }

        let mut commands = Vec::with_capacity(sensors.len());
        for (index, reading) in sensors.iter().enumerate() {
            if index >= self.robots.len() {
                commands.push(MotionCommand::stop());
                continue;
            }

            let teleoperated = self.is_teleoperated(index);
            let robot = &mut self.robots[index];
            let percept = *robot.pipeline.update(&reading.cameras);
            let input = BehaviorInput {
                percept: &percept,
                infrared: &reading.infrared,
            };

            if teleoperated {
                robot.state.state_timer += dt;
                let update = self.teleop.update(world, &reading.pose);
                commands.push(update.command);
                self.last_teleop = Some(update);
                continue;
            }

            let transition = behaviors::step(&robot.state, &input, &self.behavior, dt, rng);
            if !transition.next.behavior.same_kind(&robot.state.behavior) {
                debug!(
                    "robot {}: {} -> {}",
                    index, robot.state.behavior, transition.next.behavior
                );
            }
            robot.state = transition.next;
            commands.push(self.drive.command(transition.heading, reading.pose.heading));
        }

        commands
    }

    /// Whether the engine should draw robot `index` with the goal material
    pub fn appears_as_goal(&self, index: usize) -> bool {
        if self.is_teleoperated(index) {
            return true;
        }
        self.robots
            .get(index)
            .map(|r| r.state.appears_as_goal())
            .unwrap_or(false)
    }

    pub fn robot_state(&self, index: usize) -> Option<&RobotState> {
        self.robots.get(index).map(|r| &r.state)
    }

    pub fn percept(&self, index: usize) -> Option<&RobotPercept> {
        self.robots.get(index).map(|r| r.pipeline.percept())
    }

    /// Plan and pursuit point from the latest teleoperated tick
    pub fn last_teleop(&self) -> Option<&TeleopUpdate> {
        self.last_teleop.as_ref()
    }

    /// Configure and activate for a new episode
    pub fn start(&mut self) -> Result<()> {
        self.on_configure()?;
        self.on_activate()
    }

    /// Deactivate and reset all robot memory
    pub fn stop(&mut self) -> Result<()> {
        self.on_deactivate()?;
        self.on_cleanup()
    }
}

impl LifecycleNode for SwarmCore {
    fn on_configure(&mut self) -> Result<()> {
        self.base.transition(State::Unconfigured, State::Inactive)?;
        self.robots = (0..self.robot_count)
            .map(|_| RobotController {
                pipeline: PerceptionPipeline::new(&self.config.perception),
                state: RobotState::default(),
            })
            .collect();
        self.last_teleop = None;
        info!(
            "Configured {} robots running {:?}",
            self.robot_count, self.config.script
        );
        Ok(())
    }

    fn on_activate(&mut self) -> Result<()> {
        self.base.transition(State::Inactive, State::Active)
    }

    fn on_deactivate(&mut self) -> Result<()> {
        self.base.transition(State::Active, State::Inactive)
    }

    fn on_cleanup(&mut self) -> Result<()> {
        self.base.transition(State::Inactive, State::Unconfigured)?;
        self.robots.clear();
        self.last_teleop = None;
        Ok(())
    }

    fn state(&self) -> State {
        self.base.get_state()
    }
}
