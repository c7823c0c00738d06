//! Navigation module for the teleoperated landmark robot
//!
//! A centralized comparison controller: one robot knows the full map, plans
//! the object's route to the goal through a visibility graph, and drives to
//! a point a fixed distance along that route, acting as a moving landmark.
pub mod dijkstra;
pub mod path_follower;
pub mod planner;
pub mod visibility;

use self::path_follower::pure_pursuit::LookaheadPursuit;
use self::path_follower::PathFollower;
use self::planner::{PathPlanner, Plan, VisibilityPlanner};
use crate::common::{Point2, Pose2D, WorldView};
use crate::config::{MotionConfig, PlannerConfig};
use crate::control::{DifferentialDrive, MotionCommand};
use std::collections::HashMap;

/// Output of one teleoperation update
#[derive(Debug, Clone, PartialEq)]
pub struct TeleopUpdate {
    pub plan: Plan,
    /// Where the robot is heading, None when no route exists
    pub pursuit_point: Option<Point2>,
    pub command: MotionCommand,
}

/// Plans and follows the object-to-goal route for the teleoperated robot
#[derive(Debug, Clone)]
pub struct TeleopNavigator {
    planner: VisibilityPlanner,
    follower: LookaheadPursuit,
    drive: DifferentialDrive,
}

impl TeleopNavigator {
    pub fn new(planner: &PlannerConfig, motion: &MotionConfig) -> Self {
        Self {
            follower: LookaheadPursuit::with_lookahead(planner.lookahead_distance),
            planner: VisibilityPlanner::new(planner.clone()),
            drive: DifferentialDrive::new(motion),
        }
    }

    /// Configure the path follower
    pub fn configure_path_follower(&mut self, params: &HashMap<String, f32>) -> crate::Result<()> {
        self.follower.configure(params)
    }

    /// Get the name of the current path follower
    pub fn path_follower_name(&self) -> &str {
        self.follower.name()
    }

    /// Replan from scratch and steer toward the pursuit point
    pub fn update(&self, world: &WorldView, pose: &Pose2D) -> TeleopUpdate {
        let plan = self.planner.plan(world);
        let pursuit_point = self.follower.target(&plan.path);

        let command = match pursuit_point {
            Some(target) => {
                let toward = pose.to_body_frame(target);
                let norm = toward.norm();
                if norm > 0.0 {
                    self.drive.command(toward / norm, pose.heading)
                } else {
                    MotionCommand::stop()
                }
            }
            None => MotionCommand::stop(),
        };

        TeleopUpdate {
            plan,
            pursuit_point,
            command,
        }
    }
}

impl Default for TeleopNavigator {
    fn default() -> Self {
        Self::new(&PlannerConfig::default(), &MotionConfig::default())
    }
}
