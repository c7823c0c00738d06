//! Configuration loading for the pusher core
//!
//! Every tunable lives in one of the sections below. Sections default
//! individually, so a TOML file only needs to name what it overrides:
//!
//! ```toml
//! script = "teleoperated"
//!
//! [behavior]
//! push_timeout = 45.0
//!
//! [placement]
//! region = "top"
//! ```

use crate::behaviors::BehaviorVariant;
use crate::error::{PusherError, Result};
use crate::perception::color::Rgb;
use crate::placement::PlacementRegion;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which controller the robots run during an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerScript {
    /// Every robot runs the five-state landmark controller
    #[default]
    Landmark,
    /// Every robot runs the four-state reference controller
    Baseline,
    /// Robot 0 follows the planned path, the rest run the reference controller
    Teleoperated,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PusherConfig {
    pub script: ControllerScript,
    pub motion: MotionConfig,
    pub perception: PerceptionConfig,
    pub behavior: BehaviorConfig,
    pub planner: PlannerConfig,
    pub placement: PlacementConfig,
}

/// Differential drive parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Distance between wheels in meters (default: 0.06)
    pub wheel_separation: f32,
    /// Wheel radius in meters (default: 0.01)
    pub wheel_radius: f32,
    /// Motor power at full throttle (default: 50.0, about 0.5 m/s)
    pub max_motor_power: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            wheel_separation: 0.06,
            wheel_radius: 0.01,
            max_motor_power: 50.0,
        }
    }
}

/// Camera processing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionConfig {
    /// First scanned row as a fraction of image height. Rows below it show the robot itself.
    pub start_row_fraction: f32,
    /// Per-channel tolerance when matching a landmark color
    pub color_tolerance: u8,
    pub object_color: Rgb,
    pub goal_color: Rgb,
    pub robot_color: Rgb,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            start_row_fraction: 0.85,
            color_tolerance: 5,
            object_color: Rgb::new(255, 0, 0),
            goal_color: Rgb::new(0, 255, 0),
            robot_color: Rgb::new(0, 0, 255),
        }
    }
}

/// Behavior controller thresholds and timers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub variant: BehaviorVariant,
    /// Random-walk bias changes by dt * Uniform(-rate, rate)
    pub random_walk_rate: f32,
    /// Random-walk bias is clamped to [-limit, limit] radians
    pub random_walk_limit: f32,
    /// Camera distance below which the object counts as reached
    pub approach_camera_distance: f32,
    /// IR range below which the object counts as reached
    pub approach_infrared_distance: f32,
    /// Half-width of the front and back windows (radians)
    pub front_angle_tolerance: f32,
    /// Orbit pushes away from the object below this distance
    pub orbit_min_distance: f32,
    /// Orbit pulls toward the object above this distance
    pub orbit_max_distance: f32,
    /// Seconds allowed in the shared approach / orbit / push phase
    pub push_timeout: f32,
    /// Seconds a robot stays a landmark
    pub be_a_goal_timeout: f32,
    /// IR range confirming the object is touching a landmark robot
    pub adjacent_infrared_distance: f32,
    /// Upper bound of the random refractory period after being a landmark
    pub be_a_goal_cooldown_max: f32,
    /// Only become a landmark when goal and object were more than 90 degrees apart
    pub be_a_goal_requires_wide_angle: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            variant: BehaviorVariant::Landmark,
            random_walk_rate: 2.0,
            random_walk_limit: 0.2,
            approach_camera_distance: 0.15,
            approach_infrared_distance: 0.10,
            front_angle_tolerance: 0.15,
            orbit_min_distance: 0.10,
            orbit_max_distance: 0.20,
            push_timeout: 30.0,
            be_a_goal_timeout: 60.0,
            adjacent_infrared_distance: 0.10,
            be_a_goal_cooldown_max: 5.0,
            be_a_goal_requires_wide_angle: false,
        }
    }
}

/// Visibility planner and pursuit settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Clearance added around every wall before extracting corners (meters)
    pub clearance_gap: f32,
    /// Arc length along the path to the pursuit point (meters)
    pub lookahead_distance: f32,
    /// Cross products below this are treated as parallel segments
    pub parallel_epsilon: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            clearance_gap: 0.2,
            lookahead_distance: 0.5,
            parallel_epsilon: 1e-6,
        }
    }
}

/// Initial robot placement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub region: PlacementRegion,
    /// Side of the square robots are spawned in (meters)
    pub spawn_extent: f32,
    pub robot_radius: f32,
    /// Extra clearance kept around every robot
    pub gap: f32,
    pub max_attempts: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            region: PlacementRegion::Uniform,
            spawn_extent: 2.9,
            robot_radius: 0.05,
            gap: 0.05,
            max_attempts: 10_000,
        }
    }
}

impl PusherConfig {
    /// Parse a configuration from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: PusherConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Check every value the core divides by or compares against
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f32) -> Result<()> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(PusherError::Config(format!("{} must be positive", name)))
            }
        }

        fn non_negative(name: &str, value: f32) -> Result<()> {
            if value >= 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(PusherError::Config(format!("{} must be non-negative", name)))
            }
        }

        positive("motion.wheel_separation", self.motion.wheel_separation)?;
        positive("motion.wheel_radius", self.motion.wheel_radius)?;
        positive("motion.max_motor_power", self.motion.max_motor_power)?;

        let fraction = self.perception.start_row_fraction;
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(PusherError::Config(
                "perception.start_row_fraction must be in (0, 1)".to_string(),
            ));
        }

        let b = &self.behavior;
        non_negative("behavior.random_walk_rate", b.random_walk_rate)?;
        non_negative("behavior.random_walk_limit", b.random_walk_limit)?;
        positive("behavior.push_timeout", b.push_timeout)?;
        positive("behavior.be_a_goal_timeout", b.be_a_goal_timeout)?;
        non_negative("behavior.be_a_goal_cooldown_max", b.be_a_goal_cooldown_max)?;
        if b.orbit_min_distance > b.orbit_max_distance {
            return Err(PusherError::Config(
                "behavior.orbit_min_distance must not exceed orbit_max_distance".to_string(),
            ));
        }

        non_negative("planner.clearance_gap", self.planner.clearance_gap)?;
        non_negative("planner.lookahead_distance", self.planner.lookahead_distance)?;
        non_negative("planner.parallel_epsilon", self.planner.parallel_epsilon)?;

        positive("placement.spawn_extent", self.placement.spawn_extent)?;
        non_negative("placement.robot_radius", self.placement.robot_radius)?;
        non_negative("placement.gap", self.placement.gap)?;
        if self.placement.max_attempts == 0 {
            return Err(PusherError::Config(
                "placement.max_attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
