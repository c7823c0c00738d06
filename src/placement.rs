//! Random initial placement of the robots
//!
//! Positions are drawn by rejection sampling inside a square spawn area. A
//! candidate is rejected when it comes too close to the goal, the object, a
//! wall or a robot placed earlier. When the retry budget runs out the last
//! candidate is kept and reported as [`Placement::Degraded`].

use crate::common::{Point2, Pose2D, WorldView};
use crate::config::PlacementConfig;
use crate::error::PusherError;
use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::str::FromStr;

/// Where in the spawn square robots may start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlacementRegion {
    /// Anywhere in the square
    #[default]
    #[serde(rename = "random")]
    Uniform,
    /// The upper quarter band
    #[serde(rename = "top")]
    TopBand,
    /// The lower quarter band
    #[serde(rename = "bottom")]
    BottomBand,
}

impl FromStr for PlacementRegion {
    type Err = PusherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(PlacementRegion::Uniform),
            "top" => Ok(PlacementRegion::TopBand),
            "bottom" => Ok(PlacementRegion::BottomBand),
            other => {
                warn!("Unknown placement region '{}'", other);
                Err(PusherError::UnknownPlacementRegion(other.to_string()))
            }
        }
    }
}

/// Outcome of placing one robot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Every clearance constraint holds
    Placed(Pose2D),
    /// The retry budget ran out and this pose may overlap something
    Degraded(Pose2D),
}

impl Placement {
    pub fn pose(&self) -> Pose2D {
        match self {
            Placement::Placed(pose) | Placement::Degraded(pose) => *pose,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Placement::Degraded(_))
    }
}

/// Draws collision-free starting poses
#[derive(Debug, Clone, Default)]
pub struct PositionSampler {
    config: PlacementConfig,
}

impl PositionSampler {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    /// Place `count` robots one after another
    pub fn sample<R: Rng + ?Sized>(&self, world: &WorldView, count: usize, rng: &mut R) -> Vec<Placement> {
        let mut taken: Vec<Point2> = Vec::with_capacity(count);
        let mut placements = Vec::with_capacity(count);

        for _ in 0..count {
            let placement = self.sample_one(world, &taken, rng);
            taken.push(placement.pose().position);
            placements.push(placement);
        }

        placements
    }

    /// Place one robot away from `taken` positions
    pub fn sample_one<R: Rng + ?Sized>(&self, world: &WorldView, taken: &[Point2], rng: &mut R) -> Placement {
        let mut position = self.candidate(rng);
        let mut attempts = 1;
        while !self.is_free(world, taken, position) {
            if attempts >= self.config.max_attempts {
                warn!(
                    "No free position after {} attempts, keeping {:?}",
                    attempts, position
                );
                return Placement::Degraded(Pose2D {
                    position,
                    heading: rng.random_range(0.0..2.0 * PI),
                });
            }
            position = self.candidate(rng);
            attempts += 1;
        }

        Placement::Placed(Pose2D {
            position,
            heading: rng.random_range(0.0..2.0 * PI),
        })
    }

    fn candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> Point2 {
        let s = self.config.spawn_extent;
        let x = rng.random::<f32>() * s - s * 0.5;
        let y = match self.config.region {
            PlacementRegion::Uniform => rng.random::<f32>() * s - s * 0.5,
            PlacementRegion::TopBand => rng.random::<f32>() * s * 0.25 + s * 0.25,
            PlacementRegion::BottomBand => rng.random::<f32>() * s * 0.25 - s * 0.5,
        };
        Point2::new(x, y)
    }

    /// Whether a robot at `position` clears the goal, object, walls and `taken`
    pub fn is_free(&self, world: &WorldView, taken: &[Point2], position: Point2) -> bool {
        let r = self.config.robot_radius;
        let gap = self.config.gap;

        if (world.goal_position - position).norm() < world.goal_radius + r + gap {
            return false;
        }
        if (world.object_position - position).norm() < world.object_bounding_radius() + r + gap {
            return false;
        }
        if world.walls.iter().any(|wall| wall.overlaps_circle_box(position, r + gap)) {
            return false;
        }
        !taken.iter().any(|other| (other - position).norm() < 2.0 * r + gap)
    }
}
