//! Common utilities and types for the pusher core

pub mod world;

pub use self::types::{Point2, Pose2D};
pub use self::world::{WallSpec, WorldView};

use std::f32::consts::PI;

/// Common types used across the codebase
pub mod types {
    use nalgebra::Vector2;

    /// A 2D point or vector (meters in world frame, unitless in body frame)
    pub type Point2 = Vector2<f32>;

    /// A planar pose
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Pose2D {
        pub position: Point2,
        /// Heading in radians, counter-clockwise from the world X axis
        pub heading: f32,
    }

    impl Pose2D {
        pub fn new(x: f32, y: f32, heading: f32) -> Self {
            Self {
                position: Point2::new(x, y),
                heading,
            }
        }

        /// Express a world-frame point in this pose's body frame (X forward, Y left)
        pub fn to_body_frame(&self, world_point: Point2) -> Point2 {
            let d = world_point - self.position;
            let (s, c) = (-self.heading).sin_cos();
            Point2::new(c * d.x - s * d.y, s * d.x + c * d.y)
        }
    }
}

/// Unit vector for a bearing in the body frame
pub fn dir_to_vec(bearing: f32) -> Point2 {
    Point2::new(bearing.cos(), bearing.sin())
}

/// Unsigned angular distance between two angles, in [0, pi]
pub fn angle_distance(a0: f32, a1: f32) -> f32 {
    let dist = (a1 - a0).abs() % (2.0 * PI);
    if dist > PI {
        2.0 * PI - dist
    } else {
        dist
    }
}
