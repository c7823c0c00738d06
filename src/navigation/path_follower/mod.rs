//! Path following along planned waypoints

use crate::common::Point2;
use crate::error::Result;
use std::collections::HashMap;
use std::fmt::Debug;

/// Trait for path following algorithms
pub trait PathFollower: Debug + Send + Sync {
    /// Create a new instance with default parameters
    fn new() -> Self
    where
        Self: Sized;

    /// Point on `path` to steer toward, None for an empty path
    fn target(&self, path: &[Point2]) -> Option<Point2>;

    /// Get the name of this path follower
    fn name(&self) -> &str;

    /// Configure the path follower with parameters
    fn configure(&mut self, params: &HashMap<String, f32>) -> Result<()>;
}

pub mod pure_pursuit;
