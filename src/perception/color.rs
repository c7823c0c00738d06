//! Pixel classification against the landmark palette

use crate::config::PerceptionConfig;
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Read the pixel at `index` of a packed RGB buffer
    pub fn from_packed(buffer: &[u8], index: usize) -> Self {
        let i = index * 3;
        Self::new(buffer[i], buffer[i + 1], buffer[i + 2])
    }

    /// Every channel is within `tolerance` of `other`
    pub fn is_near(&self, other: &Rgb, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.b.abs_diff(other.b) <= tolerance
    }
}

/// What a single pixel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelClass {
    Background,
    Object,
    Goal,
    Robot,
}

/// The three landmark colors plus matching tolerance
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    pub object: Rgb,
    pub goal: Rgb,
    pub robot: Rgb,
    pub tolerance: u8,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::from_config(&PerceptionConfig::default())
    }
}

impl ColorPalette {
    pub fn from_config(config: &PerceptionConfig) -> Self {
        Self {
            object: config.object_color,
            goal: config.goal_color,
            robot: config.robot_color,
            tolerance: config.color_tolerance,
        }
    }

    /// Classify one pixel. Object wins over goal, goal over robot.
    pub fn classify(&self, pixel: Rgb) -> PixelClass {
        if pixel.is_near(&self.object, self.tolerance) {
            PixelClass::Object
        } else if pixel.is_near(&self.goal, self.tolerance) {
            PixelClass::Goal
        } else if pixel.is_near(&self.robot, self.tolerance) {
            PixelClass::Robot
        } else {
            PixelClass::Background
        }
    }
}
