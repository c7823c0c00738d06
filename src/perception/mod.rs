//! Perception module for the pusher robots
//!
//! Turns the four camera images of a robot into object and goal sightings.
//! The pipeline scans panoramic rows from just above the robot's own body up
//! to the horizon. Row index over image height is used as a distance proxy,
//! so a smaller value means closer.
pub mod bearing;
pub mod color;
pub mod sensors;

use self::bearing::estimate_bearing;
use self::color::{ColorPalette, PixelClass};
use self::sensors::CameraRing;
use crate::common::angle_distance;
use crate::config::PerceptionConfig;
use log::trace;
use std::f32::consts::FRAC_PI_2;

/// Where a landmark was seen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    /// Body-frame bearing in (-pi, pi]
    pub bearing: f32,
    /// Normalized image row, 0 is adjacent
    pub distance: f32,
}

/// What one robot currently knows about the object and goal
///
/// NaN means "not seen in the last processed frame".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotPercept {
    pub object_bearing: f32,
    pub object_distance: f32,
    pub goal_bearing: f32,
    pub goal_distance: f32,
    /// Bearing of an object edge with free space behind it
    pub push_bearing: f32,
    pub last_frame_timestamp: f32,
    pub could_see_goal_last_tick: bool,
    /// Goal and object were more than 90 degrees apart when last seen together
    pub goal_object_wide_angle: bool,
}

impl Default for RobotPercept {
    fn default() -> Self {
        Self {
            object_bearing: f32::NAN,
            object_distance: f32::NAN,
            goal_bearing: f32::NAN,
            goal_distance: f32::NAN,
            push_bearing: f32::NAN,
            last_frame_timestamp: f32::NAN,
            could_see_goal_last_tick: false,
            goal_object_wide_angle: false,
        }
    }
}

impl RobotPercept {
    pub fn can_see_object(&self) -> bool {
        !self.object_distance.is_nan()
    }

    pub fn can_see_goal(&self) -> bool {
        !self.goal_distance.is_nan()
    }

    /// Whether free space to push was found behind the object
    pub fn can_push(&self) -> bool {
        !self.push_bearing.is_nan()
    }

    pub fn object(&self) -> Option<Sighting> {
        self.can_see_object().then_some(Sighting {
            bearing: self.object_bearing,
            distance: self.object_distance,
        })
    }

    pub fn goal(&self) -> Option<Sighting> {
        self.can_see_goal().then_some(Sighting {
            bearing: self.goal_bearing,
            distance: self.goal_distance,
        })
    }

    fn clear_sightings(&mut self) {
        self.object_bearing = f32::NAN;
        self.object_distance = f32::NAN;
        self.goal_bearing = f32::NAN;
        self.goal_distance = f32::NAN;
        self.push_bearing = f32::NAN;
    }
}

/// Per-robot camera processing with a freshness cache
#[derive(Debug, Clone)]
pub struct PerceptionPipeline {
    palette: ColorPalette,
    start_row_fraction: f32,
    percept: RobotPercept,
}

impl Default for PerceptionPipeline {
    fn default() -> Self {
        Self::new(&PerceptionConfig::default())
    }
}

impl PerceptionPipeline {
    pub fn new(config: &PerceptionConfig) -> Self {
        Self {
            palette: ColorPalette::from_config(config),
            start_row_fraction: config.start_row_fraction,
            percept: RobotPercept::default(),
        }
    }

    /// Latest percept
    pub fn percept(&self) -> &RobotPercept {
        &self.percept
    }

    /// Forget everything seen so far
    pub fn reset(&mut self) {
        self.percept = RobotPercept::default();
    }

    /// Process a new camera frame
    ///
    /// Frames whose capture time matches the last processed one are skipped and
    /// the previous percept is returned unchanged.
    pub fn update(&mut self, cameras: &CameraRing<'_>) -> &RobotPercept {
        let timestamp = cameras.capture_time();
        if timestamp == self.percept.last_frame_timestamp {
            trace!("Skipping unchanged camera frame at t={}", timestamp);
            return &self.percept;
        }

        self.percept.last_frame_timestamp = timestamp;
        self.percept.could_see_goal_last_tick = self.percept.can_see_goal();
        self.percept.clear_sightings();

        if timestamp < 0.0 {
            return &self.percept;
        }

        self.scan(cameras);
        self.update_wide_angle();
        &self.percept
    }

    fn scan(&mut self, cameras: &CameraRing<'_>) {
        let height = cameras.height();
        let start = ((height as f32 * self.start_row_fraction) as usize).min(height - 1);

        let mut row = Vec::with_capacity(cameras.panorama_width());
        let mut below = Vec::with_capacity(cameras.panorama_width());
        if start + 1 < height {
            cameras.classify_row_into(start + 1, &self.palette, &mut below);
        } else {
            below.resize(cameras.panorama_width(), PixelClass::Background);
        }

        let p = &mut self.percept;
        for y in (0..=start).rev() {
            cameras.classify_row_into(y, &self.palette, &mut row);
            let distance = y as f32 / height as f32;

            if row.contains(&PixelClass::Object) {
                p.object_distance = distance;
                if p.object_bearing.is_nan() {
                    p.object_bearing = estimate_bearing(&row, PixelClass::Object);
                }
            }
            if row.contains(&PixelClass::Goal) {
                p.goal_distance = distance;
                if p.goal_bearing.is_nan() {
                    p.goal_bearing = estimate_bearing(&row, PixelClass::Goal);
                }
            }

            if p.push_bearing.is_nan() {
                let has_push_edge = row.iter().zip(below.iter()).any(|(&here, &under)| {
                    here == PixelClass::Object
                        && under != PixelClass::Robot
                        && (y == start || under != PixelClass::Object)
                });
                if has_push_edge {
                    p.push_bearing = estimate_bearing(&row, PixelClass::Object);
                }
            }

            std::mem::swap(&mut row, &mut below);
        }
    }

    fn update_wide_angle(&mut self) {
        let p = &mut self.percept;
        match (p.can_see_goal(), p.can_see_object()) {
            (true, true) => {
                p.goal_object_wide_angle = angle_distance(p.goal_bearing, p.object_bearing) > FRAC_PI_2
            }
            (true, false) => p.goal_object_wide_angle = true,
            _ => {}
        }
    }
}
