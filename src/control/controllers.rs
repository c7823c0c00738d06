//! Controllers for the robot

use crate::common::Point2;
use crate::config::MotionConfig;

/// Power applied to each wheel motor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelPower {
    pub left: f32,
    pub right: f32,
}

/// Velocities to apply to a robot's rigid body
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionCommand {
    /// World-frame linear velocity (m/s)
    pub linear: Point2,
    /// Counter-clockwise angular velocity (rad/s)
    pub angular: f32,
    pub wheels: WheelPower,
}

impl MotionCommand {
    /// Brake both motors
    pub fn stop() -> Self {
        Self::default()
    }

    pub fn is_stopped(&self) -> bool {
        self.linear == Point2::zeros() && self.angular == 0.0
    }
}

/// Maps a desired body-frame heading onto a two-wheel robot
///
/// The wheel mix turns in place when the heading is to the side and drives
/// straight when it is ahead, with both wheels at full combined power.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialDrive {
    wheel_separation: f32,
    wheel_radius: f32,
    max_motor_power: f32,
}

impl Default for DifferentialDrive {
    fn default() -> Self {
        Self::new(&MotionConfig::default())
    }
}

impl DifferentialDrive {
    /// Create a new controller
    pub fn new(config: &MotionConfig) -> Self {
        DifferentialDrive {
            wheel_separation: config.wheel_separation,
            wheel_radius: config.wheel_radius,
            max_motor_power: config.max_motor_power,
        }
    }

    /// Wheel powers for a body-frame heading vector (X forward, Y left)
    pub fn wheel_power(&self, heading: Point2) -> WheelPower {
        if heading.x == 0.0 && heading.y == 0.0 {
            return WheelPower::default();
        }

        let angle = heading.y.atan2(heading.x);
        let (sin, cos) = angle.sin_cos();
        let power = Point2::new(cos - sin, cos + sin).normalize() * self.max_motor_power;
        WheelPower {
            left: power.x,
            right: power.y,
        }
    }

    /// Compute the motion command for a heading, given the robot's world heading
    pub fn command(&self, heading: Point2, robot_heading: f32) -> MotionCommand {
        if heading.x == 0.0 && heading.y == 0.0 {
            return MotionCommand::stop();
        }

        let wheels = self.wheel_power(heading);
        let linear_speed = self.wheel_radius / 2.0 * (wheels.left + wheels.right);
        let angular = self.wheel_radius / self.wheel_separation * (wheels.right - wheels.left);

        MotionCommand {
            linear: Point2::new(robot_heading.cos(), robot_heading.sin()) * linear_speed,
            angular,
            wheels,
        }
    }
}
