//! Control module for the pusher robots
pub mod controllers;

pub use self::controllers::{DifferentialDrive, MotionCommand, WheelPower};
