//! One tick of the behavior controller
//!
//! [`step`] is a pure function of the previous robot state, the current
//! percept and infrared ranges, the elapsed time and the random source. It
//! returns the next state and the body-frame heading to hand to the drive.

use super::state::{Behavior, RobotState};
use super::BehaviorVariant;
use crate::common::{dir_to_vec, Point2};
use crate::config::BehaviorConfig;
use crate::perception::sensors::InfraredRing;
use crate::perception::{RobotPercept, Sighting};
use rand::Rng;
use std::f32::consts::PI;

/// Inputs the controller reads in a tick
#[derive(Debug, Clone, Copy)]
pub struct BehaviorInput<'a> {
    pub percept: &'a RobotPercept,
    pub infrared: &'a InfraredRing,
}

/// Result of one controller tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub next: RobotState,
    /// Desired body-frame heading. Zero means stop.
    pub heading: Point2,
}

/// Advance a robot's controller by `dt` seconds
pub fn step<R: Rng + ?Sized>(
    state: &RobotState,
    input: &BehaviorInput<'_>,
    config: &BehaviorConfig,
    dt: f32,
    rng: &mut R,
) -> Transition {
    let mut next = *state;
    next.state_timer += dt;
    next.cooldown = (next.cooldown - dt).max(0.0);

    let ctx = Context {
        percept: input.percept,
        infrared: input.infrared,
        config,
        timer: next.state_timer,
    };

    let (behavior, heading) = match state.behavior {
        Behavior::RandomWalk { bias } => ctx.random_walk(bias, dt, rng),
        Behavior::ApproachObject => ctx.approach_object(),
        Behavior::MoveAroundObject { clockwise } => ctx.move_around_object(clockwise),
        Behavior::PushObject => ctx.push_object(),
        Behavior::BeAGoal => {
            let (behavior, heading) = ctx.be_a_goal();
            if !behavior.same_kind(&Behavior::BeAGoal) && config.be_a_goal_cooldown_max > 0.0 {
                next.cooldown = rng.random_range(0.0..config.be_a_goal_cooldown_max);
            }
            (behavior, heading)
        }
    };
    next.change_to(behavior);

    // A robot cooling down may not stay a landmark
    if next.cooldown > 0.0 && next.behavior.same_kind(&Behavior::BeAGoal) {
        next.change_to(Behavior::default());
    }

    Transition { next, heading }
}

/// Whether a bearing lies within `tolerance` of straight ahead or straight behind
pub fn in_front_or_behind(bearing: f32, tolerance: f32) -> bool {
    bearing.abs() < tolerance || bearing < -PI + tolerance || bearing > PI - tolerance
}

/// Orbit direction that turns the robot toward the goal side of the object
pub fn orbit_clockwise(object_bearing: f32, goal_bearing: f32) -> bool {
    let diff = (object_bearing - goal_bearing).rem_euclid(2.0 * PI);
    diff >= PI
}

struct Context<'a> {
    percept: &'a RobotPercept,
    infrared: &'a InfraredRing,
    config: &'a BehaviorConfig,
    timer: f32,
}

impl Context<'_> {
    fn landmark(&self) -> bool {
        self.config.variant == BehaviorVariant::Landmark
    }

    fn walk() -> (Behavior, Point2) {
        (Behavior::default(), Point2::zeros())
    }

    fn orbit(&self, object: &Sighting) -> Behavior {
        let clockwise = self
            .percept
            .goal()
            .map(|goal| orbit_clockwise(object.bearing, goal.bearing))
            .unwrap_or(false);
        Behavior::MoveAroundObject { clockwise }
    }

    fn random_walk<R: Rng + ?Sized>(&self, bias: f32, dt: f32, rng: &mut R) -> (Behavior, Point2) {
        let rate = self.config.random_walk_rate;
        let limit = self.config.random_walk_limit.abs();
        let mut bias = bias;
        if rate > 0.0 {
            bias += dt * rng.random_range(-rate..rate);
        }
        let bias = bias.min(limit).max(-limit);
        let heading = dir_to_vec(bias);

        let p = self.percept;
        if self.landmark() {
            let goal_lost = !p.can_see_goal() && p.could_see_goal_last_tick;
            let wide_enough = !self.config.be_a_goal_requires_wide_angle || p.goal_object_wide_angle;
            if goal_lost && wide_enough {
                return (Behavior::BeAGoal, heading);
            }
        }

        let spotted = p.can_see_object() && (!self.landmark() || p.can_see_goal());
        if spotted {
            return (Behavior::ApproachObject, heading);
        }
        (Behavior::RandomWalk { bias }, heading)
    }

    fn approach_object(&self) -> (Behavior, Point2) {
        let Some(object) = self.percept.object() else {
            return Self::walk();
        };

        let heading = dir_to_vec(object.bearing);
        let close = object.distance < self.config.approach_camera_distance
            && self.infrared.range_toward(object.bearing) < self.config.approach_infrared_distance;
        if close && in_front_or_behind(object.bearing, self.config.front_angle_tolerance) {
            let next = if !self.percept.can_see_goal() && self.percept.can_push() {
                Behavior::PushObject
            } else {
                self.orbit(&object)
            };
            return (next, heading);
        }
        (Behavior::ApproachObject, heading)
    }

    fn move_around_object(&self, clockwise: bool) -> (Behavior, Point2) {
        let Some(object) = self.percept.object() else {
            return Self::walk();
        };
        if !self.percept.can_see_goal() && self.percept.can_push() {
            return (Behavior::PushObject, Point2::zeros());
        }
        if self.timer >= self.config.push_timeout {
            return Self::walk();
        }

        let clockwise = self
            .percept
            .goal()
            .map(|goal| orbit_clockwise(object.bearing, goal.bearing))
            .unwrap_or(clockwise);

        let toward = dir_to_vec(object.bearing);
        let mut heading = Point2::new(-toward.y, toward.x);
        if clockwise {
            heading = -heading;
        }

        let ir = self.infrared.range_toward(object.bearing);
        if object.distance < self.config.orbit_min_distance || ir < self.config.orbit_min_distance {
            heading -= toward;
        } else if object.distance > self.config.orbit_max_distance || ir > self.config.orbit_max_distance {
            heading += toward;
        }

        (Behavior::MoveAroundObject { clockwise }, heading)
    }

    fn push_object(&self) -> (Behavior, Point2) {
        let Some(object) = self.percept.object() else {
            return Self::walk();
        };
        if self.percept.can_see_goal() || !self.percept.can_push() {
            return (self.orbit(&object), Point2::zeros());
        }
        if self.timer >= self.config.push_timeout {
            return Self::walk();
        }
        (Behavior::PushObject, dir_to_vec(object.bearing))
    }

    fn be_a_goal(&self) -> (Behavior, Point2) {
        let p = self.percept;
        let touching = p.object_distance == 0.0
            && self.infrared.range_toward(p.object_bearing) < self.config.adjacent_infrared_distance;
        if p.can_see_goal() || touching || self.timer >= self.config.be_a_goal_timeout {
            return Self::walk();
        }
        (Behavior::BeAGoal, Point2::zeros())
    }
}
