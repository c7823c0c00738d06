//! Behavior states and the per-robot controller state

use std::fmt;

/// Locomotion behavior of one robot
///
/// Each variant carries only the memory that behavior needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Wander with a slowly drifting heading offset
    RandomWalk { bias: f32 },
    /// Drive straight at the object
    ApproachObject,
    /// Orbit the object looking for a free side to push from
    MoveAroundObject { clockwise: bool },
    /// Drive into the object
    PushObject,
    /// Stand still and act as a landmark for peers
    BeAGoal,
}

impl Default for Behavior {
    fn default() -> Self {
        Behavior::RandomWalk { bias: 0.0 }
    }
}

impl Behavior {
    /// Get the state name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Behavior::RandomWalk { .. } => "RANDOM_WALK",
            Behavior::ApproachObject => "APPROACH_OBJECT",
            Behavior::MoveAroundObject { .. } => "MOVE_AROUND_OBJECT",
            Behavior::PushObject => "PUSH_OBJECT",
            Behavior::BeAGoal => "BE_A_GOAL",
        }
    }

    /// Same behavior regardless of carried memory
    pub fn same_kind(&self, other: &Behavior) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Approach, orbit and push share one timer
    fn shares_timer_with(&self, other: &Behavior) -> bool {
        let shared = |b: &Behavior| {
            matches!(
                b,
                Behavior::ApproachObject | Behavior::MoveAroundObject { .. } | Behavior::PushObject
            )
        };
        shared(self) && shared(other)
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Controller memory for one robot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RobotState {
    pub behavior: Behavior,
    /// Seconds since the last timer-resetting transition
    pub state_timer: f32,
    /// Seconds left before the robot may become a landmark again
    pub cooldown: f32,
}

impl RobotState {
    /// Whether the engine should render this robot with the goal material
    pub fn appears_as_goal(&self) -> bool {
        matches!(self.behavior, Behavior::BeAGoal)
    }

    /// Switch behavior, keeping the timer only between approach, orbit and push
    pub(crate) fn change_to(&mut self, next: Behavior) {
        if self.behavior.same_kind(&next) {
            self.behavior = next;
            return;
        }
        if !self.behavior.shares_timer_with(&next) {
            self.state_timer = 0.0;
        }
        self.behavior = next;
    }
}
