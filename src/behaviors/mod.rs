//! Behaviors module for the pusher robots
//!
//! Each robot runs a small state machine that wanders until it sees the
//! object, approaches it, orbits it until there is free space to push, and
//! pushes. In the landmark variant a robot that loses sight of the goal stops
//! and turns into a goal-colored marker for its peers.
pub mod fsm;
pub mod state;

pub use self::fsm::{step, BehaviorInput, Transition};
pub use self::state::{Behavior, RobotState};

use serde::{Deserialize, Serialize};

/// Which version of the controller a robot runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorVariant {
    /// Five states, robots become landmarks when they lose the goal
    #[default]
    Landmark,
    /// Four states, approach the object as soon as it is visible
    Baseline,
}
