//! Lifecycle management for episode-scoped components
//!
//! A component is configured once per episode, activated to start ticking,
//! deactivated to pause, and cleaned up to reset for the next episode.

use crate::error::{PusherError, Result};
use log::debug;

/// Trait for components that follow a lifecycle pattern
pub trait LifecycleNode: Send + Sync {
    /// Configure the node
    fn on_configure(&mut self) -> Result<()>;

    /// Activate the node
    fn on_activate(&mut self) -> Result<()>;

    /// Deactivate the node
    fn on_deactivate(&mut self) -> Result<()>;

    /// Clean up the node
    fn on_cleanup(&mut self) -> Result<()>;

    /// Current lifecycle state
    fn state(&self) -> State;
}

/// Base implementation for lifecycle nodes
#[derive(Debug, Clone)]
pub struct LifecycleNodeBase {
    pub name: String,
    state: State,
}

/// State of a lifecycle node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Unconfigured,
    Inactive,
    Active,
}

impl LifecycleNodeBase {
    /// Create a new lifecycle node base
    pub fn new(name: &str) -> Self {
        LifecycleNodeBase {
            name: name.to_string(),
            state: State::Unconfigured,
        }
    }

    /// Get the current state
    pub fn get_state(&self) -> State {
        self.state
    }

    /// Move from `from` to `to`, failing if the node is elsewhere
    pub fn transition(&mut self, from: State, to: State) -> Result<()> {
        if self.state != from {
            return Err(PusherError::Lifecycle(format!(
                "{}: cannot go to {:?} from {:?}, expected {:?}",
                self.name, to, self.state, from
            )));
        }
        debug!("{}: {:?} -> {:?}", self.name, self.state, to);
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_checks_source_state() {
        let mut base = LifecycleNodeBase::new("node");
        assert!(base.transition(State::Inactive, State::Active).is_err());
        assert_eq!(base.get_state(), State::Unconfigured);

        base.transition(State::Unconfigured, State::Inactive).unwrap();
        base.transition(State::Inactive, State::Active).unwrap();
        assert_eq!(base.get_state(), State::Active);
    }
}
