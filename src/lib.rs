/// Environment traits shared by agents and planning algorithms
pub mod env;

/// Errors raised while loading an environment
pub mod error;

/// The 4x4 gridworld MDP and its transition table
pub mod gridworld;

/// Terminal rendering of the gridworld
#[cfg(feature = "viz")]
pub mod viz;

pub use error::{Error, Result};
pub use gridworld::{Action, GridWorld, GridWorldConfig, State, Transition, TransitionTable};
