use std::collections::{hash_map::Entry, HashMap};

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent.
/// Model-based algorithms that need the full dynamics should query the concrete
/// environment instead of stepping through it.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State: Clone;

    /// A representation of an action that an agent can take to affect the environment
    type Action: Clone;

    /// Determine if the state is active or terminal
    fn is_active(&self) -> bool;

    /// Sample an action uniformly from the action space
    fn random_action(&self) -> Self::Action;

    /// Update the environment in response to an action taken by an agent, producing a new state and associated reward
    ///
    /// **Returns** `(next_state, reward)`, where `next_state` is `None` once the episode has ended
    fn step(&mut self, action: Self::Action) -> (Option<Self::State>, f32);

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;
}

/// An environment with a finite, enumerable state space
pub trait DiscreteStateSpace: Environment {
    /// Get every non-terminal state of the environment
    fn states(&self) -> Vec<Self::State>;
}

/// An environment with a finite, enumerable action space
pub trait DiscreteActionSpace: Environment {
    /// Get the available actions
    ///
    /// The returned vec should never be empty
    fn actions(&self) -> Vec<Self::Action>;
}

/// Named running statistics for an episode, e.g. total reward or step count
#[derive(Debug, Clone)]
pub struct Report {
    keys: Vec<&'static str>,
    data: HashMap<&'static str, f64>,
}

impl Report {
    /// Create a report tracking the given keys, each starting at zero
    pub fn new(keys: Vec<&'static str>) -> Self {
        let data = keys.iter().map(|&k| (k, 0.0)).collect();
        Self { keys, data }
    }

    /// The tracked keys, in the order they were given
    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    /// Get the entry for a key
    pub fn entry(&mut self, key: &'static str) -> Entry<'_, &'static str, f64> {
        self.data.entry(key)
    }

    /// Read a value without resetting it
    pub fn get(&self, key: &str) -> Option<f64> {
        self.data.get(key).copied()
    }

    /// Take the current values and reset every key to zero
    pub fn take(&mut self) -> HashMap<&'static str, f64> {
        let fresh = self.keys.iter().map(|&k| (k, 0.0)).collect();
        std::mem::replace(&mut self.data, fresh)
    }
}
