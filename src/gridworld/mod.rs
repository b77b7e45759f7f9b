use std::path::PathBuf;

use log::{debug, warn};
use rand::{seq::SliceRandom, thread_rng, Rng};
use strum::VariantArray;

use crate::{
    env::{DiscreteActionSpace, DiscreteStateSpace, Environment, Report},
    error::Result,
};

mod action;
mod table;

pub use action::Action;
pub use table::{Transition, TransitionTable};

/// A state identifier; `1..=14` are the playable cells, [`TERMINAL_STATE`] the two corners
pub type State = usize;

/// The state shared by both terminal corners of the grid
pub const TERMINAL_STATE: State = 0;

/// Number of rows and columns in the grid
pub const GRID_SIZE: usize = 4;

const NUM_STATES: State = GRID_SIZE * GRID_SIZE - 2;

/// Configuration for a [`GridWorld`]
#[derive(Debug, Clone, PartialEq)]
pub struct GridWorldConfig {
    /// Discount factor, carried for the planning algorithm
    pub gamma: f32,
    /// Convergence threshold, carried for the planning algorithm
    pub theta: f32,
    /// Location of the transition table, relative paths resolve against the working directory
    pub table_path: PathBuf,
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            theta: 0.5,
            table_path: PathBuf::from("gridworld.txt"),
        }
    }
}

/// The 4x4 gridworld from Sutton & Barto, chapter 4
///
/// The playable states `1..=14` fill the grid in row-major order between two terminal
/// corners. Dynamics come entirely from a [`TransitionTable`]: the environment never
/// computes a move itself, it only looks one up.
///
/// Planning algorithms use [`state_transition`](Self::state_transition) together with
/// [`states`](DiscreteStateSpace::states) and [`actions`](DiscreteActionSpace::actions).
/// The [`Environment`] impl additionally lets sampling agents walk through episodes.
pub struct GridWorld {
    table: TransitionTable,
    gamma: f32,
    theta: f32,
    pos: Option<State>,
    pub report: Report,
}

impl GridWorld {
    /// Load the transition table named by `config` and build the environment
    ///
    /// **Errors** if the table cannot be opened or is malformed
    pub fn new(config: GridWorldConfig) -> Result<Self> {
        let table = TransitionTable::from_path(&config.table_path)?;
        Ok(Self::from_table(table, config.gamma, config.theta))
    }

    /// Build the environment around an already loaded table
    pub fn from_table(table: TransitionTable, gamma: f32, theta: f32) -> Self {
        Self {
            table,
            gamma,
            theta,
            pos: None,
            report: Report::new(vec!["reward", "steps"]),
        }
    }

    /// Look up the outcome of taking `action` in `state`
    ///
    /// `state` is not validated. **Returns** `(next_state, reward)`, or `None` if the table
    /// has no row for the pair.
    pub fn state_transition(&self, state: State, action: Action) -> Option<(State, f32)> {
        let outcome = self
            .table
            .lookup(state, action)
            .map(|tr| (tr.next_state, tr.reward));

        if outcome.is_none() {
            debug!("No transition for state {} action {}", state, action);
        }

        outcome
    }

    /// The state identifiers as laid out on the grid, terminal corners included
    pub fn layout(&self) -> [[State; GRID_SIZE]; GRID_SIZE] {
        let mut grid = [[TERMINAL_STATE; GRID_SIZE]; GRID_SIZE];
        for state in self.states() {
            grid[state / GRID_SIZE][state % GRID_SIZE] = state;
        }

        grid
    }

    /// Discount factor
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// Convergence threshold
    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Start an episode from a chosen state instead of a random one
    pub fn reset_to(&mut self, state: State) -> State {
        self.pos = Some(state);
        state
    }

    /// A widget drawing the state layout, see [`show_environment`](Self::show_environment)
    #[cfg(feature = "viz")]
    pub fn state_grid(&self) -> crate::viz::StateGrid {
        crate::viz::StateGrid::new(self.layout())
    }

    /// Draw the state layout in the terminal until `q` or `Esc` is pressed
    ///
    /// Terminal cells are shaded grey, playable states white, each labelled with its identifier.
    #[cfg(feature = "viz")]
    pub fn show_environment(&self) -> std::io::Result<()> {
        crate::viz::show(&self.state_grid())
    }
}

impl Environment for GridWorld {
    type State = State;
    type Action = Action;

    fn is_active(&self) -> bool {
        self.pos.is_some()
    }

    fn random_action(&self) -> Self::Action {
        *Action::VARIANTS
            .choose(&mut thread_rng())
            .expect("Action space is not empty")
    }

    fn step(&mut self, action: Self::Action) -> (Option<Self::State>, f32) {
        let Some(state) = self.pos else {
            warn!("Step taken in a finished episode, call reset first");
            return (None, 0.0);
        };

        self.report.entry("steps").and_modify(|x| *x += 1.0);

        let Some((next_state, reward)) = self.state_transition(state, action) else {
            warn!(
                "Undefined transition for state {} action {}, ending episode",
                state, action
            );
            self.pos = None;
            return (None, 0.0);
        };

        self.report.entry("reward").and_modify(|x| *x += reward as f64);

        self.pos = (next_state != TERMINAL_STATE).then_some(next_state);
        (self.pos, reward)
    }

    fn reset(&mut self) -> Self::State {
        let state = thread_rng().gen_range(1..=NUM_STATES);
        self.reset_to(state)
    }
}

impl DiscreteStateSpace for GridWorld {
    fn states(&self) -> Vec<Self::State> {
        (1..=NUM_STATES).collect()
    }
}

impl DiscreteActionSpace for GridWorld {
    fn actions(&self) -> Vec<Self::Action> {
        Action::VARIANTS.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use once_cell::sync::Lazy;

    use super::*;

    const TABLE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/gridworld.txt");

    static TABLE: Lazy<TransitionTable> =
        Lazy::new(|| TransitionTable::from_path(TABLE_PATH).unwrap());

    fn gridworld() -> GridWorld {
        GridWorld::from_table(TABLE.clone(), 1.0, 0.5)
    }

    #[test]
    fn config_defaults() {
        let config = GridWorldConfig::default();
        assert_eq!(config.gamma, 1.0);
        assert_eq!(config.theta, 0.5);
        assert_eq!(config.table_path, PathBuf::from("gridworld.txt"));
    }

    #[test]
    fn new_keeps_parameters() {
        let env = GridWorld::new(GridWorldConfig {
            gamma: 0.9,
            theta: 1e-3,
            table_path: TABLE_PATH.into(),
        })
        .unwrap();

        assert_eq!(env.gamma(), 0.9, "Gamma stored unchanged");
        assert_eq!(env.theta(), 1e-3, "Theta stored unchanged");
        assert_eq!(env.table().len(), 56, "Every row of the file loaded");
    }

    #[test]
    fn new_fails_on_missing_table() {
        let config = GridWorldConfig {
            table_path: "no/such/gridworld.txt".into(),
            ..Default::default()
        };
        assert!(GridWorld::new(config).is_err());
    }

    #[test]
    fn transitions_match_table() {
        let env = gridworld();
        for tr in env.table().iter() {
            assert_eq!(
                env.state_transition(tr.state, tr.action),
                Some((tr.next_state, tr.reward)),
                "Recorded outcome for {:?}",
                tr
            );
        }
    }

    #[test]
    fn shipped_table_dynamics() {
        let env = gridworld();
        assert_eq!(env.state_transition(1, Action::Up), Some((1, -1.0)), "Wall bounces back");
        assert_eq!(
            env.state_transition(1, Action::Left),
            Some((0, -1.0)),
            "Corner is terminal"
        );
        assert_eq!(env.state_transition(5, Action::Down), Some((9, -1.0)));
        assert_eq!(env.state_transition(14, Action::Right), Some((0, -1.0)));
        assert_eq!(env.state_transition(0, Action::Up), None, "Terminal has no moves");
        assert_eq!(env.state_transition(15, Action::Up), None, "Unknown state");
    }

    #[test]
    fn absent_pair_is_none() {
        let table = TransitionTable::from_reader("1\tU\t1\t-1\n".as_bytes()).unwrap();
        let env = GridWorld::from_table(table, 1.0, 0.5);

        assert_eq!(env.state_transition(1, Action::Up), Some((1, -1.0)));
        assert_eq!(env.state_transition(5, Action::Down), None);
    }

    #[test]
    fn layout_row_major_between_corners() {
        let env = gridworld();
        assert_eq!(
            env.layout(),
            [[0, 1, 2, 3], [4, 5, 6, 7], [8, 9, 10, 11], [12, 13, 14, 0]]
        );
    }

    #[test]
    fn state_and_action_spaces() {
        let env = gridworld();
        assert_eq!(env.states(), (1..=14).collect::<Vec<_>>());
        assert_eq!(
            env.actions(),
            [Action::Up, Action::Down, Action::Left, Action::Right]
        );
    }

    #[test]
    fn episode_steps() {
        let mut env = gridworld();
        assert!(!env.is_active(), "No episode before reset");

        env.reset_to(6);
        assert_eq!(env.step(Action::Up), (Some(2), -1.0), "Up works");
        assert_eq!(env.step(Action::Left), (Some(1), -1.0), "Left works");
        assert_eq!(
            env.step(Action::Left),
            (None, -1.0),
            "Reaching the corner ends the episode"
        );
        assert!(!env.is_active(), "Env is terminal");
        assert_eq!(env.step(Action::Down), (None, 0.0), "No steps after the end");

        let report = env.report.take();
        assert_eq!(report["steps"], 3.0, "Report steps correct");
        assert_eq!(report["reward"], -3.0, "Report reward correct");
    }

    #[test]
    fn undefined_step_ends_episode() {
        let table = TransitionTable::from_reader("1\tU\t1\t-1\n".as_bytes()).unwrap();
        let mut env = GridWorld::from_table(table, 1.0, 0.5);

        env.reset_to(1);
        assert_eq!(env.step(Action::Up), (Some(1), -1.0));
        assert_eq!(env.step(Action::Down), (None, 0.0));
        assert!(!env.is_active());
    }

    #[test]
    fn random_episodes_terminate() {
        let mut env = gridworld();
        for _ in 0..10 {
            let start = env.reset();
            assert!((1..=14).contains(&start), "Reset lands on a playable state");

            let mut next_state = Some(start);
            while next_state.is_some() {
                let action = env.random_action();
                let (next, reward) = env.step(action);
                assert_eq!(reward, -1.0);
                next_state = next;
            }

            let report = env.report.take();
            assert_eq!(report["reward"], -report["steps"], "Every move costs one");
        }
    }
}
