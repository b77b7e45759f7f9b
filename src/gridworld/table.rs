use std::{
    collections::{hash_map::Entry, HashMap},
    fs::File,
    io,
    path::Path,
};

use log::{info, warn};
use serde::Deserialize;

use super::{Action, State};
use crate::error::Result;

/// A single row of the MDP dynamics: taking `action` in `state` leads to `next_state` and yields `reward`
#[derive(Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Transition {
    pub state: State,
    pub action: Action,
    pub next_state: State,
    pub reward: f32,
}

/// The deterministic transition table of a gridworld
///
/// Records are kept in source order. Lookups go through an index keyed by `(state, action)`
/// which holds the *first* record for each pair, so a duplicated pair is answered by
/// whichever row came first, exactly as a front-to-back scan would.
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    records: Vec<Transition>,
    index: HashMap<(State, Action), usize>,
}

impl TransitionTable {
    /// Load a headerless, tab separated table of `state, action, next_state, reward` rows
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::from_reader(File::open(path)?)?;
        info!("Loaded {} transitions from {}", table.len(), path.display());

        Ok(table)
    }

    /// Load a table in the same format as [`from_path`](Self::from_path) from any reader
    pub fn from_reader(reader: impl io::Read) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        rdr.deserialize()
            .collect::<std::result::Result<Vec<Transition>, _>>()
            .map(Self::from_iter)
            .map_err(Into::into)
    }

    /// Get the record answering `(state, action)`, if any
    pub fn lookup(&self, state: State, action: Action) -> Option<&Transition> {
        self.index.get(&(state, action)).map(|&i| &self.records[i])
    }

    /// Number of records, duplicates included
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records in source order
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.records.iter()
    }
}

impl FromIterator<Transition> for TransitionTable {
    fn from_iter<T: IntoIterator<Item = Transition>>(iter: T) -> Self {
        let records = iter.into_iter().collect::<Vec<_>>();
        let mut index = HashMap::with_capacity(records.len());

        for (i, tr) in records.iter().enumerate() {
            match index.entry((tr.state, tr.action)) {
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
                Entry::Occupied(first) => warn!(
                    "Duplicate transition for state {} action {} at row {}, keeping row {}",
                    tr.state,
                    tr.action,
                    i + 1,
                    first.get() + 1
                ),
            }
        }

        Self { records, index }
    }
}
