//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::automaton::error::{AutomatonError, MalformedKind, Result};
use crate::automaton::format::{Description, Flavor, TransitionRow};
use crate::automaton::recognizer::Recognizer;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::subset_construction::simulate;
use crate::automaton::symbol::{Alphabet, EPSILON, SymbolId, is_epsilon};

/// File line holding the epsilon row of a nondeterministic file.
const EPSILON_ROW_LINE: usize = 4;

/// An Epsilon Non-deterministic Finite Automaton.
///
/// Built once from a [`Description`] and immutable afterwards, so it can be
/// shared freely between threads answering membership queries.
#[derive(Debug, Clone)]
pub struct EpsilonNFA {
    /// Number of states (states are numbered 0..num_states)
    num_states: StateId,
    /// Start state, always [`EpsilonNFA::START`].
    start_state: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> set of destination states.
    /// For epsilon transitions, symbol == EPSILON. Missing entries are empty sets.
    transitions: HashMap<(StateId, SymbolId), StateSet>,
    /// Input symbols in declaration order (excluding epsilon)
    alphabet: Alphabet,
}

impl EpsilonNFA {
    /// The start state of every NFA loaded from text.
    pub const START: StateId = 0;

    /// Build the automaton from parsed field values.
    ///
    /// Only nondeterministic descriptions are accepted: a deterministic one
    /// starts at state 1 and reserves state 0 as its sink, which would change
    /// the language if read as an NFA starting at state 0.
    pub fn from_description(desc: &Description) -> Result<Self> {
        if desc.epsilon_row().is_none() {
            return Err(AutomatonError::malformed(
                EPSILON_ROW_LINE,
                MalformedKind::MissingEpsilonRow,
            ));
        }

        let num_states = desc.state_count() as StateId;
        let mut transitions = HashMap::new();

        let labelled_rows = desc
            .epsilon_row()
            .map(|row| (EPSILON, row))
            .into_iter()
            .chain(desc.alphabet().ids().zip(desc.rows()));
        for (symbol, row) in labelled_rows {
            for (source, destinations) in row.iter().enumerate() {
                if destinations.is_empty() {
                    continue;
                }
                let set = transitions
                    .entry((source as StateId, symbol))
                    .or_insert_with(|| StateSet::with_capacity(num_states as usize));
                for &destination in destinations {
                    set.insert(destination);
                }
            }
        }

        let mut final_states = StateSet::with_capacity(num_states as usize);
        for &state in desc.accepting() {
            final_states.insert(state);
        }

        Ok(Self {
            num_states,
            start_state: Self::START,
            final_states,
            transitions,
            alphabet: desc.alphabet().clone(),
        })
    }

    /// Load an NFA file (with an epsilon row).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_description(&Description::load(path, Flavor::Nondeterministic)?)
    }

    /// Render the automaton back into its text-format fields.
    pub fn to_description(&self) -> Description {
        let row_for = |symbol: SymbolId| -> TransitionRow {
            (0..self.num_states)
                .map(|state| {
                    self.transitions
                        .get(&(state, symbol))
                        .map(StateSet::to_vec)
                        .unwrap_or_default()
                })
                .collect()
        };

        Description {
            alphabet: self.alphabet.clone(),
            state_count: self.num_states as usize,
            accepting: self.final_states.to_vec(),
            epsilon: Some(row_for(EPSILON)),
            rows: self.alphabet.ids().map(row_for).collect(),
        }
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Get the alphabet (all symbols except epsilon).
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Whether a set of states contains an accepting state.
    pub fn is_accepting(&self, states: &StateSet) -> bool {
        states.intersects(&self.final_states)
    }

    /// Get the epsilon closure of a set of states.
    ///
    /// Each state is pushed at most once, so a call costs
    /// O(states + epsilon edges).
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states as usize);
        closure.union_with(states);
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(s) = stack.pop() {
            if let Some(destinations) = self.transitions.get(&(s, EPSILON)) {
                for dest in destinations.iter() {
                    if closure.insert(dest) {
                        stack.push(dest);
                    }
                }
            }
        }

        closure
    }

    /// Union of the destinations of `states` on `symbol`, without closing
    /// over epsilon moves.
    ///
    /// A symbol outside the alphabet (including epsilon) has no transitions
    /// and yields the empty set.
    pub fn step(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        let mut reached = StateSet::with_capacity(self.num_states as usize);
        if is_epsilon(symbol) || symbol as usize >= self.alphabet.len() {
            return reached;
        }

        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                reached.union_with(destinations);
            }
        }

        reached
    }

    /// Get the states reachable from a set of states on a given symbol.
    /// Returns the epsilon closure of the reached states.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        self.epsilon_closure(&self.step(states, symbol))
    }

    /// The epsilon closure of the start state.
    pub fn initial_closure(&self) -> StateSet {
        self.epsilon_closure(&StateSet::singleton(
            self.start_state,
            self.num_states as usize,
        ))
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }
}

impl Recognizer for EpsilonNFA {
    fn accepts(&self, input: &str) -> bool {
        simulate(self, input)
    }
}

impl FromStr for EpsilonNFA {
    type Err = AutomatonError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_description(&Description::parse(s, Flavor::Nondeterministic)?)
    }
}
