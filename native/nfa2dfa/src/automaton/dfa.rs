//! Deterministic Finite Automaton (DFA) with an explicit sink state.

use std::path::Path;
use std::str::FromStr;

use crate::automaton::error::{AutomatonError, MalformedKind, Result};
use crate::automaton::format::{Description, Flavor};
use crate::automaton::recognizer::Recognizer;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Alphabet, SymbolId};

/// File line holding the first transition row of a deterministic file.
const FIRST_ROW_LINE: usize = 4;

/// A Deterministic Finite Automaton with a total transition table.
///
/// State [`DFA::SINK`] is the non-accepting absorbing state standing for "no
/// valid transition"; [`DFA::START`] is the start state. Every (state, symbol)
/// pair has exactly one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DFA {
    alphabet: Alphabet,
    /// Number of states, the sink included
    num_states: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// Row-major transition table: `table[state * alphabet.len() + symbol]`
    table: Vec<StateId>,
    /// NFA states behind each non-sink state (index `id - 1`), when the DFA
    /// was produced by subset construction
    subsets: Option<Vec<StateSet>>,
}

impl DFA {
    pub const SINK: StateId = 0;
    pub const START: StateId = 1;

    /// A DFA holding only the sink state.
    pub(crate) fn with_sink(alphabet: Alphabet) -> Self {
        let table = vec![Self::SINK; alphabet.len()];
        Self {
            alphabet,
            num_states: 1,
            final_states: StateSet::with_capacity(16),
            table,
            subsets: None,
        }
    }

    /// Add a new state whose transitions all lead to the sink, and return its ID.
    pub(crate) fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        self.table
            .extend(std::iter::repeat_n(Self::SINK, self.alphabet.len()));
        id
    }

    /// Add a final (accepting) state.
    pub(crate) fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    pub(crate) fn set_transition(
        &mut self,
        source: StateId,
        symbol: SymbolId,
        destination: StateId,
    ) {
        let slot = self.slot(source, symbol);
        self.table[slot] = destination;
    }

    pub(crate) fn set_subsets(&mut self, subsets: Vec<StateSet>) {
        self.subsets = Some(subsets);
    }

    #[inline]
    fn slot(&self, state: StateId, symbol: SymbolId) -> usize {
        state as usize * self.alphabet.len() + symbol as usize
    }

    /// Build a DFA from the fields of a deterministic file.
    ///
    /// State 0 must be a non-accepting sink looping to itself and state 1 must
    /// exist, since it is the start state.
    pub fn from_description(desc: &Description) -> Result<Self> {
        if desc.state_count() <= Self::START as usize {
            return Err(AutomatonError::malformed(
                2,
                MalformedKind::StateOutOfRange {
                    state: Self::START,
                    count: desc.state_count(),
                },
            ));
        }
        if desc
            .epsilon_row()
            .is_some_and(|row| row.iter().any(|cell| !cell.is_empty()))
        {
            return Err(AutomatonError::malformed(
                FIRST_ROW_LINE,
                MalformedKind::EpsilonInDeterministic,
            ));
        }
        let first_row_line = FIRST_ROW_LINE + usize::from(desc.epsilon_row().is_some());

        let mut dfa = Self::with_sink(desc.alphabet().clone());
        for _ in 1..desc.state_count() {
            dfa.add_state();
        }
        for &state in desc.accepting() {
            if state == Self::SINK {
                return Err(AutomatonError::malformed(3, MalformedKind::InvalidSink));
            }
            dfa.add_final_state(state);
        }

        for (symbol, row) in desc.alphabet().ids().zip(desc.rows()) {
            let line = first_row_line + symbol as usize;
            for (source, cell) in row.iter().enumerate() {
                let destination = match cell.as_slice() {
                    [] => Self::SINK,
                    [destination] => *destination,
                    _ => {
                        return Err(AutomatonError::malformed(
                            line,
                            MalformedKind::NondeterministicCell(format!("{cell:?}")),
                        ));
                    }
                };
                if source as StateId == Self::SINK && destination != Self::SINK {
                    return Err(AutomatonError::malformed(line, MalformedKind::InvalidSink));
                }
                dfa.set_transition(source as StateId, symbol, destination);
            }
        }

        Ok(dfa)
    }

    /// Load a DFA file (no epsilon row).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_description(&Description::load(path, Flavor::Deterministic)?)
    }

    /// Render the DFA into its text-format fields. Every cell carries exactly
    /// one destination, sink transitions included.
    pub fn to_description(&self) -> Description {
        let rows = self
            .alphabet
            .ids()
            .map(|symbol| {
                (0..self.num_states)
                    .map(|state| vec![self.transition(state, symbol)])
                    .collect()
            })
            .collect();

        Description {
            alphabet: self.alphabet.clone(),
            state_count: self.num_states as usize,
            accepting: self.final_states.to_vec(),
            epsilon: None,
            rows,
        }
    }

    /// Write the DFA file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_description().save(path)
    }

    /// The destination of `source` on `symbol`; the sink for symbols outside
    /// the alphabet.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> StateId {
        if source >= self.num_states || symbol as usize >= self.alphabet.len() {
            return Self::SINK;
        }
        self.table[self.slot(source, symbol)]
    }

    /// Get the number of states, the sink included.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    pub fn start_state(&self) -> StateId {
        Self::START
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The NFA states a DFA state stands for. `None` for the sink, for
    /// unknown states, and for DFAs that were loaded from a file.
    pub fn subset(&self, state: StateId) -> Option<&StateSet> {
        let index = (state as usize).checked_sub(1)?;
        self.subsets.as_ref()?.get(index)
    }

    /// Get all transitions as an iterator, in (state, symbol) order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        (0..self.num_states).flat_map(move |state| {
            self.alphabet
                .ids()
                .map(move |symbol| (state, symbol, self.transition(state, symbol)))
        })
    }
}

impl Recognizer for DFA {
    fn accepts(&self, input: &str) -> bool {
        let mut state = Self::START;
        for c in input.chars() {
            let Some(symbol) = self.alphabet.id_of(c) else {
                return false;
            };
            state = self.transition(state, symbol);
            if state == Self::SINK {
                return false;
            }
        }
        self.final_states.contains(state)
    }
}

impl FromStr for DFA {
    type Err = AutomatonError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_description(&Description::parse(s, Flavor::Deterministic)?)
    }
}
