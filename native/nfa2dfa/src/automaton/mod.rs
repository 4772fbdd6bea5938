//! Finite automata over a fixed character alphabet.
//!
//! This module provides epsilon-NFA and DFA implementations with:
//! - Epsilon closure computation
//! - Direct NFA simulation for membership queries
//! - Subset construction (NFA to DFA conversion)
//! - A line-oriented text format for loading and saving both

mod dfa;
mod epsilon_nfa;
mod error;
mod format;
mod recognizer;
mod state;
mod subset_construction;
mod symbol;

pub use dfa::DFA;
pub use epsilon_nfa::EpsilonNFA;
pub use error::{AutomatonError, MalformedKind, Result};
pub use format::{Description, Flavor, TransitionRow};
pub use recognizer::Recognizer;
pub use state::{StateId, StateSet};
pub use subset_construction::{simulate, subset_construction};
pub use symbol::{Alphabet, EPSILON, SymbolId, is_epsilon};
