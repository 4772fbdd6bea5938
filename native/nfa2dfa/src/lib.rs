//! Epsilon-NFA loading, simulation and conversion to DFA.
//!
//! ```
//! use nfa2dfa::automaton::{EpsilonNFA, Recognizer, subset_construction};
//!
//! let nfa: EpsilonNFA = "a,b\n2\n1\n{},{}\n{1},{}\n{},{1}\n".parse().unwrap();
//! assert!(nfa.accepts("abb"));
//!
//! let dfa = subset_construction(&nfa);
//! assert!(dfa.accepts("abb"));
//! assert_eq!(dfa.num_states(), 3);
//! ```

pub mod automaton;
pub mod cli;
