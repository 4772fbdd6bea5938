//! Subset construction algorithm for converting ε-NFA to DFA, and direct
//! simulation of the ε-NFA over an input string.

use indexmap::IndexMap;
use indexmap::map::Entry;
use log::{info, trace};
use std::collections::VecDeque;

use crate::automaton::dfa::DFA;
use crate::automaton::epsilon_nfa::EpsilonNFA;
use crate::automaton::state::{StateId, StateSet};

/// Decide membership by tracking the set of live NFA states.
///
/// Never materializes a DFA. A character outside the alphabet rejects the
/// input immediately, as does reaching the empty set of states.
pub fn simulate(nfa: &EpsilonNFA, input: &str) -> bool {
    let mut current = nfa.initial_closure();

    for c in input.chars() {
        let Some(symbol) = nfa.alphabet().id_of(c) else {
            return false;
        };
        current = nfa.move_on_symbol(&current, symbol);
        if current.is_empty() {
            return false;
        }
    }

    nfa.is_accepting(&current)
}

/// Convert an epsilon-NFA to a DFA using breadth-first powerset construction.
///
/// The closure of the start state becomes [`DFA::START`]; further subsets get
/// consecutive identifiers in discovery order, visiting alphabet symbols in
/// declaration order. Empty successor sets map to [`DFA::SINK`]. The result
/// depends only on the NFA, so repeated conversions are identical.
pub fn subset_construction(nfa: &EpsilonNFA) -> DFA {
    // Keyed by the ascending state list of each subset. Entry `i` is DFA
    // state `i + 1`.
    let mut discovered: IndexMap<Vec<StateId>, StateSet> = IndexMap::new();
    let mut dfa = DFA::with_sink(nfa.alphabet().clone());
    let mut worklist: VecDeque<StateId> = VecDeque::new();

    let initial = nfa.initial_closure();
    let initial_id = dfa.add_state();
    debug_assert_eq!(initial_id, DFA::START);
    if nfa.is_accepting(&initial) {
        dfa.add_final_state(initial_id);
    }
    discovered.insert(initial.to_vec(), initial);
    worklist.push_back(initial_id);

    while let Some(current) = worklist.pop_front() {
        for symbol in nfa.alphabet().ids() {
            let next = nfa.move_on_symbol(&discovered[current as usize - 1], symbol);

            let target = if next.is_empty() {
                DFA::SINK
            } else {
                match discovered.entry(next.to_vec()) {
                    Entry::Occupied(entry) => entry.index() as StateId + 1,
                    Entry::Vacant(entry) => {
                        let id = dfa.add_state();
                        debug_assert_eq!(id as usize, entry.index() + 1);
                        if nfa.is_accepting(&next) {
                            dfa.add_final_state(id);
                        }
                        trace!("discovered DFA state {id} = {next:?}");
                        entry.insert(next);
                        worklist.push_back(id);
                        id
                    }
                }
            };

            dfa.set_transition(current, symbol, target);
        }
    }

    info!(
        "subset construction: {} NFA states -> {} DFA states ({} accepting)",
        nfa.num_states(),
        dfa.num_states(),
        dfa.final_states().len()
    );

    dfa.set_subsets(discovered.into_values().collect());
    dfa
}
