//! Membership queries shared by nondeterministic and deterministic automata.

/// An automaton that decides whether it accepts a string.
///
/// Characters outside the automaton's alphabet never match a transition, so
/// any input containing one is rejected.
pub trait Recognizer {
    fn accepts(&self, input: &str) -> bool;
}
