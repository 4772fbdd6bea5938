//! Error types for loading and saving automata.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::automaton::state::StateId;

/// Errors raised while loading, parsing or persisting an automaton.
#[derive(Debug, Error)]
pub enum AutomatonError {
    /// The automaton file could not be read, or the output could not be written.
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but its content violates the automaton format.
    ///
    /// `line` is 1-based.
    #[error("malformed automaton at line {line}: {kind}")]
    Malformed { line: usize, kind: MalformedKind },
}

impl AutomatonError {
    pub(crate) fn malformed(line: usize, kind: MalformedKind) -> Self {
        Self::Malformed { line, kind }
    }

    /// Whether this is an I/O failure rather than a content problem.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// The structural violation behind an [`AutomatonError::Malformed`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedKind {
    #[error("missing {0} line")]
    MissingLine(&'static str),

    #[error("alphabet is empty")]
    EmptyAlphabet,

    /// Alphabet entries must be exactly one character.
    #[error("invalid alphabet symbol {0:?}")]
    InvalidSymbol(String),

    #[error("symbol {0:?} is declared twice")]
    DuplicateSymbol(char),

    #[error("state count {0:?} is not a positive integer")]
    InvalidStateCount(String),

    #[error("{0:?} is not a state identifier")]
    InvalidStateToken(String),

    #[error("state {state} is out of range for {count} states")]
    StateOutOfRange { state: StateId, count: usize },

    #[error("transition row has {found} cells, expected {expected}")]
    CellCountMismatch { expected: usize, found: usize },

    /// A cell is not of the form `{}` or `{d1;d2;...}`.
    #[error("invalid transition cell {0:?}")]
    InvalidCell(String),

    /// A deterministic row holds more than one destination in a cell.
    #[error("cell {0:?} has more than one destination in a deterministic automaton")]
    NondeterministicCell(String),

    /// State 0 of a deterministic automaton must be a non-accepting
    /// self-looping sink.
    #[error("state 0 is not a non-accepting absorbing sink")]
    InvalidSink,

    /// A nondeterministic automaton was built from fields without an
    /// epsilon row, i.e. from a deterministic file.
    #[error("nondeterministic automaton has no epsilon row")]
    MissingEpsilonRow,

    #[error("deterministic automaton has epsilon transitions")]
    EpsilonInDeterministic,

    #[error("unexpected content after the last transition row")]
    TrailingContent,
}

/// A specialized `Result` type for automaton operations.
pub type Result<T> = std::result::Result<T, AutomatonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AutomatonError::malformed(
            4,
            MalformedKind::CellCountMismatch {
                expected: 3,
                found: 2,
            },
        );
        assert_eq!(
            err.to_string(),
            "malformed automaton at line 4: transition row has 2 cells, expected 3"
        );
        assert!(!err.is_io());
    }

    #[test]
    fn test_io_kind() {
        let err = AutomatonError::Io {
            path: PathBuf::from("missing.nfa"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.is_io());
        assert!(err.to_string().starts_with("cannot access missing.nfa"));
    }
}
