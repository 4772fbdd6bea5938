//! Line-oriented text format shared by NFA and DFA files.
//!
//! ```text
//! a,b                 alphabet
//! 3                   state count
//! 2                   accepting states (may be empty)
//! {1},{},{}           epsilon row (NFA files only)
//! {},{2},{}           one row per alphabet symbol, in alphabet order
//! {},{},{1;2}
//! ```
//!
//! Every row holds one cell per state; a cell lists destination states
//! separated by `;`.

use log::debug;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::automaton::error::{AutomatonError, MalformedKind, Result};
use crate::automaton::state::StateId;
use crate::automaton::symbol::Alphabet;

/// Destinations of every state for one symbol, indexed by source state.
pub type TransitionRow = Vec<Vec<StateId>>;

/// Which kind of automaton a file describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Has an epsilon row before the symbol rows; cells may list any number of
    /// destinations.
    Nondeterministic,
    /// No epsilon row; each cell has at most one destination. An empty cell
    /// is shorthand for the sink, state 0. State 0 must still be the sink and
    /// state 1 the start, whatever the cells say.
    Deterministic,
}

/// The raw field values of an automaton file, validated for shape and ranges.
///
/// Only the parser and the automata in this crate build descriptions, so a
/// `Description` in hand always satisfies the format's range and shape rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub(crate) alphabet: Alphabet,
    pub(crate) state_count: usize,
    /// Accepting states in file order.
    pub(crate) accepting: Vec<StateId>,
    /// Present for nondeterministic descriptions only.
    pub(crate) epsilon: Option<TransitionRow>,
    /// One row per alphabet symbol, in alphabet order.
    pub(crate) rows: Vec<TransitionRow>,
}

/// Iterates over lines while remembering the 1-based number of the last one.
struct Lines<'a> {
    inner: std::str::Lines<'a>,
    number: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines(),
            number: 0,
        }
    }

    fn next_required(&mut self, what: &'static str) -> Result<&'a str> {
        self.number += 1;
        self.inner
            .next()
            .ok_or_else(|| AutomatonError::malformed(self.number, MalformedKind::MissingLine(what)))
    }

    fn error(&self, kind: MalformedKind) -> AutomatonError {
        AutomatonError::malformed(self.number, kind)
    }
}

impl Description {
    /// Parse the content of an automaton file.
    pub fn parse(text: &str, flavor: Flavor) -> Result<Self> {
        let mut lines = Lines::new(text);

        let alphabet = parse_alphabet(lines.next_required("alphabet")?)
            .map_err(|kind| lines.error(kind))?;
        let state_count = parse_state_count(lines.next_required("state count")?)
            .map_err(|kind| lines.error(kind))?;

        let accepting_line = lines.next_required("accepting states")?.trim();
        let accepting = if accepting_line.is_empty() {
            Vec::new()
        } else {
            accepting_line
                .split(',')
                .map(|token| parse_state(token, state_count))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|kind| lines.error(kind))?
        };

        let epsilon = match flavor {
            Flavor::Nondeterministic => {
                let line = lines.next_required("epsilon transition")?;
                Some(parse_row(line, state_count, flavor).map_err(|kind| lines.error(kind))?)
            }
            Flavor::Deterministic => None,
        };

        let mut rows = Vec::with_capacity(alphabet.len());
        for _ in alphabet.ids() {
            let line = lines.next_required("symbol transition")?;
            rows.push(parse_row(line, state_count, flavor).map_err(|kind| lines.error(kind))?);
        }

        for line in lines.inner.by_ref() {
            lines.number += 1;
            if !line.trim().is_empty() {
                return Err(AutomatonError::malformed(
                    lines.number,
                    MalformedKind::TrailingContent,
                ));
            }
        }

        debug!(
            "parsed {:?} automaton: {} symbols, {} states, {} accepting",
            flavor,
            alphabet.len(),
            state_count,
            accepting.len()
        );

        Ok(Self {
            alphabet,
            state_count,
            accepting,
            epsilon,
            rows,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    pub fn accepting(&self) -> &[StateId] {
        &self.accepting
    }

    pub fn epsilon_row(&self) -> Option<&TransitionRow> {
        self.epsilon.as_ref()
    }

    /// Symbol rows, in alphabet order.
    pub fn rows(&self) -> &[TransitionRow] {
        &self.rows
    }

    /// Read and parse an automaton file.
    pub fn load(path: impl AsRef<Path>, flavor: Flavor) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| AutomatonError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, flavor)
    }

    /// Write the description to a file, replacing any existing content.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|source| AutomatonError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn parse_alphabet(line: &str) -> std::result::Result<Alphabet, MalformedKind> {
    if line.trim().is_empty() {
        return Err(MalformedKind::EmptyAlphabet);
    }
    let mut alphabet = Alphabet::new();
    for token in line.split(',') {
        let token = token.trim();
        let mut chars = token.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(MalformedKind::InvalidSymbol(token.to_string())),
        };
        if !alphabet.push(symbol) {
            return Err(MalformedKind::DuplicateSymbol(symbol));
        }
    }
    Ok(alphabet)
}

fn parse_state_count(line: &str) -> std::result::Result<usize, MalformedKind> {
    let token = line.trim();
    match token.parse::<StateId>() {
        Ok(count) if count > 0 => Ok(count as usize),
        _ => Err(MalformedKind::InvalidStateCount(token.to_string())),
    }
}

fn parse_state(token: &str, state_count: usize) -> std::result::Result<StateId, MalformedKind> {
    let token = token.trim();
    let state = token
        .parse::<StateId>()
        .map_err(|_| MalformedKind::InvalidStateToken(token.to_string()))?;
    if state as usize >= state_count {
        return Err(MalformedKind::StateOutOfRange {
            state,
            count: state_count,
        });
    }
    Ok(state)
}

fn parse_row(
    line: &str,
    state_count: usize,
    flavor: Flavor,
) -> std::result::Result<TransitionRow, MalformedKind> {
    let cells: Vec<&str> = line.split(',').collect();
    if cells.len() != state_count {
        return Err(MalformedKind::CellCountMismatch {
            expected: state_count,
            found: cells.len(),
        });
    }
    cells
        .into_iter()
        .map(|cell| parse_cell(cell, state_count, flavor))
        .collect()
}

fn parse_cell(
    cell: &str,
    state_count: usize,
    flavor: Flavor,
) -> std::result::Result<Vec<StateId>, MalformedKind> {
    let cell = cell.trim();
    let inner = cell
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| MalformedKind::InvalidCell(cell.to_string()))?
        .trim();

    let destinations = if inner.is_empty() {
        Vec::new()
    } else {
        inner
            .split(';')
            .map(|token| parse_state(token, state_count))
            .collect::<std::result::Result<Vec<_>, _>>()?
    };

    match flavor {
        Flavor::Nondeterministic => Ok(destinations),
        Flavor::Deterministic => match destinations.len() {
            0 => Ok(vec![0]),
            1 => Ok(destinations),
            _ => Err(MalformedKind::NondeterministicCell(cell.to_string())),
        },
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &TransitionRow) -> fmt::Result {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        f.write_str("{")?;
        for (j, destination) in cell.iter().enumerate() {
            if j > 0 {
                f.write_str(";")?;
            }
            write!(f, "{destination}")?;
        }
        f.write_str("}")?;
    }
    writeln!(f)
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.alphabet)?;
        writeln!(f, "{}", self.state_count)?;
        for (i, state) in self.accepting.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{state}")?;
        }
        writeln!(f)?;
        if let Some(epsilon) = &self.epsilon {
            write_row(f, epsilon)?;
        }
        for row in &self.rows {
            write_row(f, row)?;
        }
        Ok(())
    }
}
