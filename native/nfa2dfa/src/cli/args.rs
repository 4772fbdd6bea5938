//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nfa2dfa")]
#[command(about = "Evaluate strings against an epsilon-NFA or convert it to a DFA")]
#[command(version)]
pub struct Cli {
    /// Automaton file to load
    pub automaton: PathBuf,

    /// Convert the NFA to a DFA and write it to OUTPUT instead of evaluating strings
    #[arg(long = "to-dfa", visible_alias = "to-afd", value_name = "OUTPUT", conflicts_with = "dfa")]
    pub to_dfa: Option<PathBuf>,

    /// The automaton file describes a DFA (no epsilon row, state 1 is the start)
    #[arg(long)]
    pub dfa: bool,

    /// Only print verdicts, no prompt
    #[arg(short, long)]
    pub quiet: bool,
}
