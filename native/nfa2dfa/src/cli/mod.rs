//! Command-line interface for the `nfa2dfa` binary.

pub mod args;
pub mod commands;

pub use args::Cli;
