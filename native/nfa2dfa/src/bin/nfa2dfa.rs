//! nfa2dfa - evaluate strings against an epsilon-NFA, or convert it to a DFA
//!
//! Log verbosity is controlled through `RUST_LOG` (warnings by default).

use clap::Parser;
use colored::Colorize;
use std::process;

use nfa2dfa::cli::{Cli, commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}
