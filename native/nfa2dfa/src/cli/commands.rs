//! CLI command implementations

use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::automaton::{DFA, EpsilonNFA, Recognizer, subset_construction};

use super::args::Cli;

const PROMPT: &str = "Enter a string (empty line to quit): ";

/// Execute the command selected by the parsed arguments.
pub fn execute(cli: Cli) -> Result<()> {
    if let Some(output) = &cli.to_dfa {
        return cmd_convert(&cli.automaton, output);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let evaluated = if cli.dfa {
        let dfa = DFA::load(&cli.automaton)
            .with_context(|| format!("Failed to load DFA from {}", cli.automaton.display()))?;
        run_session(&dfa, stdin.lock(), stdout.lock(), !cli.quiet)
    } else {
        let nfa = EpsilonNFA::load(&cli.automaton)
            .with_context(|| format!("Failed to load NFA from {}", cli.automaton.display()))?;
        run_session(&nfa, stdin.lock(), stdout.lock(), !cli.quiet)
    }
    .context("Failed to evaluate input")?;

    debug!("evaluated {evaluated} strings");
    Ok(())
}

fn cmd_convert(input: &Path, output: &Path) -> Result<()> {
    let nfa = EpsilonNFA::load(input)
        .with_context(|| format!("Failed to load NFA from {}", input.display()))?;
    let dfa = subset_construction(&nfa);
    dfa.save(output)
        .with_context(|| format!("Failed to write DFA to {}", output.display()))?;

    println!(
        "{} {} ({} states)",
        "DFA written to".green().bold(),
        output.display(),
        dfa.num_states()
    );
    Ok(())
}

/// Evaluate one candidate string per input line until a blank line or EOF,
/// writing `ACCEPTED` or `REJECTED` for each. Returns the number of strings
/// evaluated.
pub fn run_session<A, R, W>(
    automaton: &A,
    mut input: R,
    mut output: W,
    prompt: bool,
) -> io::Result<usize>
where
    A: Recognizer + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    let mut evaluated = 0;

    loop {
        if prompt {
            write!(output, "{PROMPT}")?;
            output.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let candidate = line.trim_end_matches(['\r', '\n']);
        if candidate.is_empty() {
            break;
        }

        let verdict = if automaton.accepts(candidate) {
            "ACCEPTED".green().bold()
        } else {
            "REJECTED".red().bold()
        };
        writeln!(output, "{verdict}")?;
        evaluated += 1;
    }

    Ok(evaluated)
}
