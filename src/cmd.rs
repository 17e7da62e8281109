//! Command line interface

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::io::{read_cnf_file, read_network_file};
use crate::network::Pattern;
use crate::solver::{solve_all_outputs, solve_cnf, solve_single_output};

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about a gate network or CNF formula
    ///
    /// Will print the number of inputs, outputs and gates of a bench-style
    /// network, or the number of variables and clauses of a CNF stream.
    Show(ShowArgs),

    /// Solve for input assignments driving some output to the target value
    ///
    /// Enumerates, level by level, every primary-input assignment under
    /// which the required output value is reachable. Each solution is a
    /// string over 0, 1 and 2, where 2 marks an unconstrained input.
    #[clap(alias = "sat")]
    SolveAll(SolveAllArgs),

    /// Solve for input assignments constraining a single output
    ///
    /// Propagates the required value backward from one output only,
    /// ignoring the others. The result can be more permissive than the
    /// matching slice of solve-all.
    SolveOutput(SolveOutputArgs),

    /// Solve a CNF formula given as a flat literal stream
    ///
    /// The stream holds signed literals with 0 as clause terminator,
    /// followed by the (#variables, #width) header pair.
    SolveCnf(SolveCnfArgs),
}

fn report(solutions: &[Pattern]) -> ! {
    for p in solutions {
        println!("{p}");
    }
    if solutions.is_empty() {
        println!("UNSAT");
        std::process::exit(1);
    } else {
        println!("SAT: {} assignment(s)", solutions.len());
        std::process::exit(0);
    }
}

/// Command arguments for statistics
#[derive(Args)]
pub struct ShowArgs {
    /// Input to show (.bench or .cnf)
    file: PathBuf,
}

impl ShowArgs {
    /// Run the command
    pub fn run(&self) {
        if self.file.extension().is_some_and(|e| e == "cnf") {
            let cnf = read_cnf_file(&self.file);
            println!(
                "CNF with {} variables, {} clauses, {} don't-care",
                cnf.nb_vars(),
                cnf.nb_clauses(),
                cnf.dc_width()
            );
        } else {
            let net = read_network_file(&self.file);
            let unary = net.gates().iter().filter(|g| g.nb_fanins() == 1).count();
            println!("{net}");
            println!(
                "{} unary gates, {} binary gates",
                unary,
                net.nb_gates() - unary
            );
        }
    }
}

/// Command arguments for all-outputs solving
#[derive(Args)]
pub struct SolveAllArgs {
    /// Network to solve
    file: PathBuf,

    /// Require outputs to be 0 instead of 1
    #[arg(long)]
    zero: bool,
}

impl SolveAllArgs {
    /// Run the command
    pub fn run(&self) {
        let net = read_network_file(&self.file);
        let solutions = solve_all_outputs(&net, !self.zero);
        report(&solutions);
    }
}

/// Command arguments for single-output solving
#[derive(Args)]
pub struct SolveOutputArgs {
    /// Network to solve
    file: PathBuf,

    /// Index of the target output
    #[arg(short = 'o', long)]
    output: usize,

    /// Require the output to be 0 instead of 1
    #[arg(long)]
    zero: bool,
}

impl SolveOutputArgs {
    /// Run the command
    pub fn run(&self) {
        let net = read_network_file(&self.file);
        if self.output >= net.nb_outputs() {
            println!(
                "Output {} does not exist: the network has {} outputs",
                self.output,
                net.nb_outputs()
            );
            std::process::exit(2);
        }
        let solutions = solve_single_output(&net, self.output, !self.zero);
        report(&solutions);
    }
}

/// Command arguments for CNF solving
#[derive(Args)]
pub struct SolveCnfArgs {
    /// Formula to solve
    file: PathBuf,
}

impl SolveCnfArgs {
    /// Run the command
    pub fn run(&self) {
        let cnf = read_cnf_file(&self.file);
        let solutions = solve_cnf(&cnf);
        report(&solutions);
    }
}
