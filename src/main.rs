use clap::Parser;

use stpsat::cmd::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Show(a) => a.run(),
        Commands::SolveAll(a) => a.run(),
        Commands::SolveOutput(a) => a.run(),
        Commands::SolveCnf(a) => a.run(),
    }
}
