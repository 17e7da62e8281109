//! Boolean satisfiability through the semi-tensor product of matrices
//!
//! This crate solves combinational gate networks and CNF formulas without a
//! classical SAT loop: the input is compiled into chains of small dense 0/1
//! "structure matrices" composed by the semi-tensor product, and satisfying
//! assignments are enumerated exhaustively from the reduced matrices.
//!
//! # Usage
//!
//! ```bash
//! # Show available commands
//! stpsat help
//! # Enumerate the assignments reaching the outputs of a network
//! stpsat solve-all design.bench
//! # Constrain a single output, required to be 0
//! stpsat solve-output design.bench -o 2 --zero
//! # Solve a CNF literal stream
//! stpsat solve-cnf formula.cnf
//! ```
//!
//! Two textual inputs are supported, selected by extension. `.bench` files
//! hold a gate list with per-gate truth tables:
//! ```text
//! INPUT(a)
//! INPUT(b)
//! x = LUT 0x8 (a, b)
//! OUTPUT(x)
//! ```
//! `.cnf` files hold a flat integer stream: signed literals, `0` as clause
//! terminator, then the `(#variables, #width)` header pair.
//!
//! # Library
//!
//! Parsing returns immutable value objects ([`ParsedNetwork`],
//! [`io::ParsedCnf`]) that are threaded explicitly into the solvers; nothing
//! is shared between invocations, so re-running a solver on the same input
//! always yields the same set. Solvers return every consistent assignment as
//! [`Pattern`]s over three-valued bits, an empty set meaning UNSAT:
//! ```
//! use stpsat::{io::read_bench, solver::solve_all_outputs};
//! let net = read_bench("INPUT(a)\nINPUT(b)\nx = LUT 0x8 (a, b)\nOUTPUT(x)\n".as_bytes()).unwrap();
//! let solutions = solve_all_outputs(&net, true);
//! assert_eq!(format!("{}", solutions[0]), "11");
//! ```
//!
//! The engine is single-threaded and runs each call to completion. The
//! enumeration returns all distinct partial assignments rather than a single
//! witness, and is therefore worst-case exponential in the number of gates or
//! clauses with shared variables. Callers wanting a time bound must bound the
//! input size.

#![warn(missing_docs)]

pub mod cmd;
pub mod io;
pub mod matrix;
pub mod network;
pub mod solver;

pub use matrix::LogicMatrix;
pub use network::{GateRecord, ParsedNetwork, Pattern, Trit};
pub use solver::{solve_all_outputs, solve_cnf, solve_single_output};
