//! Read gate networks and CNF formulas from files

mod bench;
mod cnf;

use std::fs::File;
use std::path::PathBuf;

pub use bench::{read_bench, write_bench};
pub use cnf::{read_cnf, ParsedCnf};

use crate::network::ParsedNetwork;

/// Read a gate network from a file
///
/// Following extensions are supported: .bench
pub fn read_network_file(path: &PathBuf) -> ParsedNetwork {
    let ext = path.extension();
    match ext {
        None => panic!("No extension given"),
        Some(s) => {
            if s == "bench" {
                let f = File::open(path).unwrap();
                read_bench(f).unwrap()
            } else {
                panic!("Unknown extension {}", s.to_string_lossy());
            }
        }
    }
}

/// Read a CNF formula from a file
///
/// Following extensions are supported: .cnf
pub fn read_cnf_file(path: &PathBuf) -> ParsedCnf {
    let ext = path.extension();
    match ext {
        None => panic!("No extension given"),
        Some(s) => {
            if s == "cnf" {
                let f = File::open(path).unwrap();
                read_cnf(f).unwrap()
            } else {
                panic!("Unknown extension {}", s.to_string_lossy());
            }
        }
    }
}
