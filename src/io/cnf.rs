//! IO for the flat CNF literal stream
//!
//! Not strict DIMACS: the stream is a plain whitespace-separated sequence of
//! signed integers. Literal signs indicate negation, `0` terminates a clause,
//! and the two trailing integers form the header pair
//! `(#variables, #don't-care-width)`.

use std::io::{BufRead, BufReader, Read};

/// An immutable parsed CNF formula
///
/// Literals are 1-based; a negative literal is the negation of the variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCnf {
    nb_vars: usize,
    dc_width: usize,
    clauses: Vec<Vec<i32>>,
}

impl ParsedCnf {
    /// Build a formula from its parts and check consistency
    pub fn new(nb_vars: usize, dc_width: usize, clauses: Vec<Vec<i32>>) -> ParsedCnf {
        let ret = ParsedCnf {
            nb_vars,
            dc_width,
            clauses,
        };
        ret.check();
        ret
    }

    /// Return the number of variables
    pub fn nb_vars(&self) -> usize {
        self.nb_vars
    }

    /// Return the declared number of don't-care variables
    ///
    /// These are variables reported in assignment strings but constrained by
    /// no clause.
    pub fn dc_width(&self) -> usize {
        self.dc_width
    }

    /// Return the number of clauses
    pub fn nb_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// The clauses, in stream order
    pub fn clauses(&self) -> &[Vec<i32>] {
        &self.clauses
    }

    /// Check consistency of the datastructure
    pub fn check(&self) {
        assert!(self.dc_width <= self.nb_vars);
        for c in &self.clauses {
            for l in c {
                assert_ne!(*l, 0, "Clause terminator inside a clause");
                assert!(
                    l.unsigned_abs() as usize <= self.nb_vars,
                    "Literal {l} is out of range"
                );
            }
        }
    }
}

/// Read a CNF formula from a flat integer stream
///
/// Tokens that do not parse as integers are silently skipped, matching the
/// bench parser's policy; literals outside the declared variable range are
/// dropped the same way. A stream without the two trailing header integers
/// is rejected.
pub fn read_cnf<R: Read>(r: R) -> Result<ParsedCnf, String> {
    let mut tokens: Vec<i32> = Vec::new();
    for l in BufReader::new(r).lines() {
        let Ok(s) = l else {
            return Err("Error during file IO".to_string());
        };
        for t in s.split_whitespace() {
            if let Ok(v) = t.parse::<i32>() {
                tokens.push(v);
            }
        }
    }
    if tokens.len() < 2 {
        return Err("Missing (#variables, #width) header".to_string());
    }
    let dc_width = tokens.pop().unwrap();
    let nb_vars = tokens.pop().unwrap();
    if nb_vars < 0 || dc_width < 0 || dc_width > nb_vars {
        return Err(format!("Invalid header pair ({nb_vars}, {dc_width})"));
    }
    let nb_vars = nb_vars as usize;

    let mut clauses = Vec::new();
    let mut cur = Vec::new();
    for t in tokens {
        if t == 0 {
            clauses.push(std::mem::take(&mut cur));
        } else if t.unsigned_abs() as usize <= nb_vars {
            cur.push(t);
        }
    }
    if !cur.is_empty() {
        // Unterminated trailing clause: kept rather than lost
        clauses.push(cur);
    }
    Ok(ParsedCnf::new(nb_vars, dc_width as usize, clauses))
}
