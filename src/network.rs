//! Data model for solving: three-valued bits, input patterns and parsed gate networks
//!
//! A network is a flat table of single-output truth-table gates. Every signal
//! has a numeric id: ids below the primary-input threshold (the number of
//! inputs) are primary inputs, ids at or above it are gate outputs, assigned
//! in file order and never redefined.
//!
//! Solver answers are [`Pattern`]s: one [`Trit`] per primary input, where
//! `Unknown` marks an input the solution does not constrain. In the textual
//! form used by the original tools these are strings over '0', '1' and '2'.

use std::fmt;

use volute::Lut;

use crate::matrix::LogicMatrix;

/// A three-valued boolean: false, true or unconstrained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trit {
    /// Fixed to 0
    False,
    /// Fixed to 1
    True,
    /// Not constrained ('2' in the textual form)
    Unknown,
}

impl Trit {
    /// Convert from a concrete boolean
    pub fn from_bool(b: bool) -> Trit {
        if b {
            Trit::True
        } else {
            Trit::False
        }
    }

    /// Return the concrete value, if fixed
    pub fn value(&self) -> Option<bool> {
        match self {
            Trit::False => Some(false),
            Trit::True => Some(true),
            Trit::Unknown => None,
        }
    }

    /// Textual form: '0', '1' or '2'
    pub fn to_char(&self) -> char {
        match self {
            Trit::False => '0',
            Trit::True => '1',
            Trit::Unknown => '2',
        }
    }

    /// Parse the textual form
    pub fn from_char(c: char) -> Option<Trit> {
        match c {
            '0' => Some(Trit::False),
            '1' => Some(Trit::True),
            '2' => Some(Trit::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A fixed-width assignment of three-valued bits, one per primary input or variable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    bits: Vec<Trit>,
}

impl Pattern {
    /// Create a pattern with every position unconstrained
    pub fn unknown(width: usize) -> Pattern {
        Pattern {
            bits: vec![Trit::Unknown; width],
        }
    }

    /// Parse from the textual '0'/'1'/'2' form
    pub fn from_chars(s: &str) -> Pattern {
        let bits = s
            .chars()
            .map(|c| Trit::from_char(c).expect("Invalid pattern character"))
            .collect();
        Pattern { bits }
    }

    /// Return the number of positions
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Get the trit at a position
    pub fn get(&self, pos: usize) -> Trit {
        self.bits[pos]
    }

    /// Fix a position to a concrete bit
    ///
    /// Returns false if the position is already fixed to the opposite value;
    /// the pattern is unchanged in that case.
    pub fn assign(&mut self, pos: usize, value: bool) -> bool {
        match self.bits[pos].value() {
            None => {
                self.bits[pos] = Trit::from_bool(value);
                true
            }
            Some(v) => v == value,
        }
    }

    /// Positionwise merge of two patterns of the same width
    ///
    /// Returns None when some position is fixed to opposite values.
    pub fn merge(&self, other: &Pattern) -> Option<Pattern> {
        assert_eq!(self.width(), other.width());
        let mut bits = Vec::with_capacity(self.width());
        for (a, b) in self.bits.iter().zip(other.bits.iter()) {
            let m = match (a.value(), b.value()) {
                (Some(x), Some(y)) if x != y => return None,
                (Some(x), _) => Trit::from_bool(x),
                (None, Some(y)) => Trit::from_bool(y),
                (None, None) => Trit::Unknown,
            };
            bits.push(m);
        }
        Some(Pattern { bits })
    }

    /// Return whether this pattern generalizes another under wildcard expansion
    ///
    /// Every position fixed here must be fixed to the same value there.
    pub fn covers(&self, other: &Pattern) -> bool {
        assert_eq!(self.width(), other.width());
        self.bits
            .iter()
            .zip(other.bits.iter())
            .all(|(a, b)| a.value().is_none() || a == b)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.bits {
            write!(f, "{b}")?;
        }
        Ok(())
    }
}

/// A single truth-table gate: output id, fanin ids and the table itself
///
/// Tables are kept as [`volute::Lut`]s, one or two inputs. Row order follows
/// the structure-matrix column convention: row 0 is the all-ones input
/// pattern, row 2ᵏ-1 the all-zeros one, with fanin A as the least
/// significant mask bit.
#[derive(Debug, Clone, PartialEq)]
pub struct GateRecord {
    /// Id of the gate output
    pub id: usize,
    /// Fanin ids, one or two
    pub fanins: Vec<usize>,
    /// Truth table over the fanins
    pub lut: Lut,
}

impl GateRecord {
    /// Number of fanins
    pub fn nb_fanins(&self) -> usize {
        self.fanins.len()
    }

    /// Number of truth-table rows (2 or 4)
    pub fn nb_rows(&self) -> usize {
        1 << self.fanins.len()
    }

    /// The 2×2ᵏ structure matrix of the gate
    ///
    /// Row 0 holds the truth table itself, row 1 its complement, so each
    /// column is the [1,0]ᵀ/[0,1]ᵀ encoding of the gate output.
    pub fn structure_matrix(&self) -> LogicMatrix {
        let n = self.nb_rows();
        let mut m = LogicMatrix::new(2, n);
        for c in 0..n {
            let v = self.lut.value(n - 1 - c) as i32;
            m.set(0, c, v);
            m.set(1, c, 1 - v);
        }
        m
    }

    /// Rows of the table whose output equals the given value
    pub fn rows_for(&self, value: bool) -> Vec<usize> {
        let m = self.structure_matrix();
        let want = if value { 0 } else { 1 };
        (0..m.cols()).filter(|c| m.get(want, *c) == 1).collect()
    }

    /// The per-fanin input bits of a table row
    pub fn row_inputs(&self, row: usize) -> Vec<bool> {
        assert!(row < self.nb_rows());
        let mask = self.nb_rows() - 1 - row;
        (0..self.fanins.len())
            .map(|i| (mask >> i) & 1 != 0)
            .collect()
    }
}

/// An immutable parsed gate network: input count, gate table and output list
///
/// Returned by the bench parser and threaded explicitly into the solvers;
/// there is no shared parser state.
#[derive(Debug, Clone, Default)]
pub struct ParsedNetwork {
    nb_inputs: usize,
    gates: Vec<GateRecord>,
    outputs: Vec<usize>,
}

impl ParsedNetwork {
    /// Build a network from its parts and check consistency
    pub fn new(nb_inputs: usize, gates: Vec<GateRecord>, outputs: Vec<usize>) -> ParsedNetwork {
        let ret = ParsedNetwork {
            nb_inputs,
            gates,
            outputs,
        };
        ret.check();
        ret
    }

    /// Return the number of primary inputs (the primary-input threshold)
    pub fn nb_inputs(&self) -> usize {
        self.nb_inputs
    }

    /// Return the number of primary outputs
    pub fn nb_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Return the number of gates
    pub fn nb_gates(&self) -> usize {
        self.gates.len()
    }

    /// Return whether an id denotes a primary input
    pub fn is_input(&self, id: usize) -> bool {
        id < self.nb_inputs
    }

    /// Get the gate driving the given id
    pub fn gate(&self, id: usize) -> &GateRecord {
        assert!(!self.is_input(id), "Id {id} is a primary input");
        &self.gates[id - self.nb_inputs]
    }

    /// Get the id driving output i
    pub fn output(&self, i: usize) -> usize {
        self.outputs[i]
    }

    /// The gate table, in file order
    pub fn gates(&self) -> &[GateRecord] {
        &self.gates
    }

    /// Check consistency of the datastructure
    pub fn check(&self) {
        for (i, g) in self.gates.iter().enumerate() {
            assert_eq!(g.id, self.nb_inputs + i, "Gate ids must follow file order");
            assert!(
                g.nb_fanins() == 1 || g.nb_fanins() == 2,
                "Gate {} has unsupported arity",
                g.id
            );
            assert_eq!(g.lut.num_vars(), g.nb_fanins());
            for f in &g.fanins {
                assert!(*f < g.id, "Gate {} uses undefined fanin {}", g.id, f);
            }
        }
        for o in &self.outputs {
            assert!(
                *o < self.nb_inputs + self.gates.len(),
                "Output {o} is not generated anywhere"
            );
        }
    }

    /// Evaluate all outputs for one concrete input vector
    pub fn simulate(&self, inputs: &[bool]) -> Vec<bool> {
        assert_eq!(inputs.len(), self.nb_inputs);
        let mut values = Vec::with_capacity(self.gates.len());
        for g in &self.gates {
            let mut mask = 0usize;
            for (i, f) in g.fanins.iter().enumerate() {
                let v = if self.is_input(*f) {
                    inputs[*f]
                } else {
                    values[*f - self.nb_inputs]
                };
                mask |= (v as usize) << i;
            }
            values.push(g.lut.value(mask));
        }
        self.outputs
            .iter()
            .map(|o| {
                if self.is_input(*o) {
                    inputs[*o]
                } else {
                    values[*o - self.nb_inputs]
                }
            })
            .collect()
    }
}

impl fmt::Display for ParsedNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Network with {} inputs, {} outputs:",
            self.nb_inputs,
            self.nb_outputs()
        )?;
        for g in &self.gates {
            let deps = g
                .fanins
                .iter()
                .map(|f| format!("{f}"))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "\t{} = LUT 0x{} ({})", g.id, g.lut.to_hex_string(), deps)?;
        }
        for (i, o) in self.outputs.iter().enumerate() {
            writeln!(f, "\to{i} = {o}")?;
        }
        Ok(())
    }
}
