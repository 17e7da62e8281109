//! Dense 0/1 matrices and the structure matrices of the semi-tensor product algebra
//!
//! Boolean values are encoded as column vectors: true is [1, 0]ᵀ, false is [0, 1]ᵀ.
//! A boolean operator becomes a small 0/1 "structure matrix" whose column c gives
//! the operator value for the input pattern encoded by c, column 0 being the
//! all-true pattern. Operators of mismatched shapes compose through the
//! semi-tensor product, which expands the smaller operand with an identity
//! Kronecker factor before multiplying.

use std::fmt;

/// Rectangular matrix of signed integers, with dimensions fixed at construction
///
/// Entries stay in {0, 1} for everything this engine builds; the type does not
/// try to be a general linear algebra matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicMatrix {
    rows: usize,
    cols: usize,
    data: Vec<i32>,
}

impl LogicMatrix {
    /// Create a zero-filled matrix
    pub fn new(rows: usize, cols: usize) -> LogicMatrix {
        LogicMatrix {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Create a matrix from explicit rows
    pub fn from_rows(rows: &[&[i32]]) -> LogicMatrix {
        assert!(!rows.is_empty());
        let nb_cols = rows[0].len();
        let mut ret = LogicMatrix::new(rows.len(), nb_cols);
        for (i, r) in rows.iter().enumerate() {
            assert_eq!(r.len(), nb_cols);
            for (j, v) in r.iter().enumerate() {
                ret.set(i, j, *v);
            }
        }
        ret
    }

    /// Create the n×n identity matrix
    pub fn identity(n: usize) -> LogicMatrix {
        let mut ret = LogicMatrix::new(n, n);
        for i in 0..n {
            ret.set(i, i, 1);
        }
        ret
    }

    /// Return the number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Return the number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the element at (r, c)
    pub fn get(&self, r: usize, c: usize) -> i32 {
        assert!(r < self.rows && c < self.cols, "Index out of bounds");
        self.data[r * self.cols + c]
    }

    /// Set the element at (r, c)
    pub fn set(&mut self, r: usize, c: usize, v: i32) {
        assert!(r < self.rows && c < self.cols, "Index out of bounds");
        self.data[r * self.cols + c] = v;
    }

    /// Standard matrix product; the inner dimensions must match
    pub fn product(&self, rhs: &LogicMatrix) -> LogicMatrix {
        assert_eq!(
            self.cols, rhs.rows,
            "Product requires left.cols == right.rows"
        );
        let mut ret = LogicMatrix::new(self.rows, rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut s = 0;
                for k in 0..self.cols {
                    s += self.get(i, k) * rhs.get(k, j);
                }
                ret.set(i, j, s);
            }
        }
        ret
    }

    /// Kronecker product; defined for any shapes
    pub fn kron(&self, rhs: &LogicMatrix) -> LogicMatrix {
        let mut ret = LogicMatrix::new(self.rows * rhs.rows, self.cols * rhs.cols);
        for i in 0..ret.rows {
            for j in 0..ret.cols {
                let v = self.get(i / rhs.rows, j / rhs.cols) * rhs.get(i % rhs.rows, j % rhs.cols);
                ret.set(i, j, v);
            }
        }
        ret
    }

    /// Semi-tensor product: identity-expand the smaller operand, then multiply
    ///
    /// One of the dimensions must divide the other.
    pub fn stp(&self, rhs: &LogicMatrix) -> LogicMatrix {
        if self.cols % rhs.rows == 0 {
            self.product(&rhs.kron(&LogicMatrix::identity(self.cols / rhs.rows)))
        } else {
            assert_eq!(
                rhs.rows % self.cols,
                0,
                "Semi-tensor product requires one dimension to divide the other"
            );
            self.kron(&LogicMatrix::identity(rhs.rows / self.cols))
                .product(rhs)
        }
    }
}

impl fmt::Display for LogicMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}x{} matrix:", self.rows, self.cols)?;
        for i in 0..self.rows {
            write!(f, "\t")?;
            for j in 0..self.cols {
                write!(f, "{} ", self.get(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Negation structure matrix MN (2×2 swap)
pub fn negation() -> LogicMatrix {
    LogicMatrix::from_rows(&[&[0, 1], &[1, 0]])
}

/// Disjunction structure matrix MD (2×4)
pub fn disjunction() -> LogicMatrix {
    LogicMatrix::from_rows(&[&[1, 1, 1, 0], &[0, 0, 0, 1]])
}

/// Conjunction structure matrix MP (2×4)
pub fn conjunction() -> LogicMatrix {
    LogicMatrix::from_rows(&[&[1, 0, 0, 0], &[0, 1, 1, 1]])
}

/// Variable-exchange matrix MW (4×4), mapping x⊗y to y⊗x
pub fn swap_vars() -> LogicMatrix {
    LogicMatrix::from_rows(&[
        &[1, 0, 0, 0],
        &[0, 0, 1, 0],
        &[0, 1, 0, 0],
        &[0, 0, 0, 1],
    ])
}

/// Power-reduction matrix MR (4×2), with x⊗x = MR·x
pub fn power_reduction() -> LogicMatrix {
    LogicMatrix::from_rows(&[&[1, 0], &[0, 0], &[0, 0], &[0, 1]])
}
