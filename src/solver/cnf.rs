//! CNF solving through semi-tensor-product clause compilation
//!
//! Each clause becomes a chain of structure matrices and symbolic variable
//! terms: a disjunction operator before every literal but the last, a
//! negation operator before each negative literal. Two passes reduce the
//! chain to a single matrix per clause: an exchange pass normalizes the
//! chain so that every operator precedes every variable and the variables
//! are sorted and distinct, and a product pass folds the operator prefix
//! with the semi-tensor product.
//!
//! The reduced clause matrix has one column per assignment of the clause's
//! variables, column 0 being all-true; the columns whose top entry is 1 are
//! the clause's satisfying assignments. Global solutions are the pairwise
//! compatible merges across all clauses.

use crate::io::ParsedCnf;
use crate::matrix::{disjunction, negation, power_reduction, swap_vars, LogicMatrix};
use crate::network::Pattern;

/// One term of a clause chain: an operator matrix or a symbolic variable
#[derive(Debug, Clone)]
enum Term {
    Op(LogicMatrix),
    Var(u32),
}

/// Solve a CNF formula, returning all consistent variable assignments
///
/// Patterns are one trit per variable; variables no clause touches stay
/// `Unknown`. An empty set means UNSAT; a formula with no clauses is
/// trivially satisfiable by the all-unknown pattern.
pub fn solve_cnf(cnf: &ParsedCnf) -> Vec<Pattern> {
    let mut global: Option<Vec<Pattern>> = None;
    for clause in cnf.clauses() {
        let sols = clause_solutions(cnf.nb_vars(), clause);
        let merged = match global {
            None => sols,
            Some(acc) => intersect(&acc, &sols),
        };
        if merged.is_empty() {
            return Vec::new();
        }
        global = Some(merged);
    }
    global.unwrap_or_else(|| vec![Pattern::unknown(cnf.nb_vars())])
}

/// Compile one clause and enumerate its satisfying assignments
fn clause_solutions(nb_vars: usize, clause: &[i32]) -> Vec<Pattern> {
    if clause.is_empty() {
        // The empty clause cannot be satisfied
        return Vec::new();
    }
    let mut terms = Vec::new();
    for (i, lit) in clause.iter().enumerate() {
        if i + 1 < clause.len() {
            terms.push(Term::Op(disjunction()));
        }
        if *lit < 0 {
            terms.push(Term::Op(negation()));
        }
        terms.push(Term::Var(lit.unsigned_abs()));
    }
    stp_exchange_judge(&mut terms);
    let (matrix, vars) = stp_product_judge(&terms);

    assert_eq!(matrix.rows(), 2);
    assert_eq!(matrix.cols(), 1 << vars.len());

    let mut ret = Vec::new();
    for j in 0..matrix.cols() {
        if matrix.get(0, j) != 1 {
            continue;
        }
        // Column bits, most significant first; digit 0 means true
        let mut p = Pattern::unknown(nb_vars);
        for (i, v) in vars.iter().enumerate() {
            let bit = (j >> (vars.len() - 1 - i)) & 1 == 0;
            p.assign((*v - 1) as usize, bit);
        }
        ret.push(p);
    }
    ret
}

/// Normalize a clause chain by repeated local exchanges
///
/// Three rewrites run to fixpoint: equal adjacent variables collapse through
/// the power-reduction matrix, out-of-order adjacent variables reorder
/// through the variable-exchange matrix, and a variable followed by an
/// operator M commutes as x ⋉ M = (I₂ ⊗ M) ⋉ x. Afterwards every operator
/// precedes every variable and the variables are sorted and distinct.
fn stp_exchange_judge(terms: &mut Vec<Term>) {
    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..terms.len().saturating_sub(1) {
            match (&terms[i], &terms[i + 1]) {
                (Term::Var(a), Term::Var(b)) if a == b => {
                    let a = *a;
                    terms.splice(i..i + 2, [Term::Op(power_reduction()), Term::Var(a)]);
                    changed = true;
                }
                (Term::Var(a), Term::Var(b)) if a > b => {
                    let (a, b) = (*a, *b);
                    terms.splice(
                        i..i + 2,
                        [Term::Op(swap_vars()), Term::Var(b), Term::Var(a)],
                    );
                    changed = true;
                }
                (Term::Var(a), Term::Op(m)) => {
                    let a = *a;
                    let lifted = LogicMatrix::identity(2).kron(m);
                    terms.splice(i..i + 2, [Term::Op(lifted), Term::Var(a)]);
                    changed = true;
                }
                _ => continue,
            }
            break;
        }
    }
}

/// Fold the operator prefix of a normalized chain into one matrix
///
/// Returns the folded matrix and the variable order of its columns.
fn stp_product_judge(terms: &[Term]) -> (LogicMatrix, Vec<u32>) {
    let mut acc: Option<LogicMatrix> = None;
    let mut vars = Vec::new();
    for t in terms {
        match t {
            Term::Op(m) => {
                acc = Some(match acc {
                    None => m.clone(),
                    Some(a) => a.stp(m),
                });
            }
            Term::Var(v) => vars.push(*v),
        }
    }
    assert!(
        vars.windows(2).all(|w| w[0] < w[1]),
        "Chain not normalized before folding"
    );
    // A bare variable chain needs no operator at all
    (acc.unwrap_or_else(|| LogicMatrix::identity(2)), vars)
}

/// Pairwise compatible merges of two solution sets
fn intersect(a: &[Pattern], b: &[Pattern]) -> Vec<Pattern> {
    let mut ret: Vec<Pattern> = Vec::new();
    for x in a {
        for y in b {
            if let Some(m) = x.merge(y) {
                if !ret.contains(&m) {
                    ret.push(m);
                }
            }
        }
    }
    ret
}
