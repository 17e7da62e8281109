//! All-outputs solving by level-synchronous exhaustive enumeration
//!
//! The search walks discrete levels. Level 0 holds one state per primary
//! output, requiring that output's gate to evaluate to the target value.
//! Expanding a state enumerates, for every gate it still constrains, all
//! truth-table rows consistent with the required bit and with every value
//! fixed earlier; the cross product of row choices becomes the states of the
//! next level. Primary-input bits are written straight into the partial
//! result instead of being deferred. A branch with nothing left to resolve
//! contributes its partial result to the solution set.
//!
//! Despite the conflict-driven flavor of the original naming, there is no
//! clause learning here: every consistent row is explored, so the returned
//! set holds every distinct partial assignment, not a single witness.
//! Duplicates across independent branches are not merged. The enumeration is
//! worst-case exponential in the number of gates with shared fanins.

use fxhash::FxHashMap;
use itertools::Itertools;

use crate::network::{GateRecord, ParsedNetwork, Pattern, Trit};

/// Back-reference to the place where a gate value was fixed
///
/// Resolves "which bit was already chosen for gate X" without re-deriving
/// it: the value lives at `levels[level][ordinate].cands[cand][pos]`.
/// Overwritten in descendants whenever the gate is deferred again.
#[derive(Debug, Clone, Copy)]
struct Coordinate {
    /// Search level (abscissa)
    level: usize,
    /// Index of the state within its level (ordinate)
    ordinate: usize,
    /// Index into the state's candidate list
    cand: usize,
    /// Position within the candidate string
    pos: usize,
}

/// One partially-reduced search state
///
/// Owned by the level list it is created in and never mutated afterwards;
/// refinement always produces new states at the next level.
struct SearchState {
    /// Partial primary-input assignment
    result: Pattern,
    /// Gate ids still unresolved at this state
    gates: Vec<usize>,
    /// Candidate continuation strings, one trit per entry of `gates`; each
    /// describes one internally-consistent way to satisfy the constraints
    /// seen so far
    cands: Vec<Vec<Trit>>,
    /// Coordinate table for every gate fixed on the path to this state
    coords: FxHashMap<usize, Coordinate>,
}

/// Effects of picking one truth-table row for one gate
struct RowChoice {
    /// Primary-input bits the row forces
    input_bits: Vec<(usize, bool)>,
    /// Gate values the row defers to the next level
    deferred: Vec<(usize, bool)>,
}

/// Solve for input assignments driving some primary output to `value`
///
/// Each output is seeded as its own search branch; the returned set is the
/// union over all terminal branches. An empty set means UNSAT.
pub fn solve_all_outputs(net: &ParsedNetwork, value: bool) -> Vec<Pattern> {
    let mut solutions = Vec::new();
    let mut seeds = Vec::new();
    for i in 0..net.nb_outputs() {
        let o = net.output(i);
        if net.is_input(o) {
            // Output tied directly to an input
            let mut p = Pattern::unknown(net.nb_inputs());
            p.assign(o, value);
            solutions.push(p);
        } else {
            seeds.push(SearchState {
                result: Pattern::unknown(net.nb_inputs()),
                gates: vec![o],
                cands: vec![vec![Trit::from_bool(value)]],
                coords: FxHashMap::default(),
            });
        }
    }

    let mut levels = vec![seeds];
    loop {
        let level = levels.len() - 1;
        let mut next = Vec::new();
        for ordinate in 0..levels[level].len() {
            for cand in 0..levels[level][ordinate].cands.len() {
                expand(net, &levels, level, ordinate, cand, &mut next, &mut solutions);
            }
        }
        if next.is_empty() {
            break;
        }
        levels.push(next);
    }
    solutions
}

/// Look up the bit already fixed for a gate, if any
///
/// A gate constrained by the candidate currently being expanded shadows its
/// coordinate entry; an `Unknown` in either place means the gate was never
/// actually constrained and may be deferred anew.
fn fixed_value(
    levels: &[Vec<SearchState>],
    state: &SearchState,
    cand: &[Trit],
    gate: usize,
) -> Option<bool> {
    if let Some(pos) = state.gates.iter().position(|g| *g == gate) {
        if let Some(v) = cand[pos].value() {
            return Some(v);
        }
    }
    let c = state.coords.get(&gate)?;
    levels[c.level][c.ordinate].cands[c.cand][c.pos].value()
}

/// Enumerate the truth-table rows of a gate consistent with the required bit
/// and with everything fixed so far
fn consistent_rows(
    net: &ParsedNetwork,
    levels: &[Vec<SearchState>],
    state: &SearchState,
    cand: &[Trit],
    gate: &GateRecord,
    required: bool,
) -> Vec<RowChoice> {
    let mut ret = Vec::new();
    'rows: for r in gate.rows_for(required) {
        let bits = gate.row_inputs(r);
        let mut choice = RowChoice {
            input_bits: Vec::new(),
            deferred: Vec::new(),
        };
        for (f, bit) in gate.fanins.iter().zip(bits) {
            if net.is_input(*f) {
                match state.result.get(*f).value() {
                    Some(v) if v != bit => continue 'rows,
                    Some(_) => (),
                    None => choice.input_bits.push((*f, bit)),
                }
            } else {
                match fixed_value(levels, state, cand, *f) {
                    Some(v) if v != bit => continue 'rows,
                    Some(_) => (),
                    None => choice.deferred.push((*f, bit)),
                }
            }
        }
        ret.push(choice);
    }
    ret
}

/// Expand one (state, candidate) pair into the next level
fn expand(
    net: &ParsedNetwork,
    levels: &[Vec<SearchState>],
    level: usize,
    ordinate: usize,
    cand_idx: usize,
    next: &mut Vec<SearchState>,
    solutions: &mut Vec<Pattern>,
) {
    let state = &levels[level][ordinate];
    let cand = &state.cands[cand_idx];

    // Row choices for every gate the candidate constrains
    let mut choices: Vec<Vec<RowChoice>> = Vec::new();
    for (pos, g) in state.gates.iter().enumerate() {
        let Some(required) = cand[pos].value() else {
            continue;
        };
        let rows = consistent_rows(net, levels, state, cand, net.gate(*g), required);
        if rows.is_empty() {
            // Some gate admits no consistent row: the whole candidate dies
            return;
        }
        choices.push(rows);
    }
    if choices.is_empty() {
        solutions.push(state.result.clone());
        return;
    }

    // Cross product over the per-gate choices; combinations that force the
    // same partial result are gathered into one state of the next level
    let mut grouped: Vec<(Pattern, Vec<Vec<(usize, bool)>>)> = Vec::new();
    'combos: for combo in choices.iter().map(|c| c.iter()).multi_cartesian_product() {
        let mut result = state.result.clone();
        let mut req: FxHashMap<usize, bool> = FxHashMap::default();
        for choice in combo {
            for (f, bit) in &choice.input_bits {
                if !result.assign(*f, *bit) {
                    continue 'combos;
                }
            }
            for (f, bit) in &choice.deferred {
                if *req.entry(*f).or_insert(*bit) != *bit {
                    continue 'combos;
                }
            }
        }
        if req.is_empty() {
            // Fully reduced to primary inputs
            solutions.push(result);
            continue;
        }
        let mut reqs: Vec<(usize, bool)> = req.into_iter().collect();
        reqs.sort_unstable();
        match grouped.iter_mut().find(|(p, _)| *p == result) {
            Some((_, list)) => list.push(reqs),
            None => grouped.push((result, vec![reqs])),
        }
    }

    for (result, reqs_list) in grouped {
        let mut gates: Vec<usize> = reqs_list
            .iter()
            .flat_map(|reqs| reqs.iter().map(|(g, _)| *g))
            .collect();
        gates.sort_unstable();
        gates.dedup();

        let mut cands: Vec<Vec<Trit>> = Vec::new();
        for reqs in &reqs_list {
            let mut c = vec![Trit::Unknown; gates.len()];
            for (g, bit) in reqs {
                let pos = gates.binary_search(g).unwrap();
                c[pos] = Trit::from_bool(*bit);
            }
            if !cands.contains(&c) {
                cands.push(c);
            }
        }

        let mut coords = state.coords.clone();
        for (pos, g) in state.gates.iter().enumerate() {
            coords.insert(
                *g,
                Coordinate {
                    level,
                    ordinate,
                    cand: cand_idx,
                    pos,
                },
            );
        }
        next.push(SearchState {
            result,
            gates,
            cands,
            coords,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::solve_all_outputs;
    use crate::io::read_bench;
    use crate::network::Pattern;

    fn patterns(strings: &[&str]) -> Vec<Pattern> {
        strings.iter().map(|s| Pattern::from_chars(s)).collect()
    }

    fn sorted(mut v: Vec<Pattern>) -> Vec<Pattern> {
        v.sort_by_key(|p| format!("{p}"));
        v
    }

    #[test]
    fn test_and_gate() {
        let net = read_bench(
            "INPUT(a)\nINPUT(b)\nx = LUT 0x8 (a, b)\nOUTPUT(x)\n".as_bytes(),
        )
        .unwrap();
        // Required true: the single all-ones row
        assert_eq!(solve_all_outputs(&net, true), patterns(&["11"]));
        // Required false: all three falsifying rows, each with a zero
        assert_eq!(
            sorted(solve_all_outputs(&net, false)),
            patterns(&["00", "01", "10"])
        );
    }

    #[test]
    fn test_two_level_network() {
        // o = (a & b) | c
        let net = read_bench(
            "INPUT(a)\nINPUT(b)\nINPUT(c)\nx = LUT 0x8 (a, b)\ny = LUT 0xe (x, c)\nOUTPUT(y)\n"
                .as_bytes(),
        )
        .unwrap();
        let res = sorted(solve_all_outputs(&net, true));
        assert_eq!(res, patterns(&["001", "011", "101", "110", "111"]));
        // Every solution simulates to true
        for p in &res {
            let v: Vec<bool> = (0..3)
                .map(|i| p.get(i).value().unwrap_or(false))
                .collect();
            assert_eq!(net.simulate(&v), vec![true]);
        }
    }

    #[test]
    fn test_contradiction_unsat() {
        // o = a & !a
        let net = read_bench(
            "INPUT(a)\nn = LUT 0x1 (a)\no = LUT 0x8 (a, n)\nOUTPUT(o)\n".as_bytes(),
        )
        .unwrap();
        assert!(solve_all_outputs(&net, true).is_empty());
    }

    #[test]
    fn test_shared_gate_reappearance() {
        // o = g & !g with g = a & b: constant false
        let net = read_bench(
            "INPUT(a)\nINPUT(b)\ng = LUT 0x8 (a, b)\nn = LUT 0x1 (g)\no = LUT 0x8 (g, n)\nOUTPUT(o)\n"
                .as_bytes(),
        )
        .unwrap();
        assert!(solve_all_outputs(&net, true).is_empty());
        // Required false: both g values are explored, covering every input
        let res = sorted(solve_all_outputs(&net, false));
        assert_eq!(res, patterns(&["00", "01", "10", "11"]));
    }

    #[test]
    fn test_cross_level_lookup() {
        // o = buf(buf(g)) & g, which reduces to g = a & b
        let net = read_bench(
            "INPUT(a)\nINPUT(b)\ng = LUT 0x8 (a, b)\nb1 = LUT 0x2 (g)\nb2 = LUT 0x2 (b1)\no = LUT 0x8 (b2, g)\nOUTPUT(o)\n"
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(solve_all_outputs(&net, true), patterns(&["11"]));
    }

    #[test]
    fn test_multiple_outputs_union() {
        // Two independent outputs: the union of both branches is returned
        let net = read_bench(
            "INPUT(a)\nINPUT(b)\nx = LUT 0x8 (a, b)\ny = LUT 0x1 (a)\nOUTPUT(x)\nOUTPUT(y)\n"
                .as_bytes(),
        )
        .unwrap();
        let res = sorted(solve_all_outputs(&net, true));
        assert_eq!(res, patterns(&["02", "11"]));
    }

    #[test]
    fn test_output_tied_to_input() {
        let net =
            read_bench("INPUT(a)\nINPUT(b)\nOUTPUT(b)\n".as_bytes()).unwrap();
        assert_eq!(solve_all_outputs(&net, true), patterns(&["21"]));
    }

    #[test]
    fn test_idempotent() {
        let net = read_bench(
            "INPUT(a)\nINPUT(b)\nINPUT(c)\nx = LUT 0x6 (a, b)\ny = LUT 0xe (x, c)\nOUTPUT(y)\n"
                .as_bytes(),
        )
        .unwrap();
        let first = solve_all_outputs(&net, true);
        let second = solve_all_outputs(&net, true);
        assert_eq!(first, second);
    }
}
