//! Single-output solving by recursive backward propagation
//!
//! The required value is pushed from the target output back through the gate
//! DAG. Every truth-table row consistent with the requirement is explored;
//! each branch works on its own copy of the partial assignment, so sibling
//! branches never pollute each other. Fanins below the primary-input
//! threshold are written directly, subject to wildcard compatibility; a
//! conflicting write kills the branch.
//!
//! Interior gates shared between sibling subtrees are not tracked, so the
//! returned set can be strictly more permissive than the matching slice of
//! the all-outputs enumeration. It is always a wildcard superset of it.

use crate::network::{ParsedNetwork, Pattern};

/// Solve for input assignments that set one primary output to `value`
///
/// The other outputs are ignored entirely. An empty set means UNSAT for this
/// output/value pair.
pub fn solve_single_output(net: &ParsedNetwork, output: usize, value: bool) -> Vec<Pattern> {
    assert!(output < net.nb_outputs(), "No output with index {output}");
    let id = net.output(output);
    let acc = Pattern::unknown(net.nb_inputs());
    if net.is_input(id) {
        let mut p = acc;
        p.assign(id, value);
        return vec![p];
    }
    propagate(net, id, value, &acc)
}

/// Propagate a required gate value backward, returning all completions of the
/// accumulated partial assignment
fn propagate(net: &ParsedNetwork, id: usize, value: bool, acc: &Pattern) -> Vec<Pattern> {
    let gate = net.gate(id);
    let mut ret = Vec::new();
    for r in gate.rows_for(value) {
        let bits = gate.row_inputs(r);
        // Thread the partial assignment through the fanins; a gate fanin
        // forks into one recursion per surviving branch
        let mut branches = vec![acc.clone()];
        for (f, bit) in gate.fanins.iter().zip(bits) {
            if net.is_input(*f) {
                branches.retain_mut(|p| p.assign(*f, bit));
            } else {
                branches = branches
                    .iter()
                    .flat_map(|p| propagate(net, *f, bit, p))
                    .collect();
            }
            if branches.is_empty() {
                break;
            }
        }
        ret.extend(branches);
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::solve_single_output;
    use crate::io::read_bench;
    use crate::network::Pattern;
    use crate::solver::solve_all_outputs;

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
        assert_eq!(solve_single_output(&net, 0, true), patterns(&["11"]));
        assert_eq!(
            sorted(solve_single_output(&net, 0, false)),
            patterns(&["00", "01", "10"])
        );
    }

    #[test]
    fn test_ignores_other_outputs() {
        // The second output does not constrain the first
        let net = read_bench(
            "INPUT(a)\nINPUT(b)\nx = LUT 0x8 (a, b)\ny = LUT 0x1 (a)\nOUTPUT(x)\nOUTPUT(y)\n"
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(solve_single_output(&net, 1, true), patterns(&["02"]));
    }

    #[test]
    fn test_conflicting_branch_dies() {
        // o = a & !a is unsatisfiable
        let net = read_bench(
            "INPUT(a)\nn = LUT 0x1 (a)\no = LUT 0x8 (a, n)\nOUTPUT(o)\n".as_bytes(),
        )
        .unwrap();
        assert!(solve_single_output(&net, 0, true).is_empty());
        assert_eq!(
            sorted(solve_single_output(&net, 0, false)),
            patterns(&["0", "1"])
        );
    }

    #[test]
    fn test_output_tied_to_input() {
        let net = read_bench("INPUT(a)\nINPUT(b)\nOUTPUT(a)\n".as_bytes()).unwrap();
        assert_eq!(solve_single_output(&net, 0, false), patterns(&["02"]));
    }

    #[test]
    fn test_superset_of_all_outputs_slice() {
        // Every assignment accepted by the all-outputs enumeration for one
        // output must be matched, under wildcard expansion, by some pattern
        // of the single-output solver
        let src = "INPUT(a)\nINPUT(b)\nINPUT(c)
g = LUT 0x6 (a, b)
h = LUT 0xe (g, c)
k = LUT 0x8 (g, h)
OUTPUT(h)
OUTPUT(k)
";
        let net = read_bench(src.as_bytes()).unwrap();
        for value in [false, true] {
            for output in 0..net.nb_outputs() {
                let single_net = read_bench(
                    format!(
                        "INPUT(a)\nINPUT(b)\nINPUT(c)
g = LUT 0x6 (a, b)
h = LUT 0xe (g, c)
k = LUT 0x8 (g, h)
OUTPUT({})
",
                        if output == 0 { "h" } else { "k" }
                    )
                    .as_bytes(),
                )
                .unwrap();
                let all = solve_all_outputs(&single_net, value);
                let single = solve_single_output(&net, output, value);
                for a in &all {
                    assert!(
                        single.iter().any(|s| s.covers(a)),
                        "{a} not covered for output {output} = {value}"
                    );
                }
            }
        }
    }
}
