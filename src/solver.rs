//! The three solving modes of the engine
//!
//! All solvers are synchronous and purely recursive or iterative: a call runs
//! to completion, owns every matrix and search state it creates, and keeps no
//! state between invocations. UNSAT is reported by an empty result set.

mod all_outputs;
mod cnf;
mod single_output;

pub use all_outputs::solve_all_outputs;
pub use cnf::solve_cnf;
pub use single_output::solve_single_output;

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use volute::Lut;

    use super::{solve_all_outputs, solve_cnf, solve_single_output};
    use crate::io::ParsedCnf;
    use crate::network::{GateRecord, ParsedNetwork, Pattern};

    fn concrete(width: usize, mask: usize) -> Vec<bool> {
        (0..width).map(|i| (mask >> i) & 1 != 0).collect()
    }

    fn as_pattern(bits: &[bool]) -> Pattern {
        let mut p = Pattern::unknown(bits.len());
        for (i, b) in bits.iter().enumerate() {
            p.assign(i, *b);
        }
        p
    }

    fn random_network(rng: &mut SmallRng, nb_inputs: usize, nb_gates: usize) -> ParsedNetwork {
        let mut gates = Vec::new();
        for i in 0..nb_gates {
            let id = nb_inputs + i;
            let (fanins, lut) = if rng.gen_bool(0.3) {
                let f = rng.gen_range(0..id);
                (vec![f], Lut::from_hex_string(1, &format!("{:x}", rng.gen_range(0..4))).unwrap())
            } else {
                let a = rng.gen_range(0..id);
                let b = rng.gen_range(0..id);
                (
                    vec![a, b],
                    Lut::from_hex_string(2, &format!("{:x}", rng.gen_range(0..16))).unwrap(),
                )
            };
            gates.push(GateRecord { id, fanins, lut });
        }
        let outputs = (0..2)
            .map(|_| rng.gen_range(nb_inputs..nb_inputs + nb_gates))
            .collect();
        ParsedNetwork::new(nb_inputs, gates, outputs)
    }

    fn random_cnf(rng: &mut SmallRng, nb_vars: usize, nb_clauses: usize) -> ParsedCnf {
        let mut clauses = Vec::new();
        for _ in 0..nb_clauses {
            let len = rng.gen_range(1..=3);
            let clause = (0..len)
                .map(|_| {
                    let v = rng.gen_range(1..=nb_vars) as i32;
                    if rng.gen_bool(0.5) {
                        -v
                    } else {
                        v
                    }
                })
                .collect();
            clauses.push(clause);
        }
        ParsedCnf::new(nb_vars, 0, clauses)
    }

    /// Every assignment covered by a returned pattern must set some output to
    /// the target value, and every concrete input vector doing so must be
    /// covered by some returned pattern
    #[test]
    fn test_all_outputs_against_simulation() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..50 {
            let net = random_network(&mut rng, 3, 4);
            for value in [false, true] {
                let res = solve_all_outputs(&net, value);
                for mask in 0..8usize {
                    let inputs = concrete(3, mask);
                    let hit = net.simulate(&inputs).iter().any(|o| *o == value);
                    let covered = res.iter().any(|p| p.covers(&as_pattern(&inputs)));
                    assert_eq!(hit, covered, "mismatch on {net}");
                }
            }
        }
    }

    /// The single-output solver covers at least every concrete vector the
    /// target output accepts
    #[test]
    fn test_single_output_complete() {
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..50 {
            let net = random_network(&mut rng, 3, 4);
            for value in [false, true] {
                for output in 0..net.nb_outputs() {
                    let res = solve_single_output(&net, output, value);
                    for mask in 0..8usize {
                        let inputs = concrete(3, mask);
                        if net.simulate(&inputs)[output] == value {
                            assert!(
                                res.iter().any(|p| p.covers(&as_pattern(&inputs))),
                                "missing witness on {net}"
                            );
                        }
                    }
                }
            }
        }
    }

    /// CNF solving is exact: the returned patterns cover precisely the
    /// satisfying assignments
    #[test]
    fn test_cnf_against_brute_force() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            let cnf = random_cnf(&mut rng, 3, 3);
            let res = solve_cnf(&cnf);
            for mask in 0..8usize {
                let values = concrete(3, mask);
                let sat = cnf.clauses().iter().all(|c| {
                    c.iter()
                        .any(|l| values[(l.unsigned_abs() - 1) as usize] == (*l > 0))
                });
                let covered = res.iter().any(|p| p.covers(&as_pattern(&values)));
                assert_eq!(sat, covered, "mismatch on {:?}", cnf);
            }
        }
    }
}
