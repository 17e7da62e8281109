//! IO for bench-style gate lists
//!
//! The format is a restriction of the .bench (ISCAS) grammar to truth-table
//! gates: `INPUT(...)`, `OUTPUT(...)` and `id = LUT 0xHH (fanin[, fanin])`
//! statements, one per line, with a hexadecimal table for 2-fanin gates
//! (`0xH` for 1-fanin ones) and gate ids assigned in file order.

use std::io::{BufRead, BufReader, Read, Write};

use fxhash::FxHashMap;
use volute::Lut;

use crate::network::{GateRecord, ParsedNetwork};

fn gate_from_statement(
    statement: &[String],
    name_to_id: &FxHashMap<String, usize>,
    id: usize,
) -> Option<GateRecord> {
    // [name, "LUT 0xHH", fanin, ...]; anything else is a malformed line
    if statement.len() < 3 || statement.len() > 4 {
        return None;
    }
    let table = statement[1].strip_prefix("LUT 0x")?;
    let fanins: Option<Vec<usize>> = statement[2..]
        .iter()
        .map(|n| name_to_id.get(n).copied())
        .collect();
    let fanins = fanins?;
    let lut = Lut::from_hex_string(fanins.len(), table).ok()?;
    Some(GateRecord { id, fanins, lut })
}

fn network_from_statements(
    statements: &[Vec<String>],
    inputs: &[String],
    outputs: &[String],
) -> ParsedNetwork {
    let mut name_to_id = FxHashMap::default();
    for (i, name) in inputs.iter().enumerate() {
        name_to_id.insert(name.clone(), i);
    }

    let mut gates = Vec::new();
    for s in statements {
        if name_to_id.contains_key(&s[0]) {
            // Redefinition: the line is dropped
            continue;
        }
        let id = inputs.len() + gates.len();
        if let Some(g) = gate_from_statement(s, &name_to_id, id) {
            name_to_id.insert(s[0].clone(), id);
            gates.push(g);
        }
    }

    // Output names that resolve to nothing are dropped as well
    let output_ids = outputs
        .iter()
        .filter_map(|n| name_to_id.get(n).copied())
        .collect();
    ParsedNetwork::new(inputs.len(), gates, output_ids)
}

/// Read a gate network in bench format
///
/// The files describe the design with one statement per line:
/// ```text
///     # This is a comment
///     INPUT(0)
///     INPUT(1)
///     2 = LUT 0x8 (0, 1)
///     3 = LUT 0x1 (2)
///     OUTPUT(3)
/// ```
///
/// Malformed statements are silently skipped rather than rejected: a line
/// that does not match the grammar simply contributes no gate. Callers that
/// need hard validation must check the input shape upstream.
pub fn read_bench<R: Read>(r: R) -> Result<ParsedNetwork, String> {
    let mut statements = Vec::new();
    let mut inputs: Vec<String> = Vec::new();
    let mut outputs = Vec::new();
    for l in BufReader::new(r).lines() {
        let Ok(s) = l else {
            return Err("Error during file IO".to_string());
        };
        let t = s.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        if !t.contains('=') {
            let parts: Vec<_> = t
                .split(&['(', ')'])
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect();
            if parts.len() != 2 {
                continue;
            }
            if parts[0] == "INPUT" && !inputs.iter().any(|n| n == parts[1]) {
                inputs.push(parts[1].to_string());
            } else if parts[0] == "OUTPUT" {
                outputs.push(parts[1].to_string());
            }
        } else {
            let parts: Vec<_> = t
                .split(&['=', '(', ',', ')'])
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect();
            statements.push(parts);
        }
    }
    Ok(network_from_statements(&statements, &inputs, &outputs))
}

/// Write a gate network in bench format
///
/// Signals are named by their numeric id, so a written file reads back into
/// an identical network.
pub fn write_bench<W: Write>(w: &mut W, net: &ParsedNetwork) {
    writeln!(w, "# bench-style gate list").unwrap();
    writeln!(w, "# Generated by stpsat").unwrap();
    for i in 0..net.nb_inputs() {
        writeln!(w, "INPUT({i})").unwrap();
    }
    writeln!(w).unwrap();
    for i in 0..net.nb_outputs() {
        writeln!(w, "OUTPUT({})", net.output(i)).unwrap();
    }
    writeln!(w).unwrap();
    for g in net.gates() {
        let deps = g
            .fanins
            .iter()
            .map(|f| format!("{f}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(w, "{} = LUT 0x{} ({})", g.id, g.lut.to_hex_string(), deps).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::{read_bench, write_bench};

    #[test]
    fn test_basic_read() {
        let example = "# bench-style gate list
INPUT(a)
INPUT(b)
INPUT(c)

x0 = LUT 0x8 (a, b)
x1 = LUT 0xe (x0, c)
x2 = LUT 0x1 (x1)
OUTPUT(x1)
OUTPUT(x2)
";
        let net = read_bench(example.as_bytes()).unwrap();
        assert_eq!(net.nb_inputs(), 3);
        assert_eq!(net.nb_outputs(), 2);
        assert_eq!(net.nb_gates(), 3);
        // Ids follow file order, above the input threshold
        assert_eq!(net.gate(3).fanins, vec![0, 1]);
        assert_eq!(net.gate(4).fanins, vec![3, 2]);
        assert_eq!(net.gate(5).fanins, vec![4]);
        assert_eq!(net.output(0), 4);
        assert_eq!(net.output(1), 5);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let example = "INPUT(a)
INPUT(b)
x0 = LUT 0x8 (a, b)
x1 = LUT (a, b)
x2 = LUT 0xzz (a, b)
x3 = LUT 0x8 (a, undefined)
x0 = LUT 0x6 (a, b)
x4 = AND(a, b)
OUTPUT(x0)
OUTPUT(nowhere)
";
        let net = read_bench(example.as_bytes()).unwrap();
        assert_eq!(net.nb_gates(), 1);
        assert_eq!(net.nb_outputs(), 1);
        assert_eq!(net.output(0), 2);
        // The surviving gate is the original x0, not the redefinition
        assert_eq!(net.gate(2).rows_for(true), vec![0]);
    }

    #[test]
    fn test_write_read_roundtrip() {
        let example = "INPUT(a)
INPUT(b)
INPUT(c)
x0 = LUT 0x6 (a, b)
x1 = LUT 0x2 (x0)
x2 = LUT 0xe (x1, c)
OUTPUT(x2)
";
        let net = read_bench(example.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_bench(&mut buf, &net);
        let reread = read_bench(buf.as_slice()).unwrap();
        assert_eq!(reread.nb_inputs(), net.nb_inputs());
        assert_eq!(reread.nb_outputs(), net.nb_outputs());
        assert_eq!(reread.gates(), net.gates());
        for i in 0..net.nb_outputs() {
            assert_eq!(reread.output(i), net.output(i));
        }
    }
}
