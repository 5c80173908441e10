// src/circuits/mod.rs

//! Ordered, editable gate sequences and their execution.
//!
//! A [`CircuitManager`] owns a linear list of [`Gate`] descriptors. Gates are
//! validated when they are added, can be removed or moved while the circuit is
//! being built, and are executed in insertion order against a caller-supplied
//! [`StateVector`].

use crate::core::state::check_qubit_count;
use crate::core::{QregError, Result, StateVector};
use crate::operations::{Gate, GateKind};
use crate::simulation::GateEngine;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

/// Where a circuit is in its edit/run cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CircuitStatus {
    /// Gates may be added, removed or reordered.
    #[default]
    Building,
    /// The last `execute` call completed successfully and nothing has changed since.
    Executed,
}

/// Outcome of a successful [`CircuitManager::execute`] call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionReport {
    /// Number of gates applied to the register.
    pub gates_applied: usize,
    /// Measurement outcomes keyed by gate position.
    ///
    /// Measurement has no execution semantics yet (see [`GateKind::Measure`]),
    /// so a circuit that reaches a measurement fails instead of filling this in.
    pub measurements: BTreeMap<usize, u8>,
}

/// An ordered sequence of gates applied to a register.
///
/// Every descriptor is checked for structural well-formedness when it is added.
/// A manager created with [`CircuitManager::with_qubit_count`] also checks
/// qubit ranges at add-time; in every case ranges and coincidences are checked
/// again by the [`GateEngine`] at execution time against the actual register.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CircuitManager {
    gates: Vec<Gate>,
    qubit_count: Option<usize>,
    status: CircuitStatus,
}

impl CircuitManager {
    /// Creates an empty circuit with no declared register size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty circuit for a register of `qubit_count` qubits.
    pub fn with_qubit_count(qubit_count: usize) -> Result<Self> {
        check_qubit_count(qubit_count)?;
        Ok(Self {
            qubit_count: Some(qubit_count),
            ..Self::default()
        })
    }

    /// The register size declared at construction, if any.
    pub fn qubit_count(&self) -> Option<usize> {
        self.qubit_count
    }

    /// Adds a gate by name, returning its position.
    ///
    /// `name` is matched case-insensitively in short or long form (`H`,
    /// `Hadamard`, `Pauli-X`, `CNOT`, `TOFFOLI`, ...). For CNOT `control1` is
    /// the control; for SWAP `control1` and `target` are the two qubits; for
    /// Toffoli both controls are required.
    ///
    /// # Errors
    /// * [`QregError::NegativeQubitIndex`] for a negative target or control.
    /// * [`QregError::UnknownGate`] for an unrecognised name.
    /// * [`QregError::MissingControl`] / [`QregError::UnexpectedControl`] when
    ///   the supplied controls do not match the gate.
    /// * [`QregError::CoincidentQubits`] when two slots name the same qubit.
    /// * [`QregError::QubitOutOfRange`] when a qubit count was declared and a
    ///   slot exceeds it.
    pub fn add_gate(
        &mut self,
        name: &str,
        target: i64,
        control1: Option<i64>,
        control2: Option<i64>,
    ) -> Result<usize> {
        let target = non_negative(target)?;
        let control1 = control1.map(non_negative).transpose()?;
        let control2 = control2.map(non_negative).transpose()?;
        let kind: GateKind = name.parse()?;
        self.push(Gate::from_parts(kind, target, control1, control2)?)
    }

    /// Appends a typed gate, returning its position.
    pub fn push(&mut self, gate: Gate) -> Result<usize> {
        gate.check_distinct()?;
        if let Some(n) = self.qubit_count {
            gate.check_range(n)?;
        }
        self.gates.push(gate);
        self.touch();
        debug!(gate = %gate, position = self.gates.len() - 1, "gate added");
        Ok(self.gates.len() - 1)
    }

    /// Removes and returns the gate at `index`; later gates shift down by one.
    pub fn remove_gate(&mut self, index: usize) -> Result<Gate> {
        self.check_position(index)?;
        let gate = self.gates.remove(index);
        self.touch();
        debug!(gate = %gate, index, "gate removed");
        Ok(gate)
    }

    /// Moves the gate at `from` so that it ends up at position `to`.
    ///
    /// `to` is interpreted against the list after the gate has been taken out,
    /// so moving 0 to 2 in `[A, B, C]` gives `[B, C, A]`.
    pub fn reorder_gates(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_position(from)?;
        self.check_position(to)?;
        if from == to {
            return Ok(());
        }
        let gate = self.gates.remove(from);
        self.gates.insert(to, gate);
        self.touch();
        debug!(from, to, "gate moved");
        Ok(())
    }

    /// The gate at `index`.
    pub fn gate(&self, index: usize) -> Result<&Gate> {
        self.check_position(index)?;
        Ok(&self.gates[index])
    }

    /// All gates in execution order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns `true` if the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Removes every gate.
    pub fn clear(&mut self) {
        self.gates.clear();
        self.touch();
    }

    /// Current edit/run status.
    pub fn status(&self) -> CircuitStatus {
        self.status
    }

    /// Applies every gate, in order, to `state`.
    ///
    /// Execution stops at the first failing gate and returns its error. Gates
    /// before it stay applied; there is no rollback. The status is `Building`
    /// until every gate has been applied.
    pub fn execute(&mut self, state: &mut StateVector) -> Result<ExecutionReport> {
        info!(
            gates = self.gates.len(),
            qubits = state.qubit_count(),
            "executing circuit"
        );
        self.touch();
        let mut report = ExecutionReport::default();
        for (position, gate) in self.gates.iter().enumerate() {
            if let Err(err) = GateEngine::apply(state, gate) {
                warn!(position, gate = %gate, error = %err, "circuit execution aborted");
                return Err(err);
            }
            debug!(position, gate = %gate, "gate applied");
            report.gates_applied += 1;
        }
        self.status = CircuitStatus::Executed;
        Ok(report)
    }

    /// Compact per-gate labels, e.g. `H(q0)`, `CNOT(ctrl=0, target=1)`.
    pub fn descriptions(&self) -> Vec<String> {
        self.gates.iter().map(Gate::label).collect()
    }

    /// One-line summary of the circuit size.
    pub fn summary(&self) -> String {
        if self.gates.is_empty() {
            "No gates added yet".to_string()
        } else {
            format!("{} gate(s) added", self.gates.len())
        }
    }

    /// Renders a wire diagram with one row per qubit and one column per gate.
    pub fn diagram(&self, num_qubits: usize) -> String {
        const GATE_WIDTH: usize = 7; // e.g., "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        if self.gates.is_empty() || num_qubits == 0 {
            return format!("[{} gate(s) on {} qubit(s)]\n", self.gates.len(), num_qubits);
        }

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            let total_dashes = GATE_WIDTH.saturating_sub(slen);
            let pre = total_dashes / 2;
            let post = total_dashes - pre;
            format!(
                "{}{}{}",
                H_WIRE.to_string().repeat(pre),
                symbol,
                H_WIRE.to_string().repeat(post)
            )
        }

        let num_ops = self.gates.len();
        let mut op_grid = vec![vec![WIRE.to_string(); num_ops]; num_qubits];
        // v_connect[row][t] is the connector drawn below `row` in column `t`.
        let mut v_connect = vec![vec![' '; num_ops]; num_qubits];

        for (t, gate) in self.gates.iter().enumerate() {
            let cells: Vec<(usize, &str)> = match *gate {
                Gate::Cnot { control, target } => vec![(control, "●"), (target, "X")],
                Gate::Swap { qubit1, qubit2 } => vec![(qubit1, "x"), (qubit2, "x")],
                Gate::Toffoli { control1, control2, target } => {
                    vec![(control1, "●"), (control2, "●"), (target, "X")]
                }
                Gate::Measure { target } => vec![(target, "M")],
                _ => vec![(gate.target(), gate.name())],
            };
            let rows: Vec<usize> = cells.iter().map(|(q, _)| *q).filter(|q| *q < num_qubits).collect();
            for (q, symbol) in cells {
                if q < num_qubits {
                    op_grid[q][t] = format_gate(symbol);
                }
            }
            if let (Some(&r_min), Some(&r_max)) = (rows.iter().min(), rows.iter().max()) {
                for row in v_connect.iter_mut().take(r_max).skip(r_min) {
                    row[t] = V_WIRE;
                }
            }
        }

        let label_width = format!("q{}", num_qubits - 1).len() + 2;
        let mut out = String::new();
        for q in 0..num_qubits {
            let label = format!("q{}: ", q);
            out.push_str(&format!("{:<width$}", label, width = label_width));
            out.push_str(&op_grid[q].join(""));
            out.push('\n');
            if q + 1 < num_qubits {
                out.push_str(&" ".repeat(label_width));
                for connector in &v_connect[q] {
                    let pad = GATE_WIDTH - 1;
                    let pre = pad / 2;
                    out.push_str(&" ".repeat(pre));
                    out.push(*connector);
                    out.push_str(&" ".repeat(pad - pre));
                }
                out.push('\n');
            }
        }
        out
    }

    fn check_position(&self, index: usize) -> Result<()> {
        if index >= self.gates.len() {
            return Err(QregError::GateIndexOutOfRange {
                index,
                len: self.gates.len(),
            });
        }
        Ok(())
    }

    /// Any edit sends the circuit back to `Building`.
    fn touch(&mut self) {
        self.status = CircuitStatus::Building;
    }
}

fn non_negative(index: i64) -> Result<usize> {
    usize::try_from(index).map_err(|_| QregError::NegativeQubitIndex { index })
}

impl fmt::Display for CircuitManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Quantum Circuit:")?;
        for gate in &self.gates {
            writeln!(f, "{}", gate)?;
        }
        Ok(())
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Chaining helper for assembling a [`CircuitManager`].
///
/// The first failing gate is remembered and returned by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    circuit: CircuitManager,
    error: Option<QregError>,
}

impl CircuitBuilder {
    /// Creates a builder with no declared register size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder whose circuit range-checks against `qubit_count`.
    pub fn for_qubits(qubit_count: usize) -> Self {
        match CircuitManager::with_qubit_count(qubit_count) {
            Ok(circuit) => Self { circuit, error: None },
            Err(err) => Self {
                circuit: CircuitManager::new(),
                error: Some(err),
            },
        }
    }

    /// Adds a single gate.
    pub fn gate(mut self, gate: Gate) -> Self {
        if self.error.is_none() {
            if let Err(err) = self.circuit.push(gate) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Adds gates from an iterator.
    pub fn gates<I>(self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        gates.into_iter().fold(self, Self::gate)
    }

    /// Finalizes the circuit, or returns the first error encountered.
    pub fn build(self) -> Result<CircuitManager> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.circuit),
        }
    }
}
