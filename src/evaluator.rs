use crate::source::Span;
use crate::types::{BinaryOperator, Node, NodeKind};
use std::io::{self, Write};
use std::num::IntErrorKind;
use thiserror::Error;
use tracing::{debug, trace};

// --- Evaluation Error ---
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Evaluation Error: division by zero in '{operator}' expression at [{span}]")]
    DivisionByZero { operator: BinaryOperator, span: Span },
    #[error("Failed to write program output: {0}")]
    Io(#[from] io::Error),
}

// Result type alias for convenience
pub type EvalResult<T = String> = Result<T, EvalError>;

/// Executes every statement in order, writing one line per statement to `out`.
///
/// Lines are written as soon as their statement has run, so everything before
/// a failing statement stays in the sink.
pub fn evaluate<W: Write>(nodes: &[Node], out: &mut W) -> EvalResult<()> {
    for node in nodes {
        let line = execute(node)?;
        trace!(%line, "executed statement");
        writeln!(out, "{}", line)?;
    }
    debug!(statements = nodes.len(), "evaluated program");
    Ok(())
}

/// Executes every statement and collects the output lines.
pub fn evaluate_to_lines(nodes: &[Node]) -> EvalResult<Vec<String>> {
    nodes.iter().map(execute).collect()
}

/// Reduces a node to its textual result.
pub fn execute(node: &Node) -> EvalResult {
    match &node.kind {
        NodeKind::LogCall(arguments) => {
            let values = arguments.iter().map(execute).collect::<EvalResult<Vec<_>>>()?;
            Ok(values.join(" "))
        }
        // Literals print their text as written, numerals are not checked here
        NodeKind::StringLiteral(value) | NodeKind::IntLiteral(value) => Ok(value.clone()),
        NodeKind::BinaryOp {
            operator,
            left,
            right,
        } => {
            let lhs = coerce_int(&execute(left)?);
            let rhs = coerce_int(&execute(right)?);
            apply_operator(*operator, lhs, rhs, node.span).map(|value| value.to_string())
        }
    }
}

/// Best-effort numeral conversion: base 10 with an optional sign. Numerals
/// too large for an `i64` clamp to the nearest bound, anything else that is
/// not a numeral counts as 0. The conversion never fails.
pub fn coerce_int(text: &str) -> i64 {
    match text.parse::<i64>() {
        Ok(value) => value,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

fn apply_operator(operator: BinaryOperator, lhs: i64, rhs: i64, span: Span) -> EvalResult<i64> {
    match operator {
        BinaryOperator::Add => Ok(lhs.wrapping_add(rhs)),
        BinaryOperator::Sub => Ok(lhs.wrapping_sub(rhs)),
        BinaryOperator::Mul => Ok(lhs.wrapping_mul(rhs)),
        BinaryOperator::Div | BinaryOperator::Mod if rhs == 0 => {
            Err(EvalError::DivisionByZero { operator, span })
        }
        BinaryOperator::Div => Ok(lhs.wrapping_div(rhs)),
        BinaryOperator::Mod => Ok(lhs.wrapping_rem(rhs)),
        // Real exponentiation truncated toward zero. Results outside the i64
        // range saturate to the nearest bound (NaN becomes 0), unlike a raw
        // amd64 float conversion which yields i64::MIN for every overflow.
        BinaryOperator::Pow => Ok((lhs as f64).powf(rhs as f64) as i64),
    }
}
