// Declare modules publicly so they are part of the library interface
pub mod evaluator;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod pretty_print;
pub mod source;
pub mod types;

pub use evaluator::{EvalError, EvalResult, evaluate, evaluate_to_lines, execute};
pub use lexer::{LexerError, LexerErrorKind, Token, TokenKind, tokenize};
pub use parser::{ParseError, Parser, parse_str};
pub use source::Span;
pub use types::{BinaryOperator, Node, NodeKind};

use std::io::{self, Write};
use thiserror::Error;

/// Any failure of a pipeline run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Runs a whole script and returns its output lines in program order.
pub fn interpret(source: &str) -> Result<Vec<String>, Error> {
    let tokens = tokenize(source)?;
    let nodes = Parser::new(tokens).parse()?;
    Ok(evaluate_to_lines(&nodes)?)
}

/// Runs a whole script, writing each output line to `out` as it is produced.
pub fn run<W: Write>(source: &str, out: &mut W) -> Result<(), Error> {
    let tokens = tokenize(source)?;
    let nodes = Parser::new(tokens).parse()?;
    evaluate(&nodes, out)?;
    Ok(())
}
