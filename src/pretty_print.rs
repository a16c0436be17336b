use crate::{Error, EvalError, LexerError, LexerErrorKind, ParseError, Span};
use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};
use std::io;
use std::ops::Range;

// Spans are byte offsets, ariadne counts chars unless told otherwise
fn build<'a>(
    name: &'a str,
    span: Span,
    message: String,
    label: String,
) -> Report<'a, (&'a str, Range<usize>)> {
    Report::build(ReportKind::Error, (name, span.to_range()))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(message)
        .with_label(Label::new((name, span.to_range())).with_message(label))
        .finish()
}

impl LexerError {
    pub fn pretty_print(&self, name: &str, input: &str) -> io::Result<()> {
        let label = match &self.error {
            LexerErrorKind::MissingOpenParen(_) => "This statement has no argument list",
            LexerErrorKind::MissingCloseParen(_) => "The argument list is never closed",
        };
        build(
            name,
            self.span,
            "Malformed statement".to_string(),
            label.to_string(),
        )
        .eprint((name, Source::from(input)))
    }
}

impl ParseError {
    pub fn pretty_print(&self, name: &str, input: &str) -> io::Result<()> {
        let report = match self {
            ParseError::ExpectedConsole { found } => build(
                name,
                found.span,
                format!("Unexpected token: {}", found),
                "Statements must start with `console.log`".to_string(),
            ),
            ParseError::MissingLog { found } => build(
                name,
                found.span,
                format!("Unexpected token: {}", found),
                "Expected `log` after `console`".to_string(),
            ),
            ParseError::UnexpectedEof { expected, span } => build(
                name,
                *span,
                "Unexpected EOF".to_string(),
                format!("Expected {expected}"),
            ),
            ParseError::LexerError(lex_err) => return lex_err.pretty_print(name, input),
        };
        report.eprint((name, Source::from(input)))
    }
}

impl EvalError {
    pub fn pretty_print(&self, name: &str, input: &str) -> io::Result<()> {
        match self {
            EvalError::DivisionByZero { operator, span } => build(
                name,
                *span,
                "Division by zero".to_string(),
                format!("The right operand of `{operator}` evaluates to 0"),
            )
            .eprint((name, Source::from(input))),
            EvalError::Io(err) => {
                eprintln!("Error: {}", err);
                Ok(())
            }
        }
    }
}

impl Error {
    pub fn pretty_print(&self, name: &str, input: &str) -> io::Result<()> {
        match self {
            Error::Lexer(err) => err.pretty_print(name, input),
            Error::Parse(err) => err.pretty_print(name, input),
            Error::Eval(err) => err.pretty_print(name, input),
            Error::Io(err) => {
                eprintln!("Error: {}", err);
                Ok(())
            }
        }
    }
}
