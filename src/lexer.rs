use logos::Logos;
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

use crate::Span;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Console,
    Log,
    String,
    Int,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl TokenKind {
    /// Maps an operator character to its token kind.
    pub fn operator(c: char) -> Option<TokenKind> {
        match c {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Multiply),
            '/' => Some(TokenKind::Divide),
            '%' => Some(TokenKind::Modulo),
            '^' => Some(TokenKind::Power),
            _ => None,
        }
    }
}

// Tags used by the token dump
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            TokenKind::Console => "CONSOLE",
            TokenKind::Log => "LOG",
            TokenKind::String => "STRING",
            TokenKind::Int => "INT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Modulo => "MODULO",
            TokenKind::Power => "POWER",
        };
        f.write_str(tag)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String, // Exact matched text, string bodies without their quotes
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: &str, span: Span) -> Self {
        Token {
            kind,
            literal: literal.to_string(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.literal)
    }
}

/// Words in front of the argument list. Spaces and dots only separate words.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ .]+")]
enum CalleeWord {
    #[token("console")]
    Console,
    #[token("log")]
    Log,
    #[regex(r"[^ .]+")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexerErrorKind {
    #[error("Malformed statement, missing '(': '{0}'")]
    MissingOpenParen(String),
    #[error("Malformed statement, missing ')' after the argument list: '{0}'")]
    MissingCloseParen(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct LexerError {
    pub error: LexerErrorKind,
    pub span: Span,
}

// Result type alias for convenience
pub type LexerResult<T> = Result<T, LexerError>;

/// Converts a whole script into a flat token sequence.
///
/// The input is split on `;` and every non-empty statement is lexed on its
/// own: `console` and `log` words before the first `(`, then one or three
/// tokens per comma separated argument up to the last `)`.
pub fn tokenize(input: &str) -> LexerResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    for segment in input.split(';') {
        let (statement, span) = trimmed(segment, offset);
        offset += segment.len() + 1;
        if statement.is_empty() {
            continue;
        }
        lex_statement(statement, span, &mut tokens)?;
    }

    debug!(count = tokens.len(), "tokenized script");
    Ok(tokens)
}

fn lex_statement(statement: &str, span: Span, tokens: &mut Vec<Token>) -> LexerResult<()> {
    let Some(open) = statement.find('(') else {
        return Err(LexerError {
            error: LexerErrorKind::MissingOpenParen(statement.to_string()),
            span,
        });
    };
    let close = match statement.rfind(')') {
        Some(close) if close > open => close,
        _ => {
            return Err(LexerError {
                error: LexerErrorKind::MissingCloseParen(statement.to_string()),
                span,
            });
        }
    };
    trace!(statement, "lexing statement");

    lex_callee(&statement[..open], span.start, tokens);

    let mut offset = span.start + open + 1;
    for raw in statement[open + 1..close].split(',') {
        let (argument, argument_span) = trimmed(raw, offset);
        offset += raw.len() + 1;
        lex_argument(argument, argument_span, tokens);
    }
    Ok(())
}

fn lex_callee(callee: &str, base: usize, tokens: &mut Vec<Token>) {
    for (word, range) in CalleeWord::lexer(callee).spanned() {
        let kind = match word {
            Ok(CalleeWord::Console) => TokenKind::Console,
            Ok(CalleeWord::Log) => TokenKind::Log,
            Ok(CalleeWord::Other) | Err(()) => continue,
        };
        let span = Span::new(base + range.start, base + range.end);
        tokens.push(Token::new(kind, &callee[range], span));
    }
}

fn lex_argument(argument: &str, span: Span, tokens: &mut Vec<Token>) {
    if argument.len() >= 2 && argument.starts_with('"') && argument.ends_with('"') {
        // No escape processing: the body is taken verbatim
        tokens.push(Token::new(
            TokenKind::String,
            &argument[1..argument.len() - 1],
            span,
        ));
        return;
    }

    // Only the first operator splits the argument, later ones stay in the right operand
    let operator = argument
        .char_indices()
        .find_map(|(index, c)| TokenKind::operator(c).map(|kind| (index, kind)));

    match operator {
        Some((index, kind)) => {
            let (left, left_span) = trimmed(&argument[..index], span.start);
            let (right, right_span) = trimmed(&argument[index + 1..], span.start + index + 1);
            tokens.push(Token::new(TokenKind::Int, left, left_span));
            tokens.push(Token::new(
                kind,
                &argument[index..index + 1],
                Span::new(span.start + index, span.start + index + 1),
            ));
            tokens.push(Token::new(TokenKind::Int, right, right_span));
        }
        None => tokens.push(Token::new(TokenKind::Int, argument, span)),
    }
}

// Trims `text` (which starts at byte `start`) and returns the span of what is left
fn trimmed(text: &str, start: usize) -> (&str, Span) {
    let leading = text.len() - text.trim_start().len();
    let value = text.trim();
    let begin = start + leading;
    (value, Span::new(begin, begin + value.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Helper to simplify testing token sequences
    fn assert_tokens(input: &str, expected: Vec<(TokenKind, &str)>) {
        match tokenize(input) {
            Ok(tokens) => {
                let pairs: Vec<(TokenKind, &str)> = tokens
                    .iter()
                    .map(|t| (t.kind, t.literal.as_str()))
                    .collect();
                assert_eq!(pairs, expected, "Input: '{}'", input);
            }
            Err(e) => panic!("Lexing failed for input '{}': {}", input, e),
        }
    }

    // Helper to simplify testing for lexer errors
    fn assert_lexer_error(input: &str, expected_error_variant: LexerErrorKind) {
        match tokenize(input) {
            Ok(tokens) => panic!(
                "Expected lexing to fail for input '{}', but got tokens: {:?}",
                input, tokens
            ),
            Err(e) => {
                assert_eq!(
                    std::mem::discriminant(&e.error),
                    std::mem::discriminant(&expected_error_variant),
                    "Input: '{}', Expected error variant like {:?}, got: {:?}",
                    input,
                    expected_error_variant,
                    e
                );
            }
        }
    }

    #[test]
    fn test_empty_input() {
        assert_tokens("", vec![]);
        assert_tokens(" ; ;\n", vec![]);
    }

    #[test]
    fn test_string_arguments() {
        assert_tokens(
            r#"console.log("a", "b");"#,
            vec![
                (TokenKind::Console, "console"),
                (TokenKind::Log, "log"),
                (TokenKind::String, "a"),
                (TokenKind::String, "b"),
            ],
        );
        // No escape processing
        assert_tokens(
            r#"console.log("tab\t");"#,
            vec![
                (TokenKind::Console, "console"),
                (TokenKind::Log, "log"),
                (TokenKind::String, r"tab\t"),
            ],
        );
    }

    #[test]
    fn test_each_operator() {
        let cases = [
            ("+", TokenKind::Plus),
            ("-", TokenKind::Minus),
            ("*", TokenKind::Multiply),
            ("/", TokenKind::Divide),
            ("%", TokenKind::Modulo),
            ("^", TokenKind::Power),
        ];
        for (symbol, kind) in cases {
            assert_tokens(
                &format!("console.log(12 {} 3);", symbol),
                vec![
                    (TokenKind::Console, "console"),
                    (TokenKind::Log, "log"),
                    (TokenKind::Int, "12"),
                    (kind, symbol),
                    (TokenKind::Int, "3"),
                ],
            );
        }
    }

    #[test]
    fn test_only_first_operator_splits() {
        assert_tokens(
            "console.log(1+2*3);",
            vec![
                (TokenKind::Console, "console"),
                (TokenKind::Log, "log"),
                (TokenKind::Int, "1"),
                (TokenKind::Plus, "+"),
                (TokenKind::Int, "2*3"),
            ],
        );
        // A leading minus is an operator with an empty left operand
        assert_tokens(
            "console.log(-3);",
            vec![
                (TokenKind::Console, "console"),
                (TokenKind::Log, "log"),
                (TokenKind::Int, ""),
                (TokenKind::Minus, "-"),
                (TokenKind::Int, "3"),
            ],
        );
    }

    #[test]
    fn test_bare_and_empty_arguments() {
        assert_tokens(
            "console.log( 42 ,x);",
            vec![
                (TokenKind::Console, "console"),
                (TokenKind::Log, "log"),
                (TokenKind::Int, "42"),
                (TokenKind::Int, "x"),
            ],
        );
        assert_tokens(
            "console.log();",
            vec![
                (TokenKind::Console, "console"),
                (TokenKind::Log, "log"),
                (TokenKind::Int, ""),
            ],
        );
        // A lone quote is not a string literal
        assert_tokens(
            r#"console.log(");"#,
            vec![
                (TokenKind::Console, "console"),
                (TokenKind::Log, "log"),
                (TokenKind::Int, "\""),
            ],
        );
    }

    #[test]
    fn test_callee_words() {
        // Unknown words are dropped, only spaces and dots separate words
        assert_tokens(
            "window . console.log(1)",
            vec![
                (TokenKind::Console, "console"),
                (TokenKind::Log, "log"),
                (TokenKind::Int, "1"),
            ],
        );
        assert_tokens("consoles.logger(1)", vec![(TokenKind::Int, "1")]);
        assert_tokens(
            "log.console(1)",
            vec![
                (TokenKind::Log, "log"),
                (TokenKind::Console, "console"),
                (TokenKind::Int, "1"),
            ],
        );
    }

    #[test]
    fn test_statements_keep_order() {
        assert_tokens(
            "console.log(1+1);\nconsole.log(\"x\")",
            vec![
                (TokenKind::Console, "console"),
                (TokenKind::Log, "log"),
                (TokenKind::Int, "1"),
                (TokenKind::Plus, "+"),
                (TokenKind::Int, "1"),
                (TokenKind::Console, "console"),
                (TokenKind::Log, "log"),
                (TokenKind::String, "x"),
            ],
        );
    }

    #[test]
    fn test_last_close_paren_ends_arguments() {
        assert_tokens(
            r#"console.log("(a)")"#,
            vec![
                (TokenKind::Console, "console"),
                (TokenKind::Log, "log"),
                (TokenKind::String, "(a)"),
            ],
        );
    }

    #[test]
    fn test_missing_parens() {
        assert_lexer_error(
            "console.log 1;",
            LexerErrorKind::MissingOpenParen(String::new()),
        );
        assert_lexer_error(
            "console.log(1;",
            LexerErrorKind::MissingCloseParen(String::new()),
        );
        assert_lexer_error(
            "console.log)1(;",
            LexerErrorKind::MissingCloseParen(String::new()),
        );
    }

    #[test]
    fn test_error_reports_statement_span() {
        let err = tokenize("console.log(1);  oops ;").unwrap_err();
        assert_eq!(err.error, LexerErrorKind::MissingOpenParen("oops".to_string()));
        assert_eq!(err.span, Span::new(17, 21));
    }

    #[test]
    fn test_tokenize_spans() {
        let input = " ; console.log(1 + 2, \"s\")";
        let tokens = tokenize(input).expect("Should tokenize successfully");
        let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
        assert_eq!(
            spans,
            vec![
                Span::new(3, 10),
                Span::new(11, 14),
                Span::new(15, 16),
                Span::new(17, 18),
                Span::new(19, 20),
                Span::new(22, 25),
            ]
        );
        for token in &tokens[..5] {
            assert_eq!(&input[token.span.to_range()], token.literal);
        }
    }
}
