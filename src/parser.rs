use crate::Span;
use crate::lexer::{LexerError, Token, TokenKind};
use crate::types::{BinaryOperator, Node};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Parse Error [at {}]: Unexpected token {}, expected 'console'", .found.span, .found)]
    ExpectedConsole { found: Token },
    #[error("Parse Error [at {}]: Unexpected token {}, expected 'log' after 'console'", .found.span, .found)]
    MissingLog { found: Token },
    #[error("Parse Error: Unexpected end of input during parsing. Expected {expected}")]
    UnexpectedEof { expected: String, span: Span },
    #[error("Lexer Error during parse: {0}")]
    LexerError(#[from] LexerError),
}

// Result type alias for convenience
pub type ParseResult<T> = Result<T, ParseError>;

/// Single pass parser with a fixed two token lookahead.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            position: 0,
        }
    }

    // Consumes the next token if available.
    fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    // Consumes the next token only if it matches.
    fn next_token_if(&mut self, predicate: impl Fn(&Token) -> bool) -> Option<Token> {
        match self.tokens.get(self.position) {
            Some(token) if predicate(token) => self.next_token(),
            _ => None,
        }
    }

    /// Parses every statement in the token stream.
    pub fn parse(mut self) -> ParseResult<Vec<Node>> {
        let mut statements = Vec::new();
        while let Some(token) = self.next_token() {
            statements.push(self.parse_log_call(token)?);
        }
        debug!(statements = statements.len(), "parsed program");
        Ok(statements)
    }

    /// Parses `console log <arguments>` up to the next `console` or the end.
    fn parse_log_call(&mut self, console: Token) -> ParseResult<Node> {
        if console.kind != TokenKind::Console {
            return Err(ParseError::ExpectedConsole { found: console });
        }
        let log = match self.next_token() {
            Some(Token {
                kind: TokenKind::Log,
                span,
                ..
            }) => span,
            Some(found) => return Err(ParseError::MissingLog { found }),
            None => {
                return Err(ParseError::UnexpectedEof {
                    expected: "'log' after 'console'".to_string(),
                    span: console.span,
                });
            }
        };

        let mut span = console.span.merge(log);
        let mut arguments = Vec::new();
        while let Some(token) = self.next_token_if(|t| t.kind != TokenKind::Console) {
            span = span.merge(token.span);
            let argument = match token.kind {
                TokenKind::String => Node::from_literal_token(&token),
                TokenKind::Int => self.parse_int_window(&token),
                // Stray `log` or operator tokens carry no argument
                _ => None,
            };
            if let Some(argument) = argument {
                span = span.merge(argument.span);
                arguments.push(argument);
            }
        }

        Ok(Node::new_log_call(arguments, span))
    }

    /// Looks two tokens past an `Int`. If that token is another `Int`, all
    /// three tokens are consumed as one window: a binary expression when the
    /// middle token is an operator, nothing at all otherwise. Without a second
    /// `Int` the first one stands alone.
    fn parse_int_window(&mut self, left: &Token) -> Option<Node> {
        let left = Node::new_int(&left.literal, left.span);
        let right = match self.tokens.get(self.position + 1) {
            Some(right) if right.kind == TokenKind::Int => right.clone(),
            _ => return Some(left),
        };
        let middle = self.tokens.get(self.position).map(|t| t.kind);
        self.position += 2;

        let operator = middle.and_then(BinaryOperator::from_token_kind)?;
        Some(Node::new_binary(
            operator,
            left,
            Node::new_int(&right.literal, right.span),
        ))
    }
}

// Helper function to lex and parse a string directly (useful for tests and REPL)
pub fn parse_str(input: &str) -> ParseResult<Vec<Node>> {
    let tokens = crate::lexer::tokenize(input)?;
    Parser::new(tokens).parse()
}
