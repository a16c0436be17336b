use crate::lexer::{Token, TokenKind};
use crate::source::Span;
use std::fmt; // For custom display formatting

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind, // The executable element
    pub span: Span,     // The source span it covers
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }

    pub fn new_log_call(arguments: Vec<Node>, span: Span) -> Self {
        Node::new(NodeKind::LogCall(arguments), span)
    }

    pub fn new_string(value: &str, span: Span) -> Self {
        Node::new(NodeKind::StringLiteral(value.to_string()), span)
    }

    pub fn new_int(value: &str, span: Span) -> Self {
        Node::new(NodeKind::IntLiteral(value.to_string()), span)
    }

    pub fn new_binary(operator: BinaryOperator, left: Node, right: Node) -> Self {
        let span = left.span.merge(right.span);
        Node::new(
            NodeKind::BinaryOp {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    /// Builds a literal node straight from a `String` or `Int` token.
    pub fn from_literal_token(token: &Token) -> Option<Self> {
        match token.kind {
            TokenKind::String => Some(Node::new_string(&token.literal, token.span)),
            TokenKind::Int => Some(Node::new_int(&token.literal, token.span)),
            _ => None,
        }
    }
}

/// Every executable element of a script.
///
/// The parser only ever puts `IntLiteral`s under a `BinaryOp`, and only puts
/// `LogCall`s at the top level.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    LogCall(Vec<Node>),
    StringLiteral(String),
    IntLiteral(String), // Numeral text, converted only when used as an operand
    BinaryOp {
        operator: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::LogCall(_) => "LogCall",
            NodeKind::StringLiteral(_) => "StringLiteral",
            NodeKind::IntLiteral(_) => "IntLiteral",
            NodeKind::BinaryOp { .. } => "BinaryOp",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Minus => Some(BinaryOperator::Sub),
            TokenKind::Multiply => Some(BinaryOperator::Mul),
            TokenKind::Divide => Some(BinaryOperator::Div),
            TokenKind::Modulo => Some(BinaryOperator::Mod),
            TokenKind::Power => Some(BinaryOperator::Pow),
            TokenKind::Console | TokenKind::Log | TokenKind::String | TokenKind::Int => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Sub => '-',
            BinaryOperator::Mul => '*',
            BinaryOperator::Div => '/',
            BinaryOperator::Mod => '%',
            BinaryOperator::Pow => '^',
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delegate to NodeKind's Display implementation
        write!(f, "{}", self.kind)
    }
}

// Renders the tree as source-like text, without executing anything
impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::LogCall(arguments) => {
                write!(f, "console.log(")?;
                let mut first = true;
                for argument in arguments {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                    first = false;
                }
                write!(f, ")")
            }
            NodeKind::StringLiteral(value) => write!(f, "\"{}\"", value),
            NodeKind::IntLiteral(value) => write!(f, "{}", value),
            NodeKind::BinaryOp {
                operator,
                left,
                right,
            } => write!(f, "{} {} {}", left, operator, right),
        }
    }
}
