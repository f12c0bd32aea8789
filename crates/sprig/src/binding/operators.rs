//! Static operator overload tables.
//!
//! Every legal operator/operand-type combination is a row in a const table.
//! Binding is a linear scan; anything not in a table is a type error. Mixed
//! Int32/Decimal rows exist in both orders so numeric promotion is symmetric.

use crate::lexer::TokenKind;
use sprig_ext::Type;

/// Semantic meaning of a prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperatorKind {
    Identity,
    Negation,
    LogicalNegation,
}

/// One row of the prefix operator table.
#[derive(Debug, Clone, Copy)]
pub struct UnaryOperator {
    pub token: TokenKind,
    pub kind: UnaryOperatorKind,
    pub operand: Type,
    pub result: Type,
}

impl UnaryOperator {
    const fn new(token: TokenKind, kind: UnaryOperatorKind, operand: Type, result: Type) -> Self {
        Self {
            token,
            kind,
            operand,
            result,
        }
    }
}

/// Semantic meaning of an infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperatorKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    LogicalAnd,
    LogicalOr,
    Equality,
    Inequality,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

/// One row of the infix operator table.
#[derive(Debug, Clone, Copy)]
pub struct BinaryOperator {
    pub token: TokenKind,
    pub kind: BinaryOperatorKind,
    pub left: Type,
    pub right: Type,
    pub result: Type,
}

impl BinaryOperator {
    const fn new(
        token: TokenKind,
        kind: BinaryOperatorKind,
        left: Type,
        right: Type,
        result: Type,
    ) -> Self {
        Self {
            token,
            kind,
            left,
            right,
            result,
        }
    }

    /// Shorthand for the four numeric operand pairings of one operator.
    /// Mixed pairings promote to Decimal.
    const fn numeric(token: TokenKind, kind: BinaryOperatorKind) -> [Self; 4] {
        [
            Self::new(token, kind, Type::Int32, Type::Int32, Type::Int32),
            Self::new(token, kind, Type::Decimal, Type::Decimal, Type::Decimal),
            Self::new(token, kind, Type::Int32, Type::Decimal, Type::Decimal),
            Self::new(token, kind, Type::Decimal, Type::Int32, Type::Decimal),
        ]
    }

    /// Shorthand for the four comparison pairings of one operator.
    const fn comparison(token: TokenKind, kind: BinaryOperatorKind) -> [Self; 4] {
        [
            Self::new(token, kind, Type::Int32, Type::Int32, Type::Boolean),
            Self::new(token, kind, Type::Decimal, Type::Decimal, Type::Boolean),
            Self::new(token, kind, Type::Int32, Type::Decimal, Type::Boolean),
            Self::new(token, kind, Type::Decimal, Type::Int32, Type::Boolean),
        ]
    }
}

const UNARY_OPERATORS: [UnaryOperator; 5] = [
    UnaryOperator::new(
        TokenKind::Plus,
        UnaryOperatorKind::Identity,
        Type::Int32,
        Type::Int32,
    ),
    UnaryOperator::new(
        TokenKind::Minus,
        UnaryOperatorKind::Negation,
        Type::Int32,
        Type::Int32,
    ),
    UnaryOperator::new(
        TokenKind::Plus,
        UnaryOperatorKind::Identity,
        Type::Decimal,
        Type::Decimal,
    ),
    UnaryOperator::new(
        TokenKind::Minus,
        UnaryOperatorKind::Negation,
        Type::Decimal,
        Type::Decimal,
    ),
    UnaryOperator::new(
        TokenKind::Not,
        UnaryOperatorKind::LogicalNegation,
        Type::Boolean,
        Type::Boolean,
    ),
];

const ARITHMETIC: [[BinaryOperator; 4]; 4] = [
    BinaryOperator::numeric(TokenKind::Plus, BinaryOperatorKind::Addition),
    BinaryOperator::numeric(TokenKind::Minus, BinaryOperatorKind::Subtraction),
    BinaryOperator::numeric(TokenKind::Star, BinaryOperatorKind::Multiplication),
    BinaryOperator::numeric(TokenKind::Slash, BinaryOperatorKind::Division),
];

const LOGICAL: [BinaryOperator; 2] = [
    BinaryOperator::new(
        TokenKind::And,
        BinaryOperatorKind::LogicalAnd,
        Type::Boolean,
        Type::Boolean,
        Type::Boolean,
    ),
    BinaryOperator::new(
        TokenKind::Or,
        BinaryOperatorKind::LogicalOr,
        Type::Boolean,
        Type::Boolean,
        Type::Boolean,
    ),
];

const EQUALITY_BOOLEAN: [BinaryOperator; 2] = [
    BinaryOperator::new(
        TokenKind::EqEq,
        BinaryOperatorKind::Equality,
        Type::Boolean,
        Type::Boolean,
        Type::Boolean,
    ),
    BinaryOperator::new(
        TokenKind::BangEq,
        BinaryOperatorKind::Inequality,
        Type::Boolean,
        Type::Boolean,
        Type::Boolean,
    ),
];

const EQUALITY_NUMERIC: [[BinaryOperator; 4]; 2] = [
    BinaryOperator::comparison(TokenKind::EqEq, BinaryOperatorKind::Equality),
    BinaryOperator::comparison(TokenKind::BangEq, BinaryOperatorKind::Inequality),
];

const ORDERING: [[BinaryOperator; 4]; 4] = [
    BinaryOperator::comparison(TokenKind::Lt, BinaryOperatorKind::LessThan),
    BinaryOperator::comparison(TokenKind::LtEq, BinaryOperatorKind::LessThanOrEqual),
    BinaryOperator::comparison(TokenKind::Gt, BinaryOperatorKind::GreaterThan),
    BinaryOperator::comparison(TokenKind::GtEq, BinaryOperatorKind::GreaterThanOrEqual),
];

/// Finds the prefix operator row for a token and operand type.
pub fn resolve_unary(token: TokenKind, operand: Type) -> Option<&'static UnaryOperator> {
    UNARY_OPERATORS
        .iter()
        .find(|op| op.token == token && op.operand == operand)
}

/// Finds the infix operator row for a token and operand type pair.
pub fn resolve_binary(token: TokenKind, left: Type, right: Type) -> Option<&'static BinaryOperator> {
    ARITHMETIC
        .iter()
        .flatten()
        .chain(LOGICAL.iter())
        .chain(EQUALITY_BOOLEAN.iter())
        .chain(EQUALITY_NUMERIC.iter().flatten())
        .chain(ORDERING.iter().flatten())
        .find(|op| op.token == token && op.left == left && op.right == right)
}
