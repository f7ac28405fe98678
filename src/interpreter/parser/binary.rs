use crate::{ast::BinaryOperator, interpreter::{lexer::Token, parser::core::Precedence}};

/// Maps a token to its corresponding binary operator.
///
/// Both spellings of equality (`=`, `==`) and of inequality (`!=`, `<>`) are
/// already folded together by the lexer.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token is an infix operator, otherwise
/// `None`.
///
/// # Example
/// ```
/// use formulang::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::NotEqual),
///            Some(BinaryOperator::NotEqual));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::And => Some(BinaryOperator::And),
        Token::Or => Some(BinaryOperator::Or),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::Less => Some(BinaryOperator::Less),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Equal => Some(BinaryOperator::Equal),
        Token::NotEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}

/// Returns how tightly `op` binds its operands.
#[must_use]
pub const fn precedence_of(op: BinaryOperator) -> Precedence {
    match op {
        BinaryOperator::Or => Precedence::Or,
        BinaryOperator::And => Precedence::And,
        BinaryOperator::Greater
        | BinaryOperator::Less
        | BinaryOperator::GreaterEqual
        | BinaryOperator::LessEqual
        | BinaryOperator::Equal
        | BinaryOperator::NotEqual => Precedence::Comparison,
        BinaryOperator::Add | BinaryOperator::Sub => Precedence::Sum,
        BinaryOperator::Mul | BinaryOperator::Div => Precedence::Product,
    }
}
