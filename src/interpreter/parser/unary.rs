use std::iter::Peekable;

use crate::{
    ast::{Expr, Position, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Precedence, checked_height, parse_nested},
    },
};

/// Parses the expression that starts at the next token.
///
/// Prefix expressions are the leaves of the grammar plus the two prefix
/// operators:
///
/// ```text
///     prefix := identifier
///             | number
///             | string
///             | "(" expression ")"
///             | ("-" | "NOT") prefix-operand
/// ```
///
/// The operand of `-` and `NOT` is parsed at [`Precedence::Prefix`], so
/// `-A * B` reads as `(-A) * B` and `NOT A AND B` as `(NOT A) AND B`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of an expression.
/// - `depth`: Nesting level of the expression being parsed.
///
/// # Returns
/// The parsed [`Expr`] and the height of its tree.
///
/// # Errors
/// - `UnexpectedToken` if no expression can start with the next token.
/// - `UnexpectedEndOfInput` if there is no next token.
/// - `MalformedNumber` and `ExpectedClosingParen` from the literal and group
///   parsers.
/// - `NestingTooDeep` from nested groups and operators.
pub(crate) fn parse_prefix<'a, I>(tokens: &mut Peekable<I>,
                                  depth: usize)
                                  -> ParseResult<(Expr, usize)>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let (token, position) =
        tokens.next()
              .ok_or(ParseError::UnexpectedEndOfInput { position: Position::default() })?;
    let position = *position;

    match token {
        Token::Identifier(name) => Ok((Expr::Identifier { name: name.clone(),
                                                          position },
                                       1)),
        Token::Number(literal) => parse_number(literal, position).map(|expr| (expr, 1)),
        Token::Str(value) => Ok((Expr::StringLiteral { value: value.clone(),
                                                       position },
                                 1)),
        Token::LParen => parse_grouping(tokens, depth),
        Token::Minus => parse_unary_operand(tokens, UnaryOperator::Negate, position, depth),
        Token::Not => parse_unary_operand(tokens, UnaryOperator::Not, position, depth),
        tok => Err(ParseError::UnexpectedToken { token: tok.to_string(),
                                                 position }),
    }
}

/// Converts a number literal into an [`Expr::NumberLiteral`].
///
/// The lexer accepts any run of digits and dots, so shapes such as `1.2.3`
/// reach this point and are rejected here.
///
/// # Parameters
/// - `literal`: The literal text.
/// - `position`: Where the literal starts.
///
/// # Returns
/// The literal node, keeping the original spelling for printing.
fn parse_number(literal: &str, position: Position) -> ParseResult<Expr> {
    let value = literal.parse::<f64>()
                       .map_err(|_| ParseError::MalformedNumber { literal: literal.to_string(),
                                                                  position })?;
    Ok(Expr::NumberLiteral { value,
                             literal: literal.to_string(),
                             position })
}

/// Parses a parenthesized expression after its opening `(`.
///
/// Grammar `grouping := "(" expression ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned just after `(`.
/// - `depth`: Nesting level of the group.
///
/// # Returns
/// The inner expression as-is (no wrapper node) and its height.
///
/// # Errors
/// `ExpectedClosingParen` when anything other than `)` follows the inner
/// expression.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<(Expr, usize)>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let inner = parse_nested(tokens, Precedence::Lowest, depth + 1)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(inner),
        Some((tok, position)) => Err(ParseError::ExpectedClosingParen { token:    tok.to_string(),
                                                                        position: *position, }),
        None => Err(ParseError::UnexpectedEndOfInput { position: Position::default() }),
    }
}

/// Parses the operand of a prefix operator and wraps it.
///
/// # Parameters
/// - `tokens`: Token iterator positioned just after the operator.
/// - `op`: The prefix operator.
/// - `position`: Where the operator appears.
/// - `depth`: Nesting level of the operator.
///
/// # Returns
/// An [`Expr::Unary`] node and its height.
fn parse_unary_operand<'a, I>(tokens: &mut Peekable<I>,
                              op: UnaryOperator,
                              position: Position,
                              depth: usize)
                              -> ParseResult<(Expr, usize)>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let (expr, height) = parse_nested(tokens, Precedence::Prefix, depth + 1)?;
    Ok((Expr::Unary { op,
                      expr: Box::new(expr),
                      position },
        checked_height(height + 1, position)?))
}
