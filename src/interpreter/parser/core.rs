use std::iter::Peekable;

use crate::{
    ast::{Expr, Position},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::{precedence_of, token_to_binary_operator},
            unary::parse_prefix,
            utils::parse_call,
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting the parser accepts, and the tallest expression tree it
/// builds. Evaluating and dropping a tree recurse once per level.
pub const MAX_NESTING: usize = 256;

/// Binding strength of operators, weakest first.
///
/// `Prefix` is used for the operand of `-` and `NOT`; calls bind tighter
/// than anything and are handled directly after a prefix expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Start of an expression.
    Lowest,
    /// `OR`
    Or,
    /// `AND`
    And,
    /// `> < >= <= == !=`
    Comparison,
    /// `+ -`
    Sum,
    /// `* /`
    Product,
    /// Operand of a prefix operator.
    Prefix,
}

/// Parses an expression whose operators all bind tighter than `precedence`.
///
/// This is a precedence-climbing loop: a prefix expression is read first,
/// optionally turned into a call when `(` follows it directly, and then
/// extended with infix operators for as long as they bind tighter than the
/// requested level. Every operator is left-associative because its right
/// operand is parsed at the operator's own level.
///
/// Grammar (simplified):
/// ```text
///     expression := prefix call? (op expression)*
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Position)` pairs.
/// - `precedence`: The binding strength of the enclosing operator.
///
/// # Returns
/// The parsed expression node.
///
/// # Example
/// ```
/// use formulang::interpreter::{
///     lexer::tokenize,
///     parser::core::{Precedence, parse_expression},
/// };
///
/// let tokens = tokenize("1 + 2 * 3 > 4 AND C > O");
/// let expr = parse_expression(&mut tokens.iter().peekable(), Precedence::Lowest).unwrap();
/// assert_eq!(expr.to_string(), "(((1 + (2 * 3)) > 4) AND (C > O))");
/// ```
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>,
                               precedence: Precedence)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    parse_nested(tokens, precedence, 0).map(|(expr, _)| expr)
}

/// Parses an expression `depth` levels below the top of the statement.
///
/// Works like [`parse_expression`] but also bounds the input: nested
/// groups, prefix operators and call arguments each add a level, and the
/// resulting tree may be at most [`MAX_NESTING`] nodes high.
///
/// # Returns
/// The expression together with the height of its tree.
///
/// # Errors
/// `NestingTooDeep` once either bound is exceeded, besides the errors of
/// [`parse_expression`].
pub(in crate::interpreter::parser) fn parse_nested<'a, I>(tokens: &mut Peekable<I>,
                                                          precedence: Precedence,
                                                          depth: usize)
                                                          -> ParseResult<(Expr, usize)>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    if depth > MAX_NESTING {
        let position = tokens.peek().map_or_else(Position::default, |(_, p)| *p);
        return Err(ParseError::NestingTooDeep { position });
    }

    let (mut left, mut height) = parse_prefix(tokens, depth)?;

    if let Some((Token::LParen, _)) = tokens.peek() {
        (left, height) = parse_call(tokens, left, height, depth)?;
    }

    while let Some((token, position)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && precedence < precedence_of(op)
    {
        let position = *position;
        tokens.next();
        let (right, right_height) = parse_nested(tokens, precedence_of(op), depth + 1)?;
        height = checked_height(height.max(right_height) + 1, position)?;
        left = Expr::Binary { left: Box::new(left),
                              op,
                              right: Box::new(right),
                              position };
    }

    Ok((left, height))
}

/// Rejects a tree taller than [`MAX_NESTING`].
pub(in crate::interpreter::parser) const fn checked_height(height: usize,
                                                           position: Position)
                                                           -> ParseResult<usize> {
    if height > MAX_NESTING {
        Err(ParseError::NestingTooDeep { position })
    } else {
        Ok(height)
    }
}
