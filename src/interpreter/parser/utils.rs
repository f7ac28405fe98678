use std::iter::Peekable;

use crate::{
    ast::{Expr, Position},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Precedence, checked_height, parse_nested},
    },
};

/// Parses the argument list of a call and builds the call node.
///
/// The iterator must be positioned at the `(` that follows the callee.
/// Arguments are full expressions separated by commas; `F()` is a valid call
/// with no arguments.
///
/// Grammar: `call := callee "(" (expression ("," expression)*)? ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `(`.
/// - `function`: The already parsed callee.
/// - `function_height`: Height of the callee's tree.
/// - `depth`: Nesting level of the call.
///
/// # Returns
/// An [`Expr::FunctionCall`] node and its height.
///
/// # Errors
/// - `ExpectedClosingParen` when an argument is followed by anything other
///   than `,` or `)`.
/// - `UnexpectedEndOfInput` when the list is not closed.
/// - Any error raised while parsing an argument.
pub(in crate::interpreter::parser) fn parse_call<'a, I>(tokens: &mut Peekable<I>,
                                                        function: Expr,
                                                        function_height: usize,
                                                        depth: usize)
                                                        -> ParseResult<(Expr, usize)>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let position = match tokens.next() {
        Some((Token::LParen, position)) => *position,
        Some((tok, position)) => {
            return Err(ParseError::UnexpectedToken { token:    tok.to_string(),
                                                     position: *position, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { position: Position::default() }),
    };

    let arguments =
        parse_comma_separated(tokens, |t| parse_nested(t, Precedence::Lowest, depth + 1))?;
    let tallest = arguments.iter()
                           .map(|(_, height)| *height)
                           .fold(function_height, usize::max);
    let height = checked_height(tallest + 1, position)?;

    Ok((Expr::FunctionCall { function: Box::new(function),
                             arguments: arguments.into_iter().map(|(arg, _)| arg).collect(),
                             position },
        height))
}

/// Parses a comma-separated list of items up to a closing `)`.
///
/// An immediately encountered `)` produces an empty list. The closing
/// parenthesis is consumed.
///
/// Grammar (simplified): `list := item ("," item)* ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or `)`.
/// - `parse_item`: Function used to parse each list element.
///
/// # Returns
/// A vector of parsed items.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut items = Vec::new();
    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::RParen, _)) => break,
            Some((tok, position)) => {
                return Err(ParseError::ExpectedClosingParen { token:    tok.to_string(),
                                                              position: *position, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { position: Position::default() }),
        }
    }
    Ok(items)
}
