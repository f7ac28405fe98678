use std::iter::Peekable;

use tracing::debug;

use crate::{
    ast::{Position, Program, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Precedence, parse_expression},
    },
};

/// Parses a whole token stream into a [`Program`].
///
/// Statements are read one after another. After each statement the next
/// token must be `;`; end of input does not count as a terminator. Empty
/// statements (`;;`) are skipped.
///
/// Parsing never fails as a whole. The first error ends it: the error is
/// stored in [`Program::errors`] and everything parsed so far is returned.
/// A statement that parsed but lacks its `;` is kept in the program, and the
/// error points at that statement's last token.
///
/// # Parameters
/// - `tokens`: The output of
///   [`tokenize`](crate::interpreter::lexer::tokenize).
///
/// # Returns
/// The parsed program together with any error.
///
/// # Example
/// ```
/// use formulang::interpreter::{lexer::tokenize, parser::statement::parse_program};
///
/// let program = parse_program(&tokenize("test1:HIGH>CLOSE\ntest2:HIGH<CLOSE;"));
/// assert_eq!(program.statements.len(), 1);
/// assert_eq!(program.errors.len(), 1);
/// assert_eq!(program.errors[0].to_string(),
///            "line 1 col 12: statement must end with semicolon, got token: CLOSE");
/// ```
#[must_use]
pub fn parse_program(tokens: &[(Token, Position)]) -> Program {
    let mut program = Program::default();
    let mut iter = tokens.iter().peekable();
    let end_position = tokens.last().map_or_else(Position::default, |(_, p)| *p);

    loop {
        while let Some((Token::Semicolon, _)) = iter.peek() {
            iter.next();
        }
        if iter.peek().is_none() {
            break;
        }

        match parse_statement(&mut iter) {
            Ok(statement) => program.statements.push(statement),
            Err(ParseError::UnexpectedEndOfInput { .. }) => {
                program.errors
                       .push(ParseError::UnexpectedEndOfInput { position: end_position });
                break;
            },
            Err(error) => {
                program.errors.push(error);
                break;
            },
        }

        if let Some((Token::Semicolon, _)) = iter.peek() {
            iter.next();
            continue;
        }

        let consumed = tokens.len() - iter.len();
        let (token, position) = consumed.checked_sub(1)
                                        .and_then(|i| tokens.get(i))
                                        .map_or_else(|| (String::new(), end_position),
                                                     |(t, p)| (t.to_string(), *p));
        program.errors
               .push(ParseError::MissingSemicolon { token, position });
        break;
    }

    debug!(statements = program.statements.len(),
           errors = program.errors.len(),
           "parsed program");
    program
}

/// Parses a single statement, without its terminating `;`.
///
/// A statement is an assignment when it starts with an identifier directly
/// followed by `:` or `:=`; anything else is parsed as an expression
/// statement.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first token of a statement.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    if let Some(statement) = parse_assignment(tokens)? {
        return Ok(statement);
    }

    let position = tokens.peek().map_or_else(Position::default, |(_, p)| *p);
    let expr = parse_expression(tokens, Precedence::Lowest)?;

    Ok(Statement::Expression { expr, position })
}

/// Parses an assignment statement.
///
/// ```text
///     assignment := identifier (":" | ":=") expression ("," identifier)*
/// ```
///
/// The single-colon form declares an output variable. The trailing
/// identifiers are the statement's suffix modifiers, kept in order.
///
/// If the upcoming tokens do not start an assignment, nothing is consumed
/// and `Ok(None)` is returned.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a possible assignment.
///
/// # Returns
/// - `Ok(Some(Statement::Assignment))` if an assignment is parsed,
/// - `Ok(None)` if no assignment is present.
///
/// # Errors
/// Returns a `ParseError` if the value expression is malformed or a comma is
/// not followed by a modifier name.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut lookahead = tokens.clone();
    let (name, position, is_output) = match (lookahead.next(), lookahead.next()) {
        (Some((Token::Identifier(name), position)), Some((Token::Colon, _))) => {
            (name.clone(), *position, true)
        },
        (Some((Token::Identifier(name), position)), Some((Token::ColonEqual, _))) => {
            (name.clone(), *position, false)
        },
        _ => return Ok(None),
    };

    tokens.next();
    tokens.next();

    let value = parse_expression(tokens, Precedence::Lowest)?;
    let suffix_params = parse_suffix_params(tokens)?;

    Ok(Some(Statement::Assignment { name,
                                    value,
                                    is_output,
                                    suffix_params,
                                    position }))
}

/// Parses the `,MOD1,MOD2` tail of an assignment.
///
/// # Parameters
/// - `tokens`: Token iterator positioned just after the value expression.
///
/// # Returns
/// The modifier names in declared order; empty when no comma follows.
///
/// # Errors
/// `ExpectedModifier` when a comma is followed by anything other than an
/// identifier.
fn parse_suffix_params<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<String>>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut params = Vec::new();

    while let Some((Token::Comma, comma_position)) = tokens.peek() {
        let comma_position = *comma_position;
        tokens.next();
        match tokens.next() {
            Some((Token::Identifier(name), _)) => params.push(name.clone()),
            Some((tok, position)) => {
                return Err(ParseError::ExpectedModifier { token:    tok.to_string(),
                                                          position: *position, });
            },
            None => {
                return Err(ParseError::ExpectedModifier { token:    String::new(),
                                                          position: comma_position, });
            },
        }
    }

    Ok(params)
}
