use std::fmt;

use logos::Logos;

use crate::ast::Position;

/// Represents a lexical token of the formula language.
///
/// Whitespace and newlines are consumed by the lexer itself; newlines only
/// advance the line counter kept in [`LexerExtras`].
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Numeric literal as written, such as `20` or `0.618`.
    ///
    /// The literal is kept verbatim; malformed shapes like `1.2.3` are
    /// rejected by the parser, not here.
    #[regex(r"[0-9][0-9.]*", |lex| lex.slice().to_string())]
    Number(String),
    /// `AND`
    #[token("AND")]
    And,
    /// `OR` or `or`
    #[token("OR")]
    #[token("or")]
    Or,
    /// `NOT` or `not`
    #[token("NOT")]
    #[token("not")]
    Not,
    /// Identifier tokens, e.g. `CLOSE`, `ma5`, `$sys` or `abc你好456`.
    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Single-quoted string contents. No escapes; an unterminated string
    /// runs to the end of the input.
    #[token("'", lex_string)]
    Str(String),
    /// `:=`
    #[token(":=")]
    ColonEqual,
    /// `:`
    #[token(":")]
    Colon,
    /// `==` or `=`
    #[token("==")]
    #[token("=")]
    Equal,
    /// `!=` or `<>`
    #[token("!=")]
    #[token("<>")]
    NotEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `<`
    #[token("<")]
    Less,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// Line breaks; never emitted.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Text the lexer does not recognise, such as a lone `!` or `#`.
    ///
    /// Never matched by a rule; [`tokenize`] produces it from lexer errors
    /// so that the parser can report the offending text.
    Error(String),
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the line number reached so far, for diagnostics.
#[derive(Debug)]
pub struct LexerExtras {
    /// The current line number, starting at 1.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Reads a string literal after its opening quote.
///
/// Consumes up to and including the closing `'`, or everything that is left
/// when no closing quote follows. Newlines inside the literal still advance
/// the line counter.
///
/// # Parameters
/// - `lex`: The lexer positioned just after the opening quote.
///
/// # Returns
/// The contents between the quotes.
fn lex_string(lex: &mut logos::Lexer<Token>) -> String {
    let rest = lex.remainder();
    let (contents, consumed) = match rest.find('\'') {
        Some(end) => (&rest[..end], end + 1),
        None => (rest, rest.len()),
    };
    let contents = contents.to_string();
    lex.extras.line += contents.matches('\n').count();
    lex.bump(consumed);
    contents
}

/// Splits source text into tokens paired with their positions.
///
/// Tokenization never fails: unrecognised input becomes
/// [`Token::Error`] and is left for the parser to report.
///
/// # Parameters
/// - `source`: The formula text, normally already passed through
///   [`trim_comment`](crate::interpreter::comment::trim_comment).
///
/// # Returns
/// Tokens in source order with 1-based line and column.
///
/// # Example
/// ```
/// use formulang::{
///     ast::Position,
///     interpreter::lexer::{Token, tokenize},
/// };
///
/// let tokens = tokenize("x:=1;\ny:x<>2;");
/// assert_eq!(tokens[1], (Token::ColonEqual, Position::new(1, 2)));
/// assert_eq!(tokens[5], (Token::Colon, Position::new(2, 2)));
/// assert_eq!(tokens[7], (Token::NotEqual, Position::new(2, 4)));
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<(Token, Position)> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());
    let mut cursor = 0;
    let mut column = 1;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        // Multi-line string literals have already advanced the counter.
        let line = lexer.extras.line - slice.matches('\n').count();
        column = advance_column(column, &source[cursor..span.start]);

        let token = result.unwrap_or_else(|()| Token::Error(slice.to_string()));
        tokens.push((token, Position::new(line, column)));

        column = advance_column(column, slice);
        cursor = span.end;
    }

    tokens
}

/// The column reached after reading `text` from `column`.
fn advance_column(column: usize, text: &str) -> usize {
    match text.rfind('\n') {
        Some(i) => text[i + 1..].chars().count() + 1,
        None => column + text.chars().count(),
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(s) | Self::Identifier(s) | Self::Error(s) => f.write_str(s),
            Self::Str(s) => write!(f, "'{s}'"),
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
            Self::Not => f.write_str("NOT"),
            Self::ColonEqual => f.write_str(":="),
            Self::Colon => f.write_str(":"),
            Self::Equal => f.write_str("=="),
            Self::NotEqual => f.write_str("!="),
            Self::GreaterEqual => f.write_str(">="),
            Self::LessEqual => f.write_str("<="),
            Self::Greater => f.write_str(">"),
            Self::Less => f.write_str("<"),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Semicolon => f.write_str(";"),
            Self::Comma => f.write_str(","),
            Self::NewLine => f.write_str("\\n"),
        }
    }
}
