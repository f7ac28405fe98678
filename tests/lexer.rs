use formulang::{
    ast::Position,
    interpreter::{
        comment::trim_comment,
        lexer::{Token, tokenize},
    },
};

fn kinds(src: &str) -> Vec<Token> {
    tokenize(src).into_iter().map(|(token, _)| token).collect()
}

fn ident(name: &str) -> Token {
    Token::Identifier(name.to_string())
}

#[test]
fn assignment_statement_tokens() {
    assert_eq!(kinds("MA5:MA(CLOSE,5),COLORRED;"),
               vec![ident("MA5"),
                    Token::Colon,
                    ident("MA"),
                    Token::LParen,
                    ident("CLOSE"),
                    Token::Comma,
                    Token::Number("5".to_string()),
                    Token::RParen,
                    Token::Comma,
                    ident("COLORRED"),
                    Token::Semicolon]);
}

#[test]
fn operator_spellings() {
    assert_eq!(kinds("= == != <> >= <= > < + - * / :="),
               vec![Token::Equal,
                    Token::Equal,
                    Token::NotEqual,
                    Token::NotEqual,
                    Token::GreaterEqual,
                    Token::LessEqual,
                    Token::Greater,
                    Token::Less,
                    Token::Plus,
                    Token::Minus,
                    Token::Star,
                    Token::Slash,
                    Token::ColonEqual]);
}

#[test]
fn keywords_and_lookalike_identifiers() {
    assert_eq!(kinds("AND OR or NOT not ANDX ORDER"),
               vec![Token::And,
                    Token::Or,
                    Token::Or,
                    Token::Not,
                    Token::Not,
                    ident("ANDX"),
                    ident("ORDER")]);
}

#[test]
fn unicode_and_dollar_identifiers() {
    assert_eq!(kinds("abc你好456 $sys a$b _x"),
               vec![ident("abc你好456"), ident("$sys"), ident("a$b"), ident("_x")]);
}

#[test]
fn numbers_are_kept_verbatim() {
    assert_eq!(kinds("20 0.618 1.2.3"),
               vec![Token::Number("20".to_string()),
                    Token::Number("0.618".to_string()),
                    Token::Number("1.2.3".to_string())]);
}

#[test]
fn string_literals() {
    assert_eq!(kinds("'hello world'"), vec![Token::Str("hello world".to_string())]);
    assert_eq!(kinds("'open"), vec![Token::Str("open".to_string())]);
}

#[test]
fn unknown_characters_become_error_tokens() {
    assert_eq!(kinds("1 # 2"),
               vec![Token::Number("1".to_string()),
                    Token::Error("#".to_string()),
                    Token::Number("2".to_string())]);
}

#[test]
fn positions_track_lines_and_columns() {
    let tokens = tokenize("a:=1;\n  bb : 2;");
    assert_eq!(tokens[0].1, Position::new(1, 1));
    assert_eq!(tokens[3].1, Position::new(1, 5));
    assert_eq!(tokens[4], (ident("bb"), Position::new(2, 3)));
    assert_eq!(tokens[5], (Token::Colon, Position::new(2, 6)));
}

#[test]
fn multiline_string_advances_line() {
    let tokens = tokenize("'a\nb' x");
    assert_eq!(tokens[0].1, Position::new(1, 1));
    assert_eq!(tokens[1], (ident("x"), Position::new(2, 4)));
}

#[test]
fn columns_on_a_long_line() {
    let source = "x+".repeat(20_000) + "x";
    let tokens = tokenize(&source);
    assert_eq!(tokens.len(), 40_001);
    assert_eq!(tokens[39_999], (Token::Plus, Position::new(1, 40_000)));
    assert_eq!(tokens[40_000], (ident("x"), Position::new(1, 40_001)));
}

#[test]
fn columns_count_characters_not_bytes() {
    let tokens = tokenize("价格 := 'é\nü' + y");
    assert_eq!(tokens[1], (Token::ColonEqual, Position::new(1, 4)));
    assert_eq!(tokens[2].1, Position::new(1, 7));
    assert_eq!(tokens[3], (Token::Plus, Position::new(2, 4)));
    assert_eq!(tokens[4], (ident("y"), Position::new(2, 6)));
}

#[test]
fn empty_input_has_no_tokens() {
    assert!(tokenize("").is_empty());
    assert!(tokenize(" \t\r\n\n").is_empty());
}

#[test]
fn trim_comment_removes_nested_regions() {
    assert_eq!(trim_comment("a{b{c}d}e"), "ae");
    assert_eq!(trim_comment("x:=1;{note}\ny:=2;"), "x:=1;\ny:=2;");
}

#[test]
fn trim_comment_leaves_plain_text_unchanged() {
    let src = "MA5:MA(C,5);\nMA10:MA(C,10);";
    assert_eq!(trim_comment(src), src);
}

#[test]
fn trim_comment_unbalanced_open_swallows_rest() {
    assert_eq!(trim_comment("x:=1;{never closed;y:=2;"), "x:=1;");
}

#[test]
fn trim_comment_stray_close_is_dropped() {
    assert_eq!(trim_comment("x}:=1;"), "x:=1;");
}

#[test]
fn trim_comment_is_idempotent() {
    for src in ["", "a{b}c", "{x{y}z}w;", "no comments", "a{b}{c}d{{e}}f"] {
        let once = trim_comment(src);
        assert_eq!(trim_comment(&once), once, "not idempotent for {src:?}");
    }
}
