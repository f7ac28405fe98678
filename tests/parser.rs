use formulang::{
    ast::{BinaryOperator, Expr, Position, Statement},
    compile,
    error::ParseError,
};

fn first_statement(src: &str) -> Statement {
    let program = compile(src);
    assert!(program.is_valid(), "unexpected errors: {:?}", program.errors);
    program.statements.into_iter().next().expect("no statements")
}

fn single_error(src: &str) -> ParseError {
    let program = compile(src);
    assert_eq!(program.errors.len(), 1, "errors: {:?}", program.errors);
    program.errors.into_iter().next().expect("no error")
}

#[test]
fn valid_programs_have_one_statement_per_semicolon() {
    let program = compile("a:=1;\nb:a+1,COLORRED;\nc:MA(C,5);\nC>O;");
    assert!(program.errors.is_empty());
    assert_eq!(program.statements.len(), 4);
}

#[test]
fn empty_statements_are_skipped() {
    let program = compile(";;a:=1;;;b:=2;");
    assert!(program.is_valid());
    assert_eq!(program.statements.len(), 2);
    assert!(compile("").statements.is_empty());
    assert!(compile(";;").is_valid());
}

#[test]
fn output_assignment_with_modifiers() {
    let Statement::Assignment { name,
                                is_output,
                                suffix_params,
                                position,
                                .. } = first_statement("a:HIGH>CLOSE,COLORRED,NODRAW;")
    else {
        panic!("expected an assignment");
    };
    assert_eq!(name, "a");
    assert!(is_output);
    assert_eq!(suffix_params, ["COLORRED", "NODRAW"]);
    assert_eq!(position, Position::new(1, 1));
}

#[test]
fn ordinary_assignment() {
    let Statement::Assignment { is_output,
                                suffix_params,
                                value,
                                .. } = first_statement("x:=1+2*3;")
    else {
        panic!("expected an assignment");
    };
    assert!(!is_output);
    assert!(suffix_params.is_empty());
    assert_eq!(value.to_string(), "(1 + (2 * 3))");
}

#[test]
fn identifier_without_colon_is_an_expression() {
    let statement = first_statement("CLOSE;");
    assert!(matches!(statement, Statement::Expression { expr: Expr::Identifier { .. }, .. }));
}

#[test]
fn precedence_and_associativity() {
    let cases = [("1+2*3;", "(1 + (2 * 3))"),
                 ("(1+2)*3;", "((1 + 2) * 3)"),
                 ("10-4-3;", "((10 - 4) - 3)"),
                 ("8/2/2;", "((8 / 2) / 2)"),
                 ("a>b AND c<d OR e;", "(((a > b) AND (c < d)) OR e)"),
                 ("a OR b AND c;", "(a OR (b AND c))"),
                 ("a+1>=b*2;", "((a + 1) >= (b * 2))"),
                 ("a=b;", "(a == b)"),
                 ("a<>b;", "(a != b)"),
                 ("-a*b;", "((-a) * b)"),
                 ("NOT a AND b;", "((NOT a) AND b)"),
                 ("--a;", "(-(-a))")];

    for (src, expected) in cases {
        assert_eq!(first_statement(src).to_string(), expected, "source: {src}");
    }
}

#[test]
fn function_calls() {
    assert_eq!(first_statement("MA(C,5);").to_string(), "MA(C, 5)");
    assert_eq!(first_statement("NOW();").to_string(), "NOW()");
    assert_eq!(first_statement("MAX(MA(C,5),REF(C,1))*2;").to_string(),
               "(MAX(MA(C, 5), REF(C, 1)) * 2)");
}

#[test]
fn call_node_shape() {
    let Statement::Expression { expr: Expr::FunctionCall { function, arguments, .. },
                                .. } = first_statement("CROSS(C,O);")
    else {
        panic!("expected a call");
    };
    assert!(matches!(*function, Expr::Identifier { ref name, .. } if name == "CROSS"));
    assert_eq!(arguments.len(), 2);
}

#[test]
fn binary_node_records_operator_position() {
    let Statement::Expression { expr: Expr::Binary { op, position, .. },
                                .. } = first_statement("H > L;")
    else {
        panic!("expected a binary expression");
    };
    assert_eq!(op, BinaryOperator::Greater);
    assert_eq!(position, Position::new(1, 3));
}

#[test]
fn string_literals_in_expressions() {
    assert_eq!(first_statement("name:='abc';").to_string(), "name := 'abc';");
}

#[test]
fn assignment_round_trip() {
    for src in ["a : (HIGH > CLOSE),COLORRED,NODRAW;",
                "b := (HIGH + CLOSE);",
                "c : MA(C, 5);",
                "d := REF(C, 1),DOTLINE;"]
    {
        assert_eq!(first_statement(src).to_string(), src);
    }
}

#[test]
fn program_display_concatenates_statements() {
    assert_eq!(compile("a:=1; b:a*2,NODRAW;").to_string(), "a := 1;b : (a * 2),NODRAW;");
}

#[test]
fn missing_semicolon_between_statements() {
    let program = compile("test1:HIGH>CLOSE\ntest2:HIGH<CLOSE;");
    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.errors.len(), 1);

    let error = &program.errors[0];
    assert_eq!(error.position().line, 1);
    assert_eq!(error.to_string(),
               "line 1 col 12: statement must end with semicolon, got token: CLOSE");
}

#[test]
fn missing_semicolon_at_end_of_input() {
    let program = compile("a:=1;\nb:=2");
    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.errors,
               [ParseError::MissingSemicolon { token:    "2".to_string(),
                                               position: Position::new(2, 4), }]);
}

#[test]
fn parsing_stops_at_first_error() {
    let program = compile("a:=1;\nb:=;\nc:=2;\nd:=;");
    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.errors.len(), 1);
    assert_eq!(program.errors[0].position(), Position::new(2, 4));
}

#[test]
fn unexpected_token() {
    assert_eq!(single_error("x:=*2;"),
               ParseError::UnexpectedToken { token:    "*".to_string(),
                                             position: Position::new(1, 4), });
    assert!(matches!(single_error("x:=1 # 2;"), ParseError::MissingSemicolon { .. }));
    assert!(matches!(single_error("#;"), ParseError::UnexpectedToken { .. }));
}

#[test]
fn unexpected_end_of_input() {
    assert!(matches!(single_error("x:=1+"), ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(single_error("x:="), ParseError::UnexpectedEndOfInput { .. }));
}

#[test]
fn malformed_number() {
    assert_eq!(single_error("x:=1.2.3;"),
               ParseError::MalformedNumber { literal:  "1.2.3".to_string(),
                                             position: Position::new(1, 4), });
}

#[test]
fn unclosed_groups_and_calls() {
    assert!(matches!(single_error("x:=(1+2;"), ParseError::ExpectedClosingParen { .. }));
    assert!(matches!(single_error("x:=MA(C,5;"), ParseError::ExpectedClosingParen { .. }));
    assert!(matches!(single_error("x:=MA(C,5"), ParseError::UnexpectedEndOfInput { .. }));
}

#[test]
fn bad_modifier() {
    assert_eq!(single_error("x:C,1;"),
               ParseError::ExpectedModifier { token:    "1".to_string(),
                                              position: Position::new(1, 5), });
    assert!(matches!(single_error("x:C,"), ParseError::ExpectedModifier { .. }));
}

#[test]
fn comments_do_not_reach_the_parser() {
    let program = compile("{header}\na:=1; {inline} b:=a;{trailer}");
    assert!(program.is_valid());
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn deeply_nested_groups_are_rejected() {
    let depth = 1000;
    let src = format!("x:={}1{};", "(".repeat(depth), ")".repeat(depth));
    assert!(matches!(single_error(&src), ParseError::NestingTooDeep { .. }));
}

#[test]
fn long_prefix_operator_runs_are_rejected() {
    assert!(matches!(single_error(&format!("x:={}1;", "-".repeat(50_000))),
                     ParseError::NestingTooDeep { .. }));
    assert!(matches!(single_error(&format!("x:={}1;", "NOT ".repeat(50_000))),
                     ParseError::NestingTooDeep { .. }));
}

#[test]
fn deeply_nested_calls_are_rejected() {
    let depth = 1000;
    let src = format!("x:={}C{};", "ABS(".repeat(depth), ")".repeat(depth));
    assert!(matches!(single_error(&src), ParseError::NestingTooDeep { .. }));
}

#[test]
fn overlong_operator_chains_are_rejected() {
    let src = format!("x:=1{};", "+1".repeat(10_000));
    assert!(matches!(single_error(&src), ParseError::NestingTooDeep { .. }));
}

#[test]
fn statements_before_a_too_deep_one_are_kept() {
    let src = format!("a:=1;\nb:={}1;", "-".repeat(1000));
    let program = compile(&src);
    assert_eq!(program.statements.len(), 1);
    assert!(matches!(program.errors[..], [ParseError::NestingTooDeep { position }]
                                         if position.line == 2));
}

#[test]
fn moderate_nesting_is_accepted() {
    let src = format!("x:={}1{}+{}2;", "(".repeat(100), ")".repeat(100), "-".repeat(100));
    assert_eq!(first_statement(&src).to_string().matches('-').count(), 100);
    assert!(compile(&format!("x:=1{};", "+1".repeat(200))).is_valid());
}
