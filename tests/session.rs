use std::collections::BTreeMap;

use formulang::{
    config::SessionConfig,
    error::{Error, ParseError},
    interpreter::{evaluator::core::MissingPolicy, value::core::Value},
    session::Session,
};

fn session() -> Session {
    let mut session = Session::new();
    session.register_variable("HIGH", vec![105.0, 106.0, 107.0]);
    session.register_variable("CLOSE", vec![100.0, 101.0, 102.0]);
    session
}

#[test]
fn execute_records_outputs() {
    let mut session = session();
    session.execute("a:HIGH>CLOSE,COLORRED;\nb:=HIGH+CLOSE;").unwrap();

    assert_eq!(session.output_variables().len(), 1);
    assert_eq!(session.output_variables().get("a"), Some(&1));
    assert_eq!(session.suffix_params("a"), Some(&["COLORRED".to_string()][..]));
    assert!(!session.is_output_variable("b"));
    assert_eq!(session.float_series("b"), Some(vec![205.0, 207.0, 209.0]));
    assert_eq!(session.all_suffix_params().len(), 1);
}

#[test]
fn execute_refuses_programs_with_syntax_errors() {
    let mut session = session();
    let error = session.execute("test1:HIGH>CLOSE\ntest2:HIGH<CLOSE;").unwrap_err();

    let Error::Compile(compile) = error else {
        panic!("expected a compile error");
    };
    assert_eq!(compile.errors.len(), 1);
    assert_eq!(compile.errors[0].position().line, 1);
    assert!(compile.to_string().starts_with("compile failed: line 1 col 12"));

    assert!(session.has_syntax_errors());
    assert_eq!(session.syntax_errors().len(), 1);
    assert!(session.variable("test1").is_none());

    session.execute("ok:=1;").unwrap();
    assert!(!session.has_syntax_errors());
}

#[test]
fn compile_checked_joins_errors() {
    let session = session();
    assert!(session.compile_checked("x:=1;").is_ok());

    let error = session.compile_checked("x:=1").unwrap_err();
    assert!(matches!(error.errors[..], [ParseError::MissingSemicolon { .. }]));
}

#[test]
fn execute_program_reuses_compiled_program() {
    let mut session = session();
    let program = session.compile("t:HIGH-CLOSE;");

    session.execute_program(&program).unwrap();
    session.register_variable("CLOSE", vec![104.0, 104.0, 104.0]);
    session.execute_program(&program).unwrap();

    assert_eq!(session.float_series("t"), Some(vec![1.0, 2.0, 3.0]));
    assert_eq!(session.output_variables().get("t"), Some(&2));
}

#[test]
fn runtime_errors_surface() {
    let mut session = session();
    let error = session.execute("x:=UNKNOWN*2;").unwrap_err();
    assert!(matches!(error, Error::Runtime(_)));
}

#[test]
fn register_function_and_variable() {
    let mut session = session();
    session.register_function("DOUBLE",
                              formulang::interpreter::value::native::Arity::Exact(1),
                              |args| {
                                  Ok(Value::Scalar(args[0].to_f64() * 2.0))
                              });
    session.set_variable("N", Value::Scalar(21.0));

    assert_eq!(session.execute("DOUBLE(N);").unwrap(), Value::Scalar(42.0));
    assert!(matches!(session.variable("DOUBLE"), Some(Value::Callable(_))));
}

#[test]
fn float_series_views() {
    let mut session = session();
    session.execute("up:=HIGH>106;n:=3;s:='x';").unwrap();

    assert_eq!(session.float_series("up"), Some(vec![0.0, 0.0, 1.0]));
    assert_eq!(session.float_series("n"), Some(vec![3.0]));
    assert_eq!(session.float_series("s"), None);
    assert_eq!(session.float_series("missing"), None);
}

#[test]
fn aliases_copy_bound_sources() {
    let mut session = session();
    session.apply_aliases(None);

    assert_eq!(session.float_series("H"), Some(vec![105.0, 106.0, 107.0]));
    assert_eq!(session.float_series("C"), Some(vec![100.0, 101.0, 102.0]));
    assert_eq!(session.variable("O"), None);

    let custom = BTreeMap::from([("CLOSE".to_string(), "PX".to_string())]);
    session.apply_aliases(Some(&custom));
    assert!(session.variable("PX").is_some());
}

#[test]
fn date_time_series_uses_first_present_key() {
    let mut session = session();
    assert_eq!(session.date_time_series(), None);

    session.register_variable("Date", vec![1.0, 2.0, 3.0]);
    session.register_variable("TS", vec![10.0, 20.0, 30.0]);
    assert_eq!(session.date_time_series(), Some(Value::from(vec![10.0, 20.0, 30.0])));
}

#[test]
fn custom_getter_feeds_formulas() {
    let mut session = session();
    session.set_custom_variable_getter(|name| (name == "PERIOD").then_some(Value::Scalar(2.0)));
    assert_eq!(session.execute("PERIOD*2;").unwrap(), Value::Scalar(4.0));

    session.clear_custom_variable_getter();
    assert!(session.execute("PERIOD*2;").is_err());
}

#[test]
fn reset_clears_state_but_keeps_functions() {
    let mut session = session();
    session.execute("a:MA(CLOSE,2),NODRAW;").unwrap();
    let _ = session.execute("broken");
    assert!(session.has_syntax_errors());

    session.reset();

    assert!(session.output_variables().is_empty());
    assert!(session.all_suffix_params().is_empty());
    assert!(!session.has_syntax_errors());
    assert_eq!(session.variable("CLOSE"), None);
    assert!(matches!(session.variable("MA"), Some(Value::Callable(_))));
}

#[test]
fn lenient_config_substitutes_nil() {
    let config = SessionConfig { missing: MissingPolicy::Lenient,
                                 ..SessionConfig::default() };
    let mut session = Session::from_config(&config);

    assert_eq!(session.execute("x:=NOTHERE;").unwrap(), Value::Nil);
}

#[test]
fn config_without_prelude() {
    let config = SessionConfig::from_toml_str("prelude = false").unwrap();
    let mut session = Session::from_config(&config);

    assert!(session.variable("MA").is_none());
    assert!(session.execute("MA(1,2);").is_err());
}

#[test]
fn config_from_toml() {
    let config: SessionConfig = r#"
        missing = "lenient"
        date_time_keys = ["stamp"]

        [aliases]
        CLOSE = "PX"
    "#.parse()
      .unwrap();

    assert_eq!(config.missing, MissingPolicy::Lenient);
    assert!(config.prelude);
    assert_eq!(config.date_time_keys, ["stamp"]);
    assert_eq!(config.aliases.len(), 1);

    let mut session = Session::from_config(&config);
    session.register_variable("CLOSE", vec![1.0]);
    session.register_variable("stamp", vec![7.0]);
    session.apply_aliases(None);
    assert!(session.variable("PX").is_some());
    assert_eq!(session.date_time_series(), Some(Value::from(vec![7.0])));
}

#[test]
fn config_defaults() {
    let config = SessionConfig::from_toml_str("").unwrap();
    assert_eq!(config, SessionConfig::default());
    assert_eq!(config.missing, MissingPolicy::Strict);
    assert_eq!(config.aliases.get("VOLUME").map(String::as_str), Some("V"));
    assert_eq!(config.date_time_keys[0], "dateTime");
}

#[test]
fn config_rejects_bad_input() {
    assert!(SessionConfig::from_toml_str("missing = \"sometimes\"").is_err());
    assert!(SessionConfig::from_toml_str("unknown_key = 1").is_err());
    assert!(SessionConfig::from_toml_str("prelude = ").is_err());
}

#[test]
fn program_tree_shows_grouping() {
    let tree = session().program_tree("ma5 : MA(CLOSE, 5),COLORRED;\nNOT x;");
    let lines = tree.lines().collect::<Vec<_>>();

    assert_eq!(lines,
               ["Program (2 statements)",
                "  Assignment ma5 (output) @ line 1 col 1",
                "    Suffix COLORRED",
                "    Call (2 arguments) @ line 1 col 9",
                "      Identifier MA @ line 1 col 7",
                "      Identifier CLOSE @ line 1 col 10",
                "      Number 5 @ line 1 col 17",
                "  Expression @ line 2 col 1",
                "    Unary NOT @ line 2 col 1",
                "      Identifier x @ line 2 col 5"]);
}

#[test]
fn program_tree_lists_syntax_errors() {
    let tree = session().program_tree("a := 1;\nb := (2;");

    assert!(tree.starts_with("Program (1 statement)\n  Assignment a (local) @ line 1 col 1\n"));
    assert_eq!(tree.lines().filter(|line| line.starts_with("  Error: line 2")).count(), 1);
}
