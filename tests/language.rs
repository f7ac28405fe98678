use std::fs;

use formulang::{
    error::{Error, FunctionError},
    interpreter::value::{core::Value, native::Arity},
    session::Session,
};
use walkdir::WalkDir;

/// A session with five bars of OHLCV data, their one-letter aliases, and
/// an `ASSERT` function that fails unless its argument holds at every bar.
fn session() -> Session {
    let mut session = Session::new();
    session.register_variable("OPEN", vec![10.0, 11.0, 12.0, 11.0, 13.0]);
    session.register_variable("HIGH", vec![11.0, 13.0, 13.0, 12.0, 15.0]);
    session.register_variable("LOW", vec![9.0, 10.0, 11.0, 10.0, 12.0]);
    session.register_variable("CLOSE", vec![10.5, 12.5, 11.5, 11.8, 14.5]);
    session.register_variable("VOLUME", vec![100.0, 200.0, 150.0, 120.0, 300.0]);
    session.apply_aliases(None);
    session.register_function("ASSERT", Arity::Exact(1), |args| {
        let holds = match args[0].as_series() {
            Some(series) => series.iter().all(|x| *x != 0.0 && !x.is_nan()),
            None => args[0].to_bool(),
        };
        if holds {
            Ok(Value::Bool(true))
        } else {
            Err(FunctionError::InvalidArgument { index:   0,
                                                 details: format!("assertion failed: {}",
                                                                  args[0]), })
        }
    });
    session
}

fn run(src: &str) -> Result<Value, Error> {
    session().execute(src)
}

fn assert_success(src: &str) {
    if let Err(e) = run(src) {
        panic!("Script failed: {e}\n{src}");
    }
}

fn assert_failure(src: &str) {
    if run(src).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{src}")
    }
}

#[test]
fn script_files_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "fml"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run(&content) {
            panic!("Script {path:?} failed:\n{content}\nError: {e}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success("x:=1+2;ASSERT(x==3);");
    assert_success("x:=7*9;ASSERT(x==63);");
    assert_success("x:=8-5;ASSERT(x==3);");
    assert_success("x:=10/4;ASSERT(x==2.5);");
    assert_success("x:=1+2*3;ASSERT(x==7);ASSERT((1+2)*3==9);");
}

#[test]
fn unary_operators() {
    assert_success("x:=-3;ASSERT(x<0);ASSERT(-x==3);");
    assert_success("ASSERT(-2*3==-6);");
    assert_success("ASSERT(NOT 0);ASSERT(not (1>2));");
    assert_success("ASSERT(NOT (C<L));");
}

#[test]
fn logical_and_comparisons() {
    assert_success("ASSERT(2<3);");
    assert_success("ASSERT(3>2);");
    assert_success("ASSERT(2<=2);");
    assert_success("ASSERT(3>=3);");
    assert_success("ASSERT(2<>3);");
    assert_success("ASSERT(2!=3);");
    assert_success("ASSERT(2=2);");
    assert_success("ASSERT(2==2);");
    assert_success("ASSERT(1 AND 2 OR 0);");
    assert_success("ASSERT(0 or 1);");
    assert_success("ASSERT('abc'=='abc');");
    assert_success("ASSERT(100.004==100);");
}

#[test]
fn series_broadcasting() {
    assert_success("ASSERT(H>=L);");
    assert_success("ASSERT(H-L>0);");
    assert_success("ASSERT(2*C==C+C);");
    assert_success("ASSERT(C>=L AND C<=H);");
    assert_success("ASSERT(0<V);");
}

#[test]
fn comments_are_ignored() {
    assert_success("{ a comment } x:=1; {another {nested} one}\nASSERT(x==1);");
}

#[test]
fn output_variables_are_recorded() {
    let mut session = session();
    session.execute("MID:(H+L)/2,COLORRED,LINETHICK2;\nUP:=C>O;\nSPREAD:H-L;")
           .unwrap();

    assert_eq!(session.output_variables_in_order(), ["MID", "SPREAD"]);
    assert_eq!(session.suffix_params("MID"),
               Some(&["COLORRED".to_string(), "LINETHICK2".to_string()][..]));
    assert!(!session.is_output_variable("UP"));
    assert_eq!(session.float_series("SPREAD"), Some(vec![2.0, 3.0, 2.0, 2.0, 3.0]));
}

#[test]
fn missing_semicolon_is_error() {
    assert_failure("x:=1");
    assert_failure("x:=1\ny:=2;");
}

#[test]
fn malformed_syntax_is_error() {
    assert_failure("x:=1.2.3;");
    assert_failure("x:=(1+2;");
    assert_failure("x:=MA(C,2;");
    assert_failure("x:=1+;");
    assert_failure("x:1,2;");
    assert_failure("x:=1 # 2;");
}

#[test]
fn unknown_variable_is_error() {
    assert_failure("ASSERT(FOO==1);");
}

#[test]
fn unknown_function_is_error() {
    assert_failure("x:=FOO(1);");
}

#[test]
fn calling_a_variable_is_error() {
    assert_failure("x:=C(1);");
}

#[test]
fn wrong_function_arity_is_error() {
    assert_failure("x:=MA(C);");
    assert_failure("x:=ABS(1,2);");
}

#[test]
fn invalid_function_argument_is_error() {
    assert_failure("x:=MA(C,0);");
    assert_failure("x:=REF(C,1.5);");
    assert_failure("x:=SUM(5,2);");
    assert_failure("x:=CROSS(1,2);");
}

#[test]
fn failed_assertion_is_error() {
    assert_failure("ASSERT(0);");
    assert_failure("ASSERT(C>12);");
}
