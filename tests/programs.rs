use std::io;
use std::path::Path;

use assert_matches::assert_matches;
use interpol::lexer::{Lexer, TokenKind};
use interpol::source;
use interpol::{Error, ErrorKind, Interpreter, Value, VarType};

struct Run {
    result: interpol::Result<()>,
    output: String,
    variables: Vec<(String, VarType, Value)>,
}

fn run_with_input(source: &str, input: &str) -> Run {
    let mut output = Vec::new();
    let (result, variables) = match Interpreter::new(source, input.as_bytes(), &mut output) {
        Ok(mut interpreter) => {
            let result = interpreter.process();
            let variables = interpreter
                .variables()
                .iter()
                .map(|v| (v.name.clone(), v.var_type, v.value.clone()))
                .collect();
            (result, variables)
        }
        Err(err) => (Err(err), Vec::new()),
    };
    Run {
        result,
        output: String::from_utf8(output).unwrap(),
        variables,
    }
}

fn run(source: &str) -> Run {
    run_with_input(source, "")
}

fn demo(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name);
    source::load(&path).unwrap_or_else(|e| panic!("can't load {:?}: {}", path, e))
}

#[test]
fn arithmetic_demo() {
    let run = run(&demo("arithmetic.ipol"));
    run.result.unwrap();
    assert_eq!(
        run.output,
        "ADD: 9\nSUB: 5\nMUL: 14\nDIV: 3\nMOD: 1\nRAISE: 49\nROOT: 7\nMEAN: 4\nDIST: 5\n"
    );
}

#[test]
fn strings_demo() {
    let run = run(&demo("strings.ipol"));
    run.result.unwrap();
    assert_eq!(run.output, "Hello, World!\n");
}

#[test]
fn nested_demo() {
    let run = run(&demo("nested.ipol"));
    run.result.unwrap();
    assert_eq!(run.output, "12\n4\n");
}

#[test]
fn store_changes_value_but_not_type() {
    let run = run("BEGIN\nVARINT n WITH 1\nVARSTR s\nSTORE 9 IN n\nSTORE \"x\" IN s\nEND\n");
    run.result.unwrap();
    assert_eq!(
        run.variables,
        vec![
            ("n".to_string(), VarType::Number, Value::Number(9)),
            ("s".to_string(), VarType::Str, Value::Text("x".into())),
        ]
    );
}

#[test]
fn duplicate_declaration_in_any_type_combination() {
    for (first, second) in &[
        ("VARINT a", "VARINT a"),
        ("VARINT a", "VARSTR a"),
        ("VARSTR a", "VARINT a WITH 1"),
        ("VARSTR a", "VARSTR a WITH \"b\""),
    ] {
        let source = format!("BEGIN\n{}\nPRINT 1\n{}\nEND\n", first, second);
        assert_matches!(
            run(&source).result,
            Err(Error::Source { kind: ErrorKind::DuplicateVariable, line: 4, .. })
        );
    }
}

#[test]
fn varstr_from_well_formed_expression_fails() {
    assert_matches!(
        run("BEGIN\nVARSTR s WITH MEAN 1 2 3\nEND\n").result,
        Err(Error::Source { kind: ErrorKind::InvalidDataType, line: 2, .. })
    );
}

#[test]
fn undeclared_variable_names_its_line() {
    let run = run("BEGIN\nVARINT a\n\n# comment\nPRINTLN a\nPRINT MUL a b\nEND\n");
    assert_eq!(run.output, "0\n");
    let err = run.result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Variable is not declared at line number [ 6 ]\n ----> PRINT MUL a b "
    );
}

#[test]
fn envelope_errors_are_distinct() {
    assert_matches!(
        run("VARINT a\nEND\n").result,
        Err(Error::Source { kind: ErrorKind::InvalidSyntax, .. })
    );
    assert_matches!(
        run("BEGIN\nVARINT a\n").result,
        Err(Error::Source { kind: ErrorKind::InvalidEndOfFile, .. })
    );
    assert_matches!(
        run("BEGIN\nVARINT a\nBEGIN\nEND\n").result,
        Err(Error::Source { kind: ErrorKind::InvalidSyntax, line: 3, .. })
    );
}

#[test]
fn input_feeds_expressions() {
    let source = "BEGIN\nVARINT x\nVARINT y\nINPUT x\nINPUT y\nPRINT RAISE x y\nEND\n";
    let run = run_with_input(source, "3\n4\n");
    run.result.unwrap();
    assert_eq!(run.output, "81");
    assert_eq!(run.variables[0].2, Value::Text("3".into()));
}

#[test]
fn lexical_error_reports_line_text() {
    let err = run("BEGIN\nPRINT 1\nVARINT x WITH 5$\nEND\n").result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid data type at line number [ 3 ]\n ----> VARINT x WITH 5$"
    );
}

#[test]
fn consumed_tokens_reproduce_statement() {
    let line = "STORE ADD 1 2 IN total";
    let source = format!("BEGIN\nVARINT total\n{}   # trailing comment\nEND\n", line);
    let mut output = Vec::new();
    let mut interpreter = Interpreter::new(&source, io::empty(), &mut output).unwrap();
    interpreter.process().unwrap();

    let rendered: Vec<String> = interpreter
        .tokens()
        .lookup(3)
        .map(|t| t.source_text())
        .collect();
    assert_eq!(rendered.join(" "), line);
}

#[test]
fn string_tokens_are_requoted() {
    let mut lexer = Lexer::new("PRINTLN \"a b\"");
    let mut rendered = Vec::new();
    loop {
        let token = lexer.next_token().unwrap();
        if token.kind == TokenKind::EndOfFile {
            break;
        }
        rendered.push(token.source_text());
    }
    assert_eq!(rendered.join(" "), "PRINTLN \"a b\"");
}

#[test]
fn token_table_lists_every_token() {
    let mut output = Vec::new();
    let mut interpreter = Interpreter::new("BEGIN\nEND", io::empty(), &mut output).unwrap();
    interpreter.process().unwrap();

    let table = interpreter.tokens().to_string();
    let rows: Vec<&str> = table.lines().collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[1], format!("{:<10} {:<30} {}", 1, "PROGRAM_BEGIN", "BEGIN"));
    assert_eq!(rows[2], format!("{:<10} {:<30} {}", 1, "END_OF_STATEMENT", "EOS"));
    assert_eq!(rows[4], format!("{:<10} {:<30} {}", 3, "END_OF_FILE", "EOF"));
}
