use std::fs::{self};

use textcalc::{
    error::{CalcError, ParseError, RuntimeError},
    interpreter::evaluator::outcome::Outcome,
    run_block,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_calc_blocks(&content).into_iter().enumerate() {
            count += 1;
            match run_block(&code) {
                Ok(outcomes) => {
                    if let Some(failed) = outcomes.iter().find(|o| o.is_failure()) {
                        panic!("Example {} in {:?} failed:\n{}\n{failed}", i + 1, path, code);
                    }
                },
                Err(e) => panic!("Example {} in {:?} failed:\n{}\nError: {:?}", i + 1, path, code, e),
            }
        }
    }

    assert!(count > 0, "No textcalc examples found in book/src");
}

fn extract_calc_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```textcalc") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn render(src: &str) -> Vec<String> {
    match run_block(src) {
        Ok(outcomes) => outcomes.iter().map(ToString::to_string).collect(),
        Err(e) => panic!("Block failed: {e}"),
    }
}

fn assert_output(src: &str, expected: &[&str]) {
    assert_eq!(render(src), expected, "unexpected output for:\n{src}");
}

fn assert_success(src: &str) {
    match run_block(src) {
        Ok(outcomes) => {
            if let Some(failed) = outcomes.iter().find(|o| o.is_failure()) {
                panic!("Line failed: {failed}");
            }
        },
        Err(e) => panic!("Block failed: {e}"),
    }
}

/// The error of the first failing line, or the block's own error.
fn first_error(src: &str) -> CalcError {
    match run_block(src) {
        Ok(outcomes) => outcomes.into_iter()
                                .find_map(|o| match o {
                                    Outcome::Failed { error, .. } => Some(error),
                                    _ => None,
                                })
                                .unwrap_or_else(|| panic!("Block succeeded but was expected to fail")),
        Err(e) => e,
    }
}

fn assert_failure(src: &str) {
    let _ = first_error(src);
}

#[test]
fn assignment_and_conversion_block() {
    assert_output("A = 2\nB = A+3\nB =>_2", &["A = 2", "B = 5", "Result in base 2: 101"]);
}

#[test]
fn basic_arithmetic() {
    assert_output("1 + 2 =", &["Result: 3"]);
    assert_output("7 * 9 =", &["Result: 63"]);
    assert_output("10 / 4 =", &["Result: 2.5"]);
    assert_output("(1 + 2) * 3 =", &["Result: 9"]);
    assert_output("1 + 2 * 3 =", &["Result: 7"]);
}

#[test]
fn subtraction_and_unary_minus() {
    assert_output("3-4=", &["Result: -1"]);
    assert_output("3*-2=", &["Result: -6"]);
    assert_output("-(2+3)=", &["Result: -5"]);
    assert_output("A = 5\n-A =", &["A = 5", "Result: -5"]);
    assert_output("A = 5\n-A^2 =", &["A = 5", "Result: -25"]);
}

#[test]
fn negated_variable_after_division_or_power_is_one_operand() {
    assert_output("A = 5\n2/-A =", &["A = 5", "Result: -0.4"]);
    assert_output("2/-5 =", &["Result: -0.4"]);
    assert_output("A = 5\n2^-A =", &["A = 5", "Result: 0.03125"]);
    assert_output("A = 5\n3*-A^2 =", &["A = 5", "Result: -75"]);
    assert_output("A = -5\n2/-A =", &["A = -5", "Result: 0.4"]);
}

#[test]
fn negative_variables_keep_their_sign() {
    assert_output("A = -5\nA^2 =\nA - A =", &["A = -5", "Result: 25", "Result: 0"]);
}

#[test]
fn exponent_is_right_associative() {
    assert_output("2^3^2=", &["Result: 512"]);
}

#[test]
fn longer_names_are_not_corrupted() {
    assert_output("A = 1\nAB = 2\nAB+A=", &["A = 1", "AB = 2", "Result: 3"]);
}

#[test]
fn names_are_case_sensitive() {
    assert_output("a = 1\nA = 2\na + A =", &["a = 1", "A = 2", "Result: 3"]);
}

#[test]
fn trailing_semicolon_is_ignored() {
    assert_output("A = 3+4;\nA =;", &["A = 7", "Result: 7"]);
}

#[test]
fn forward_references_resolve_at_end_of_block() {
    assert_output("C = A + B\nA = 1\nB = A * 2", &["A = 1", "B = 2", "C = 3"]);
    assert_output("D = C + 1\nC = B + 1\nB = A + 1\nA = 1",
                  &["A = 1", "B = 2", "C = 3", "D = 4"]);
}

#[test]
fn literal_shaped_names_can_be_forward_referenced() {
    assert_output("X = C_2 + 1\nC_2 = 2", &["C_2 = 2", "X = 3"]);
    assert_output("C_2 = 2\nX = C_2 + 1", &["C_2 = 2", "X = 3"]);
    assert!(matches!(first_error("F_8 ="),
                     CalcError::Runtime(RuntimeError::UndefinedVariable { .. })));
}

#[test]
fn names_that_read_as_literals_cannot_be_bound() {
    assert!(matches!(first_error("FACE_16 = 2"),
                     CalcError::Parse(ParseError::InvalidVariableName { .. })));
    assert!(matches!(first_error("? A_16"),
                     CalcError::Parse(ParseError::InvalidVariableName { .. })));
    assert_output("X = FACE_16 + 1", &["X = 64207"]);
}

#[test]
fn numbers_may_start_with_a_point() {
    assert_output(".5 + .25 =", &["Result: 0.75"]);
    assert_output("A = .5e1\nA * 2 =", &["A = 5", "Result: 10"]);
}

#[test]
fn query_of_pending_variable_prints_nothing() {
    assert_output("B = A + 1\n? B\nA = 1", &["A = 1", "B = 2"]);
}

#[test]
fn query_of_unknown_variable_reports_it() {
    assert_output("? Z", &["Variable 'Z' is not defined"]);
}

#[test]
fn query_notes_a_terminating_base() {
    assert_output("A = 1/3\n? A",
                  &["A = 0.333333", "A = 0.333333", "In base 3 the value terminates: 0.1"]);
}

#[test]
fn bare_expression_notes_a_terminating_base() {
    assert_output("1/6 =", &["Result: 0.166667", "In base 6 the value terminates: 0.1"]);
    assert_output("1/17 =", &["Result: 0.058824"]);
}

#[test]
fn based_literals() {
    assert_output("1A_16 =", &["Result: 26"]);
    assert_output("ff_16 =", &["Result: 255"]);
    assert_output("1011_2 + 1 =", &["Result: 12"]);
    assert_output("0.1_2 =", &["Result: 0.5"]);
}

#[test]
fn repeating_decimals() {
    assert_output("0.(3) * 3 =", &["Result: 1"]);
    assert_output("1.2(45) =", &["Result: 1.245455"]);
}

#[test]
fn conversions() {
    assert_output("255 => _16", &["Result in base 16: FF"]);
    assert_output("0.5 => _2", &["Result in base 2: 0.1"]);
    assert_output("-26.5 => _16", &["Result in base 16: -1A.8"]);
    assert_output("0 => _2", &["Result in base 2: 0"]);
}

#[test]
fn division_by_zero_is_infinite() {
    assert_output("1/0 =", &["Result: inf"]);
    assert_failure("1/0 => _2");
}

#[test]
fn failed_lines_do_not_stop_the_block() {
    let rendered = render("A = 1\nB = 3 % 2\nC = A + 1");
    assert_eq!(rendered.len(), 3);
    assert_eq!(rendered[0], "A = 1");
    assert!(rendered[1].starts_with("Error in 'B = 3 % 2'"));
    assert_eq!(rendered[2], "C = 2");
}

#[test]
fn invalid_characters_are_rejected() {
    assert!(matches!(first_error("A = 3 % 2"),
                     CalcError::Parse(ParseError::InvalidCharacter { character: '%', .. })));
    assert_failure("A = 2 ~ 1");
}

#[test]
fn leading_zeros_are_rejected() {
    assert!(matches!(first_error("01 ="), CalcError::Parse(ParseError::LeadingZero { .. })));
    assert!(matches!(first_error("01_16 ="), CalcError::Parse(ParseError::LeadingZero { .. })));
    assert_success("A = 0.5 + 10 + 0.(03)");
}

#[test]
fn invalid_bases_are_rejected() {
    assert!(matches!(first_error("1_17 ="),
                     CalcError::Runtime(RuntimeError::InvalidBase { .. })));
    assert!(matches!(first_error("5 => _1"),
                     CalcError::Runtime(RuntimeError::InvalidBase { .. })));
    assert!(matches!(first_error("19_8 ="),
                     CalcError::Runtime(RuntimeError::InvalidDigitForBase { digit: '9', base: 8, .. })));
}

#[test]
fn syntax_errors_are_reported() {
    assert!(matches!(first_error("(1+2 ="),
                     CalcError::Parse(ParseError::MissingClosingParen { .. })));
    assert!(matches!(first_error("1+ ="), CalcError::Parse(ParseError::ExpectedNumber { .. })));
    assert!(matches!(first_error("1a = 2"),
                     CalcError::Parse(ParseError::InvalidVariableName { .. })));
    assert!(matches!(first_error("hello"),
                     CalcError::Parse(ParseError::UnknownInstruction { .. })));
}

#[test]
fn undefined_variable_in_bare_expression_is_error() {
    assert!(matches!(first_error("X + 1 ="),
                     CalcError::Runtime(RuntimeError::UndefinedVariable { .. })));
}

#[test]
fn cycles_leave_the_block_unresolved() {
    let error = first_error("A = B\nB = A");
    let CalcError::Runtime(runtime) = &error else {
        panic!("expected a runtime error, got {error:?}");
    };
    let mut names = runtime.unresolved_names();
    names.sort_unstable();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn self_reference_is_unresolved() {
    assert_failure("A = A + 1");
}

#[test]
fn blank_lines_are_skipped() {
    assert_output("A = 1\n\n   \nA + 1 =", &["A = 1", "Result: 2"]);
}
