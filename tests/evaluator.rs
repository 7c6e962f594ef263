use textcalc::{
    error::{CalcError, ParseError, RuntimeError},
    interpreter::{
        evaluator::{
            core::{Evaluation, Evaluator, Settings},
            environment::Binding,
            outcome::Outcome,
        },
        instruction::{Instruction, classify},
    },
};

#[test]
fn pending_assignment_is_stored_silently() {
    let mut evaluator = Evaluator::new();
    assert_eq!(evaluator.process("A = B + 1").unwrap(), Vec::new());
    assert_eq!(evaluator.environment().get("A"),
               Some(&Binding::Pending("B + 1".to_string())));

    assert_eq!(evaluator.process("B = 1").unwrap(),
               vec![Outcome::Assigned { name:  "B".to_string(),
                                        value: 1.0, }]);
    assert_eq!(evaluator.resolve_pending(),
               vec![Outcome::Assigned { name:  "A".to_string(),
                                        value: 2.0, }]);
    assert_eq!(evaluator.environment().resolved("A"), Some(2.0));
}

#[test]
fn evaluation_states() {
    let evaluator = Evaluator::new();
    assert_eq!(evaluator.evaluate("2^3^2"), Evaluation::Resolved(512.0));
    assert_eq!(evaluator.evaluate("X + 1;"),
               Evaluation::Pending { missing: "X".to_string() });
    assert_eq!(evaluator.evaluate("(1+2"),
               Evaluation::Fatal(CalcError::Parse(ParseError::MissingClosingParen { column: 0 })));
    assert_eq!(evaluator.evaluate("1 +"),
               Evaluation::Fatal(CalcError::Parse(ParseError::ExpectedNumber { found: "end of input".to_string(), })));
    assert!(matches!(evaluator.evaluate("1 2"),
                     Evaluation::Fatal(CalcError::Parse(ParseError::UnexpectedToken { .. }))));
}

#[test]
fn evaluate_resolved_reports_missing_variables() {
    let evaluator = Evaluator::new();
    assert_eq!(evaluator.evaluate_resolved("X * 2").unwrap_err(),
               CalcError::Runtime(RuntimeError::UndefinedVariable { name: "X".to_string() }));
}

#[test]
fn reassignment_overwrites() {
    let mut evaluator = Evaluator::new();
    evaluator.process("A = 1").unwrap();
    evaluator.process("A = A + 1").unwrap();
    assert_eq!(evaluator.environment().resolved("A"), Some(2.0));
    assert_eq!(evaluator.environment().len(), 1);
}

#[test]
fn failed_line_leaves_environment_unchanged() {
    let mut evaluator = Evaluator::new();
    evaluator.process("A = 1").unwrap();
    assert!(evaluator.process("A = 19_8").is_err());
    assert_eq!(evaluator.environment().resolved("A"), Some(1.0));
}

#[test]
fn reset_forgets_variables() {
    let mut evaluator = Evaluator::new();
    evaluator.process("A = 1").unwrap();
    evaluator.process("B = C").unwrap();
    evaluator.reset();
    assert!(evaluator.environment().is_empty());
    assert!(evaluator.environment().pending().is_empty());
}

#[test]
fn pending_binding_with_hard_error_is_dropped() {
    let mut evaluator = Evaluator::new();
    evaluator.process("A = (B").unwrap();
    evaluator.process("B = 1").unwrap();
    let outcomes = evaluator.resolve_pending();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_failure());
    assert_eq!(evaluator.environment().get("A"), None);
}

#[test]
fn unresolved_block_lists_every_binding() {
    let mut evaluator = Evaluator::new();
    let error = evaluator.process_block(["A = B + 1", "B = A * 2", "C = 3"]).unwrap_err();
    assert_eq!(error,
               CalcError::Runtime(RuntimeError::UnresolvedBlock { bindings: vec![("A".to_string(),
                                                                                  "B + 1".to_string()),
                                                                                 ("B".to_string(),
                                                                                  "A * 2".to_string())], }));
    assert_eq!(error.to_string(), "Unresolved instructions: A = B + 1, B = A * 2.");
}

#[test]
fn settings_control_digits() {
    let settings = Settings { max_fraction_digits: 4,
                              ..Settings::default() };
    let mut evaluator = Evaluator::with_settings(settings);
    assert_eq!(evaluator.process("0.1 => _2").unwrap(),
               vec![Outcome::Converted { base:   2,
                                         digits: "0.0001".to_string(), }]);
    assert_eq!(evaluator.settings().max_fraction_digits, 4);
}

#[test]
fn outcome_precision_sets_fraction_digits() {
    let third = Outcome::Evaluated { value: 1.0 / 3.0 };
    assert_eq!(third.to_string(), "Result: 0.333333");
    assert_eq!(format!("{third:.2}"), "Result: 0.33");
    assert_eq!(format!("{third:.0}"), "Result: 0");
}

#[test]
fn classifies_every_instruction_kind() {
    assert_eq!(classify("A = 1").unwrap(),
               Instruction::Assignment { name:       "A".to_string(),
                                         expression: "1".to_string(), });
    assert_eq!(classify("? A").unwrap(), Instruction::Query { name: "A".to_string() });
    assert_eq!(classify("A + 1 =").unwrap(),
               Instruction::BareExpression { expression: "A + 1".to_string() });
    assert_eq!(classify("A => _16;").unwrap(),
               Instruction::BaseConversion { expression: "A".to_string(),
                                             base:       16, });
    assert!(matches!(classify("A => 16"),
                     Err(CalcError::Parse(ParseError::UnknownInstruction { .. }))));
    assert!(matches!(classify("3 = 4"),
                     Err(CalcError::Parse(ParseError::InvalidVariableName { .. }))));
    assert!(matches!(classify("? 1x"),
                     Err(CalcError::Parse(ParseError::InvalidVariableName { .. }))));
    assert!(matches!(classify("=> _1"),
                     Err(CalcError::Runtime(RuntimeError::InvalidBase { .. }))));
}
