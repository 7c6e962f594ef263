use proptest::prelude::*;
use textcalc::{
    error::CalcError,
    interpreter::{
        evaluator::core::Evaluator,
        numeral::{based_literal_value, to_base},
    },
    run_block,
};

/// A value with an integer part and a short fraction in `base`.
fn value_in_base() -> impl Strategy<Value = (u32, f64)> {
    (2u32..=16, 0u32..100_000, 0u32..4).prop_flat_map(|(base, integer, places)| {
        let scale = base.pow(places);
        (Just(base), Just(integer), Just(scale), 0..scale)
    })
    .prop_map(|(base, integer, scale, numerator)| {
        (base, f64::from(integer) + f64::from(numerator) / f64::from(scale))
    })
}

/// Names `V0..Vn` where each one depends on the previous.
fn chain(constants: &[u8]) -> Vec<String> {
    constants.iter()
             .enumerate()
             .map(|(i, c)| {
                 if i == 0 { format!("V0 = {c}") } else { format!("V{i} = V{} + {c}", i - 1) }
             })
             .collect()
}

proptest! {
    #[test]
    fn conversion_reads_back((base, value) in value_in_base()) {
        let digits = to_base(value, base, 10).unwrap();
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        let read = based_literal_value(integer, fraction, base, &digits).unwrap();
        let tolerance = f64::from(base).powi(-10) + 1e-9;
        prop_assert!((read - value).abs() <= tolerance,
                     "{value} in base {base} is {digits}, read back as {read}");
    }

    #[test]
    fn acyclic_chains_resolve_in_any_order(
        lines in prop::collection::vec(1u8..100, 1..8).prop_map(|c| chain(&c)).prop_shuffle()
    ) {
        let expected = lines.len();
        let mut evaluator = Evaluator::new();
        let outcomes = evaluator.process_block(&lines).unwrap();
        prop_assert_eq!(outcomes.len(), expected);
        prop_assert!(evaluator.environment().pending().is_empty());
    }

    #[test]
    fn cycles_never_resolve(length in 1usize..6) {
        let lines: Vec<String> = (0..length).map(|i| format!("V{i} = V{} + 1", (i + 1) % length))
                                            .collect();
        let error = run_block(&lines.join("\n")).unwrap_err();
        let CalcError::Runtime(runtime) = error else {
            return Err(TestCaseError::fail("expected a runtime error"));
        };
        prop_assert_eq!(runtime.unresolved_names().len(), length);
    }
}
