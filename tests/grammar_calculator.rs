//! The calculator scenario: four binary operators declared in priority
//! order, each reducing `Number Op Number` back into `Number`.

use rephrase::rephrase::parsing::ParseError;
use rephrase::rephrase::testing::factories::{calculator, number_shape};
use rephrase::rephrase::token::Value;
use rstest::rstest;

#[rstest]
#[case("3 + 3", 6.0)]
#[case("6 - 2", 4.0)]
#[case("3 * 3", 9.0)]
#[case("9 / 3", 3.0)]
#[case("9 * 3 - 10", 17.0)]
#[case("9 * 3 - 10 / 2", 22.0)]
#[case("9 * 3 - 10 / 2 + 3", 25.0)]
#[case("9 * 3 + 10 / 2 - 3", 29.0)]
#[case("9 * 6 / 3", 18.0)]
#[case("9 * 6 / 3 - 2", 16.0)]
fn evaluates(#[case] expression: &str, #[case] expected: f64) {
    let grammar = calculator();
    let value = grammar
        .parse_value(expression, &number_shape())
        .expect("expression should reduce to one number");
    assert_eq!(value, Value::Float(expected));
}

#[test]
fn same_grammar_evaluates_many_expressions() {
    let grammar = calculator();
    for (expression, expected) in [("1 + 1", 2.0), ("8 / 2", 4.0), ("8 / 2", 4.0)] {
        let value = grammar
            .parse_value(expression, &number_shape())
            .expect("expression should reduce");
        assert_eq!(value, Value::Float(expected));
    }
}

#[test]
fn operand_without_operator_leaves_residuals() {
    let grammar = calculator();
    let err = grammar.parse_value("1 2", &number_shape()).err();
    assert_eq!(
        err,
        Some(ParseError::ResidualTokens {
            expected: "Number".to_owned(),
            found: vec!["Number".to_owned(), "Number".to_owned()],
        })
    );
}

#[test]
fn unexpected_text_fails_with_unrecognized_input() {
    let grammar = calculator();
    let err = grammar.parse_value("9 * chickens", &number_shape()).err();
    assert_eq!(
        err,
        Some(ParseError::UnrecognizedInput {
            fragments: vec!["chickens".to_owned()]
        })
    );
}

#[test]
fn parsing_is_deterministic() {
    let grammar = calculator();
    let first = grammar.parse_value("9 * 3 - 10 / 2 + 3", &number_shape());
    let second = grammar.parse_value("9 * 3 - 10 / 2 + 3", &number_shape());
    assert_eq!(first, second);
}
