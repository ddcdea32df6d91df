//! Property-based tests for the lexer and the rewrite engine: total
//! classification, determinism, and the splice/fixpoint invariants.

use std::sync::Arc;

use proptest::prelude::*;
use rephrase::rephrase::parsing::{Pattern, RewriteRule, MAX_REWRITES};
use rephrase::rephrase::testing::factories::{calculator, calculator_lexer, number_shape};
use rephrase::rephrase::token::{Sentence, Shape, Token, Value};

proptest! {
    /// Classification is total: any input tokenizes without panicking, and
    /// tokenizing again yields the identical sentence.
    #[test]
    fn tokenize_never_fails(input in "\\PC{0,40}") {
        let lexer = calculator_lexer().build().expect("buildable");
        let first = lexer.tokenize(&input);
        let second = lexer.tokenize(&input);
        prop_assert_eq!(first, second);
    }

    /// For a fixed grammar and input, parsing returns the same result (or
    /// the same error) on every call. Division stays out of the generated
    /// alphabet: NaN results compare unequal to themselves.
    #[test]
    fn parse_as_is_deterministic(input in "[0-9+* -]{0,24}") {
        let grammar = calculator();
        let first = grammar.parse_value(&input, &number_shape());
        let second = grammar.parse_value(&input, &number_shape());
        prop_assert_eq!(first, second);
    }

    /// A rule whose pattern cannot match its own output terminates below
    /// the iteration cap and leaves no matchable run behind.
    #[test]
    fn pair_rule_reaches_fixpoint(flags in proptest::collection::vec(any::<bool>(), 0..12)) {
        let sentence: Sentence = flags
            .iter()
            .map(|&is_a| {
                let name = if is_a { "A" } else { "B" };
                Token::new(Shape::named(name), Value::Unit)
            })
            .collect();
        let original_len = sentence.len();

        let pattern = Pattern::from_shapes(&[Shape::named("A"), Shape::named("B")])
            .expect("valid shapes");
        let rule = RewriteRule::new(
            pattern,
            Arc::new(|_| Token::new(Shape::named("P"), Value::Unit)),
        );

        let result = rule.apply(sentence).expect("no unmatched input");

        // Each rewrite consumed two tokens and produced one.
        let rewrites = result
            .iter()
            .filter(|t| t.shape() == &Shape::named("P"))
            .count();
        prop_assert_eq!(result.len(), original_len - rewrites);
        prop_assert!(rewrites < MAX_REWRITES);

        // Fixpoint: no adjacent A, B survives.
        let survivor = result
            .windows(2)
            .any(|w| w[0].shape() == &Shape::named("A") && w[1].shape() == &Shape::named("B"));
        prop_assert!(!survivor);
    }
}
