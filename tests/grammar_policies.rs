//! Match-policy expansion behavior: any-order permutations, at-least-one
//! subsets with Absent filling, and the unsupported combinations.

use rephrase::rephrase::building::{BuildError, GrammarBuilder, LexerBuilder, MatchPolicy};
use rephrase::rephrase::parsing::Grammar;
use rephrase::rephrase::token::{Shape, Token, Value};

fn number_and_text_lexer() -> LexerBuilder {
    LexerBuilder::new()
        .token("nr", r"\d+", |matched| {
            matched
                .parse::<i64>()
                .ok()
                .map(|n| Token::new(Shape::named("Number"), Value::Int(n)))
        })
        .token("txt", r".+", |matched| {
            Some(Token::new(Shape::named("Text"), matched.into()))
        })
}

/// The optional-pair grammar: Number and Text with at-least-one-present,
/// combined into a pair token.
fn optional_pair() -> Grammar {
    let shape = Shape::pair(Shape::named("Number"), Shape::named("Text"));
    GrammarBuilder::over(number_and_text_lexer())
        .rule_with(
            &[Shape::named("Number"), Shape::named("Text")],
            MatchPolicy::AtLeastOne,
            move |captures: Vec<Token>| {
                let mut payloads = captures.into_iter().map(Token::into_payload);
                let number = payloads.next().unwrap_or(Value::Absent);
                let text = payloads.next().unwrap_or(Value::Absent);
                Token::new(shape.clone(), Value::Pair(Box::new(number), Box::new(text)))
            },
        )
        .build()
        .expect("buildable")
}

#[test]
fn both_parts_present() {
    let grammar = optional_pair();
    let shape = Shape::pair(Shape::named("Number"), Shape::named("Text"));

    let value = grammar.parse_value("1text", &shape).expect("should reduce");
    assert_eq!(
        value,
        Value::Pair(
            Box::new(Value::Int(1)),
            Box::new(Value::Str("text".to_owned()))
        )
    );
}

#[test]
fn missing_part_is_absent() {
    let grammar = optional_pair();
    let shape = Shape::pair(Shape::named("Number"), Shape::named("Text"));

    let value = grammar.parse_value("1", &shape).expect("should reduce");
    assert_eq!(
        value,
        Value::Pair(Box::new(Value::Int(1)), Box::new(Value::Absent))
    );
}

#[test]
fn any_order_remaps_captures_to_canonical_order() {
    let lexer = LexerBuilder::new()
        .token("nr", r"\d+", |matched| {
            matched
                .parse::<i64>()
                .ok()
                .map(|n| Token::new(Shape::named("Number"), Value::Int(n)))
        })
        .token("word", r"[a-z]+", |matched| {
            Some(Token::new(Shape::named("Word"), matched.into()))
        });

    let grammar = GrammarBuilder::over(lexer)
        .rule_with(
            &[Shape::named("Number"), Shape::named("Word")],
            MatchPolicy::AnyOrder,
            |captures: Vec<Token>| {
                // Canonical order is (Number, Word) no matter what matched.
                let rendered = format!(
                    "{:?}|{:?}",
                    captures[0].payload(),
                    captures[1].payload()
                );
                Token::new(Shape::named("Out"), Value::Str(rendered))
            },
        )
        .build()
        .expect("buildable");

    let forward = grammar.parse_value("7seven", &Shape::named("Out"));
    let backward = grammar.parse_value("seven7", &Shape::named("Out"));
    assert_eq!(forward, backward);
}

#[test]
fn policy_rule_counts() {
    fn shapes(n: usize) -> Vec<Shape> {
        ["A", "B", "C", "D"][..n].iter().map(|s| Shape::named(s)).collect()
    }
    fn count(shapes: &[Shape], policy: MatchPolicy) -> usize {
        GrammarBuilder::over(LexerBuilder::new())
            .rule_with(shapes, policy, |_| Token::new(Shape::named("Out"), Value::Unit))
            .build()
            .expect("buildable")
            .rules()
            .len()
    }

    assert_eq!(count(&shapes(2), MatchPolicy::AnyOrder), 2);
    assert_eq!(count(&shapes(3), MatchPolicy::AnyOrder), 6);
    assert_eq!(count(&shapes(2), MatchPolicy::AtLeastOne), 3);
    assert_eq!(count(&shapes(3), MatchPolicy::AtLeastOne), 7);
    assert_eq!(count(&shapes(4), MatchPolicy::AtLeastOne), 15);
}

#[test]
fn any_order_of_four_reports_unsupported_policy() {
    let shapes: Vec<Shape> = ["A", "B", "C", "D"].iter().map(|s| Shape::named(s)).collect();
    let result = GrammarBuilder::over(LexerBuilder::new())
        .rule_with(&shapes, MatchPolicy::AnyOrder, |_| {
            Token::new(Shape::named("Out"), Value::Unit)
        })
        .build();

    assert_eq!(
        result.err(),
        Some(BuildError::UnsupportedPolicy {
            policy: MatchPolicy::AnyOrder,
            arity: 4
        })
    );
}
