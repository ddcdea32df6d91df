//! Explicit mini-language rules, custom run combinators, and grammar
//! composition via merge.

use rephrase::rephrase::{GrammarBuilder, LexerBuilder, Shape, Token, Value};

fn number_lexer() -> LexerBuilder {
    LexerBuilder::new().token("nr", r"\d+", |matched| {
        matched
            .parse::<i64>()
            .ok()
            .map(|n| Token::new(Shape::named("Number"), Value::Int(n)))
    })
}

fn signed_lexer() -> LexerBuilder {
    number_lexer()
        .constant("plus", r"\+", Token::new(Shape::named("Plus"), Value::Unit))
        .constant("minus", r"-", Token::new(Shape::named("Minus"), Value::Unit))
}

#[test]
fn pattern_rule_with_alternation_matches_either_shape() {
    // A sign followed by a number collapses into a signed number.
    let grammar = GrammarBuilder::over(signed_lexer())
        .pattern_rule("(Plus|Minus) Number", |captures: Vec<Token>| {
            let negative = captures[0].shape() == &Shape::named("Minus");
            let magnitude = captures[1].payload().as_int().unwrap_or(0);
            let signed = if negative { -magnitude } else { magnitude };
            Token::new(Shape::named("Signed"), Value::Int(signed))
        })
        .build()
        .expect("buildable");

    let negative = grammar.parse_value("-4", &Shape::named("Signed"));
    assert_eq!(negative, Ok(Value::Int(-4)));

    let positive = grammar.parse_value("+4", &Shape::named("Signed"));
    assert_eq!(positive, Ok(Value::Int(4)));
}

#[test]
fn list_with_runs_a_custom_combinator_over_the_run() {
    let grammar = GrammarBuilder::over(number_lexer())
        .list_with(Shape::named("Number"), 2, |captures: Vec<Token>| {
            let total: i64 = captures
                .iter()
                .filter_map(|t| t.payload().as_int())
                .sum();
            Token::new(Shape::named("Total"), Value::Int(total))
        })
        .build()
        .expect("buildable");

    let value = grammar.parse_value("1 2 3 4", &Shape::named("Total"));
    assert_eq!(value, Ok(Value::Int(10)));
}

#[test]
fn merged_grammars_apply_rules_in_combined_order() {
    let doubles = GrammarBuilder::over(signed_lexer()).pattern_rule(
        "Number Number",
        |captures: Vec<Token>| {
            let left = captures[0].payload().as_int().unwrap_or(0);
            let right = captures[1].payload().as_int().unwrap_or(0);
            Token::new(Shape::named("Number"), Value::Int(left * 10 + right))
        },
    );
    let sums = GrammarBuilder::over(LexerBuilder::new()).rule(
        &[
            Shape::named("Number"),
            Shape::named("Plus"),
            Shape::named("Number"),
        ],
        |captures: Vec<Token>| {
            let left = captures[0].payload().as_int().unwrap_or(0);
            let right = captures[2].payload().as_int().unwrap_or(0);
            Token::new(Shape::named("Number"), Value::Int(left + right))
        },
    );

    let grammar = doubles.merge(sums).build().expect("buildable");
    // "1 2 + 3": the digit-joining rule runs first (12), then the sum (15).
    let value = grammar.parse_value("1 2 + 3", &Shape::named("Number"));
    assert_eq!(value, Ok(Value::Int(15)));
}

#[test]
fn grammar_tokenize_exposes_the_lexer() {
    let grammar = GrammarBuilder::over(signed_lexer()).build().expect("buildable");
    let sentence = grammar.tokenize("1 + 2");

    let shapes: Vec<String> = sentence.iter().map(|t| t.shape().identifier()).collect();
    assert_eq!(shapes, vec!["Number", "Plus", "Number"]);
}
