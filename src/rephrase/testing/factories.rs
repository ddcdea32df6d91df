//! Fixture factories.

use crate::rephrase::building::{GrammarBuilder, LexerBuilder};
use crate::rephrase::parsing::grammar::Grammar;
use crate::rephrase::token::{Shape, Token, Value};

pub fn number_shape() -> Shape {
    Shape::named("Number")
}

/// The calculator lexer: four marker operators plus decimal numbers.
/// Whitespace between tokens falls out as trimmed-empty unmatched gaps.
pub fn calculator_lexer() -> LexerBuilder {
    LexerBuilder::new()
        .constant("plus", r"\+", Token::new(Shape::named("Plus"), Value::Unit))
        .constant("minus", r"-", Token::new(Shape::named("Minus"), Value::Unit))
        .constant("multi", r"\*", Token::new(Shape::named("Multi"), Value::Unit))
        .constant("divide", r"/", Token::new(Shape::named("Divide"), Value::Unit))
        .token("number", r"\b[0-9]+(\.[0-9]*)?\b", |matched| {
            matched
                .parse::<f64>()
                .ok()
                .map(|n| Token::new(Shape::named("Number"), Value::Float(n)))
        })
}

fn binary(apply: fn(f64, f64) -> f64) -> impl Fn(Vec<Token>) -> Token {
    move |captures: Vec<Token>| {
        let mut operands = captures.iter().filter_map(|token| token.payload().as_float());
        let left = operands.next().unwrap_or(0.0);
        let right = operands.next().unwrap_or(0.0);
        Token::new(number_shape(), Value::Float(apply(left, right)))
    }
}

/// The calculator grammar: `/ * - +` in priority order over `Number`
/// operands, each reducing `Number Op Number` back to `Number`.
pub fn calculator() -> Grammar {
    let number = number_shape();
    GrammarBuilder::over(calculator_lexer())
        .rule(
            &[number.clone(), Shape::named("Divide"), number.clone()],
            binary(|a, b| a / b),
        )
        .rule(
            &[number.clone(), Shape::named("Multi"), number.clone()],
            binary(|a, b| a * b),
        )
        .rule(
            &[number.clone(), Shape::named("Minus"), number.clone()],
            binary(|a, b| a - b),
        )
        .rule(
            &[number.clone(), Shape::named("Plus"), number.clone()],
            binary(|a, b| a + b),
        )
        .build()
        .expect("calculator fixture is well-formed")
}

/// Month-name word table, `Jan` → 1 through `Dec` → 12.
pub fn month_entries() -> Vec<(String, Value)> {
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        .iter()
        .enumerate()
        .map(|(index, name)| ((*name).to_owned(), Value::Int(index as i64 + 1)))
        .collect()
}
