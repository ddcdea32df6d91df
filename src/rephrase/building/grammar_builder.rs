//! Append-only grammar descriptor and the policy expansions.
//!
//!     Rule additions are recorded as descriptors; `build()` freezes the
//!     lexer, expands every descriptor into explicit rewrite rules, and
//!     compiles every pattern. Expansion keeps the canonical parameter
//!     order at the combinator boundary: permutation rules re-map their
//!     captures back to canonical order, subset rules fill omitted
//!     positions with the Absent sentinel.

use std::fmt;
use std::sync::Arc;

use crate::rephrase::building::lexer_builder::LexerBuilder;
use crate::rephrase::lexing::lexer::LexError;
use crate::rephrase::parsing::grammar::Grammar;
use crate::rephrase::parsing::pattern::{Pattern, PatternError};
use crate::rephrase::parsing::rule::{Combine, RewriteRule};
use crate::rephrase::token::{Shape, Token, Value};

/// How a shape tuple is matched against the sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// All shapes, adjacent, in declared order. One rule.
    AllInOrder,
    /// All shapes, adjacent, in any order. One rule per permutation;
    /// supported for arity 2 and 3 only.
    AnyOrder,
    /// Any non-empty subset of the shapes, adjacent, in declared order;
    /// omitted positions are filled with the Absent sentinel. Supported
    /// for arity 2 through 4.
    AtLeastOne,
}

/// Errors raised while freezing a grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    Lexer(LexError),
    Pattern(PatternError),
    /// The requested policy has no defined expansion at this arity.
    UnsupportedPolicy { policy: MatchPolicy, arity: usize },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Lexer(err) => write!(f, "Lexer build failed: {err}"),
            BuildError::Pattern(err) => write!(f, "Pattern compilation failed: {err}"),
            BuildError::UnsupportedPolicy { policy, arity } => {
                write!(f, "No expansion for {policy:?} over {arity} shapes")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Permutations in expansion order, canonical first. `perm[i]` is the
/// canonical index of the shape matched at position `i`.
const PERMUTATIONS_2: &[&[usize]] = &[&[0, 1], &[1, 0]];
const PERMUTATIONS_3: &[&[usize]] = &[
    &[0, 1, 2],
    &[0, 2, 1],
    &[1, 2, 0],
    &[1, 0, 2],
    &[2, 0, 1],
    &[2, 1, 0],
];

enum RuleDescriptor {
    Shapes {
        shapes: Vec<Shape>,
        policy: MatchPolicy,
        combine: Combine,
    },
    Pattern {
        text: String,
        combine: Combine,
    },
}

/// Collects rule descriptors over a lexer descriptor; `build` freezes both
/// into a [Grammar].
pub struct GrammarBuilder {
    lexer: LexerBuilder,
    descriptors: Vec<RuleDescriptor>,
}

impl GrammarBuilder {
    pub fn over(lexer: LexerBuilder) -> GrammarBuilder {
        GrammarBuilder {
            lexer,
            descriptors: Vec::new(),
        }
    }

    /// Add one rule matching the shapes adjacent and in order.
    pub fn rule<F>(self, shapes: &[Shape], combine: F) -> Self
    where
        F: Fn(Vec<Token>) -> Token + Send + Sync + 'static,
    {
        self.rule_with(shapes, MatchPolicy::AllInOrder, combine)
    }

    /// Add rules for the shapes under the given match policy. The
    /// combinator always receives its arguments in the declared order here,
    /// whatever order (or subset) actually matched.
    pub fn rule_with<F>(mut self, shapes: &[Shape], policy: MatchPolicy, combine: F) -> Self
    where
        F: Fn(Vec<Token>) -> Token + Send + Sync + 'static,
    {
        self.descriptors.push(RuleDescriptor::Shapes {
            shapes: shapes.to_vec(),
            policy,
            combine: Arc::new(combine),
        });
        self
    }

    /// Add one rule from mini-language pattern text.
    pub fn pattern_rule<F>(mut self, text: &str, combine: F) -> Self
    where
        F: Fn(Vec<Token>) -> Token + Send + Sync + 'static,
    {
        self.descriptors.push(RuleDescriptor::Pattern {
            text: text.to_owned(),
            combine: Arc::new(combine),
        });
        self
    }

    /// Collect maximal contiguous runs of `element` (at least `min` long)
    /// into a sequence token, and merge adjacent sequence tokens.
    pub fn list(mut self, element: Shape, min: u32) -> Self {
        self.descriptors.push(RuleDescriptor::Pattern {
            text: format!("{}{{{min},}}", element.identifier()),
            combine: collect_run(element.clone()),
        });
        self.descriptors.push(RuleDescriptor::Pattern {
            text: format!("{}{{1,}}", Shape::sequence(element.clone()).identifier()),
            combine: merge_runs(element),
        });
        self
    }

    /// The collecting rule alone, with a caller-supplied combinator over
    /// the captured run.
    pub fn list_with<F>(self, element: Shape, min: u32, combine: F) -> Self
    where
        F: Fn(Vec<Token>) -> Token + Send + Sync + 'static,
    {
        let text = format!("{}{{{min},}}", element.identifier());
        self.pattern_rule(&text, combine)
    }

    /// Aggregate key/value tokens into one mapping token: a pair rule under
    /// AtLeastOne (a lone key or value pairs with Absent), then a rule
    /// collecting a run of pairs into a map. Duplicate keys resolve to the
    /// last occurrence.
    pub fn dictionary(mut self, key: Shape, value: Shape) -> Self {
        self.descriptors.push(RuleDescriptor::Shapes {
            shapes: vec![key.clone(), value.clone()],
            policy: MatchPolicy::AtLeastOne,
            combine: pair_of(key.clone(), value.clone()),
        });
        self.descriptors.push(RuleDescriptor::Pattern {
            text: format!("{}{{1,}}", Shape::pair(key.clone(), value.clone()).identifier()),
            combine: collect_map(key, value),
        });
        self
    }

    /// Append another builder's rule descriptors after this one's.
    pub fn merge(mut self, other: GrammarBuilder) -> Self {
        self.descriptors.extend(other.descriptors);
        self
    }

    pub fn build(self) -> Result<Grammar, BuildError> {
        let lexer = self.lexer.build().map_err(BuildError::Lexer)?;
        let mut rules = Vec::new();
        for descriptor in self.descriptors {
            expand(descriptor, &mut rules)?;
        }
        Ok(Grammar::new(lexer, rules))
    }
}

fn expand(descriptor: RuleDescriptor, rules: &mut Vec<RewriteRule>) -> Result<(), BuildError> {
    match descriptor {
        RuleDescriptor::Pattern { text, combine } => {
            let pattern = Pattern::from_text(&text).map_err(BuildError::Pattern)?;
            rules.push(RewriteRule::new(pattern, combine));
            Ok(())
        }
        RuleDescriptor::Shapes {
            shapes,
            policy,
            combine,
        } => match policy {
            MatchPolicy::AllInOrder => {
                let pattern = Pattern::from_shapes(&shapes).map_err(BuildError::Pattern)?;
                rules.push(RewriteRule::new(pattern, combine));
                Ok(())
            }
            MatchPolicy::AnyOrder => {
                let permutations = match shapes.len() {
                    2 => PERMUTATIONS_2,
                    3 => PERMUTATIONS_3,
                    arity => return Err(BuildError::UnsupportedPolicy { policy, arity }),
                };
                for &perm in permutations {
                    let permuted: Vec<Shape> =
                        perm.iter().map(|&canonical| shapes[canonical].clone()).collect();
                    let pattern = Pattern::from_shapes(&permuted).map_err(BuildError::Pattern)?;
                    rules.push(RewriteRule::new(
                        pattern,
                        remap_to_canonical(perm, shapes.len(), combine.clone()),
                    ));
                }
                Ok(())
            }
            MatchPolicy::AtLeastOne => {
                let arity = shapes.len();
                if !(2..=4).contains(&arity) {
                    return Err(BuildError::UnsupportedPolicy { policy, arity });
                }
                for subset in position_subsets(arity) {
                    let present: Vec<Shape> =
                        subset.iter().map(|&position| shapes[position].clone()).collect();
                    let pattern = Pattern::from_shapes(&present).map_err(BuildError::Pattern)?;
                    rules.push(RewriteRule::new(
                        pattern,
                        absent_fill(subset, arity, combine.clone()),
                    ));
                }
                Ok(())
            }
        },
    }
}

/// Every non-empty subset of `0..arity`, largest first, then by position
/// order within a size. Earlier subsets make higher-priority rules.
fn position_subsets(arity: usize) -> Vec<Vec<usize>> {
    let mut subsets: Vec<Vec<usize>> = (1u32..(1 << arity))
        .map(|mask| (0..arity).filter(|i| mask & (1 << i) != 0).collect())
        .collect();
    subsets.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    subsets
}

/// Wrap a combinator so captures matched in permuted order arrive in
/// canonical order.
fn remap_to_canonical(perm: &'static [usize], arity: usize, combine: Combine) -> Combine {
    Arc::new(move |captures: Vec<Token>| {
        let mut slots: Vec<Option<Token>> = (0..arity).map(|_| None).collect();
        for (position, token) in captures.into_iter().enumerate() {
            if let Some(&canonical) = perm.get(position) {
                slots[canonical] = Some(token);
            }
        }
        let args: Vec<Token> = slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(Token::absent))
            .collect();
        combine(args)
    })
}

/// Wrap a combinator so a subset's captures land at their declared
/// positions, with Absent filling the rest.
fn absent_fill(positions: Vec<usize>, arity: usize, combine: Combine) -> Combine {
    Arc::new(move |captures: Vec<Token>| {
        let mut args: Vec<Token> = (0..arity).map(|_| Token::absent()).collect();
        for (&position, token) in positions.iter().zip(captures) {
            args[position] = token;
        }
        combine(args)
    })
}

/// Combinator collecting a run of `element` tokens into one sequence token.
fn collect_run(element: Shape) -> Combine {
    Arc::new(move |captures: Vec<Token>| {
        let items: Vec<Value> = captures
            .into_iter()
            .filter(|token| token.shape() == &element)
            .map(Token::into_payload)
            .collect();
        Token::new(Shape::sequence(element.clone()), Value::List(items))
    })
}

/// Combinator flattening adjacent sequence tokens into one.
fn merge_runs(element: Shape) -> Combine {
    let sequence = Shape::sequence(element);
    Arc::new(move |captures: Vec<Token>| {
        let mut items = Vec::new();
        for token in captures {
            if token.shape() != &sequence {
                continue;
            }
            if let Value::List(mut inner) = token.into_payload() {
                items.append(&mut inner);
            }
        }
        Token::new(sequence.clone(), Value::List(items))
    })
}

/// Combinator building a pair token from (key, value) captures; either side
/// may be the Absent sentinel.
fn pair_of(key: Shape, value: Shape) -> Combine {
    let shape = Shape::pair(key, value);
    Arc::new(move |captures: Vec<Token>| {
        let mut payloads = captures.into_iter().map(Token::into_payload);
        let key = payloads.next().unwrap_or(Value::Absent);
        let value = payloads.next().unwrap_or(Value::Absent);
        Token::new(shape.clone(), Value::Pair(Box::new(key), Box::new(value)))
    })
}

/// Combinator collecting a run of pair tokens into one mapping token.
/// A duplicate key replaces the earlier entry.
fn collect_map(key: Shape, value: Shape) -> Combine {
    let pair = Shape::pair(key.clone(), value.clone());
    let mapping = Shape::mapping(key, value);
    Arc::new(move |captures: Vec<Token>| {
        let mut entries: Vec<(Value, Value)> = Vec::new();
        for token in captures {
            if token.shape() != &pair {
                continue;
            }
            if let Value::Pair(entry_key, entry_value) = token.into_payload() {
                let entry_key = *entry_key;
                let entry_value = *entry_value;
                if let Some(slot) = entries.iter_mut().find(|entry| entry.0 == entry_key) {
                    slot.1 = entry_value;
                } else {
                    entries.push((entry_key, entry_value));
                }
            }
        }
        Token::new(mapping.clone(), Value::Map(entries))
    })
}
