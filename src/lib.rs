//! `derp` is a context-free language recognizer built on Brzozowski
//! derivatives of parser combinators.
//!
//! # Overview
//!
//! Parsers for context-free grammars are usually written either by hand as a
//! recursive-descent parser, or generated from a grammar file by a parser
//! generator tool. Both approaches struggle with left recursion and
//! ambiguity: a hand-written recursive-descent parser diverges on left
//! recursion unless the grammar is rewritten to remove it, and most
//! generators simply reject ambiguous grammars outright.
//!
//! This crate takes a different approach, closer to a calculator than a
//! generator. A grammar is a graph of [Parser](parser::Parser) values built
//! from a small combinator algebra ([empty](combinator::empty),
//! [epsilon](combinator::epsilon), [terminal](combinator::terminal), `|`,
//! `&`, `>>`, [one_or_more](combinator::P::one_or_more),
//! [optional](combinator::P::optional)). Feeding it a token advances every
//! parser in the graph by one
//! [Brzozowski derivative](https://en.wikipedia.org/wiki/Brzozowski_derivative)
//! at once; feeding it the whole input and asking what the final graph
//! accepts on the empty string ([Parser::derive_null]) yields the complete,
//! possibly ambiguous, set of parse results. Left recursion and ambiguity
//! both fall out of the algebra rather than needing special-case handling:
//! a left-recursive rule's derivative is itself a node in the same cyclic
//! graph, and an ambiguous rule simply nullability-reduces to a result set
//! with more than one element.
//!
//! # Example
//!
//! ```
//! use derp::combinator::{epsilon, terminal};
//! use derp::driver::parse;
//! use derp::grammar::Grammar;
//! use derp::token::Token;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind {
//!     One,
//! }
//!
//! // rep ::= epsilon | '1' rep
//! let grammar: Grammar<Kind, &'static str> = Grammar::new("rep");
//! let rep = grammar.rule("rep");
//! grammar
//!     .define("rep", epsilon("") | (terminal(Kind::One) & rep))
//!     .unwrap();
//! let root = grammar.build("rep").unwrap();
//!
//! let tokens = vec![
//!     Token::new(Kind::One, "a"),
//!     Token::new(Kind::One, "b"),
//!     Token::new(Kind::One, "c"),
//! ];
//! let results = parse(root, tokens).unwrap();
//! assert_eq!(results.len(), 1);
//! ```
//!
//! # Design
//!
//! The core is split into five layers:
//!
//! 1. [token] — the opaque `(kind, value)` pair terminals match against.
//! 2. [parser] — the closed family of eight variant nodes (`Empty`,
//!    `Epsilon`, `Terminal`, `Alternate`, `Concatenate`, `Reduce`, `Delta`,
//!    `Recurrence`) plus the internal `Delayed` laziness wrapper, all behind
//!    the [parser::Parser] trait.
//! 3. [memo] — the per-node memoization and fixed-point machinery
//!    `derive`/`derive_null` are built on.
//! 4. [grammar] — a named-binding container that resolves forward
//!    references between rules into [parser::Recurrence] nodes.
//! 5. [driver] — folds the derivative across a token stream and reads off
//!    the terminal null set.
//!
//! [combinator] is the public constructor/operator surface over [parser];
//! [error] collects the error types those layers return; [value] is the
//! `ParseValue` result type parse trees are built from; [ast] is a
//! client-facing tree-walking and pretty-printing toolkit for whatever
//! structured values a grammar's [parser::Reduce] steps build out of
//! [value::ParseValue]; [util::log] is the crate's `cfg(debug_assertions)`
//! debug tracing facility for the parse driver.
//!
//! Lexical analysis, sample grammars, and CLI entry points are explicitly
//! out of scope for this crate: tokens arrive pre-lexed as opaque
//! `(kind, value)` pairs, and the only consumer-facing surface is the
//! combinator algebra above.
//!
//! # License
//! `derp` is provided under the MIT license.

pub mod ast;
pub mod combinator;
pub mod driver;
pub mod error;
mod memo;
pub mod grammar;
pub mod parser;
pub mod token;
pub mod util;
pub mod value;

#[cfg(test)]
mod __tests__;

pub use combinator::{empty, epsilon, terminal, P};
pub use driver::parse;
pub use error::{GrammarError, ParseError};
pub use grammar::Grammar;
pub use parser::Parser;
pub use token::Token;
pub use value::ParseValue;
