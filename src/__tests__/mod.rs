//! End-to-end grammar scenarios exercised against the public combinator
//! surface: each test builds a whole named grammar and drives it through
//! realistic input, rather than unit-testing one production in isolation.

use crate::combinator::{epsilon, terminal};
use crate::driver::parse;
use crate::grammar::Grammar;
use crate::token::Token;
use crate::value::{unpack_n, ParseValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Repeat {
    One,
}

#[test]
fn one_or_more_parses_a_run_into_a_single_nested_result() {
    let grammar: Grammar<Repeat, &'static str> = Grammar::new("one_or_more");
    let rest = grammar.rule("rest");
    grammar
        .define("rest", epsilon("") | (terminal(Repeat::One) & rest))
        .unwrap();
    let root = grammar.build("rest").unwrap();

    let tokens = vec![
        Token::new(Repeat::One, "a"),
        Token::new(Repeat::One, "b"),
        Token::new(Repeat::One, "c"),
    ];
    let results = parse(root, tokens).unwrap();
    assert_eq!(results.len(), 1);
    // The trailing `epsilon("")` seed that closes off the recursion is a
    // real `Leaf` in the result tree, same as the original `derp.py`'s
    // `+ter('1')` on `"012"` yielding `((('', '0'), '1'), '2')`.
    assert_eq!(
        crate::value::rflatten(results.into_iter().next().unwrap()),
        vec!["a", "b", "c", ""]
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ArithKind {
    Number,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Val {
    Num(i64),
    Skip,
    Binary(&'static str, Box<Val>, Box<Val>),
    Expr(Box<Val>),
}

impl Val {
    fn leaf(self) -> ParseValue<Val> {
        ParseValue::Leaf(self)
    }
}

/// `(lparen & add_expr & rparen)`: `&` is left-associative, so this nests
/// `((lparen, add_expr), rparen)` — "first" orientation.
fn unwrap_paren(v: ParseValue<Val>) -> ParseValue<Val> {
    let mut parts = unpack_n(v, 2, true);
    if parts.len() != 3 {
        unreachable!("malformed parenthesized value");
    }
    parts.remove(1)
}

/// `(left & op & right)`: same left-associative nesting as [unwrap_paren].
fn binary_reducer(tag: &'static str) -> impl Fn(ParseValue<Val>) -> ParseValue<Val> + 'static {
    move |v: ParseValue<Val>| {
        let mut parts = unpack_n(v, 2, true);
        if parts.len() != 3 {
            unreachable!("malformed binary production");
        }
        let right = parts.pop().expect("right operand present");
        let _op = parts.pop().expect("operator present");
        let left = parts.pop().expect("left operand present");
        Val::Binary(
            tag,
            Box::new(left.leaf().expect("left operand is always a leaf")),
            Box::new(right.leaf().expect("right operand is always a leaf")),
        )
        .leaf()
    }
}

fn reduce_expr(v: ParseValue<Val>) -> ParseValue<Val> {
    Val::Expr(Box::new(v.leaf().expect("expr body is always a leaf"))).leaf()
}

/// `digit / number / add_op / add_expr / mult_op / value / mult_expr /
/// expr`: the classic arithmetic grammar with `+ - * /` and parentheses,
/// left-recursive at both the additive and multiplicative precedence
/// levels.
fn arithmetic_grammar() -> Grammar<ArithKind, Val> {
    let grammar: Grammar<ArithKind, Val> = Grammar::new("arithmetic");

    let value = grammar.rule("value");
    let mult_expr = grammar.rule("mult_expr");
    let add_expr = grammar.rule("add_expr");

    let number = terminal(ArithKind::Number);
    let mult_op = terminal(ArithKind::Star) | terminal(ArithKind::Slash);
    let add_op = terminal(ArithKind::Plus) | terminal(ArithKind::Minus);
    let lparen = terminal(ArithKind::LParen);
    let rparen = terminal(ArithKind::RParen);

    grammar
        .define(
            "value",
            number | ((lparen & add_expr.clone() & rparen) >> unwrap_paren),
        )
        .unwrap();
    grammar
        .define(
            "mult_expr",
            ((mult_expr.clone() & mult_op & value.clone()) >> binary_reducer("mult")) | value,
        )
        .unwrap();
    grammar
        .define(
            "add_expr",
            ((add_expr.clone() & add_op & mult_expr.clone()) >> binary_reducer("add")) | mult_expr,
        )
        .unwrap();
    grammar.define("expr", add_expr >> reduce_expr).unwrap();

    grammar
}

fn skip(kind: ArithKind) -> Token<ArithKind, Val> {
    Token::new(kind, Val::Skip)
}

#[test]
fn arithmetic_grammar_parses_a_parenthesized_expression_unambiguously() {
    let grammar = arithmetic_grammar();
    let root = grammar.build("expr").unwrap();

    // (1*3)/4
    let tokens = vec![
        skip(ArithKind::LParen),
        Token::new(ArithKind::Number, Val::Num(1)),
        skip(ArithKind::Star),
        Token::new(ArithKind::Number, Val::Num(3)),
        skip(ArithKind::RParen),
        skip(ArithKind::Slash),
        Token::new(ArithKind::Number, Val::Num(4)),
    ];

    let results = parse(root, tokens).unwrap();
    assert_eq!(results.len(), 1);

    let expected = Val::Expr(Box::new(Val::Binary(
        "mult",
        Box::new(Val::Binary("mult", Box::new(Val::Num(1)), Box::new(Val::Num(3)))),
        Box::new(Val::Num(4)),
    )));
    assert_eq!(results.iter().next().unwrap(), &ParseValue::Leaf(expected));
}

#[test]
fn arithmetic_grammar_rejects_an_unbalanced_paren() {
    let grammar = arithmetic_grammar();
    let root = grammar.build("expr").unwrap();

    let tokens = vec![
        skip(ArithKind::LParen),
        Token::new(ArithKind::Number, Val::Num(1)),
        skip(ArithKind::Star),
        Token::new(ArithKind::Number, Val::Num(3)),
    ];
    let results = parse(root, tokens).unwrap();
    assert!(results.is_empty());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Ambiguous {
    N,
    Plus,
}

#[test]
fn ambiguous_addition_grammar_yields_two_distinct_parse_trees() {
    // E ::= E '+' E | 'n'
    let grammar: Grammar<Ambiguous, &'static str> = Grammar::new("ambiguous");
    let e = grammar.rule("e");
    grammar
        .define("e", (e.clone() & terminal(Ambiguous::Plus) & e) | terminal(Ambiguous::N))
        .unwrap();
    let root = grammar.build("e").unwrap();

    let tokens = vec![
        Token::new(Ambiguous::N, "n"),
        Token::new(Ambiguous::Plus, "+"),
        Token::new(Ambiguous::N, "n"),
        Token::new(Ambiguous::Plus, "+"),
        Token::new(Ambiguous::N, "n"),
    ];
    let results = parse(root, tokens).unwrap();
    assert_eq!(results.len(), 2);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum IntTok {
    Int,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum IntVal {
    Text(&'static str),
    Number(i64),
}

#[test]
fn reducing_a_terminal_applies_the_function_to_every_result() {
    let parse_int = |v: ParseValue<IntVal>| match v {
        ParseValue::Leaf(IntVal::Text(text)) => {
            ParseValue::Leaf(IntVal::Number(text.parse().expect("digits only")))
        }
        other => other,
    };
    let int_value = terminal::<IntTok, IntVal>(IntTok::Int) >> parse_int;

    let root = int_value.into_ref();
    let results = parse(root, vec![Token::new(IntTok::Int, IntVal::Text("42"))]).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(
        results.iter().next().unwrap(),
        &ParseValue::Leaf(IntVal::Number(42))
    );
}
