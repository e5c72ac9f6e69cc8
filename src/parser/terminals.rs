use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use crate::error::ParseError;
use crate::parser::{Parser, ParserRef};
use crate::token::Token;
use crate::value::ParseValue;

/// Matches no string. The identity element of alternation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

impl Empty {
    pub fn new() -> Self {
        Self
    }
}

impl<K, V> Parser<K, V> for Empty
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    fn step(&self, _token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        Ok(Rc::new(Empty))
    }

    fn step_null(&self) -> Result<HashSet<ParseValue<V>>, ParseError> {
        Ok(HashSet::new())
    }

    fn derive(self: Rc<Self>, _token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        Ok(self)
    }

    fn derive_null(&self) -> Result<Rc<HashSet<ParseValue<V>>>, ParseError> {
        Ok(Rc::new(HashSet::new()))
    }
}

/// Matches only the empty string, yielding one result: `value`.
#[derive(Debug, Clone)]
pub struct Epsilon<V> {
    value: V,
}

impl<V> Epsilon<V> {
    pub fn new(value: V) -> Self {
        Self { value }
    }
}

impl<K, V> Parser<K, V> for Epsilon<V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    fn step(&self, _token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        Ok(Rc::new(Empty))
    }

    fn step_null(&self) -> Result<HashSet<ParseValue<V>>, ParseError> {
        let mut set = HashSet::with_capacity(1);
        set.insert(ParseValue::Leaf(self.value.clone()));
        Ok(set)
    }

    fn derive(self: Rc<Self>, _token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        Ok(Rc::new(Empty))
    }

    fn derive_null(&self) -> Result<Rc<HashSet<ParseValue<V>>>, ParseError> {
        Ok(Rc::new(self.step_null()?))
    }
}

/// Matches exactly one token of `kind`, yielding that token's value.
#[derive(Debug, Clone, Copy)]
pub struct Terminal<K> {
    kind: K,
}

impl<K> Terminal<K> {
    pub fn new(kind: K) -> Self {
        Self { kind }
    }
}

impl<K, V> Parser<K, V> for Terminal<K>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    fn step(&self, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        if token.kind == self.kind {
            Ok(Rc::new(Epsilon::new(token.value.clone())))
        } else {
            Ok(Rc::new(Empty))
        }
    }

    fn step_null(&self) -> Result<HashSet<ParseValue<V>>, ParseError> {
        Ok(HashSet::new())
    }

    fn derive(self: Rc<Self>, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        self.step(token)
    }

    fn derive_null(&self) -> Result<Rc<HashSet<ParseValue<V>>>, ParseError> {
        Ok(Rc::new(HashSet::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Int,
        Ident,
    }

    #[test]
    fn terminal_matches_only_its_own_kind() {
        let terminal: ParserRef<Kind, &'static str> = Rc::new(Terminal::new(Kind::Int));
        let matching = Token::new(Kind::Int, "42");
        let other = Token::new(Kind::Ident, "x");

        let matched = terminal.clone().derive(&matching).unwrap();
        assert_eq!(
            *matched.derive_null().unwrap(),
            HashSet::from([ParseValue::Leaf("42")])
        );

        let unmatched = terminal.derive(&other).unwrap();
        assert!(unmatched.derive_null().unwrap().is_empty());
    }

    #[test]
    fn terminal_is_never_nullable() {
        let terminal: Terminal<Kind> = Terminal::new(Kind::Int);
        let parser: &dyn Parser<Kind, &'static str> = &terminal;
        assert!(parser.derive_null().unwrap().is_empty());
    }
}
