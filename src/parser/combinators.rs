use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use crate::error::ParseError;
use crate::memo::{DeriveMemo, NullMemo};
use crate::parser::{memoized_derive, Empty, Parser, ParserRef};
use crate::token::Token;
use crate::value::ParseValue;

/// The union of two languages: `left`'s results together with `right`'s.
pub struct Alternate<K, V> {
    left: ParserRef<K, V>,
    right: ParserRef<K, V>,
    derive_memo: DeriveMemo<K, V>,
    null_memo: NullMemo<V>,
}

impl<K, V> Alternate<K, V>
where
    K: Copy + Eq + Hash + Debug,
    V: Clone + Eq + Hash + Debug,
{
    pub fn new(left: ParserRef<K, V>, right: ParserRef<K, V>) -> Self {
        Self {
            left,
            right,
            derive_memo: DeriveMemo::new(),
            null_memo: NullMemo::new(),
        }
    }
}

impl<K: Debug, V: Debug> Debug for Alternate<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Alternate({:?}, {:?})", self.left, self.right)
    }
}

impl<K, V> Parser<K, V> for Alternate<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    fn step(&self, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        let left = Rc::clone(&self.left).derive(token)?;
        let right = Rc::clone(&self.right).derive(token)?;
        Ok(Rc::new(Alternate::new(left, right)))
    }

    fn step_null(&self) -> Result<HashSet<ParseValue<V>>, ParseError> {
        let mut set = (*self.left.derive_null()?).clone();
        set.extend((*self.right.derive_null()?).iter().cloned());
        Ok(set)
    }

    fn derive(self: Rc<Self>, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        let cloned = Rc::clone(&self);
        memoized_derive(cloned, &self.derive_memo, token)
    }

    fn derive_null(&self) -> Result<Rc<HashSet<ParseValue<V>>>, ParseError> {
        self.null_memo.get_or_compute(|| self.step_null())
    }
}

/// The product of two languages: pairs `(a, b)` with `a` accepted by `left`
/// and `b` accepted by `right`.
pub struct Concatenate<K, V> {
    left: ParserRef<K, V>,
    right: ParserRef<K, V>,
    derive_memo: DeriveMemo<K, V>,
    null_memo: NullMemo<V>,
}

impl<K, V> Concatenate<K, V>
where
    K: Copy + Eq + Hash + Debug,
    V: Clone + Eq + Hash + Debug,
{
    pub fn new(left: ParserRef<K, V>, right: ParserRef<K, V>) -> Self {
        Self {
            left,
            right,
            derive_memo: DeriveMemo::new(),
            null_memo: NullMemo::new(),
        }
    }
}

impl<K: Debug, V: Debug> Debug for Concatenate<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Concatenate({:?}, {:?})", self.left, self.right)
    }
}

impl<K, V> Parser<K, V> for Concatenate<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    fn step(&self, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        // Concatenate(l, r).derive(t)
        //   = Alternate(Concatenate(l.derive(t), r), Concatenate(Delta(l), r.derive(t)))
        let advance_left: ParserRef<K, V> = Rc::new(Concatenate::new(
            Rc::clone(&self.left).derive(token)?,
            Rc::clone(&self.right),
        ));
        let advance_right: ParserRef<K, V> = Rc::new(Concatenate::new(
            Rc::new(Delta::new(Rc::clone(&self.left))),
            Rc::clone(&self.right).derive(token)?,
        ));
        Ok(Rc::new(Alternate::new(advance_left, advance_right)))
    }

    fn step_null(&self) -> Result<HashSet<ParseValue<V>>, ParseError> {
        let left_null = self.left.derive_null()?;
        let right_null = self.right.derive_null()?;
        let mut set = HashSet::new();
        for a in left_null.iter() {
            for b in right_null.iter() {
                set.insert(ParseValue::pair(a.clone(), b.clone()));
            }
        }
        Ok(set)
    }

    fn derive(self: Rc<Self>, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        let cloned = Rc::clone(&self);
        memoized_derive(cloned, &self.derive_memo, token)
    }

    fn derive_null(&self) -> Result<Rc<HashSet<ParseValue<V>>>, ParseError> {
        self.null_memo.get_or_compute(|| self.step_null())
    }
}

/// Applies `func` to every result of `inner`.
pub struct Reduce<K, V> {
    inner: ParserRef<K, V>,
    func: Rc<dyn Fn(ParseValue<V>) -> ParseValue<V>>,
    derive_memo: DeriveMemo<K, V>,
    null_memo: NullMemo<V>,
}

impl<K, V> Reduce<K, V>
where
    K: Copy + Eq + Hash + Debug,
    V: Clone + Eq + Hash + Debug,
{
    pub fn new(inner: ParserRef<K, V>, func: Rc<dyn Fn(ParseValue<V>) -> ParseValue<V>>) -> Self {
        Self {
            inner,
            func,
            derive_memo: DeriveMemo::new(),
            null_memo: NullMemo::new(),
        }
    }
}

impl<K: Debug, V: Debug> Debug for Reduce<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Reduce({:?})", self.inner)
    }
}

impl<K, V> Parser<K, V> for Reduce<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    fn step(&self, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        let derived = Rc::clone(&self.inner).derive(token)?;
        Ok(Rc::new(Reduce::new(derived, Rc::clone(&self.func))))
    }

    fn step_null(&self) -> Result<HashSet<ParseValue<V>>, ParseError> {
        Ok(self
            .inner
            .derive_null()?
            .iter()
            .cloned()
            .map(|x| (self.func)(x))
            .collect())
    }

    fn derive(self: Rc<Self>, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        let cloned = Rc::clone(&self);
        memoized_derive(cloned, &self.derive_memo, token)
    }

    fn derive_null(&self) -> Result<Rc<HashSet<ParseValue<V>>>, ParseError> {
        self.null_memo.get_or_compute(|| self.step_null())
    }
}

/// Matches only the empty string; its null set equals `inner`'s.
///
/// Used internally by [Concatenate]'s derivative rule to represent "`left`
/// having already been fully consumed, so only its nullable parses carry
/// forward." `Delta` is a leaf for `derive` (it always steps to [Empty]); it
/// delegates `derive_null` straight to `inner`, which already carries its
/// own fixed-point memoization, so `Delta` needs none of its own.
pub struct Delta<K, V> {
    inner: ParserRef<K, V>,
}

impl<K, V> Delta<K, V> {
    pub fn new(inner: ParserRef<K, V>) -> Self {
        Self { inner }
    }
}

impl<K: Debug, V: Debug> Debug for Delta<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Delta({:?})", self.inner)
    }
}

impl<K, V> Parser<K, V> for Delta<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    fn step(&self, _token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        Ok(Rc::new(Empty))
    }

    fn step_null(&self) -> Result<HashSet<ParseValue<V>>, ParseError> {
        Ok((*self.inner.derive_null()?).clone())
    }

    fn derive(self: Rc<Self>, _token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        Ok(Rc::new(Empty))
    }

    fn derive_null(&self) -> Result<Rc<HashSet<ParseValue<V>>>, ParseError> {
        self.inner.derive_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Epsilon, Terminal};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        A,
        B,
    }

    fn terminal(kind: Kind) -> ParserRef<Kind, &'static str> {
        Rc::new(Terminal::new(kind))
    }

    #[test]
    fn alternate_unions_both_branches_null_sets() {
        let alt: ParserRef<Kind, &'static str> = Rc::new(Alternate::new(
            Rc::new(Epsilon::new("x")),
            Rc::new(Epsilon::new("y")),
        ));
        assert_eq!(
            *alt.derive_null().unwrap(),
            HashSet::from([ParseValue::Leaf("x"), ParseValue::Leaf("y")])
        );
    }

    #[test]
    fn concatenate_distributes_across_a_token() {
        let concat: ParserRef<Kind, &'static str> =
            Rc::new(Concatenate::new(terminal(Kind::A), terminal(Kind::B)));
        let a = Token::new(Kind::A, "a");
        let b = Token::new(Kind::B, "b");

        let after_a = concat.derive(&a).unwrap();
        let after_ab = after_a.derive(&b).unwrap();
        assert_eq!(
            *after_ab.derive_null().unwrap(),
            HashSet::from([ParseValue::pair(
                ParseValue::Leaf("a"),
                ParseValue::Leaf("b")
            )])
        );
    }

    #[test]
    fn reduce_applies_function_after_derivation() {
        let reduced: ParserRef<Kind, &'static str> = Rc::new(Reduce::new(
            terminal(Kind::A),
            Rc::new(|v: ParseValue<&'static str>| match v {
                ParseValue::Leaf(s) => ParseValue::Leaf(if s == "a" { "A" } else { s }),
                other => other,
            }),
        ));
        let token = Token::new(Kind::A, "a");
        let derived = reduced.derive(&token).unwrap();
        assert_eq!(
            *derived.derive_null().unwrap(),
            HashSet::from([ParseValue::Leaf("A")])
        );
    }
}
