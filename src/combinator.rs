//! The public combinator surface: `a | b`, `a & b`, `a >> f`, and the
//! `one_or_more`/`optional` repetition builders.
//!
//! Rust has no overloadable unary `+`/`~` operators (`std::ops` only
//! offers binary `BitOr`/`BitAnd`/`Shr` and the unary `Neg`/`Not`, neither
//! of which reads as "one-or-more" or "optional"), and `impl ForeignTrait
//! for Rc<dyn LocalTrait>` is blocked by the orphan rules regardless. `P`
//! is the local newtype that makes the binary operators possible and hosts
//! the repetition builders as named methods instead.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, Shr};
use std::rc::Rc;

use crate::parser::{self, Alternate, Concatenate, Empty, Epsilon, ParserRef, Reduce, Terminal};
use crate::value::ParseValue;

/// A combinator handle: a [ParserRef] with operator sugar attached.
pub struct P<K, V>(pub ParserRef<K, V>);

impl<K, V> Clone for P<K, V> {
    fn clone(&self) -> Self {
        P(Rc::clone(&self.0))
    }
}

impl<K, V> P<K, V> {
    pub fn into_ref(self) -> ParserRef<K, V> {
        self.0
    }
}

impl<K, V> From<ParserRef<K, V>> for P<K, V> {
    fn from(parser: ParserRef<K, V>) -> Self {
        P(parser)
    }
}

/// A parser that matches no string.
pub fn empty<K, V>() -> P<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    P(Rc::new(Empty))
}

/// A parser that matches only the empty string, yielding `value`.
pub fn epsilon<K, V>(value: V) -> P<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    P(Rc::new(Epsilon::new(value)))
}

/// A parser that matches exactly one token of `kind`.
pub fn terminal<K, V>(kind: K) -> P<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    P(Rc::new(Terminal::new(kind)))
}

impl<K, V> BitOr for P<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    type Output = P<K, V>;

    /// `a | b`: alternation.
    fn bitor(self, rhs: Self) -> Self::Output {
        P(Rc::new(Alternate::new(self.0, rhs.0)))
    }
}

impl<K, V> BitAnd for P<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    type Output = P<K, V>;

    /// `a & b`: concatenation.
    fn bitand(self, rhs: Self) -> Self::Output {
        P(Rc::new(Concatenate::new(self.0, rhs.0)))
    }
}

impl<K, V, F> Shr<F> for P<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
    F: Fn(ParseValue<V>) -> ParseValue<V> + 'static,
{
    type Output = P<K, V>;

    /// `a >> f`: apply `f` to each result of `a`.
    fn shr(self, func: F) -> Self::Output {
        P(Rc::new(Reduce::new(self.0, Rc::new(func))))
    }
}

impl<K, V> P<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    /// `+a`: one-or-more repetition. `epsilon_value` seeds the base case
    /// (zero repetitions consumed so far).
    pub fn one_or_more(self, epsilon_value: V) -> P<K, V> {
        P(parser::one_or_more(self.0, epsilon_value))
    }

    /// `~a`: optional (zero-or-one).
    pub fn optional(self, epsilon_value: V) -> P<K, V> {
        P(parser::optional(self.0, epsilon_value))
    }
}
