//! The parser algebra: a closed family of variant nodes related by two
//! operations, [Parser::derive] and [Parser::derive_null].

mod combinators;
mod recurrence;
mod terminals;

pub use combinators::{Alternate, Concatenate, Delta, Reduce};
pub use recurrence::Recurrence;
pub use terminals::{Empty, Epsilon, Terminal};

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::error::ParseError;
use crate::memo::{DeriveMemo, NullMemo};
use crate::token::Token;
use crate::value::ParseValue;

/// A parser node in the combinator graph.
///
/// Every variant (`Empty`, `Epsilon`, `Terminal`, `Alternate`, `Concatenate`,
/// `Reduce`, `Delta`, `Recurrence`, and the internal `Delayed` wrapper)
/// implements this trait. `step`/`step_null` are the variant's one-shot
/// structural rules; `derive`/`derive_null` are the memoized, client-facing
/// operations built on top of them.
///
/// Every operation is fallible: an unbound [Recurrence] encountered mid-derivation
/// surfaces as `Err(ParseError::UnboundRecurrence)` rather than panicking, so a
/// caller who builds a cyclic graph by hand (bypassing [Grammar](crate::grammar::Grammar)'s
/// validation) can recover from it instead of crashing the process.
pub trait Parser<K, V>: Debug
where
    K: Copy + Eq + Hash + Debug,
    V: Clone + Eq + Hash + Debug,
{
    /// The structural derivative rule for this variant, applied once,
    /// without consulting or updating the `derive` memo.
    fn step(&self, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError>;

    /// The structural nullability rule for this variant, applied once. Any
    /// recursive calls this makes go through children's memoized
    /// [Parser::derive_null], not their `step_null`, so that the fixed point
    /// propagates correctly across the whole graph.
    fn step_null(&self) -> Result<HashSet<ParseValue<V>>, ParseError>;

    /// The memoized, lazily-forced derivative. Recursive-capable variants
    /// return a [Delayed] wrapper on a cache miss rather than computing
    /// [Parser::step] immediately, so that constructing the derivative of a
    /// cyclic grammar is cheap regardless of how deep the cycle is.
    fn derive(self: Rc<Self>, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError>;

    /// The memoized nullability fixed point for this node.
    fn derive_null(&self) -> Result<Rc<HashSet<ParseValue<V>>>, ParseError>;
}

/// A shared handle to a parser node.
///
/// `Rc`, not `Arc`: the graph is single-threaded by construction (see the
/// crate's concurrency notes), and every memo table backing [Parser::derive]
/// and [Parser::derive_null] uses interior mutability that is not
/// `Sync`.
pub type ParserRef<K, V> = Rc<dyn Parser<K, V>>;

/// Derive `token` from `this` through `memo`, wrapping an uncached miss in a
/// fresh [Delayed] rather than forcing the structural rule immediately.
///
/// Shared by every non-leaf variant (`Alternate`, `Concatenate`, `Reduce`,
/// `Recurrence`) so the memoization/laziness contract is written exactly
/// once. Always succeeds: constructing a `Delayed` wrapper cannot fail, only
/// forcing it later can.
pub(crate) fn memoized_derive<K, V, P>(
    this: Rc<P>,
    memo: &DeriveMemo<K, V>,
    token: &Token<K, V>,
) -> Result<ParserRef<K, V>, ParseError>
where
    K: Copy + Eq + Hash + Debug,
    V: Clone + Eq + Hash + Debug,
    P: Parser<K, V> + 'static,
{
    let key = (token.kind, token.value.clone());
    Ok(memo.get_or_insert_with(key, || {
        let source: ParserRef<K, V> = this;
        Rc::new(Delayed::new(source, token.clone()))
    }))
}

/// An unforced derivative: conceptually `source.step(token)`, computed only
/// once something actually asks this node to derive a token or report its
/// nullability.
///
/// Forcing is idempotent and memoized in `forced`; once forced, further
/// `derive`/`derive_null` calls delegate to the forced node's own memoized
/// operations rather than to its `step`/`step_null`, so laziness is
/// preserved transitively down the chain of derivatives.
pub struct Delayed<K, V> {
    source: ParserRef<K, V>,
    token: Token<K, V>,
    forced: OnceCell<ParserRef<K, V>>,
}

impl<K, V> Delayed<K, V>
where
    K: Copy + Eq + Hash + Debug,
    V: Clone + Eq + Hash + Debug,
{
    pub fn new(source: ParserRef<K, V>, token: Token<K, V>) -> Self {
        Self {
            source,
            token,
            forced: OnceCell::new(),
        }
    }

    /// Force the underlying `step`, caching the result on first success.
    ///
    /// A forcing attempt that fails (an unbound [Recurrence] somewhere
    /// beneath `source`) is not cached — the next access retries rather
    /// than pinning the failure forever, since `step` is pure apart from
    /// this memoization.
    fn force(&self) -> Result<&ParserRef<K, V>, ParseError> {
        self.forced.get_or_try_init(|| self.source.step(&self.token))
    }
}

impl<K, V> Debug for Delayed<K, V>
where
    K: Copy + Eq + Hash + Debug,
    V: Clone + Eq + Hash + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Delayed({:?}, {:?})", self.source, self.token)
    }
}

impl<K, V> Parser<K, V> for Delayed<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    fn step(&self, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        Rc::clone(self.force()?).derive(token)
    }

    fn step_null(&self) -> Result<HashSet<ParseValue<V>>, ParseError> {
        Ok((*self.force()?.derive_null()?).clone())
    }

    fn derive(self: Rc<Self>, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        Rc::clone(self.force()?).derive(token)
    }

    fn derive_null(&self) -> Result<Rc<HashSet<ParseValue<V>>>, ParseError> {
        self.force()?.derive_null()
    }
}
