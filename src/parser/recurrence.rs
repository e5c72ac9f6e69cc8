use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::error::ParseError;
use crate::memo::{DeriveMemo, NullMemo};
use crate::parser::{memoized_derive, Alternate, Concatenate, Epsilon, Parser, ParserRef};
use crate::token::Token;
use crate::value::ParseValue;

/// A forward reference used to close cycles in the parser graph.
///
/// `target` is write-once: it must be assigned before the recurrence takes
/// part in any derivation. [Grammar](crate::grammar::Grammar) is the
/// intended way to construct and bind these; the bare constructors here
/// exist for composing `+`/`~`-style repetition, which self-references a
/// fresh `Recurrence` directly (see [one_or_more]).
pub struct Recurrence<K, V> {
    name: Option<&'static str>,
    target: OnceCell<ParserRef<K, V>>,
    derive_memo: DeriveMemo<K, V>,
    null_memo: NullMemo<V>,
}

impl<K, V> Recurrence<K, V>
where
    K: Copy + Eq + Hash + Debug,
    V: Clone + Eq + Hash + Debug,
{
    pub fn new(name: Option<&'static str>) -> Self {
        Self {
            name,
            target: OnceCell::new(),
            derive_memo: DeriveMemo::new(),
            null_memo: NullMemo::new(),
        }
    }

    /// Assign the target this recurrence stands in for. Fails if a target
    /// has already been assigned.
    pub fn bind(&self, target: ParserRef<K, V>) -> Result<(), ParseError> {
        self.target
            .set(target)
            .map_err(|_| ParseError::RuleAlreadyBound(self.name.unwrap_or("<anonymous>")))
    }

    pub fn is_bound(&self) -> bool {
        self.target.get().is_some()
    }

    fn target(&self) -> Result<&ParserRef<K, V>, ParseError> {
        self.target
            .get()
            .ok_or(ParseError::UnboundRecurrence(self.name.unwrap_or("<anonymous>")))
    }
}

impl<K: Debug, V: Debug> Debug for Recurrence<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Recurrence({})", self.name.unwrap_or("<anonymous>"))
    }
}

impl<K, V> Parser<K, V> for Recurrence<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    fn step(&self, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        let target = self.target()?;
        Rc::clone(target).derive(token)
    }

    fn step_null(&self) -> Result<HashSet<ParseValue<V>>, ParseError> {
        let target = self.target()?;
        Ok((*target.derive_null()?).clone())
    }

    fn derive(self: Rc<Self>, token: &Token<K, V>) -> Result<ParserRef<K, V>, ParseError> {
        let cloned = Rc::clone(&self);
        memoized_derive(cloned, &self.derive_memo, token)
    }

    fn derive_null(&self) -> Result<Rc<HashSet<ParseValue<V>>>, ParseError> {
        self.null_memo.get_or_compute(|| self.step_null())
    }
}

/// `+parser`: one-or-more repetition.
///
/// Builds `Alternate(epsilon, Concatenate(r, parser))` where `r` is a fresh
/// [Recurrence] bound to itself — `r`'s own target is the `Alternate` node
/// being constructed, closing the cycle symmetrically whether `parser`
/// itself is left- or right-recursive.
pub fn one_or_more<K, V>(parser: ParserRef<K, V>, epsilon_value: V) -> ParserRef<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    let recurrence = Rc::new(Recurrence::new(None));
    let body: ParserRef<K, V> = Rc::new(Alternate::new(
        Rc::new(Epsilon::new(epsilon_value)),
        Rc::new(Concatenate::new(recurrence.clone(), parser)),
    ));
    recurrence
        .bind(Rc::clone(&body))
        .expect("freshly constructed recurrence cannot already be bound");
    body
}

/// `~parser`: optional (zero-or-one).
pub fn optional<K, V>(parser: ParserRef<K, V>, epsilon_value: V) -> ParserRef<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    Rc::new(Alternate::new(Rc::new(Epsilon::new(epsilon_value)), parser))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Terminal;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        One,
    }

    #[test]
    fn unbound_recurrence_reports_by_name() {
        let recurrence: Recurrence<Kind, &'static str> = Recurrence::new(Some("expr"));
        let err = recurrence.target().unwrap_err();
        assert_eq!(err, ParseError::UnboundRecurrence("expr"));
    }

    #[test]
    fn one_or_more_accepts_any_nonzero_repeat_count() {
        let terminal: ParserRef<Kind, &'static str> = Rc::new(Terminal::new(Kind::One));
        let grammar = one_or_more(terminal, "");

        let tokens = [
            Token::new(Kind::One, "a"),
            Token::new(Kind::One, "b"),
            Token::new(Kind::One, "c"),
        ];
        let mut current = grammar;
        for token in &tokens {
            current = Rc::clone(&current).derive(token).unwrap();
        }
        assert_eq!(current.derive_null().unwrap().len(), 1);
    }
}
