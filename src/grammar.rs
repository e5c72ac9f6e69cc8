//! Named-binding grammar construction with forward references.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use crate::combinator::P;
use crate::error::GrammarError;
use crate::parser::{ParserRef, Recurrence};

/// A named collection of grammar rules.
///
/// Every rule name is backed by a [Recurrence], created lazily the first
/// time it is referenced (via [rule](Grammar::rule)) or defined (via
/// [define](Grammar::define)). This lets a rule reference another rule that
/// has not been written yet — the reference resolves once
/// [define](Grammar::define) is eventually called for that name — and
/// keeps resolution uniform: every named rule goes through the same
/// indirection whether or not it turns out to need one.
pub struct Grammar<K, V> {
    name: &'static str,
    rules: RefCell<HashMap<&'static str, Rc<Recurrence<K, V>>>>,
}

impl<K, V> Grammar<K, V>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: RefCell::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn recurrence_for(&self, name: &'static str) -> Rc<Recurrence<K, V>> {
        let mut rules = self.rules.borrow_mut();
        Rc::clone(
            rules
                .entry(name)
                .or_insert_with(|| Rc::new(Recurrence::new(Some(name)))),
        )
    }

    /// Reference a rule by name, creating its placeholder [Recurrence] if
    /// this is the first reference to it.
    pub fn rule(&self, name: &'static str) -> P<K, V> {
        let recurrence = self.recurrence_for(name);
        P::from(recurrence as ParserRef<K, V>)
    }

    /// Bind `parser` as the definition of `name`. Fails if `name` was
    /// already defined.
    pub fn define(&self, name: &'static str, parser: P<K, V>) -> Result<(), GrammarError> {
        let recurrence = self.recurrence_for(name);
        recurrence
            .bind(parser.into_ref())
            .map_err(|_| GrammarError::RuleAlreadyDefined(name))
    }

    /// Validate that every referenced rule has been defined, then return
    /// the parser graph rooted at `root`.
    pub fn build(&self, root: &'static str) -> Result<ParserRef<K, V>, GrammarError> {
        let rules = self.rules.borrow();
        for (name, recurrence) in rules.iter() {
            if !recurrence.is_bound() {
                return Err(GrammarError::UnboundGrammarRule(name));
            }
        }
        let root_recurrence = rules
            .get(root)
            .ok_or(GrammarError::UnboundGrammarRule(root))?;
        Ok(Rc::clone(root_recurrence) as ParserRef<K, V>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::terminal;
    use crate::parser::Parser;
    use crate::token::Token;
    use crate::value::ParseValue;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        One,
    }

    #[test]
    fn build_fails_when_a_referenced_rule_is_never_defined() {
        let grammar: Grammar<Kind, &'static str> = Grammar::new("g");
        let _unresolved = grammar.rule("never_defined");
        let err = grammar.build("never_defined").unwrap_err();
        assert_eq!(err, GrammarError::UnboundGrammarRule("never_defined"));
    }

    #[test]
    fn defining_a_rule_twice_is_an_error() {
        let grammar: Grammar<Kind, &'static str> = Grammar::new("g");
        grammar.define("s", terminal(Kind::One)).unwrap();
        let err = grammar.define("s", terminal(Kind::One)).unwrap_err();
        assert_eq!(err, GrammarError::RuleAlreadyDefined("s"));
    }

    #[test]
    fn left_recursive_rule_accepts_any_finite_repeat_of_its_tail() {
        // S ::= epsilon | S '1'
        let grammar: Grammar<Kind, &'static str> = Grammar::new("g");
        let s = grammar.rule("s");
        grammar
            .define("s", crate::combinator::epsilon("") | (s & terminal(Kind::One)))
            .unwrap();
        let root = grammar.build("s").unwrap();

        let tokens = [
            Token::new(Kind::One, "1"),
            Token::new(Kind::One, "1"),
            Token::new(Kind::One, "1"),
        ];
        let mut current = root;
        for token in &tokens {
            current = Rc::clone(&current).derive(token).unwrap();
        }
        let results = current.derive_null().unwrap();
        assert_eq!(results.len(), 1);
        assert!(results.iter().all(|v| matches!(v, ParseValue::Pair(_, _))));
    }
}
