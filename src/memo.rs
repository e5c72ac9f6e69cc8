use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::error::ParseError;
use crate::parser::ParserRef;
use crate::value::ParseValue;

/// Per-node cache for [Parser::derive](crate::parser::Parser::derive), keyed by
/// token identity.
///
/// `derive` is memoized by `(kind, value)` equality rather than token object
/// identity, since equality is the only notion of "same token" a value type
/// can offer once tokens are plain owned data rather than shared objects.
pub struct DeriveMemo<K, V> {
    cache: RefCell<HashMap<(K, V), ParserRef<K, V>>>,
}

impl<K, V> DeriveMemo<K, V>
where
    K: Eq + Hash + Copy,
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the cached derivative for `key`, computing and storing it via
    /// `make` on a miss.
    pub fn get_or_insert_with(
        &self,
        key: (K, V),
        make: impl FnOnce() -> ParserRef<K, V>,
    ) -> ParserRef<K, V> {
        if let Some(existing) = self.cache.borrow().get(&key) {
            return Rc::clone(existing);
        }
        let computed = make();
        self.cache
            .borrow_mut()
            .insert(key, Rc::clone(&computed));
        computed
    }
}

impl<K, V> Default for DeriveMemo<K, V>
where
    K: Eq + Hash + Copy,
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Per-node cache and fixed-point state for
/// [Parser::derive_null](crate::parser::Parser::derive_null).
///
/// Split into two slots since "absent" and "in progress" need distinct
/// storage: `result` holds the committed fixed point once found;
/// `in_progress` holds the current loop approximation while one is being
/// computed, which is what breaks a re-entrant cycle.
pub struct NullMemo<V> {
    result: OnceCell<Rc<HashSet<ParseValue<V>>>>,
    in_progress: RefCell<Option<Rc<HashSet<ParseValue<V>>>>>,
}

impl<V> NullMemo<V>
where
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            result: OnceCell::new(),
            in_progress: RefCell::new(None),
        }
    }

    /// Evaluate the node's nullability, running `step` to a fixed point.
    ///
    /// `step` is the variant's one-shot nullability rule; it may itself call
    /// back into `derive_null` on this same node (directly, through a cycle
    /// in the grammar) — that re-entrant call observes `in_progress` and
    /// returns the current approximation rather than recursing further.
    ///
    /// A `step` failure (an unbound `Recurrence` somewhere in the graph)
    /// aborts the loop and clears `in_progress` rather than leaving the node
    /// stuck mid-computation, so a later, successful call isn't handed a
    /// stale approximation.
    pub fn get_or_compute(
        &self,
        step: impl Fn() -> Result<HashSet<ParseValue<V>>, ParseError>,
    ) -> Result<Rc<HashSet<ParseValue<V>>>, ParseError> {
        if let Some(final_set) = self.result.get() {
            return Ok(Rc::clone(final_set));
        }
        if let Some(approx) = self.in_progress.borrow().clone() {
            return Ok(approx);
        }

        let mut approx = Rc::new(HashSet::new());
        loop {
            *self.in_progress.borrow_mut() = Some(Rc::clone(&approx));
            let recomputed = match step() {
                Ok(set) => Rc::new(set),
                Err(err) => {
                    *self.in_progress.borrow_mut() = None;
                    return Err(err);
                }
            };
            if recomputed == approx {
                break;
            }
            approx = recomputed;
        }
        *self.in_progress.borrow_mut() = None;
        // A concurrent re-entrant call may have raced us to `result` only if
        // this node were re-entered from another thread, which the single
        // threaded contract of this crate rules out; `set` cannot fail here.
        let _ = self.result.set(Rc::clone(&approx));
        Ok(approx)
    }
}

impl<V> Default for NullMemo<V>
where
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
