//! The parse driver: folds the derivative across a token stream and
//! returns the terminal null set.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use crate::error::ParseError;
use crate::parser::{Parser, ParserRef};
use crate::token::Token;
use crate::util::log::Log;
use crate::value::ParseValue;

/// Feed `tokens` through `root`, one derivative at a time, and return the
/// set of complete parse results accepted at the end of the stream.
///
/// An empty result set means the input was rejected; a result set with
/// more than one element means the grammar is ambiguous on this input —
/// neither is treated as an error here (see the module-level error design
/// notes in [crate::error]). An `Err` means the graph itself is malformed
/// (an unbound [Recurrence](crate::parser::Recurrence) was reached), which
/// only happens if it was assembled by hand rather than through
/// [Grammar](crate::grammar::Grammar)'s validated `build`.
pub fn parse<K, V>(
    root: ParserRef<K, V>,
    tokens: impl IntoIterator<Item = Token<K, V>>,
) -> Result<Rc<HashSet<ParseValue<V>>>, ParseError>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    parse_logged(root, tokens, Log::None)
}

/// As [parse], but logging each derivative step at `debug`'s level when the
/// crate is built with debug assertions enabled, rather than pulling in an
/// external logging crate.
pub fn parse_logged<K, V>(
    root: ParserRef<K, V>,
    tokens: impl IntoIterator<Item = Token<K, V>>,
    debug: Log<&'static str>,
) -> Result<Rc<HashSet<ParseValue<V>>>, ParseError>
where
    K: Copy + Eq + Hash + Debug + 'static,
    V: Clone + Eq + Hash + Debug + 'static,
{
    let mut current = root;
    for (position, token) in tokens.into_iter().enumerate() {
        current = Rc::clone(&current).derive(&token)?;
        debug.log_derive_step(position, &token);
    }
    let results = current.derive_null()?;
    debug.log_result(&results);
    Ok(results)
}
