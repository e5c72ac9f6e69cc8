//! A leveled, `cfg(debug_assertions)`-gated debug logger.
//!
//! `Log<T>` is ordered by variant so a caller can ask for "this level or
//! more verbose". Tracing individual derivative steps is an observability
//! concern for whoever is debugging a grammar, not a parsing feature, so
//! it stays a small `println!`-based facility scoped to debug builds
//! rather than pulling in a logging framework.

use std::collections::HashSet;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

use crate::token::Token;
use crate::value::ParseValue;

/// A debug log level, carrying an optional label.
///
/// `None` disables logging entirely (the default used by
/// [parse](crate::driver::parse)); the remaining variants are ordered by
/// verbosity via [Log::order].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Log<T> {
    None,
    Default(T),
    Success(T),
    Result(T),
    Verbose(T),
}

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Default(s) | Log::Success(s) | Log::Result(s) | Log::Verbose(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

const RESULT_ORDER: u8 = 3;
const VERBOSE_ORDER: u8 = 4;

impl<T> Log<T> {
    /// Relative verbosity of this level; higher means more chatty.
    fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Success(_) => 2,
            Log::Result(_) => 3,
            Log::Verbose(_) => 4,
        }
    }
}

impl<T: Display> Log<T> {
    /// Logs one `derive` step of the parse driver's fold. Only emitted at
    /// [Log::Verbose] or above, since a long token stream produces one of
    /// these per token.
    pub fn log_derive_step<K, V>(&self, position: usize, token: &Token<K, V>)
    where
        K: Debug,
        V: Debug,
    {
        #[cfg(debug_assertions)]
        if self.order() >= VERBOSE_ORDER {
            println!("[{}] derive #{}: {:?}", self, position, token);
        }
    }

    /// Logs the final null set the driver read off the folded parser.
    /// Emitted at [Log::Result] or above.
    pub fn log_result<V>(&self, results: &HashSet<ParseValue<V>>)
    where
        V: Eq + Hash + Debug,
    {
        #[cfg(debug_assertions)]
        if self.order() >= RESULT_ORDER {
            println!("[{}] {} result(s): {:?}", self, results.len(), results);
        }
    }
}
