use std::fmt::{Display, Formatter};

/// An error raised while building a [Grammar](crate::grammar::Grammar),
/// before any derivation is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarError {
    /// A rule name was referenced (via
    /// [Grammar::rule](crate::grammar::Grammar::rule)) but never
    /// [defined](crate::grammar::Grammar::define) before
    /// [Grammar::build](crate::grammar::Grammar::build) was called.
    UnboundGrammarRule(&'static str),
    /// [Grammar::define](crate::grammar::Grammar::define) was called twice
    /// for the same rule name.
    RuleAlreadyDefined(&'static str),
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::UnboundGrammarRule(name) => {
                write!(f, "GrammarError: rule '{}' is referenced but never defined.", name)
            }
            GrammarError::RuleAlreadyDefined(name) => {
                write!(f, "GrammarError: rule '{}' is already defined.", name)
            }
        }
    }
}

/// An error raised while parsing, or while constructing the parser graph by
/// hand rather than through [Grammar](crate::grammar::Grammar).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A [Recurrence](crate::parser::Recurrence)'s target was read before
    /// [Recurrence::bind](crate::parser::Recurrence::bind) assigned one.
    UnboundRecurrence(&'static str),
    /// [Recurrence::bind](crate::parser::Recurrence::bind) was called twice
    /// on the same recurrence.
    RuleAlreadyBound(&'static str),
    /// A caller-supplied token did not belong to the alphabet the grammar
    /// was built to recognize. Present for interface completeness; the
    /// typed [parse](crate::driver::parse) entry point cannot produce it.
    InvalidToken,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnboundRecurrence(name) => {
                write!(f, "ParseError: recurrence '{}' has no bound target.", name)
            }
            ParseError::RuleAlreadyBound(name) => {
                write!(f, "ParseError: recurrence '{}' is already bound.", name)
            }
            ParseError::InvalidToken => write!(f, "ParseError: invalid token."),
        }
    }
}
