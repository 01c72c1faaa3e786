//! Four-valued analysis verdicts
//!
//! Classification queries never collapse to a plain bool: a symbol can be
//! injected on one path and freshly created on another, or the declaring
//! syntax can be unavailable altogether. `Verdict` keeps the conservative
//! default auditable:
//! - `Yes` / `No` are confident answers
//! - `Maybe` means the answer is path-dependent
//! - `Unknown` means there was not enough information to decide
//!
//! Combination rules:
//! - Disagreement where either side is `Yes` escalates to `Maybe`; a `Yes`
//!   is never silently dropped.
//! - An empty vote set folds to `No` (nothing found, vacuously false).
//! - `Unknown` contributes no information to a fold unless every vote is
//!   `Unknown`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a classification query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Confident positive
    Yes,
    /// Confident negative
    No,
    /// Some path says yes, some says no
    Maybe,
    /// Insufficient information (e.g. external declaring syntax)
    Unknown,
}

impl Verdict {
    /// Combine two verdicts about the same question.
    ///
    /// Agreement is preserved, disagreement between `Yes` and `No`
    /// escalates to `Maybe`, and `Unknown` defers to the other side.
    pub fn or(self, other: Verdict) -> Verdict {
        use Verdict::*;
        match (self, other) {
            (a, b) if a == b => a,
            (Unknown, b) => b,
            (a, Unknown) => a,
            (Maybe, _) | (_, Maybe) => Maybe,
            // Yes vs No in either order
            _ => Maybe,
        }
    }

    /// Membership check used by rule layers (`Unknown` matches only itself).
    pub fn is_either(self, a: Verdict, b: Verdict) -> bool {
        self == a || self == b
    }

    /// Fold a vote per discovered value root into one answer.
    ///
    /// No votes at all collapse to `No`: a symbol with no discovered value
    /// sources is vacuously not injected.
    pub fn from_votes<I>(votes: I) -> Verdict
    where
        I: IntoIterator<Item = Verdict>,
    {
        let mut acc: Option<Verdict> = None;
        for vote in votes {
            acc = Some(match acc {
                None => vote,
                Some(prev) => prev.or(vote),
            });
        }
        acc.unwrap_or(Verdict::No)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Yes => "yes",
            Verdict::No => "no",
            Verdict::Maybe => "maybe",
            Verdict::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
