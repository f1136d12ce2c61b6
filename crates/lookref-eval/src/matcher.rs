//! Positional search of a target inside a sequence.
//!
//! Three disciplines, all reporting 1-based positions:
//! - **exact**: first element of the target's class equal to it, or
//!   matching its wildcard pattern
//! - **ascending**: last element `<=` the target in sorted data
//! - **descending**: last element `>=` the target in reverse-sorted data
//!
//! Not-found is `None`; callers turn it into `#N/A`.

use std::cmp::Ordering;
use std::sync::Arc;

use lookref_common::LiteralValue;

use crate::compare::{CmpClass, CmpOutcome, LookupKey};
use crate::config::EvalConfig;
use crate::wildcard::{self, WildcardPattern};

static EMPTY: LiteralValue = LiteralValue::Empty;

/// Search discipline selected by a host `match_type` argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatchMode {
    Exact,
    Ascending,
    Descending,
}

impl MatchMode {
    /// `> 0` ascending, `0` exact, `< 0` descending.
    pub fn from_match_type(match_type: f64) -> Self {
        if match_type > 0.0 {
            MatchMode::Ascending
        } else if match_type < 0.0 {
            MatchMode::Descending
        } else {
            MatchMode::Exact
        }
    }

    /// VLOOKUP/HLOOKUP `range_lookup` flag.
    pub fn from_approximate(approximate: bool) -> Self {
        if approximate {
            MatchMode::Ascending
        } else {
            MatchMode::Exact
        }
    }
}

/// How exact mode decides equality. Chosen once per call.
#[derive(Clone, Debug)]
pub enum ExactStrategy {
    Literal,
    Wildcard(Arc<WildcardPattern>),
}

impl ExactStrategy {
    pub fn select(target: &LiteralValue, config: &EvalConfig) -> Self {
        let LiteralValue::Text(text) = target else {
            return ExactStrategy::Literal;
        };
        if !config.wildcards || !wildcard::has_wildcards(text) {
            return ExactStrategy::Literal;
        }
        let compiled = if config.wildcard_cache {
            wildcard::compile_cached(text)
        } else {
            wildcard::compile(text).map(Arc::new)
        };
        match compiled {
            Ok(re) => ExactStrategy::Wildcard(re),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(pattern = %text, error = %_err, "wildcard rejected; literal match");
                ExactStrategy::Literal
            }
        }
    }
}

/// Read access to a sequence of values by 0-based position.
pub trait LookupVector {
    fn len(&self) -> usize;
    fn get(&self, index: usize) -> &LiteralValue;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LookupVector for [LiteralValue] {
    fn len(&self) -> usize {
        <[LiteralValue]>::len(self)
    }

    fn get(&self, index: usize) -> &LiteralValue {
        &self[index]
    }
}

impl LookupVector for Vec<LiteralValue> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> &LiteralValue {
        &self[index]
    }
}

/// One column of a row-major grid. Short rows read as blank.
#[derive(Copy, Clone, Debug)]
pub struct ColumnView<'a> {
    grid: &'a [Vec<LiteralValue>],
    col: usize,
}

impl<'a> ColumnView<'a> {
    pub fn new(grid: &'a [Vec<LiteralValue>], col: usize) -> Self {
        Self { grid, col }
    }
}

impl LookupVector for ColumnView<'_> {
    fn len(&self) -> usize {
        self.grid.len()
    }

    fn get(&self, index: usize) -> &LiteralValue {
        self.grid[index].as_slice().get(self.col).unwrap_or(&EMPTY)
    }
}

/// A target prepared for repeated searching.
#[derive(Clone, Debug)]
pub struct Matcher {
    key: LookupKey,
    mode: MatchMode,
    strategy: ExactStrategy,
}

impl Matcher {
    pub fn new(target: &LiteralValue, mode: MatchMode, config: &EvalConfig) -> Self {
        let strategy = match mode {
            MatchMode::Exact => ExactStrategy::select(target, config),
            _ => ExactStrategy::Literal,
        };
        Self::with_strategy(target, mode, strategy)
    }

    pub fn with_strategy(target: &LiteralValue, mode: MatchMode, strategy: ExactStrategy) -> Self {
        Self {
            key: LookupKey::new(target),
            mode,
            strategy,
        }
    }

    /// 1-based position of the match, or `None`.
    pub fn find<V: LookupVector + ?Sized>(&self, seq: &V) -> Option<usize> {
        // Blank and error targets never match.
        if matches!(self.key.class(), CmpClass::Blank | CmpClass::Error) {
            return None;
        }
        match self.mode {
            MatchMode::Exact => self.find_exact(seq),
            MatchMode::Ascending => self.find_ascending(seq),
            MatchMode::Descending => self.find_descending(seq),
        }
    }

    fn find_exact<V: LookupVector + ?Sized>(&self, seq: &V) -> Option<usize> {
        let hit = match &self.strategy {
            ExactStrategy::Wildcard(re) => (0..seq.len()).find(|&i| match seq.get(i) {
                LiteralValue::Text(s) => re.is_match(s),
                _ => false,
            }),
            ExactStrategy::Literal => (0..seq.len())
                .find(|&i| LookupKey::new(seq.get(i)).compare(&self.key) == CmpOutcome::Equal),
        };
        hit.map(|i| i + 1)
    }

    fn find_ascending<V: LookupVector + ?Sized>(&self, seq: &V) -> Option<usize> {
        let not_blank = |i: &usize| !seq.get(*i).is_empty();
        let start = (0..seq.len()).find(not_blank)?;
        let end = (0..seq.len()).rev().find(not_blank)? + 1;

        // bisect-right over [start, end)
        let (mut lo, mut hi) = (start, end);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if LookupKey::new(seq.get(mid)).search_cmp(&self.key) == Ordering::Greater {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(start, end, insertion = lo, "ascending search window");

        let target_class = self.key.class();
        let mut candidate = lo.checked_sub(1)?;
        while candidate >= start {
            match LookupKey::new(seq.get(candidate)).class() {
                class if class == target_class => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(candidate, "ascending candidate");
                    return Some(candidate + 1);
                }
                // An interior blank stands in for a number: it ends a numeric walk.
                CmpClass::Blank if target_class == CmpClass::Numeric => return None,
                _ => {}
            }
            candidate = candidate.checked_sub(1)?;
        }
        None
    }

    fn find_descending<V: LookupVector + ?Sized>(&self, seq: &V) -> Option<usize> {
        let mut found = None;
        for i in 0..seq.len() {
            match LookupKey::new(seq.get(i)).compare(&self.key) {
                CmpOutcome::Incomparable => continue,
                CmpOutcome::Less => break,
                CmpOutcome::Equal => {
                    found = Some(i + 1);
                    break;
                }
                CmpOutcome::Greater => found = Some(i + 1),
            }
        }
        found
    }
}

/// One-shot search; see [`Matcher`].
pub fn find<V: LookupVector + ?Sized>(
    target: &LiteralValue,
    seq: &V,
    mode: MatchMode,
    config: &EvalConfig,
) -> Option<usize> {
    Matcher::new(target, mode, config).find(seq)
}
