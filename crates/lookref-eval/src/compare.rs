//! Cross-type ordering and equality for lookup targets.
//!
//! Values fall into comparison classes. Inside a class the usual order
//! applies (numbers numerically, text case-insensitively, errors by a fixed
//! rank); across classes two values are incomparable. The approximate
//! search additionally needs a total order, which ranks the classes
//! `Blank < Numeric < Textual < Error`.

use std::cmp::Ordering;

use lookref_common::{ExcelErrorKind, LiteralValue};

/// Comparison class of a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CmpClass {
    /// Absence marker (blank cell).
    Blank,
    /// Numbers, booleans and date/time serials.
    Numeric,
    Textual,
    Error,
}

/// Result of comparing two values under lookup rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CmpOutcome {
    Less,
    Equal,
    Greater,
    /// Different classes, or an unordered number such as NaN.
    Incomparable,
}

impl From<Ordering> for CmpOutcome {
    fn from(value: Ordering) -> Self {
        match value {
            Ordering::Less => CmpOutcome::Less,
            Ordering::Equal => CmpOutcome::Equal,
            Ordering::Greater => CmpOutcome::Greater,
        }
    }
}

/// Case folding shared by literal comparison and wildcard matching.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// A value reduced to what lookups compare on.
///
/// Text is case-folded once at construction so repeated comparisons during
/// a search stay cheap.
#[derive(Clone, Debug, PartialEq)]
pub enum LookupKey {
    Blank,
    Number(f64),
    Text(String),
    Error(ExcelErrorKind),
}

impl LookupKey {
    pub fn new(value: &LiteralValue) -> Self {
        match value {
            LiteralValue::Empty => LookupKey::Blank,
            LiteralValue::Text(s) => LookupKey::Text(fold_case(s)),
            LiteralValue::Error(e) => LookupKey::Error(e.kind),
            // A nested array has no single value to compare.
            LiteralValue::Array(_) => LookupKey::Error(ExcelErrorKind::Value),
            other => match other.as_serial_number() {
                Some(n) => LookupKey::Number(n),
                None => LookupKey::Error(ExcelErrorKind::Value),
            },
        }
    }

    pub fn class(&self) -> CmpClass {
        match self {
            LookupKey::Blank => CmpClass::Blank,
            LookupKey::Number(_) => CmpClass::Numeric,
            LookupKey::Text(_) => CmpClass::Textual,
            LookupKey::Error(_) => CmpClass::Error,
        }
    }

    /// Class-aware comparison: different classes are `Incomparable`.
    pub fn compare(&self, other: &LookupKey) -> CmpOutcome {
        match (self, other) {
            (LookupKey::Blank, LookupKey::Blank) => CmpOutcome::Equal,
            (LookupKey::Number(a), LookupKey::Number(b)) => {
                a.partial_cmp(b).map_or(CmpOutcome::Incomparable, CmpOutcome::from)
            }
            (LookupKey::Text(a), LookupKey::Text(b)) => a.cmp(b).into(),
            (LookupKey::Error(a), LookupKey::Error(b)) => a.rank().cmp(&b.rank()).into(),
            _ => CmpOutcome::Incomparable,
        }
    }

    /// Total order used by the approximate search: class rank first, then
    /// the in-class order.
    pub fn search_cmp(&self, other: &LookupKey) -> Ordering {
        match (self, other) {
            (LookupKey::Number(a), LookupKey::Number(b)) => a.total_cmp(b),
            _ => match self.compare(other) {
                CmpOutcome::Less => Ordering::Less,
                CmpOutcome::Equal => Ordering::Equal,
                CmpOutcome::Greater => Ordering::Greater,
                CmpOutcome::Incomparable => self.class().cmp(&other.class()),
            },
        }
    }
}

pub fn classify(value: &LiteralValue) -> CmpClass {
    LookupKey::new(value).class()
}

pub fn compare(a: &LiteralValue, b: &LiteralValue) -> CmpOutcome {
    LookupKey::new(a).compare(&LookupKey::new(b))
}

/// Same class and equal within it. Text equality ignores case.
pub fn equals(a: &LiteralValue, b: &LiteralValue) -> bool {
    compare(a, b) == CmpOutcome::Equal
}

pub fn search_order(a: &LiteralValue, b: &LiteralValue) -> Ordering {
    LookupKey::new(a).search_cmp(&LookupKey::new(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lookref_common::ExcelError;

    fn t(s: &str) -> LiteralValue {
        LiteralValue::Text(s.into())
    }

    #[test]
    fn classes() {
        assert_eq!(classify(&LiteralValue::Int(3)), CmpClass::Numeric);
        assert_eq!(classify(&LiteralValue::Boolean(true)), CmpClass::Numeric);
        let d = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(classify(&LiteralValue::Date(d)), CmpClass::Numeric);
        assert_eq!(classify(&t("3")), CmpClass::Textual);
        assert_eq!(classify(&LiteralValue::Empty), CmpClass::Blank);
        assert_eq!(
            classify(&LiteralValue::Error(ExcelError::na())),
            CmpClass::Error
        );
    }

    #[test]
    fn numeric_class_mixes_ints_floats_and_booleans() {
        assert_eq!(
            compare(&LiteralValue::Int(2), &LiteralValue::Number(2.0)),
            CmpOutcome::Equal
        );
        assert_eq!(
            compare(&LiteralValue::Boolean(false), &LiteralValue::Boolean(true)),
            CmpOutcome::Less
        );
        assert!(equals(&LiteralValue::Boolean(true), &LiteralValue::Int(1)));
    }

    #[test]
    fn text_is_case_insensitive() {
        assert!(equals(&t("Apple"), &t("aPPLE")));
        assert_eq!(compare(&t("apple"), &t("Banana")), CmpOutcome::Less);
    }

    #[test]
    fn cross_class_is_incomparable() {
        assert_eq!(compare(&t("1"), &LiteralValue::Int(1)), CmpOutcome::Incomparable);
        assert!(!equals(&t("1"), &LiteralValue::Int(1)));
        assert_eq!(
            compare(&LiteralValue::Empty, &LiteralValue::Int(0)),
            CmpOutcome::Incomparable
        );
        assert_eq!(
            compare(&LiteralValue::Number(f64::NAN), &LiteralValue::Number(1.0)),
            CmpOutcome::Incomparable
        );
    }

    #[test]
    fn errors_equal_only_to_themselves() {
        let na = LiteralValue::Error(ExcelError::na());
        let re = LiteralValue::Error(ExcelError::reference());
        assert!(equals(&na, &na.clone()));
        assert!(!equals(&na, &re));
        assert_eq!(compare(&re, &na), CmpOutcome::Less);
    }

    #[test]
    fn search_order_ranks_classes() {
        let ordered = [
            LiteralValue::Empty,
            LiteralValue::Int(-5),
            LiteralValue::Boolean(true),
            LiteralValue::Number(1e9),
            t("A"),
            t("z"),
            LiteralValue::Error(ExcelError::na()),
        ];
        for w in ordered.windows(2) {
            assert_ne!(search_order(&w[0], &w[1]), Ordering::Greater, "{w:?}");
        }
        assert_eq!(search_order(&t("b"), &LiteralValue::Int(100)), Ordering::Greater);
    }
}
