use proptest::prelude::*;

use crate::builtins::reference_fns::{address, indirect, offset};
use crate::config::EvalConfig;
use crate::matcher::{MatchMode, find};
use crate::wildcard;
use lookref_common::{
    CellAddress, GridCoord, LiteralValue, MAX_COL, MAX_ROW, RangeAddress, Reference,
};

fn sorted_ints() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-20i64..20, 1..40).prop_map(|mut v| {
        v.sort();
        v
    })
}

fn ints(v: &[i64]) -> Vec<LiteralValue> {
    v.iter().copied().map(LiteralValue::Int).collect()
}

fn any_reference() -> impl Strategy<Value = Reference> {
    (1i64..=200, 1i64..=60, 1i64..=5, 1i64..=5).prop_map(|(r, c, h, w)| {
        let tl = GridCoord::try_new(r, c).unwrap();
        if h == 1 && w == 1 {
            Reference::Cell(CellAddress::new(Some("S".into()), tl))
        } else {
            let br = GridCoord::try_new(r + h - 1, c + w - 1).unwrap();
            Reference::Range(RangeAddress::new(Some("S".into()), tl, br).unwrap())
        }
    })
}

proptest! {
    #[test]
    fn ascending_match_is_last_not_greater(seq in sorted_ints(), target in -25i64..25) {
        let cfg = EvalConfig::default();
        let got = find(&LiteralValue::Int(target), &ints(&seq), MatchMode::Ascending, &cfg);
        let expected = seq.iter().rposition(|&x| x <= target).map(|i| i + 1);
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn descending_match_is_smallest_not_smaller(seq in sorted_ints(), target in -25i64..25) {
        let cfg = EvalConfig::default();
        let desc: Vec<i64> = seq.iter().rev().copied().collect();
        let got = find(&LiteralValue::Int(target), &ints(&desc), MatchMode::Descending, &cfg);
        let expected = desc
            .iter()
            .position(|&x| x == target)
            .or_else(|| desc.iter().rposition(|&x| x > target))
            .map(|i| i + 1);
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn exact_match_is_first_occurrence(seq in prop::collection::vec(0i64..6, 0..30), target in 0i64..6) {
        let cfg = EvalConfig::default();
        let got = find(&LiteralValue::Int(target), &ints(&seq), MatchMode::Exact, &cfg);
        prop_assert_eq!(got, seq.iter().position(|&x| x == target).map(|i| i + 1));
    }

    #[test]
    fn address_text_resolves_back(
        row in 1i64..=MAX_ROW as i64,
        col in 1i64..=MAX_COL as i64,
        abs in 1i64..=4,
    ) {
        let cfg = EvalConfig::default();
        let text = address(row, col, abs, true, Some("Data sheet")).unwrap();
        let back = indirect(&text, true, "Other", None, &cfg).unwrap();
        let expected = CellAddress::try_new(Some("Data sheet"), row, col).unwrap();
        prop_assert_eq!(back, Reference::Cell(expected));

        let r1c1 = address(row, col, 1, false, None).unwrap();
        let back = indirect(&r1c1, false, "Other", None, &cfg).unwrap();
        prop_assert_eq!(back.top_left(), GridCoord::try_new(row, col).unwrap());
    }

    #[test]
    fn offset_by_nothing_is_identity(base in any_reference()) {
        let same = offset(&base, 0, 0, Some(base.height() as i64), Some(base.width() as i64));
        prop_assert_eq!(same.as_ref(), Ok(&base));
        prop_assert_eq!(offset(&base, 0, 0, None, None), Ok(base));
    }

    #[test]
    fn offset_results_stay_on_grid(
        base in any_reference(),
        dr in -300i64..300,
        dc in -100i64..100,
        h in -2i64..8,
        w in -2i64..8,
    ) {
        match offset(&base, dr, dc, Some(h), Some(w)) {
            Ok(r) => {
                let tl = r.top_left();
                prop_assert_eq!(tl.row() as i64, base.top_left().row() as i64 + dr);
                prop_assert_eq!(tl.col() as i64, base.top_left().col() as i64 + dc);
                prop_assert_eq!((r.height() as i64, r.width() as i64), (h, w));
            }
            Err(e) => {
                prop_assert_eq!(e.kind, lookref_common::ExcelErrorKind::Ref);
                let top = base.top_left().row() as i64 + dr;
                let left = base.top_left().col() as i64 + dc;
                prop_assert!(h <= 0 || w <= 0 || top < 1 || left < 1);
            }
        }
    }

    #[test]
    fn plain_patterns_match_only_themselves(a in "[a-zA-Z0-9 .]{0,12}", b in "[a-zA-Z0-9 .]{0,12}") {
        let re = wildcard::compile(&a).unwrap();
        prop_assert!(re.is_match(&a.to_uppercase()));
        prop_assert_eq!(re.is_match(&b), a.to_lowercase() == b.to_lowercase());
    }

    #[test]
    fn star_matches_any_suffix(prefix in "[a-z]{0,6}", rest in "\\PC{0,10}") {
        let re = wildcard::compile(&format!("{prefix}*")).unwrap();
        let text = format!("{prefix}{rest}");
        prop_assert!(re.is_match(&text));
    }
}
