//! Property tests for filter and clamping invariants.
//!
//! Uses proptest to verify:
//! 1. `apply` is a stable subsequence of its input and leaves the input untouched
//! 2. `apply` is idempotent and agrees with the per-row predicate
//! 3. RSI bounds stay ordered and in range after any mutation sequence
//! 4. Limit always lands in [1, 50]
//! 5. Symbol normalization is idempotent and yields unique uppercase tokens

use proptest::prelude::*;
use signalradar_core::domain::{tags, Limit, SignalRow};
use signalradar_core::filter::{apply, FilterCriteria};
use signalradar_core::symbols::{normalize_symbols, symbols_param};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_tags() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(
        vec![
            tags::BULLISH_MOMENTUM,
            tags::STRONG_UPTREND,
            tags::ABOVE_MA50,
            tags::OVERSOLD,
        ],
        0..=4,
    )
    .prop_map(|v| v.into_iter().map(String::from).collect())
}

fn arb_row() -> impl Strategy<Value = SignalRow> {
    ("[A-Z]{1,5}", -20.0..120.0_f64, 0.0..100.0_f64, arb_tags()).prop_map(
        |(ticker, score, rsi, tags)| SignalRow {
            score,
            rsi,
            tags,
            ..SignalRow::new(ticker)
        },
    )
}

fn arb_rows() -> impl Strategy<Value = Vec<SignalRow>> {
    prop::collection::vec(arb_row(), 0..40)
}

#[derive(Debug, Clone)]
enum Mutation {
    MinScore(f64),
    RsiMin(f64),
    RsiMax(f64),
    Bullish,
    Uptrend,
    Reset,
}

fn arb_mutation() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        (-50.0..150.0_f64).prop_map(Mutation::MinScore),
        (-50.0..150.0_f64).prop_map(Mutation::RsiMin),
        (-50.0..150.0_f64).prop_map(Mutation::RsiMax),
        Just(Mutation::RsiMin(f64::NAN)),
        Just(Mutation::RsiMax(f64::INFINITY)),
        Just(Mutation::Bullish),
        Just(Mutation::Uptrend),
        Just(Mutation::Reset),
    ]
}

fn apply_mutation(criteria: &mut FilterCriteria, m: &Mutation) {
    match *m {
        Mutation::MinScore(v) => criteria.set_min_score(v),
        Mutation::RsiMin(v) => criteria.set_rsi_min(v),
        Mutation::RsiMax(v) => criteria.set_rsi_max(v),
        Mutation::Bullish => criteria.toggle_bullish(),
        Mutation::Uptrend => criteria.toggle_uptrend(),
        Mutation::Reset => criteria.reset(),
    }
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    prop::collection::vec(arb_mutation(), 0..8).prop_map(|ms| {
        let mut c = FilterCriteria::default();
        for m in &ms {
            apply_mutation(&mut c, m);
        }
        c
    })
}

// ── 1-2. Filter engine ───────────────────────────────────────────────

proptest! {
    /// Output is a subsequence of the input, in the same order.
    #[test]
    fn apply_is_stable_subsequence(rows in arb_rows(), criteria in arb_criteria()) {
        let before = rows.clone();
        let out = apply(&rows, &criteria);

        prop_assert_eq!(&rows, &before);
        prop_assert!(out.len() <= rows.len());

        let mut it = rows.iter();
        for kept in &out {
            prop_assert!(it.any(|r| r == kept), "row out of order: {}", kept.ticker);
        }
    }

    /// Filtering twice changes nothing; every kept row matches, every dropped one doesn't.
    #[test]
    fn apply_is_idempotent_and_exact(rows in arb_rows(), criteria in arb_criteria()) {
        let once = apply(&rows, &criteria);
        let twice = apply(&once, &criteria);
        prop_assert_eq!(&once, &twice);

        let expected = rows.iter().filter(|r| criteria.matches(r)).count();
        prop_assert_eq!(once.len(), expected);
    }

    /// Default criteria keep every row with a non-negative score.
    #[test]
    fn default_criteria_keep_nonnegative_scores(rows in arb_rows()) {
        let out = apply(&rows, &FilterCriteria::default());
        let expected = rows.iter().filter(|r| r.score >= 0.0).count();
        prop_assert_eq!(out.len(), expected);
    }
}

// ── 3-4. Clamp invariants ────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_bounds_hold_after_every_mutation(ms in prop::collection::vec(arb_mutation(), 1..30)) {
        let mut c = FilterCriteria::default();
        for m in &ms {
            apply_mutation(&mut c, m);
            prop_assert!(c.rsi_min() >= 0.0);
            prop_assert!(c.rsi_max() <= 100.0);
            prop_assert!(c.rsi_min() <= c.rsi_max(), "{:?} after {:?}", c, m);
            prop_assert!(c.min_score().is_finite());
        }
    }

    #[test]
    fn limit_is_always_in_range(n in any::<i64>(), delta in -100i64..100) {
        let limit = Limit::new(n);
        prop_assert!((Limit::MIN..=Limit::MAX).contains(&limit.get()));
        let stepped = limit.offset(delta);
        prop_assert!((Limit::MIN..=Limit::MAX).contains(&stepped.get()));
    }
}

// ── 5. Symbol normalization ──────────────────────────────────────────

proptest! {
    #[test]
    fn normalized_symbols_are_unique_uppercase(input in "[a-zA-Z0-9 ,.\t-]{0,60}") {
        let symbols = normalize_symbols(&input);
        for s in &symbols {
            prop_assert!(!s.is_empty());
            prop_assert_eq!(s, &s.to_uppercase());
            prop_assert!(!s.contains(',') && !s.contains(char::is_whitespace));
        }
        let mut sorted = symbols.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), symbols.len());

        let param = symbols_param(&input);
        prop_assert_eq!(param.is_none(), symbols.is_empty());
        if let Some(p) = param {
            prop_assert_eq!(normalize_symbols(&p), symbols);
        }
    }
}
