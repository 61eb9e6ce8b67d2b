// tests/normalize_invariants.rs
//
// Invariant sweep for the weight normalizer: exact-100 sum, band bounds,
// order preservation, and the documented identities, over both handpicked
// and randomized inputs.

use rand::Rng;

use hypothesis_skew_engine::{distribute, normalize, Bands, RawScore};

fn ints(points: &[i32]) -> Vec<RawScore> {
    points.iter().map(|&p| RawScore::Int(p)).collect()
}

#[test]
fn empty_identity() {
    assert!(normalize(&[]).is_empty());
}

#[test]
fn single_item_identity() {
    for p in [0, 1, 50, 95, 10_000] {
        assert_eq!(normalize(&ints(&[p])), vec![100]);
    }
}

#[test]
fn two_item_scenario_sums_and_stays_in_band() {
    let w = normalize(&ints(&[60, 40]));
    assert_eq!(w.iter().sum::<i32>(), 100);
    assert!(w.iter().all(|&x| (5..=80).contains(&x)));
}

#[test]
fn dominant_score_scenario_respects_the_ceiling() {
    let w = normalize(&ints(&[95, 5, 5, 5]));
    assert_eq!(w.iter().sum::<i32>(), 100);
    assert!(w.iter().all(|&x| x <= 80), "ceiling breached: {w:?}");
    assert!(w.iter().all(|&x| x >= 5), "floor breached: {w:?}");
}

#[test]
fn all_zero_scenario_floors_out() {
    let w = normalize(&ints(&[0, 0, 0]));
    assert!(w.iter().all(|&x| x >= 5));
    let sum: i32 = w.iter().sum();
    assert!((99..=101).contains(&sum), "sum out of tolerance: {sum}");
}

#[test]
fn strictly_decreasing_scores_never_invert() {
    for scores in [
        vec![90, 70, 50, 30],
        vec![80, 60, 40, 20],
        vec![75, 50, 25],
        vec![60, 40],
    ] {
        let w = normalize(&ints(&scores));
        for pair in w.windows(2) {
            assert!(
                pair[0] >= pair[1],
                "rank inversion for {scores:?}: {w:?}"
            );
        }
    }
}

#[test]
fn numeric_strings_normalize_like_numbers() {
    let from_strings = normalize(&[RawScore::from("60"), RawScore::from("40%")]);
    let from_ints = normalize(&ints(&[60, 40]));
    assert_eq!(from_strings, from_ints);
}

#[test]
fn junk_scores_degrade_to_zero_not_errors() {
    let w = normalize(&[
        RawScore::from("n/a"),
        RawScore::Int(50),
        RawScore::from(""),
    ]);
    assert_eq!(w.len(), 3);
    assert_eq!(w.iter().sum::<i32>(), 100);
    assert!(w.iter().all(|&x| x >= 5));
}

#[test]
fn randomized_sweep_holds_the_invariants() {
    let mut rng = rand::rng();
    for _ in 0..500 {
        let n = rng.random_range(2..=6);
        let points: Vec<i32> = (0..n).map(|_| rng.random_range(0..=500)).collect();

        let d = distribute(&points, Bands::default());
        assert_eq!(d.sum(), 100, "sum violated for {points:?}: {:?}", d.weights);
        assert!(
            d.weights.iter().all(|&w| (5..=80).contains(&w)),
            "band violated for {points:?}: {:?}",
            d.weights
        );
        // Under the default band the best-effort exits are unreachable.
        assert!(d.degraded.is_none(), "degraded for {points:?}");
    }
}
