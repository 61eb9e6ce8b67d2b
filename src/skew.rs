//! # Narrative Skew
//! Derives the bull/bear balance of a hypothesis set mechanically from the
//! normalized weights and each hypothesis's directional tag. Purely
//! functional; the categorical verdict comes from the signed score alone,
//! never from an editorial field.

use serde::{Deserialize, Serialize};

use crate::hypothesis::{HypothesisRecord, Leaning};
use crate::normalize::{distribute, Bands, Degradation};

/// Verdict dead-band: scores within ±5 read as balanced so the label does
/// not flap on near-balanced noise.
pub const DEAD_BAND: i32 = 5;

/// Categorical skew verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkewDirection {
    Upside,
    Downside,
    Balanced,
}

/// Per-hypothesis audit entry: the authored tag and the weight it carried.
/// Read-only trail for report tiles; nothing downstream computes on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    pub weight: i32,
}

/// Aggregate bull/bear balance of a hypothesis set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkewResult {
    pub bull: i32,
    pub bear: i32,
    /// `bull - bear`, in [-100, 100].
    pub score: i32,
    pub direction: SkewDirection,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<BreakdownEntry>,
    /// Propagated from the normalizer when a best-effort exit fired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<Degradation>,
}

impl SkewResult {
    /// Canonical neutral result for empty input: a defined default, not an
    /// error.
    pub fn balanced() -> Self {
        Self {
            bull: 50,
            bear: 50,
            score: 0,
            direction: SkewDirection::Balanced,
            breakdown: Vec::new(),
            degraded: None,
        }
    }
}

/// Derive the skew of a hypothesis set under the default `[5, 80]` band and
/// ±5 dead-band.
pub fn derive_skew(items: &[HypothesisRecord]) -> SkewResult {
    derive_skew_with(items, Bands::default(), DEAD_BAND)
}

/// Same derivation with explicit band and dead-band parameters.
pub fn derive_skew_with(items: &[HypothesisRecord], bands: Bands, dead_band: i32) -> SkewResult {
    if items.is_empty() {
        return SkewResult::balanced();
    }

    let points: Vec<i32> = items.iter().map(HypothesisRecord::points).collect();
    let dist = distribute(&points, bands);

    let mut bull = 0.0f64;
    let mut bear = 0.0f64;
    let mut breakdown = Vec::with_capacity(items.len());

    for (item, &weight) in items.iter().zip(&dist.weights) {
        match item.leaning() {
            Leaning::Bull => bull += weight as f64,
            Leaning::Bear => bear += weight as f64,
            Leaning::Split => {
                bull += weight as f64 / 2.0;
                bear += weight as f64 / 2.0;
            }
        }
        breakdown.push(BreakdownEntry {
            label: item.label.clone(),
            direction: item.direction.clone(),
            weight,
        });
    }

    // Round once, after accumulation, so float drift never compounds across
    // items. Ties-to-even keeps bull + bear at 100 when an odd neutral
    // weight leaves paired .5 halves on both accumulators.
    let bull = bull.round_ties_even() as i32;
    let bear = bear.round_ties_even() as i32;
    let score = bull - bear;

    let direction = if score > dead_band {
        SkewDirection::Upside
    } else if score < -dead_band {
        SkewDirection::Downside
    } else {
        SkewDirection::Balanced
    };

    SkewResult {
        bull,
        bear,
        score,
        direction,
        breakdown,
        degraded: dist.degraded,
    }
}
