//! # Weight Normalizer
//! Pure, testable logic that maps raw evidence scores → a display-ready
//! percentage distribution. No I/O, suitable for unit tests and offline
//! evaluation.
//!
//! Policy: clamp into the display band, rescale proportionally to 100,
//! repair out-of-band roundings by redistributing across free items, then
//! absorb any ±1–2 rounding residue into the largest item that can take it.
//! A single division-and-round pass cannot honor both the hard per-item
//! band (no hypothesis may read as settled above the ceiling or dead below
//! the floor) and the exact 100% sum the stacked bars need; the repair loop
//! resolves the tension constructively.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::score::RawScore;

/// Display band for a single hypothesis weight, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Bands {
    pub floor: i32,
    pub ceiling: i32,
}

impl Default for Bands {
    fn default() -> Self {
        Self {
            floor: 5,
            ceiling: 80,
        }
    }
}

/// Redistribution passes before the loop gives up. In practice the loop
/// settles in one or two passes; the bound exists so it is provably finite.
const MAX_REPAIR_PASSES: usize = 20;

/// Which best-effort exit produced an out-of-band weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// The repair loop ran out of free items with excess still unplaced.
    RepairExhausted,
    /// No item could absorb the rounding residue without leaving the band.
    ResidualOutOfBand,
}

/// Normalized weights, index-aligned with the input scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub weights: Vec<i32>,
    /// Present only when one of the two documented best-effort exits fired;
    /// an in-band distribution summing to 100 carries `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<Degradation>,
}

impl Distribution {
    pub fn sum(&self) -> i32 {
        self.weights.iter().sum()
    }
}

/// Normalize number-like raw scores into integer percentages in the default
/// `[5, 80]` band, summing to exactly 100. Empty input yields empty output;
/// a single item is always `[100]`.
pub fn normalize(raw: &[RawScore]) -> Vec<i32> {
    let points: Vec<i32> = raw.iter().map(RawScore::points).collect();
    distribute(&points, Bands::default()).weights
}

/// Full-fidelity normalization over already-parsed scores: returns the
/// weights together with the optional degraded flag.
pub fn distribute(points: &[i32], bands: Bands) -> Distribution {
    let n = points.len();
    if n == 0 {
        return Distribution {
            weights: Vec::new(),
            degraded: None,
        };
    }
    // A lone hypothesis always renders as the full bar; the band is
    // intentionally not enforced here.
    if n == 1 {
        return Distribution {
            weights: vec![100],
            degraded: None,
        };
    }

    let clamped: Vec<i32> = points
        .iter()
        .map(|&p| p.clamp(bands.floor, bands.ceiling))
        .collect();
    let total: i64 = clamped.iter().map(|&c| c as i64).sum();

    // Proportional scale, rounding each share independently (ties away from
    // zero). A zero clamped sum is only reachable with a zero floor; split
    // 100 evenly in that case instead of dividing by zero.
    let mut weights: Vec<i32> = if total == 0 {
        let share = 100.0 / n as f64;
        vec![share.round() as i32; n]
    } else {
        clamped
            .iter()
            .map(|&c| ((c as f64) * 100.0 / total as f64).round() as i32)
            .collect()
    };

    let mut degraded = None;

    for _ in 0..MAX_REPAIR_PASSES {
        match repair_pass(&mut weights, bands) {
            PassOutcome::Balanced => break,
            PassOutcome::Adjusted => continue,
            PassOutcome::Exhausted => {
                degraded = Some(Degradation::RepairExhausted);
                break;
            }
        }
    }

    fix_residual(&mut weights, bands, &mut degraded);

    if let Some(kind) = degraded {
        warn!(?kind, ?weights, "weight distribution left the display band");
    }

    Distribution { weights, degraded }
}

/// One pass of the bounds-repair loop over the
/// pinned-high / pinned-low / free partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassOutcome {
    /// Overflow and underflow cancel; the distribution is stable.
    Balanced,
    /// Weights moved; run another pass.
    Adjusted,
    /// Every item is pinned and excess remains; accept the pinned result.
    Exhausted,
}

fn repair_pass(weights: &mut [i32], bands: Bands) -> PassOutcome {
    let mut overflow: i32 = 0;
    let mut underflow: i32 = 0;
    let mut free: Vec<usize> = Vec::with_capacity(weights.len());

    for (i, w) in weights.iter_mut().enumerate() {
        if *w > bands.ceiling {
            overflow += *w - bands.ceiling;
            *w = bands.ceiling;
        } else if *w < bands.floor {
            underflow += bands.floor - *w;
            *w = bands.floor;
        } else {
            free.push(i);
        }
    }

    let net = overflow - underflow;
    if net == 0 {
        return PassOutcome::Balanced;
    }
    if free.is_empty() {
        return PassOutcome::Exhausted;
    }

    if net > 0 {
        // Net excess: feed the smallest free items first, up to headroom.
        free.sort_by_key(|&i| (weights[i], i));
        let mut excess = net;
        for &i in &free {
            if excess == 0 {
                break;
            }
            let add = (bands.ceiling - weights[i]).min(excess);
            weights[i] += add;
            excess -= add;
        }
    } else {
        // Net deficit: drain the largest free items first, down to the floor.
        free.sort_by_key(|&i| (std::cmp::Reverse(weights[i]), i));
        let mut deficit = -net;
        for &i in &free {
            if deficit == 0 {
                break;
            }
            let take = (weights[i] - bands.floor).min(deficit);
            weights[i] -= take;
            deficit -= take;
        }
    }

    PassOutcome::Adjusted
}

/// Absorb the independent-rounding residue (typically ±1–2) into the largest
/// item that stays in-band after taking it; ties go to the first occurrence.
/// With no in-band candidate the largest item takes it anyway; this is the
/// single allowed band violation, flagged rather than hidden.
fn fix_residual(weights: &mut [i32], bands: Bands, degraded: &mut Option<Degradation>) {
    let sum: i32 = weights.iter().sum();
    let diff = 100 - sum;
    if diff == 0 {
        return;
    }

    let mut pick: Option<usize> = None;
    for (i, &w) in weights.iter().enumerate() {
        let adjusted = w + diff;
        if adjusted < bands.floor || adjusted > bands.ceiling {
            continue;
        }
        match pick {
            Some(j) if weights[j] >= w => {}
            _ => pick = Some(i),
        }
    }

    match pick {
        Some(i) => weights[i] += diff,
        None => {
            let mut j = 0;
            for (i, &w) in weights.iter().enumerate() {
                if w > weights[j] {
                    j = i;
                }
            }
            weights[j] += diff;
            degraded.get_or_insert(Degradation::ResidualOutOfBand);
        }
    }
}
