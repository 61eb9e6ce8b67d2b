//! # Skew History
//! Capped in-memory log of recent skew derivations, for quick diagnostics
//! via the debug endpoint. Informational only; nothing downstream computes
//! on it.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::skew::{SkewDirection, SkewResult};

#[derive(Debug, Clone, Serialize)]
pub struct SkewEntry {
    pub at: DateTime<Utc>,
    pub bull: i32,
    pub bear: i32,
    pub score: i32,
    pub direction: SkewDirection,
    /// How many hypotheses the derivation covered.
    pub items: usize,
    /// True when the underlying distribution was a best-effort one.
    pub degraded: bool,
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<Vec<SkewEntry>>,
    cap: usize,
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap: cap.min(10_000),
        }
    }

    pub fn push(&self, result: &SkewResult) {
        let entry = SkewEntry {
            at: Utc::now(),
            bull: result.bull,
            bear: result.bear,
            score: result.score,
            direction: result.direction,
            items: result.breakdown.len(),
            degraded: result.degraded.is_some(),
        };

        let mut v = self.inner.lock().expect("history mutex poisoned");
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<SkewEntry> {
        let v = self.inner.lock().expect("history mutex poisoned");
        let len = v.len();
        let start = len.saturating_sub(n);
        v[start..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive_skew;
    use crate::hypothesis::HypothesisRecord;

    #[test]
    fn keeps_only_the_newest_entries() {
        let h = History::with_capacity(2);
        for score in [20, 30, 40] {
            let s = derive_skew(&[
                HypothesisRecord::new(score, "upside"),
                HypothesisRecord::new(100 - score, "downside"),
            ]);
            h.push(&s);
        }
        let snap = h.snapshot_last_n(10);
        assert_eq!(snap.len(), 2);
        // Oldest entry (bull 20) was dropped.
        assert_eq!(snap[0].bull, 30);
        assert_eq!(snap[1].bull, 40);
    }

    #[test]
    fn snapshot_respects_the_limit() {
        let h = History::with_capacity(100);
        for _ in 0..5 {
            h.push(&SkewResult::balanced());
        }
        assert_eq!(h.snapshot_last_n(3).len(), 3);
        assert_eq!(h.snapshot_last_n(0).len(), 0);
    }
}
