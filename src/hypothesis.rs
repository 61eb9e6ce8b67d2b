//! # Hypothesis Records
//!
//! Input shape for the skew deriver: one record per competing narrative
//! hypothesis, carrying an evidence-support score and a directional tag.
//! The engine never interprets `label`; it is passed through to the
//! breakdown for the caller's own bookkeeping.

use serde::Deserialize;

use crate::score::RawScore;

/// One competing narrative hypothesis as submitted by the research site.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HypothesisRecord {
    /// Opaque title/identifier, echoed in the skew breakdown.
    #[serde(default)]
    pub label: String,
    /// Evidence-support score; missing scores count as 0.
    #[serde(default, alias = "rawScore")]
    pub score: Option<RawScore>,
    /// Directional tag as authored: "upside", "downside", or "neutral".
    #[serde(default)]
    pub direction: Option<String>,
}

/// How a hypothesis's normalized weight is attributed to the bull/bear sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaning {
    Bull,
    Bear,
    Split,
}

impl HypothesisRecord {
    pub fn new(score: impl Into<RawScore>, direction: &str) -> Self {
        Self {
            label: String::new(),
            score: Some(score.into()),
            direction: Some(direction.to_string()),
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Integer score points (0 when the score is missing or non-numeric).
    pub fn points(&self) -> i32 {
        self.score.as_ref().map(RawScore::points).unwrap_or(0)
    }

    /// Map the authored tag to a leaning. Only the exact lowercase tags are
    /// recognized; everything else (typos, casing variants, missing tags)
    /// lands on the downside branch. Report tiles rely on that fallback, so
    /// it is pinned by tests rather than widened to neutral.
    pub fn leaning(&self) -> Leaning {
        match self.direction.as_deref() {
            Some("upside") => Leaning::Bull,
            Some("neutral") => Leaning::Split,
            _ => Leaning::Bear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_tags_map() {
        assert_eq!(HypothesisRecord::new(10, "upside").leaning(), Leaning::Bull);
        assert_eq!(
            HypothesisRecord::new(10, "downside").leaning(),
            Leaning::Bear
        );
        assert_eq!(
            HypothesisRecord::new(10, "neutral").leaning(),
            Leaning::Split
        );
    }

    #[test]
    fn unknown_and_missing_tags_fall_to_downside() {
        assert_eq!(
            HypothesisRecord::new(10, "sideways").leaning(),
            Leaning::Bear
        );
        // Casing counts as unrecognized too.
        assert_eq!(HypothesisRecord::new(10, "Upside").leaning(), Leaning::Bear);
        let untagged = HypothesisRecord {
            direction: None,
            ..HypothesisRecord::new(10, "upside")
        };
        assert_eq!(untagged.leaning(), Leaning::Bear);
    }

    #[test]
    fn missing_score_counts_zero() {
        let rec: HypothesisRecord =
            serde_json::from_str(r#"{"label":"Base case","direction":"upside"}"#).unwrap();
        assert_eq!(rec.points(), 0);
        assert_eq!(rec.label, "Base case");
    }

    #[test]
    fn raw_score_alias_accepted() {
        let rec: HypothesisRecord =
            serde_json::from_str(r#"{"rawScore":"62%","direction":"downside"}"#).unwrap();
        assert_eq!(rec.points(), 62);
    }
}
