//! # Raw Scores
//!
//! Evidence-support scores arrive from the editorial pipeline in whatever
//! shape the site's JSON happens to carry: plain integers, floats, or
//! numeric-looking strings ("62", "62%", "~60"). This module owns the
//! parse-or-default-to-zero policy so the degrade-to-zero behavior is
//! visible in one typed helper instead of scattered coercions.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// First numeric run in a string, with optional sign and decimals.
static NUMERIC_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("numeric-run regex"));

/// A number-like score as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScore {
    Int(i32),
    Float(f64),
    Text(String),
}

impl RawScore {
    /// Integer score points. Non-numeric input parses to 0; negative values
    /// pass through unchanged (the normalizer's floor clamp handles them).
    pub fn points(&self) -> i32 {
        match self {
            RawScore::Int(v) => *v,
            RawScore::Float(v) if v.is_finite() => v.round() as i32,
            RawScore::Float(_) => 0,
            RawScore::Text(s) => parse_points(s),
        }
    }
}

impl From<i32> for RawScore {
    fn from(v: i32) -> Self {
        RawScore::Int(v)
    }
}

impl From<&str> for RawScore {
    fn from(s: &str) -> Self {
        RawScore::Text(s.to_string())
    }
}

/// Parse a numeric-looking string to integer points, or 0.
///
/// Fast path is a plain integer parse; otherwise the first numeric run is
/// taken, so "62%" and "~60 pts" still score. Decimals round to nearest,
/// ties away from zero.
pub fn parse_points(raw: &str) -> i32 {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i32>() {
        return v;
    }
    match NUMERIC_RUN.find(trimmed) {
        Some(m) => m
            .as_str()
            .parse::<f64>()
            .map(|v| v.round() as i32)
            .unwrap_or(0),
        None => 0,
    }
}
