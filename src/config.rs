//! # Engine Config
//!
//! Band and dead-band settings for the normalizer and skew deriver, loaded
//! from `config/engine.toml` when present. Missing or unreadable config
//! falls back to the canonical defaults (`[5, 80]` band, ±5 dead-band) with
//! a warning; odd values are hardened rather than rejected, since the
//! engine must keep serving display values.
//!
//! TOML shape:
//! ```toml
//! dead_band = 5
//!
//! [bands]
//! floor = 5
//! ceiling = 80
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::normalize::Bands;

pub const DEFAULT_ENGINE_CONFIG_PATH: &str = "config/engine.toml";
pub const ENV_ENGINE_CONFIG_PATH: &str = "ENGINE_CONFIG_PATH";

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub bands: Bands,
    pub dead_band: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bands: Bands::default(),
            dead_band: crate::skew::DEAD_BAND,
        }
    }
}

impl EngineConfig {
    /// Load from `ENGINE_CONFIG_PATH` or the default path, falling back to
    /// defaults when the file is missing or invalid.
    pub fn load() -> Self {
        let path = std::env::var(ENV_ENGINE_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ENGINE_CONFIG_PATH));
        Self::load_from_file(&path)
    }

    /// Load from a specific file, falling back to defaults on any error.
    pub fn load_from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => match Self::from_toml_str(&s) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid engine config, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Parse from a TOML string and harden the values.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: EngineConfig = toml::from_str(toml_str)?;
        Ok(cfg.sanitized())
    }

    /// Harden nonsense values: the band must be a non-empty sub-range of
    /// [0, 100] and the dead-band non-negative.
    pub fn sanitized(mut self) -> Self {
        self.bands.floor = self.bands.floor.clamp(0, 100);
        self.bands.ceiling = self.bands.ceiling.clamp(0, 100);
        if self.bands.floor > self.bands.ceiling {
            warn!(
                floor = self.bands.floor,
                ceiling = self.bands.ceiling,
                "band floor above ceiling, using defaults"
            );
            self.bands = Bands::default();
        }
        if self.dead_band < 0 {
            self.dead_band = crate::skew::DEAD_BAND;
        }
        self
    }
}
