use anyhow::{Context, Result};
use arctime::api::{AxisLimits, SearchCfg};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Machine limits plus search settings; every field falls back to the
/// library defaults when absent from the JSON file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub limits: AxisLimits,
    pub search: SearchCfg,
}

impl RunConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, vel_res: Option<usize>, max_window: Option<f64>) -> Self {
        if let Some(v) = vel_res {
            self.search.vel_res = v;
        }
        if let Some(w) = max_window {
            self.search.max_window = w;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_means_defaults() {
        assert_eq!(RunConfig::load(None).unwrap(), RunConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{"limits": {"v_max": 3.0}, "search": {"vel_res": 32}}"#).unwrap();
        let cfg = RunConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.limits.v_max, 3.0);
        assert_eq!(cfg.limits.a_max, AxisLimits::default().a_max);
        assert_eq!(cfg.search.vel_res, 32);
        assert_eq!(cfg.search.max_window, SearchCfg::default().max_window);
    }

    #[test]
    fn flags_override_file() {
        let cfg = RunConfig::default().with_overrides(Some(8), None);
        assert_eq!(cfg.search.vel_res, 8);
        assert_eq!(cfg.search.max_window, SearchCfg::default().max_window);
    }
}
