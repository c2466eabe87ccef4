//! Provenance record written next to every plan result.

use anyhow::{Context, Result};
use arctime::api::{DeliveryModel, PlanResult};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::RunConfig;

/// Counters summed over all spans of a plan.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct PlanSummary {
    pub total_time: f64,
    pub spans: usize,
    pub expanded: usize,
    pub oracle_queries: usize,
    pub memo_hits: u64,
    pub memo_misses: u64,
}

impl PlanSummary {
    pub fn of(plan: &PlanResult, memo_hits: u64, memo_misses: u64) -> Self {
        let (expanded, oracle_queries) = plan.arcs.iter().fold((0, 0), |(e, q), arc| {
            (e + arc.profile.stats.expanded, q + arc.profile.stats.oracle_queries)
        });
        Self {
            total_time: plan.total_time,
            spans: plan.arcs.len(),
            expanded,
            oracle_queries,
            memo_hits,
            memo_misses,
        }
    }
}

/// How a plan result was produced.
#[derive(Debug, Serialize)]
pub struct PlanRecord<'a> {
    pub code_rev: String,
    pub version: &'static str,
    pub oracle: &'static str,
    pub tags: &'a [String],
    pub input: &'a Path,
    pub config: RunConfig,
    /// Beam timing model, for results planned from beam segments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<DeliveryModel>,
    pub summary: PlanSummary,
    pub result: &'a Path,
}

/// `plan.json` -> `plan.provenance.json`, in the same directory.
pub fn record_path(result: &Path) -> PathBuf {
    result.with_extension("provenance.json")
}

pub fn write_record(record: &PlanRecord<'_>) -> Result<PathBuf> {
    let path = record_path(record.result);
    fs::write(&path, serde_json::to_vec_pretty(record)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// `GIT_COMMIT` from the environment, then from build time, else "unknown".
pub fn code_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .filter(|rev| !rev.is_empty())
        .or_else(|| option_env!("GIT_COMMIT").map(str::to_owned))
        .unwrap_or_else(|| "unknown".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arctime::api::{ArcResult, ArcSpan, Profile, SearchStats};
    use serde_json::Value;
    use tempfile::tempdir;

    fn two_span_plan() -> PlanResult {
        let arc = |start, end, expanded| ArcResult {
            span: ArcSpan { start, end },
            profile: Profile {
                total_time: 3.0,
                velocities: vec![0.0, 0.0],
                velocity_indices: vec![0, 0],
                stats: SearchStats {
                    expanded,
                    oracle_queries: 2 * expanded,
                    ..SearchStats::default()
                },
            },
        };
        PlanResult {
            total_time: 6.5,
            arcs: vec![arc(0, 1, 2), arc(2, 3, 5)],
        }
    }

    #[test]
    fn record_sits_next_to_the_result() {
        assert_eq!(
            record_path(Path::new("/tmp/plans/arc.json")),
            Path::new("/tmp/plans/arc.provenance.json")
        );
        assert_eq!(
            record_path(Path::new("out/arc")),
            Path::new("out/arc.provenance.json")
        );
    }

    #[test]
    fn summary_adds_span_counters() {
        let s = PlanSummary::of(&two_span_plan(), 4, 10);
        assert_eq!(s.spans, 2);
        assert_eq!(s.expanded, 7);
        assert_eq!(s.oracle_queries, 14);
        assert_eq!(s.total_time, 6.5);
    }

    #[test]
    fn write_record_serializes_run_and_summary() {
        let dir = tempdir().unwrap();
        let result = dir.path().join("plan.json");
        let input = dir.path().join("wps.csv");
        let tags = vec!["nightly".to_string()];
        let record = PlanRecord {
            code_rev: code_rev(),
            version: arctime::VERSION,
            oracle: "jerk-limited",
            tags: &tags,
            input: &input,
            config: RunConfig::default(),
            model: None,
            summary: PlanSummary::of(&two_span_plan(), 0, 9),
            result: &result,
        };
        let path = write_record(&record).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["result"], result.to_string_lossy().into_owned());
        assert_eq!(parsed["tags"][0], "nightly");
        assert_eq!(parsed["version"], arctime::VERSION);
        assert_eq!(parsed["summary"]["spans"], 2);
        assert_eq!(parsed["config"]["search"]["vel_res"], 256);
        assert!(parsed.get("model").is_none());
    }
}
