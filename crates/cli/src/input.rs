//! Waypoint and beam input files.
//!
//! Waypoints come either as a JSON array of records or as a CSV table with
//! the columns `dwell_time`, `switch_time`, `distance` and `clockwise`.

use anyhow::{anyhow, Context, Result};
use arctime::api::{BeamSegment, DeliveryModel, Waypoint};
use polars::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Arc beam description for `beam`.
#[derive(Debug, Deserialize)]
pub struct BeamInput {
    pub beam_mu: f64,
    pub segments: Vec<BeamSegment>,
    #[serde(default)]
    pub model: DeliveryModel,
}

pub fn load_waypoints(path: &Path) -> Result<Vec<Waypoint>> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        load_waypoints_csv(path)
    } else {
        read_json(path)
    }
}

pub fn load_beam(path: &Path) -> Result<BeamInput> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn load_waypoints_csv(path: &Path) -> Result<Vec<Waypoint>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(rows = df.height(), cols = df.width(), "waypoint_csv_shape");

    let dwell = f64_column(&df, "dwell_time")?;
    let switch = f64_column(&df, "switch_time")?;
    let distance = f64_column(&df, "distance")?;
    let clockwise = df
        .column("clockwise")?
        .cast(&DataType::Boolean)
        .context("column clockwise is not boolean")?;
    let clockwise: Vec<Option<bool>> = clockwise.bool()?.into_iter().collect();

    (0..df.height())
        .map(|row| {
            let cell = |name: &str, v: Option<f64>| {
                v.ok_or_else(|| anyhow!("row {row}: missing {name}"))
            };
            Ok(Waypoint {
                dwell_time: cell("dwell_time", dwell[row])?,
                switch_time: cell("switch_time", switch[row])?,
                distance: cell("distance", distance[row])?,
                clockwise: clockwise[row].ok_or_else(|| anyhow!("row {row}: missing clockwise"))?,
            })
        })
        .collect()
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)?
        .cast(&DataType::Float64)
        .with_context(|| format!("column {name} is not numeric"))?;
    Ok(series.f64()?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_waypoints_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wps.json");
        fs::write(
            &path,
            r#"[
                {"dwell_time": 1.0, "switch_time": 0.5, "distance": 2.0, "clockwise": true},
                {"dwell_time": 0.5, "switch_time": 0.0, "distance": 0.0, "clockwise": true}
            ]"#,
        )
        .unwrap();
        let wps = load_waypoints(&path).unwrap();
        assert_eq!(wps.len(), 2);
        assert_eq!(wps[0].distance, 2.0);
        assert!(wps[1].clockwise);
    }

    #[test]
    fn csv_waypoints_load_with_integer_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wps.csv");
        fs::write(
            &path,
            "dwell_time,switch_time,distance,clockwise\n1,0.5,2,true\n0.25,5,1,false\n0.5,0,0,false\n",
        )
        .unwrap();
        let wps = load_waypoints(&path).unwrap();
        assert_eq!(wps.len(), 3);
        assert_eq!(wps[0].dwell_time, 1.0);
        assert_eq!(wps[1].switch_time, 5.0);
        assert!(wps[0].clockwise);
        assert!(!wps[2].clockwise);
    }

    #[test]
    fn csv_without_required_column_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "dwell_time,distance,clockwise\n1,2,true\n").unwrap();
        assert!(load_waypoints(&path).is_err());
    }

    #[test]
    fn beam_model_defaults_when_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("beam.json");
        fs::write(
            &path,
            r#"{"beam_mu": 100.0, "segments": [
                {"angle_deg": 0.0, "energy": 100.0, "spot_weights": [0.5, 0.5]},
                {"angle_deg": 2.0, "energy": 120.0, "spot_weights": [1.0]}
            ]}"#,
        )
        .unwrap();
        let beam = load_beam(&path).unwrap();
        assert_eq!(beam.segments.len(), 2);
        assert_eq!(beam.model, DeliveryModel::default());
    }
}
