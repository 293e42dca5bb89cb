use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::Context;
use clap::Args;
use rte_core::{DistanceUnit, EstimatorConfig, Point, RoadSegment, TieInMode, TimeUnit};

/// Configuration file plus command-line overrides, shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// JSON file with `EstimatorConfig` fields; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Speed for roads without a usable speed attribute (km/h)
    #[arg(long)]
    default_speed: Option<f64>,

    /// Distance unit for results: m, km, mi
    #[arg(long)]
    distance_unit: Option<DistanceUnit>,

    /// Time unit for results: s, min, h
    #[arg(long)]
    time_unit: Option<TimeUnit>,

    /// Tie points to the nearest vertex or the nearest point on an edge
    #[arg(long)]
    tie_in: Option<TieInMode>,

    /// Reject query points farther than this from the network (metres, default 5000)
    #[arg(long)]
    max_tie_in_m: Option<f64>,
}

impl ConfigArgs {
    pub fn resolve(&self) -> anyhow::Result<EstimatorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("cannot open config {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => EstimatorConfig::default(),
        };

        if let Some(v) = self.default_speed {
            config.default_speed_kmh = v;
        }
        if let Some(v) = self.distance_unit {
            config.distance_unit = v;
        }
        if let Some(v) = self.time_unit {
            config.time_unit = v;
        }
        if let Some(v) = self.tie_in {
            config.tie_in.mode = v;
        }
        if let Some(v) = self.max_tie_in_m {
            config.tie_in.max_distance_m = Some(v);
        }

        config.validate()?;
        Ok(config)
    }
}

fn is_geojson(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "geojson" | "json"))
        .unwrap_or(false)
}

/// Roads from a `.geojson`/`.json` file or, for any other extension, a CSV file.
pub fn load_roads(path: &Path) -> anyhow::Result<Vec<RoadSegment>> {
    let segments = if is_geojson(path) {
        rte_io::load_roads_geojson(path)
    } else {
        rte_io::load_segments_csv(path)
    };
    segments.with_context(|| format!("cannot load roads from {}", path.display()))
}

/// Points from a `.geojson`/`.json` file or, for any other extension, a CSV file.
pub fn load_points(path: &Path) -> anyhow::Result<Vec<Point>> {
    let points = if is_geojson(path) {
        rte_io::load_points_geojson(path)
    } else {
        rte_io::load_points_csv(path)
    };
    points.with_context(|| format!("cannot load points from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_without_config_file() {
        let config = ConfigArgs::default().resolve().unwrap();
        assert_eq!(config, EstimatorConfig::default());
    }

    #[test]
    fn config_file_then_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "default_speed_kmh": 30, "distance_unit": "mi", "tie_in": {{ "mode": "edge" }} }}"#
        )
        .unwrap();

        let args = ConfigArgs {
            config: Some(file.path().to_path_buf()),
            time_unit: Some(TimeUnit::Seconds),
            ..ConfigArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.default_speed_kmh, 30.0);
        assert_eq!(config.distance_unit, DistanceUnit::Miles);
        assert_eq!(config.time_unit, TimeUnit::Seconds);
        assert_eq!(config.tie_in.mode, TieInMode::Edge);
        assert_eq!(config.merge_tolerance_m, EstimatorConfig::DEFAULT_MERGE_TOLERANCE_M);
    }

    #[test]
    fn invalid_override_rejected() {
        let args = ConfigArgs { default_speed: Some(-5.0), ..ConfigArgs::default() };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn format_follows_extension() {
        assert!(is_geojson(Path::new("roads.geojson")));
        assert!(is_geojson(Path::new("roads.JSON")));
        assert!(!is_geojson(Path::new("roads.csv")));
        assert!(!is_geojson(Path::new("roads")));
    }
}
