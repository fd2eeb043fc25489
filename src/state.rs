use std::path::{Path, PathBuf};

use crate::config::{BetaConfig, MarkerStyle, OutputFormat};
use crate::data::model::AggregatedBetaPoint;
use crate::pipeline::load_beta_points;
use crate::render::render_beta_chart;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full β viewer state, independent of rendering.
pub struct ViewerState {
    /// Aggregated points currently shown.
    pub points: Vec<AggregatedBetaPoint>,

    /// Labels, y-range and marker policy.
    pub policy: BetaConfig,

    /// File the points were read from.
    pub source: Option<PathBuf>,

    /// Join the means with a line.
    pub connect_points: bool,

    pub show_error_bars: bool,

    /// Last error, shown in the top bar.
    pub status_message: Option<String>,
}

impl ViewerState {
    pub fn new(points: Vec<AggregatedBetaPoint>, policy: BetaConfig, source: Option<PathBuf>) -> Self {
        Self {
            points,
            connect_points: policy.marker == MarkerStyle::Line,
            show_error_bars: policy.error_bars,
            policy,
            source,
            status_message: None,
        }
    }

    /// Policy reflecting the current toggles.
    pub fn current_policy(&self) -> BetaConfig {
        BetaConfig {
            marker: if self.connect_points {
                MarkerStyle::Line
            } else {
                MarkerStyle::Scatter
            },
            error_bars: self.show_error_bars,
            ..self.policy.clone()
        }
    }

    /// Replace the points with those of another β file. On failure the
    /// current points stay and the error is shown.
    pub fn load_file(&mut self, path: &Path) {
        match load_beta_points(path) {
            Ok(points) => {
                log::info!("Loaded {} β points from {}", points.len(), path.display());
                self.points = points;
                self.source = Some(path.to_path_buf());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Write the current view to `path`; the extension picks the format.
    pub fn export(&mut self, path: &Path) {
        let policy = BetaConfig {
            format: OutputFormat::from_path(path),
            ..self.current_policy()
        };
        match render_beta_chart(&self.points, &policy, path) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ViewerState {
        let points = vec![
            AggregatedBetaPoint { m: 3, mean: 1.99, stddev: 0.01 },
            AggregatedBetaPoint { m: 15, mean: 2.0, stddev: 0.005 },
        ];
        ViewerState::new(points, BetaConfig::default(), None)
    }

    #[test]
    fn toggles_follow_marker_policy() {
        let mut s = state();
        assert!(s.connect_points);
        assert!(s.show_error_bars);
        s.connect_points = false;
        s.show_error_bars = false;
        let policy = s.current_policy();
        assert_eq!(policy.marker, MarkerStyle::Scatter);
        assert!(!policy.error_bars);
    }

    #[test]
    fn failed_load_keeps_points() {
        let tmp = tempfile::tempdir().unwrap();
        let mut s = state();
        s.load_file(&tmp.path().join("missing.txt"));
        assert_eq!(s.points.len(), 2);
        assert!(s.status_message.is_some());
    }

    #[test]
    fn load_replaces_points() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("beta.txt");
        std::fs::write(&path, "10:\n1.0 1.0 1.0 1.0 1.0 1.0 1.0 1.0 1.0 1.0\n").unwrap();

        let mut s = state();
        s.load_file(&path);
        assert_eq!(s.points, vec![AggregatedBetaPoint { m: 10, mean: 1.0, stddev: 0.0 }]);
        assert_eq!(s.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn export_uses_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("view.svg");
        let mut s = state();
        s.export(&path);
        assert!(s.status_message.is_none(), "{:?}", s.status_message);
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#D62728"));
    }

    #[test]
    fn export_matches_hidden_error_bars() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("view.svg");
        let mut s = state();
        s.show_error_bars = false;
        s.export(&path);

        assert!(s.status_message.is_none(), "{:?}", s.status_message);
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(!svg.contains("#D62728"));
    }
}
