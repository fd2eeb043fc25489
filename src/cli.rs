use std::path::PathBuf;

use clap::Parser;

use crate::config::{MarkerStyle, OutputFormat, PlotConfig};
use crate::data::model::Method;
use crate::error::Result;
use crate::pipeline::{BetaMode, SessionRequest};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Directory holding `alpha/`, `beta.txt` and the charts (overrides config)
    #[arg(long, value_name = "DIR")]
    pub base: Option<PathBuf>,

    /// Path to config TOML
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Merge method to chart α(r) for (repeatable; none selected = nothing to do)
    #[arg(long = "method", value_enum)]
    pub methods: Vec<Method>,

    /// α chart format (overrides config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// β chart: skip, write to file, or open the viewer
    #[arg(long, value_enum, default_value_t = BetaMode::Off)]
    pub beta: BetaMode,

    /// Fixed β y-axis bounds (overrides config)
    #[arg(long, num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
    pub beta_y_range: Option<Vec<f64>>,

    /// β mean marker style (overrides config)
    #[arg(long, value_enum)]
    pub beta_marker: Option<MarkerStyle>,
}

impl Args {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn load_config(&self) -> Result<PlotConfig> {
        let mut cfg = PlotConfig::load(self.config.as_deref())?;
        if let Some(base) = &self.base {
            cfg.base_dir = base.clone();
        }
        if let Some(format) = self.format {
            cfg.alpha.format = format;
        }
        if let Some([lo, hi]) = self.beta_y_range.as_deref().and_then(|r| <[f64; 2]>::try_from(r).ok()) {
            cfg.beta.y_range = [lo, hi];
        }
        if let Some(marker) = self.beta_marker {
            cfg.beta.marker = marker;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn request(&self) -> SessionRequest {
        SessionRequest {
            methods: self.methods.clone(),
            beta: self.beta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;

    #[test]
    fn no_arguments_selects_nothing() {
        let args = Args::try_parse_from(["sortplot"]).unwrap();
        let req = args.request();
        assert!(req.methods.is_empty());
        assert_eq!(req.beta, BetaMode::Off);
    }

    #[test]
    fn repeated_methods_and_overrides() {
        let args = Args::try_parse_from([
            "sortplot",
            "--base",
            "runs/7",
            "--method",
            "balanced",
            "--method",
            "cascade",
            "--format",
            "raster",
            "--beta",
            "save",
            "--beta-y-range",
            "0",
            "5",
            "--beta-marker",
            "scatter",
        ])
        .unwrap();
        assert_eq!(args.methods, vec![Method::Balanced, Method::Cascade]);

        let cfg = args.load_config().unwrap();
        assert_eq!(cfg.base_dir, PathBuf::from("runs/7"));
        assert_eq!(cfg.alpha.format, OutputFormat::Raster);
        assert_eq!(cfg.beta.y_range, [0.0, 5.0]);
        assert_eq!(cfg.beta.marker, MarkerStyle::Scatter);
        assert_eq!(args.request().beta, BetaMode::Save);
    }

    #[test]
    fn unknown_method_is_rejected() {
        assert!(Args::try_parse_from(["sortplot", "--method", "quick"]).is_err());
    }

    #[test]
    fn inverted_y_range_is_a_config_error() {
        let args = Args::try_parse_from(["sortplot", "--beta-y-range", "2.1", "1.9"]).unwrap();
        let err = args.load_config().unwrap_err();
        assert!(matches!(err, PlotError::Configuration(_)), "{err}");
    }
}
