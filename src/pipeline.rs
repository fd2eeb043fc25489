use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::PlotConfig;
use crate::data::loader::{load_alpha_series, read_beta_file};
use crate::data::model::{AggregatedBetaPoint, Method};
use crate::data::stats::aggregate_all;
use crate::error::{PlotError, Result};
use crate::render::{render_alpha_chart, render_beta_chart};

// ---------------------------------------------------------------------------
// Single pipelines
// ---------------------------------------------------------------------------

/// α pipeline for one method: discover → parse → render.
/// Returns the written chart path.
pub fn run_alpha(method: Method, cfg: &PlotConfig) -> Result<PathBuf> {
    // Fail on a missing title before touching any input.
    cfg.alpha.title_for(method)?;

    let series = load_alpha_series(method, &cfg.base_dir)?;
    let output = cfg.alpha_output(method);
    render_alpha_chart(&series, method, &cfg.alpha, &output)?;
    Ok(output)
}

/// First two β stages: read → aggregate.
pub fn load_beta_points(path: &Path) -> Result<Vec<AggregatedBetaPoint>> {
    let samples = read_beta_file(path)?;
    let points = aggregate_all(&samples);
    for p in &points {
        log::debug!("beta: m = {} mean = {:.4} stddev = {:.4}", p.m, p.mean, p.stddev);
    }
    Ok(points)
}

/// β pipeline in save mode. Returns the written chart path.
pub fn run_beta(cfg: &PlotConfig) -> Result<PathBuf> {
    let points = load_beta_points(&cfg.beta_input())?;
    let output = cfg.beta_output();
    render_beta_chart(&points, &cfg.beta, &output)?;
    Ok(output)
}

// ---------------------------------------------------------------------------
// Session: any number of α methods plus β, failures kept apart
// ---------------------------------------------------------------------------

/// What to do with the β measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BetaMode {
    #[default]
    Off,
    /// Write `beta.png` / `beta.svg`.
    Save,
    /// Open the viewer window.
    Show,
}

#[derive(Debug, Clone, Default)]
pub struct SessionRequest {
    pub methods: Vec<Method>,
    pub beta: BetaMode,
}

/// Which pipeline a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    Alpha(Method),
    Beta,
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineKind::Alpha(method) => write!(f, "alpha/{method}"),
            PipelineKind::Beta => f.write_str("beta"),
        }
    }
}

#[derive(Debug)]
pub struct PipelineFailure {
    pub pipeline: PipelineKind,
    pub error: PlotError,
}

#[derive(Debug, Default)]
pub struct SessionReport {
    /// Charts written, in processing order.
    pub outputs: Vec<PathBuf>,
    pub failures: Vec<PipelineFailure>,
    /// Aggregated β points waiting to be shown ([`BetaMode::Show`] only).
    pub display: Option<Vec<AggregatedBetaPoint>>,
}

impl SessionReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run every requested pipeline. A failing pipeline is recorded and the next
/// one still runs. Methods are de-duplicated and processed in a fixed order.
pub fn run_session(request: &SessionRequest, cfg: &PlotConfig) -> SessionReport {
    let mut report = SessionReport::default();

    let methods: BTreeSet<Method> = request.methods.iter().copied().collect();
    if methods.is_empty() {
        log::info!("no alpha method selected");
    }

    for method in methods {
        match run_alpha(method, cfg) {
            Ok(path) => report.outputs.push(path),
            Err(error) => report.failures.push(PipelineFailure {
                pipeline: PipelineKind::Alpha(method),
                error,
            }),
        }
    }

    let beta = match request.beta {
        BetaMode::Off => Ok(()),
        BetaMode::Save => run_beta(cfg).map(|path| report.outputs.push(path)),
        BetaMode::Show => load_beta_points(&cfg.beta_input()).map(|points| {
            report.display = Some(points);
        }),
    };
    if let Err(error) = beta {
        report.failures.push(PipelineFailure {
            pipeline: PipelineKind::Beta,
            error,
        });
    }

    for failure in &report.failures {
        log::error!("{} failed: {}", failure.pipeline, failure.error);
    }

    report
}
