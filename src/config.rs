use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::model::Method;
use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// Shared enums
// ---------------------------------------------------------------------------

/// Chart file format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// SVG, for print.
    Vector,
    /// PNG, for quick previews.
    Raster,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Vector => "svg",
            OutputFormat::Raster => "png",
        }
    }

    /// Pick the format from a file extension (`svg` → vector, anything else → raster).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Vector,
            _ => OutputFormat::Raster,
        }
    }
}

/// How β means are drawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerStyle {
    /// Markers joined by a line.
    Line,
    /// Markers only.
    Scatter,
}

// ---------------------------------------------------------------------------
// α chart settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlphaConfig {
    #[serde(default = "AlphaConfig::default_format")]
    pub format: OutputFormat,
    #[serde(default = "AlphaConfig::default_width")]
    pub width: u32,
    #[serde(default = "AlphaConfig::default_height")]
    pub height: u32,
    #[serde(default = "AlphaConfig::default_x_label")]
    pub x_label: String,
    #[serde(default = "AlphaConfig::default_y_label")]
    pub y_label: String,
    /// Legend entry per series; `{n}` is replaced by the file-count.
    #[serde(default = "AlphaConfig::default_legend")]
    pub legend: String,
    /// Chart title per method, keyed by the method's file prefix.
    /// A table given in the config file replaces the defaults entirely.
    #[serde(default = "AlphaConfig::default_titles")]
    pub titles: BTreeMap<String, String>,
}

impl AlphaConfig {
    fn default_format() -> OutputFormat {
        OutputFormat::Vector
    }
    fn default_width() -> u32 {
        1024
    }
    fn default_height() -> u32 {
        768
    }
    fn default_x_label() -> String {
        "r: quantidade de runs".to_string()
    }
    fn default_y_label() -> String {
        "α(r): média de escritas por elemento".to_string()
    }
    fn default_legend() -> String {
        "Com {n} arquivos (total)".to_string()
    }
    fn default_titles() -> BTreeMap<String, String> {
        [
            (Method::Polyphasic, "Ordenação polifásica"),
            (Method::Balanced, "Ordenação balanceada por p caminhos"),
            (Method::Cascade, "Ordenação em cascata"),
        ]
        .into_iter()
        .map(|(m, t)| (m.stem().to_string(), t.to_string()))
        .collect()
    }

    /// Title of `method`'s chart. A missing entry is a configuration error.
    pub fn title_for(&self, method: Method) -> Result<&str> {
        self.titles
            .get(method.stem())
            .map(String::as_str)
            .ok_or_else(|| {
                PlotError::Configuration(format!("no chart title registered for method '{method}'"))
            })
    }

    pub fn legend_for(&self, file_count: u32) -> String {
        self.legend.replace("{n}", &file_count.to_string())
    }
}

impl Default for AlphaConfig {
    fn default() -> Self {
        Self {
            format: Self::default_format(),
            width: Self::default_width(),
            height: Self::default_height(),
            x_label: Self::default_x_label(),
            y_label: Self::default_y_label(),
            legend: Self::default_legend(),
            titles: Self::default_titles(),
        }
    }
}

// ---------------------------------------------------------------------------
// β chart settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetaConfig {
    #[serde(default = "BetaConfig::default_format")]
    pub format: OutputFormat,
    #[serde(default = "BetaConfig::default_width")]
    pub width: u32,
    #[serde(default = "BetaConfig::default_height")]
    pub height: u32,
    /// Fixed y-axis bounds `[low, high]`. `[0.0, 5.0]` is the wide alternative.
    #[serde(default = "BetaConfig::default_y_range")]
    pub y_range: [f64; 2],
    #[serde(default = "BetaConfig::default_marker")]
    pub marker: MarkerStyle,
    /// Draw the σ error bars.
    #[serde(default = "BetaConfig::default_error_bars")]
    pub error_bars: bool,
    #[serde(default = "BetaConfig::default_title")]
    pub title: String,
    #[serde(default = "BetaConfig::default_x_label")]
    pub x_label: String,
    #[serde(default = "BetaConfig::default_y_label")]
    pub y_label: String,
    #[serde(default = "BetaConfig::default_mean_label")]
    pub mean_label: String,
    #[serde(default = "BetaConfig::default_error_label")]
    pub error_label: String,
}

impl BetaConfig {
    fn default_format() -> OutputFormat {
        OutputFormat::Raster
    }
    fn default_width() -> u32 {
        1000
    }
    fn default_height() -> u32 {
        600
    }
    fn default_y_range() -> [f64; 2] {
        [1.9, 2.1]
    }
    fn default_marker() -> MarkerStyle {
        MarkerStyle::Line
    }
    fn default_error_bars() -> bool {
        true
    }
    fn default_title() -> String {
        "Tamanho médio relativo das runs β(m, 0) na distribuição inicial (seleção natural)"
            .to_string()
    }
    fn default_x_label() -> String {
        "Tamanho de memória m".to_string()
    }
    fn default_y_label() -> String {
        "Métrica β(m, 0)".to_string()
    }
    fn default_mean_label() -> String {
        "Média sobre 10 arquivos diferentes".to_string()
    }
    fn default_error_label() -> String {
        "Desvio padrão (no formato de error bars)".to_string()
    }
}

impl Default for BetaConfig {
    fn default() -> Self {
        Self {
            format: Self::default_format(),
            width: Self::default_width(),
            height: Self::default_height(),
            y_range: Self::default_y_range(),
            marker: Self::default_marker(),
            error_bars: Self::default_error_bars(),
            title: Self::default_title(),
            x_label: Self::default_x_label(),
            y_label: Self::default_y_label(),
            mean_label: Self::default_mean_label(),
            error_label: Self::default_error_label(),
        }
    }
}

// ---------------------------------------------------------------------------
// PlotConfig – the whole file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Directory holding `alpha/`, `beta.txt` and the produced charts.
    #[serde(default = "PlotConfig::default_base_dir")]
    pub base_dir: PathBuf,
    #[serde(default)]
    pub alpha: AlphaConfig,
    #[serde(default)]
    pub beta: BetaConfig,
}

impl PlotConfig {
    fn default_base_dir() -> PathBuf {
        PathBuf::from("data")
    }

    /// Load a TOML config, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let cfg = match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| PlotError::io(path, e))?;
                Self::from_toml(&text).map_err(|e| match e {
                    PlotError::Configuration(msg) => {
                        PlotError::Configuration(format!("{}: {msg}", path.display()))
                    }
                    other => other,
                })?
            }
            None => Self::default(),
        };
        Ok(cfg)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: PlotConfig =
            toml::from_str(text).map_err(|e| PlotError::Configuration(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings no chart can be drawn with. Missing titles are only
    /// reported when the method is actually plotted.
    pub fn validate(&self) -> Result<()> {
        let [lo, hi] = self.beta.y_range;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(PlotError::Configuration(format!(
                "beta.y_range must be increasing finite bounds, got [{lo}, {hi}]"
            )));
        }
        for (name, w, h) in [
            ("alpha", self.alpha.width, self.alpha.height),
            ("beta", self.beta.width, self.beta.height),
        ] {
            if w == 0 || h == 0 {
                return Err(PlotError::Configuration(format!(
                    "{name} figure size must be non-zero, got {w}x{h}"
                )));
            }
        }
        if !self.alpha.legend.contains("{n}") {
            return Err(PlotError::Configuration(format!(
                "alpha.legend must contain '{{n}}', got '{}'",
                self.alpha.legend
            )));
        }
        Ok(())
    }

    pub fn alpha_output(&self, method: Method) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", method.stem(), self.alpha.format.extension()))
    }

    pub fn beta_input(&self) -> PathBuf {
        self.base_dir.join(crate::data::loader::BETA_FILE)
    }

    pub fn beta_output(&self) -> PathBuf {
        self.base_dir
            .join(format!("beta.{}", self.beta.format.extension()))
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            base_dir: Self::default_base_dir(),
            alpha: AlphaConfig::default(),
            beta: BetaConfig::default(),
        }
    }
}
