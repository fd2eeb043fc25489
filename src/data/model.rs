use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Method – the merge strategies that produce α files
// ---------------------------------------------------------------------------

/// External merge strategy whose α(r) measurements can be plotted.
///
/// The lowercase name is both the prefix of the measurement files under
/// `<base>/alpha/` and the stem of the output chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum Method {
    /// Balanced p-way merge.
    Balanced,
    /// Polyphase merge.
    Polyphasic,
    /// Cascade merge.
    Cascade,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Balanced, Method::Polyphasic, Method::Cascade];

    /// File-name prefix / output stem.
    pub fn stem(self) -> &'static str {
        match self {
            Method::Balanced => "balanced",
            Method::Polyphasic => "polyphasic",
            Method::Cascade => "cascade",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

// ---------------------------------------------------------------------------
// α data
// ---------------------------------------------------------------------------

/// A discovered α input file and the file-count embedded in its name.
/// Only lives between discovery and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricFile {
    pub path: PathBuf,
    pub file_count: u32,
}

/// One `r : alpha` line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaPoint {
    /// Number of runs.
    pub r: u64,
    /// Mean writes per element.
    pub alpha: f64,
}

/// All points of one measurement file, in file order (never re-sorted).
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaSeries {
    pub file_count: u32,
    pub points: Vec<AlphaPoint>,
}

impl AlphaSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(r, alpha)` pairs as plain tuples, for comparisons and plotting.
    pub fn pairs(&self) -> Vec<(u64, f64)> {
        self.points.iter().map(|p| (p.r, p.alpha)).collect()
    }
}

/// Series of one method keyed by file-count. `BTreeMap` keeps the legend in
/// ascending file-count order.
pub type AlphaSeriesSet = BTreeMap<u32, AlphaSeries>;

// ---------------------------------------------------------------------------
// β data
// ---------------------------------------------------------------------------

/// Number of repeated trials recorded for every memory size.
pub const TRIALS_PER_SAMPLE: usize = 10;

/// One `m:` header plus its data line.
#[derive(Debug, Clone, PartialEq)]
pub struct BetaSample {
    /// Working-memory size.
    pub m: u32,
    pub trials: [f64; TRIALS_PER_SAMPLE],
}

/// Mean and population standard deviation of one [`BetaSample`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedBetaPoint {
    pub m: u32,
    pub mean: f64,
    pub stddev: f64,
}

impl AggregatedBetaPoint {
    /// Lower and upper end of the error bar.
    pub fn bar(&self) -> (f64, f64) {
        (self.mean - self.stddev, self.mean + self.stddev)
    }
}
