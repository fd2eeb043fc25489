use std::collections::BTreeMap;
use std::path::{Path, MAIN_SEPARATOR};
use std::sync::LazyLock;

use glob::Pattern;
use regex::Regex;

use super::model::{
    AlphaPoint, AlphaSeries, AlphaSeriesSet, BetaSample, Method, MetricFile, TRIALS_PER_SAMPLE,
};
use crate::error::{PlotError, Result};

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit-run regex is valid"));

/// Sub-directory of the base directory holding the α measurement files.
pub const ALPHA_DIR: &str = "alpha";
/// File name of the β measurements inside the base directory.
pub const BETA_FILE: &str = "beta.txt";

// ---------------------------------------------------------------------------
// α discovery
// ---------------------------------------------------------------------------

/// Find every α file of `method` under `<base>/alpha/`, sorted by path.
///
/// Each file must carry a file-count in its name (`balanced4.txt` → 4), and
/// no two files of the same method may share one.
pub fn discover_alpha_files(method: Method, base: &Path) -> Result<Vec<MetricFile>> {
    let dir = base.join(ALPHA_DIR);
    let pattern = format!(
        "{}{MAIN_SEPARATOR}{}*",
        Pattern::escape(&dir.to_string_lossy()),
        method.stem()
    );

    let entries = glob::glob(&pattern)
        .map_err(|e| PlotError::Configuration(format!("invalid input pattern {pattern}: {e}")))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            PlotError::io(path, e.into())
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(PlotError::NoInputs { method, pattern });
    }

    let mut seen: BTreeMap<u32, usize> = BTreeMap::new();
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file_count = file_count_from_name(&path)?;
        if let Some(&previous) = seen.get(&file_count) {
            let other: &MetricFile = &files[previous];
            return Err(PlotError::NamingConvention {
                path,
                reason: format!(
                    "file-count {file_count} already used by {}",
                    other.path.display()
                ),
            });
        }
        seen.insert(file_count, files.len());
        log::debug!("{method}: {} (file-count {file_count})", path.display());
        files.push(MetricFile { path, file_count });
    }

    Ok(files)
}

/// Extract the first maximal run of decimal digits from the basename.
///
/// Only the basename is scanned, so the directory never changes the result.
pub fn file_count_from_name(path: &Path) -> Result<u32> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    let digits = DIGIT_RUN
        .find(&name)
        .ok_or_else(|| PlotError::NamingConvention {
            path: path.to_path_buf(),
            reason: "file name has no embedded file-count".to_string(),
        })?;

    digits
        .as_str()
        .parse::<u32>()
        .map_err(|e| PlotError::NamingConvention {
            path: path.to_path_buf(),
            reason: format!("file-count '{}' is unusable: {e}", digits.as_str()),
        })
}

// ---------------------------------------------------------------------------
// α parsing
// ---------------------------------------------------------------------------

/// Read one α file. See [`parse_alpha_text`] for the format.
pub fn parse_alpha_file(path: &Path) -> Result<Vec<AlphaPoint>> {
    let text = std::fs::read_to_string(path).map_err(|e| PlotError::io(path, e))?;
    parse_alpha_text(path, &text)
}

/// Parse `r : alpha` lines, keeping file order. Blank lines are skipped;
/// anything else that is not `<integer>:<float>` aborts the whole file.
///
/// `path` is only used for error messages.
pub fn parse_alpha_text(path: &Path, text: &str) -> Result<Vec<AlphaPoint>> {
    let mut points = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let (r_str, alpha_str) = line
            .split_once(':')
            .ok_or_else(|| PlotError::parse(path, line_no, format!("missing ':' in '{line}'")))?;

        let r = r_str.trim().parse::<u64>().map_err(|e| {
            PlotError::parse(path, line_no, format!("run count '{}': {e}", r_str.trim()))
        })?;
        let alpha = parse_finite(alpha_str.trim()).map_err(|reason| {
            PlotError::parse(path, line_no, format!("alpha '{}': {reason}", alpha_str.trim()))
        })?;

        points.push(AlphaPoint { r, alpha });
    }

    Ok(points)
}

/// Discover and parse every α file of `method`.
pub fn load_alpha_series(method: Method, base: &Path) -> Result<AlphaSeriesSet> {
    let files = discover_alpha_files(method, base)?;

    let mut set = AlphaSeriesSet::new();
    for file in files {
        let points = parse_alpha_file(&file.path)?;
        log::debug!(
            "{method}: parsed {} points from {}",
            points.len(),
            file.path.display()
        );
        set.insert(
            file.file_count,
            AlphaSeries {
                file_count: file.file_count,
                points,
            },
        );
    }

    Ok(set)
}

// ---------------------------------------------------------------------------
// β reading
// ---------------------------------------------------------------------------

/// Read the β measurements file. See [`parse_beta_text`] for the format.
pub fn read_beta_file(path: &Path) -> Result<Vec<BetaSample>> {
    let text = std::fs::read_to_string(path).map_err(|e| PlotError::io(path, e))?;
    parse_beta_text(path, &text)
}

/// Parse alternating `<m>:` header and data lines.
///
/// Blank lines are ignored, but a file with no record at all is rejected
/// (reported as line 0). Every data line must hold exactly
/// [`TRIALS_PER_SAMPLE`] finite floats; a short record is rejected rather than
/// averaged over fewer trials.
pub fn parse_beta_text(path: &Path, text: &str) -> Result<Vec<BetaSample>> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(idx, l)| (idx + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(PlotError::parse(path, 0, "file holds no measurement records"));
    }
    if lines.len() % 2 != 0 {
        let (line_no, _) = lines[lines.len() - 1];
        return Err(PlotError::parse(
            path,
            line_no,
            format!(
                "odd number of non-empty lines ({}): header without data line",
                lines.len()
            ),
        ));
    }

    let mut samples = Vec::with_capacity(lines.len() / 2);
    for pair in lines.chunks_exact(2) {
        let (header_no, header) = pair[0];
        let (data_no, data) = pair[1];

        let m_str = header.strip_suffix(':').ok_or_else(|| {
            PlotError::parse(path, header_no, format!("expected '<m>:' header, got '{header}'"))
        })?;
        let m = m_str.trim().parse::<u32>().map_err(|e| {
            PlotError::parse(path, header_no, format!("memory size '{}': {e}", m_str.trim()))
        })?;

        let values = data
            .split_whitespace()
            .map(|tok| {
                parse_finite(tok)
                    .map_err(|reason| PlotError::parse(path, data_no, format!("'{tok}': {reason}")))
            })
            .collect::<Result<Vec<f64>>>()?;

        let trials = <[f64; TRIALS_PER_SAMPLE]>::try_from(values.as_slice()).map_err(|_| {
            PlotError::parse(
                path,
                data_no,
                format!(
                    "expected {TRIALS_PER_SAMPLE} values for m = {m}, found {}",
                    values.len()
                ),
            )
        })?;

        samples.push(BetaSample { m, trials });
    }

    Ok(samples)
}

fn parse_finite(s: &str) -> std::result::Result<f64, String> {
    let v = s.parse::<f64>().map_err(|e| e.to_string())?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err("value is not finite".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    fn alpha_fixture() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join(ALPHA_DIR)).unwrap();
        tmp
    }

    #[test]
    fn file_count_is_first_digit_run() {
        assert_eq!(file_count_from_name(Path::new("balanced4.txt")).unwrap(), 4);
        assert_eq!(file_count_from_name(Path::new("cascade12_run3.txt")).unwrap(), 12);
        assert_eq!(file_count_from_name(Path::new("polyphasic007")).unwrap(), 7);
    }

    #[test]
    fn file_count_ignores_directory() {
        let a = file_count_from_name(Path::new("/data/run9/alpha/balanced4.txt")).unwrap();
        let b = file_count_from_name(Path::new("other/42/balanced4.txt")).unwrap();
        assert_eq!(a, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn file_count_missing_is_naming_error() {
        let err = file_count_from_name(Path::new("/x/1/balanced.txt")).unwrap_err();
        assert!(matches!(err, PlotError::NamingConvention { .. }), "{err}");
    }

    #[test]
    fn file_count_overflow_is_naming_error() {
        let err = file_count_from_name(Path::new("balanced99999999999.txt")).unwrap_err();
        assert!(matches!(err, PlotError::NamingConvention { .. }), "{err}");
    }

    #[test]
    fn discovery_filters_by_prefix_and_sorts() {
        let tmp = alpha_fixture();
        let dir = tmp.path().join(ALPHA_DIR);
        write(&dir, "balanced8.txt", "");
        write(&dir, "balanced10.txt", "");
        write(&dir, "balanced4.txt", "");
        write(&dir, "cascade4.txt", "");

        let files = discover_alpha_files(Method::Balanced, tmp.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["balanced10.txt", "balanced4.txt", "balanced8.txt"]);
        let counts: Vec<u32> = files.iter().map(|f| f.file_count).collect();
        assert_eq!(counts, [10, 4, 8]);
    }

    #[test]
    fn discovery_rejects_name_without_digits() {
        let tmp = alpha_fixture();
        let dir = tmp.path().join(ALPHA_DIR);
        write(&dir, "cascade4.txt", "");
        write(&dir, "cascade_old.txt", "");

        let err = discover_alpha_files(Method::Cascade, tmp.path()).unwrap_err();
        assert!(matches!(err, PlotError::NamingConvention { .. }), "{err}");
    }

    #[test]
    fn discovery_rejects_duplicate_file_count() {
        let tmp = alpha_fixture();
        let dir = tmp.path().join(ALPHA_DIR);
        write(&dir, "polyphasic6.txt", "");
        write(&dir, "polyphasic6_rerun.txt", "");

        let err = discover_alpha_files(Method::Polyphasic, tmp.path()).unwrap_err();
        assert!(matches!(err, PlotError::NamingConvention { .. }), "{err}");
    }

    #[test]
    fn discovery_without_matches_is_no_inputs() {
        let tmp = alpha_fixture();
        let err = discover_alpha_files(Method::Balanced, tmp.path()).unwrap_err();
        assert!(matches!(err, PlotError::NoInputs { method: Method::Balanced, .. }));
    }

    #[test]
    fn discovery_escapes_glob_characters_in_base() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("run[1]");
        fs::create_dir_all(base.join(ALPHA_DIR)).unwrap();
        write(&base.join(ALPHA_DIR), "balanced4.txt", "1: 2.0\n");

        let files = discover_alpha_files(Method::Balanced, &base).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_count, 4);
    }

    #[test]
    fn alpha_lines_keep_file_order() {
        let text = "30 : 1.5000\n10 : 2.2500\n20:1.75\n";
        let points = parse_alpha_text(Path::new("t"), text).unwrap();
        let pairs: Vec<(u64, f64)> = points.iter().map(|p| (p.r, p.alpha)).collect();
        assert_eq!(pairs, [(30, 1.5), (10, 2.25), (20, 1.75)]);
    }

    #[test]
    fn alpha_blank_lines_are_skipped() {
        let text = "1: 2.0\n\n2: 1.5\n\n  \n";
        let points = parse_alpha_text(Path::new("t"), text).unwrap();
        let non_blank = text.lines().filter(|l| !l.trim().is_empty()).count();
        assert_eq!(points.len(), non_blank);
    }

    #[test]
    fn alpha_malformed_lines_fail_with_line_number() {
        for (text, bad_line) in [
            ("1: 2.0\nabc:2.0\n", 2),
            ("1 2.0\n", 1),
            ("1: 2.0\n\n3: x\n", 3),
            ("-1: 2.0\n", 1),
            ("1: inf\n", 1),
        ] {
            match parse_alpha_text(Path::new("t"), text) {
                Err(PlotError::Parse { line, .. }) => assert_eq!(line, bad_line, "{text:?}"),
                other => panic!("expected parse error for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn load_alpha_series_keys_by_file_count() {
        let tmp = alpha_fixture();
        let dir = tmp.path().join(ALPHA_DIR);
        write(&dir, "balanced4.txt", "1: 2.0\n2: 1.5\n");
        write(&dir, "balanced10.txt", "1: 3.0\n");

        let set = load_alpha_series(Method::Balanced, tmp.path()).unwrap();
        assert_eq!(set.keys().copied().collect::<Vec<_>>(), [4, 10]);
        assert_eq!(set[&4].pairs(), [(1, 2.0), (2, 1.5)]);
        assert_eq!(set[&10].pairs(), [(1, 3.0)]);
    }

    #[test]
    fn load_alpha_series_stops_on_bad_file() {
        let tmp = alpha_fixture();
        let dir = tmp.path().join(ALPHA_DIR);
        write(&dir, "cascade4.txt", "1: 2.0\n");
        write(&dir, "cascade6.txt", "1: 2.0\nabc:2.0\n");

        let err = load_alpha_series(Method::Cascade, tmp.path()).unwrap_err();
        assert!(matches!(err, PlotError::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn beta_pairs_parse() {
        let text = "3:\n2.0 2.1 1.9 2.0 2.0 2.0 2.0 2.0 2.0 2.0\n\n15:\n1 2 3 4 5 6 7 8 9 10\n";
        let samples = parse_beta_text(Path::new("beta.txt"), text).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].m, 3);
        assert_eq!(samples[0].trials[1], 2.1);
        assert_eq!(samples[1].m, 15);
        assert_eq!(samples[1].trials[9], 10.0);
    }

    #[test]
    fn beta_odd_line_count_fails() {
        let text = "10:\n1 1 1 1 1 1 1 1 1 1\n20:\n";
        let err = parse_beta_text(Path::new("beta.txt"), text).unwrap_err();
        assert!(matches!(err, PlotError::Parse { line: 3, .. }), "{err}");
    }

    #[test]
    fn beta_short_record_fails() {
        let text = "10:\n1 1 1 1 1 1 1 1 1\n";
        let err = parse_beta_text(Path::new("beta.txt"), text).unwrap_err();
        assert!(matches!(err, PlotError::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn beta_bad_header_and_tokens_fail() {
        for text in [
            "10\n1 1 1 1 1 1 1 1 1 1\n",
            "ten:\n1 1 1 1 1 1 1 1 1 1\n",
            "10:\n1 1 1 1 1 1 1 1 1 x\n",
            "10:\n1 1 1 1 1 1 1 1 1 NaN\n",
        ] {
            let err = parse_beta_text(Path::new("beta.txt"), text).unwrap_err();
            assert!(matches!(err, PlotError::Parse { .. }), "{text:?}: {err}");
        }
    }

    #[test]
    fn beta_empty_file_fails() {
        let err = parse_beta_text(Path::new("beta.txt"), "\n\n").unwrap_err();
        assert!(matches!(err, PlotError::Parse { line: 0, .. }), "{err}");
    }

    #[test]
    fn beta_missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = read_beta_file(&tmp.path().join(BETA_FILE)).unwrap_err();
        assert!(matches!(err, PlotError::Io { .. }), "{err}");
    }
}
