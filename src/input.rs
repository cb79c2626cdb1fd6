//! JSON series input.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use binevent_binning::Series;

/// On-disk series: parallel arrays of epoch seconds and magnitudes.
///
/// `null` magnitudes are gaps and become NaN, which the binning skips.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeriesFile {
    time: Vec<f64>,
    value: Vec<Option<f64>>,
}

/// Reads one series file.
pub fn read_series(path: &Path) -> Result<Series> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read series: {}", path.display()))?;
    let file: SeriesFile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse series JSON: {}", path.display()))?;
    let value = file
        .value
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();
    let series = Series::new(file.time, value)
        .with_context(|| format!("invalid series: {}", path.display()))?;
    debug!(path = %path.display(), n = series.len(), "read series");
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reads_series_with_gaps() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write(
            dir.path(),
            "obs.json",
            r#"{"time": [0, 60, 120], "value": [0.1, null, -0.4]}"#,
        );
        let s = read_series(&path).unwrap();
        assert_eq!(s.time(), &[0.0, 60.0, 120.0]);
        assert!(s.value()[1].is_nan());
        assert_eq!(s.value()[2], -0.4);
    }

    #[test]
    fn rejects_unsorted_times() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write(
            dir.path(),
            "bad.json",
            r#"{"time": [0, 120, 60], "value": [0.1, 0.2, 0.3]}"#,
        );
        let err = read_series(&path).unwrap_err();
        assert!(format!("{err:#}").contains("invalid series"));
    }

    #[test]
    fn rejects_malformed_json() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write(dir.path(), "bad.json", r#"{"time": [0]}"#);
        let err = read_series(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse series JSON"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_series(Path::new("/nonexistent/series.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read series"));
    }
}
