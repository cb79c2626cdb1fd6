//! Test fixtures: a small run description with series files on disk.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct Fixture {
    /// Keeps the directory alive for the test's duration.
    pub dir: TempDir,
    pub config: PathBuf,
}

const WINDOW: f64 = 1200.0;

fn write_series(dir: &Path, name: &str, offset: f64, values: &[f64]) {
    let time: Vec<f64> = (0..values.len())
        .map(|i| offset + i as f64 * WINDOW)
        .collect();
    let body = serde_json::json!({ "time": time, "value": values });
    std::fs::write(dir.join(name), body.to_string()).expect("write series");
}

/// Two cases at threshold 0.3.
///
/// `YKC-1` has an explicit two-hour range and three models; `NEW-1` derives
/// its range from the forecasts and has only SWMF and LFM.
pub fn write_run() -> Fixture {
    let dir = tempfile::tempdir().expect("create temp dir");
    let p = dir.path();

    write_series(p, "ykc_obs.json", 100.0, &[0.5, 0.6, 0.1, 0.0, 0.4, 0.1]);
    write_series(p, "ykc_swmf.json", 100.0, &[0.4, 0.1, 0.5, 0.0, 0.2, 0.1]);
    write_series(p, "ykc_lfm.json", 100.0, &[0.6, 0.35, 0.1, 0.0, 0.5, 0.1]);
    write_series(p, "ykc_windmi.json", 100.0, &[0.1, 0.4, 0.3, 0.2, 0.9, 0.0]);

    write_series(p, "new_obs.json", 50.0, &[0.1, 0.8, 0.2]);
    write_series(p, "new_swmf.json", 50.0, &[0.2, 0.9, 0.1]);
    write_series(p, "new_lfm.json", 50.0, &[0.5, 0.1, 0.1]);

    let config = p.join("run.toml");
    std::fs::write(
        &config,
        r#"
[binning]
window_secs = 1200.0

[thresholds]
observation = 0.3

[ensemble]
reference = "SWMF"
min_votes = 2

[[case]]
label = "YKC-1"
observed = "ykc_obs.json"
forecasts = { SWMF = "ykc_swmf.json", LFM = "ykc_lfm.json", WINDMI = "ykc_windmi.json" }
start = "1970-01-01T00:00:00"
stop = "1970-01-01T02:00:00"

[[case]]
label = "NEW-1"
observed = "new_obs.json"
forecasts = { SWMF = "new_swmf.json", LFM = "new_lfm.json" }
"#,
    )
    .expect("write config");

    Fixture { dir, config }
}
