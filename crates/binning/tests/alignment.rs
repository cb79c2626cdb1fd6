//! Integration tests for aligning differently sampled series.

use approx::assert_relative_eq;
use binevent_binning::{BinConfig, BinningError, Series, Thresholds, TimeRange, bin_pair};

/// One-minute observations and 30-second forecasts over two hours.
fn two_cadences() -> (Series, Series) {
    let obs_t: Vec<f64> = (0..120).map(|i| i as f64 * 60.0).collect();
    let obs_v: Vec<f64> = obs_t
        .iter()
        .map(|&t| if (1200.0..1800.0).contains(&t) { 0.8 } else { 0.1 })
        .collect();

    let fcst_t: Vec<f64> = (0..240).map(|i| 15.0 + i as f64 * 30.0).collect();
    let fcst_v: Vec<f64> = fcst_t
        .iter()
        .map(|&t| if (1300.0..1400.0).contains(&t) { -0.5 } else { 0.05 })
        .collect();

    (
        Series::new(obs_t, obs_v).unwrap(),
        Series::new(fcst_t, fcst_v).unwrap(),
    )
}

#[test]
fn different_cadences_share_a_grid() {
    let (obs, fcst) = two_cadences();
    let config = BinConfig::default().with_range(TimeRange::new(0.0, 7200.0).unwrap());
    let pair = bin_pair(&obs, &fcst, &config).unwrap();

    assert_eq!(pair.len(), 6);
    assert_eq!(pair.n_missing(), 0);
    assert_eq!(pair.time()[1], 1200.0);

    assert_relative_eq!(pair.obsmax()[1].unwrap(), 0.8);
    assert_relative_eq!(pair.modmax()[1].unwrap(), 0.5);
    assert_relative_eq!(pair.obsmax()[0].unwrap(), 0.1);

    let flags = pair.classify(&Thresholds::uniform(0.3).unwrap());
    let observed: Vec<bool> = flags.observed().iter().map(|f| f.unwrap()).collect();
    let forecast: Vec<bool> = flags.forecast().iter().map(|f| f.unwrap()).collect();
    assert_eq!(observed, vec![false, true, false, false, false, false]);
    assert_eq!(forecast, vec![false, true, false, false, false, false]);
}

#[test]
fn gap_in_observations_yields_missing_bins() {
    let obs = Series::new(vec![0.0, 100.0, 3700.0], vec![0.4, 0.2, 0.1]).unwrap();
    let fcst = Series::new(vec![0.0, 1300.0, 2500.0, 3700.0], vec![0.1; 4]).unwrap();
    let config = BinConfig::default().with_range(TimeRange::new(0.0, 4800.0).unwrap());
    let pair = bin_pair(&obs, &fcst, &config).unwrap();

    assert_eq!(
        pair.obsmax(),
        &[Some(0.4), None, None, Some(0.1)],
        "empty bins must be flagged, not zero-filled"
    );
    assert_eq!(pair.n_missing(), 2);
}

#[test]
fn narrower_window_gives_more_bins() {
    let (obs, fcst) = two_cadences();
    let range = TimeRange::new(0.0, 7200.0).unwrap();
    let coarse = bin_pair(&obs, &fcst, &BinConfig::default().with_range(range)).unwrap();
    let fine = bin_pair(
        &obs,
        &fcst,
        &BinConfig::default().with_range(range).with_window(300.0),
    )
    .unwrap();
    assert_eq!(coarse.len(), 6);
    assert_eq!(fine.len(), 24);
}

#[test]
fn zero_length_derived_range_is_rejected() {
    let obs = Series::new(vec![0.0], vec![0.1]).unwrap();
    let fcst = Series::new(vec![50.0], vec![0.1]).unwrap();
    let err = bin_pair(&obs, &fcst, &BinConfig::default()).unwrap_err();
    assert_eq!(
        err,
        BinningError::InvalidRange {
            start: 50.0,
            stop: 50.0
        }
    );
}
