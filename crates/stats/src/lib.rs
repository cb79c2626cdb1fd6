//! Numeric reductions shared by the binevent crates.
//!
//! All helpers treat NaN as an absent value: it is skipped rather than
//! propagated, and an input with no remaining values reduces to `None`.

use std::cmp::Ordering;

/// Maximum absolute value of a slice, skipping NaN.
///
/// Returns `None` if the slice is empty or contains only NaN.
pub fn max_abs(data: &[f64]) -> Option<f64> {
    data.iter()
        .filter(|v| !v.is_nan())
        .map(|v| v.abs())
        .fold(None, |acc, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
}

/// Arithmetic mean of a slice, skipping NaN.
///
/// Returns `None` if no non-NaN values remain.
pub fn mean(data: &[f64]) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for &v in data.iter().filter(|v| !v.is_nan()) {
        sum += v;
        n += 1;
    }
    if n == 0 { None } else { Some(sum / n as f64) }
}

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median_sorted(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median_sorted: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Median of unsorted data, skipping NaN.
///
/// Returns `None` if no non-NaN values remain.
pub fn median(data: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    Some(median_sorted(&sorted))
}

/// `n` evenly spaced values from `start` to `stop` inclusive (numpy `linspace`).
///
/// Returns an empty vector for `n == 0` and `[start]` for `n == 1`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_max_abs() {
        assert_eq!(max_abs(&[0.1, -0.7, 0.3]), Some(0.7));
    }

    #[test]
    fn test_max_abs_empty() {
        assert_eq!(max_abs(&[]), None);
    }

    #[test]
    fn test_max_abs_skips_nan() {
        assert_eq!(max_abs(&[f64::NAN, 0.2, f64::NAN]), Some(0.2));
        assert_eq!(max_abs(&[f64::NAN]), None);
    }

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data).unwrap(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[f64::NAN]), None);
    }

    #[test]
    fn test_mean_skips_nan() {
        assert_relative_eq!(mean(&[1.0, f64::NAN, 3.0]).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_median_odd() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_median_even() {
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_median_skips_nan() {
        assert_relative_eq!(
            median(&[f64::NAN, 5.0, 1.0]).unwrap(),
            3.0,
            epsilon = 1e-12
        );
        assert_eq!(median(&[f64::NAN]), None);
    }

    #[test]
    #[should_panic(expected = "median_sorted: input must not be empty")]
    fn test_median_sorted_empty_panics() {
        median_sorted(&[]);
    }

    #[test]
    fn test_linspace() {
        let v = linspace(0.0, 0.27, 4);
        assert_eq!(v.len(), 4);
        assert_relative_eq!(v[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(v[1], 0.09, epsilon = 1e-12);
        assert_relative_eq!(v[2], 0.18, epsilon = 1e-12);
        assert_eq!(v[3], 0.27);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.5, 1.0, 1), vec![0.5]);
    }
}
