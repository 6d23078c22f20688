use crate::models::metric::{MetricSeries, ProjectMetricBundle};

/// Number of trailing periods used for growth and stability
pub const TRAILING_WINDOW: usize = 6;

/// Series for `name`, or `None` when the key is missing or the series is empty.
pub fn series<'a>(bundle: &'a ProjectMetricBundle, name: &str) -> Option<&'a MetricSeries> {
    bundle.get(name).filter(|s| !s.is_empty())
}

pub fn latest(bundle: &ProjectMetricBundle, name: &str) -> Option<f64> {
    series(bundle, name).and_then(|s| s.last()).map(|p| p.value)
}

/// Values of the last `TRAILING_WINDOW` points (fewer if the series is shorter).
pub fn trailing_values(bundle: &ProjectMetricBundle, name: &str) -> Vec<f64> {
    let Some(series) = series(bundle, name) else {
        return Vec::new();
    };
    let start = series.len().saturating_sub(TRAILING_WINDOW);
    series[start..].iter().map(|p| p.value).collect()
}

/// Percent change from the first to the last value.
///
/// `None` with fewer than two values or a non-positive baseline.
pub fn growth_rate(values: &[f64]) -> Option<f64> {
    let (first, last) = match values {
        [first, .., last] => (*first, *last),
        _ => return None,
    };
    if first <= 0.0 {
        return None;
    }
    Some((last - first) / first * 100.0)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::metric::MetricPoint;

    fn bundle_with(name: &str, values: &[f64]) -> ProjectMetricBundle {
        let series = values
            .iter()
            .enumerate()
            .map(|(i, v)| MetricPoint {
                time: format!("2024-{:02}", i + 1),
                value: *v,
            })
            .collect();
        let mut bundle = ProjectMetricBundle::new();
        bundle.insert(name.to_string(), series);
        bundle
    }

    #[test]
    fn missing_and_empty_series_are_both_no_data() {
        let bundle = bundle_with("stars", &[]);
        assert!(latest(&bundle, "stars").is_none());
        assert!(latest(&bundle, "openrank").is_none());
        assert!(trailing_values(&bundle, "openrank").is_empty());
    }

    #[test]
    fn trailing_window_keeps_last_six() {
        let bundle = bundle_with("stars", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(trailing_values(&bundle, "stars"), vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(latest(&bundle, "stars"), Some(8.0));
    }

    #[test]
    fn growth_rate_needs_two_points_and_a_positive_baseline() {
        assert_eq!(growth_rate(&[100.0, 125.0]), Some(25.0));
        assert_eq!(growth_rate(&[100.0]), None);
        assert_eq!(growth_rate(&[0.0, 50.0]), None);
        assert_eq!(growth_rate(&[50.0, 40.0, 25.0]), Some(-50.0));
    }

    #[test]
    fn variance_of_flat_window_is_zero() {
        assert_eq!(variance(&[10.0; 6]), 0.0);
        assert!((variance(&[1.0, 3.0]) - 1.0).abs() < 1e-12);
        assert_eq!(mean(&[]), 0.0);
    }
}
