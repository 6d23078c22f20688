use crate::analysis::reducer::{CategoryTable, Reduction, SubMetric};
use crate::analysis::window::{growth_rate, mean, trailing_values, variance};
use crate::models::metric::{names, ProjectMetricBundle};
use crate::models::score::Category;

/// Three terms summed per project (40 + 30 + 30), not averaged.
pub const TABLE: CategoryTable = CategoryTable {
    category: Category::Openrank,
    reduction: Reduction::Sum,
    sub_metrics: &[
        SubMetric { name: "openrank_level", cap: 40.0, extract: level },
        SubMetric { name: "openrank_growth", cap: 30.0, extract: growth },
        SubMetric { name: "openrank_stability", cap: 30.0, extract: stability },
    ],
};

fn level(bundle: &ProjectMetricBundle) -> Option<f64> {
    trailing_values(bundle, names::OPENRANK).last().map(|v| v / 2.5)
}

fn growth(bundle: &ProjectMetricBundle) -> Option<f64> {
    let window = trailing_values(bundle, names::OPENRANK);
    if window.len() < 2 {
        return None;
    }
    // No usable baseline: the term is present but worth nothing
    Some(growth_rate(&window).unwrap_or(0.0))
}

fn stability(bundle: &ProjectMetricBundle) -> Option<f64> {
    let window = trailing_values(bundle, names::OPENRANK);
    if window.len() < 2 {
        return None;
    }
    let m = mean(&window);
    if m == 0.0 {
        return Some(0.0);
    }
    Some(30.0 * (-variance(&window) / (m * m)).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::metric::MetricPoint;

    fn bundle(values: &[f64]) -> ProjectMetricBundle {
        let series = values
            .iter()
            .enumerate()
            .map(|(i, v)| MetricPoint { time: format!("2023-{:02}", i + 1), value: *v })
            .collect();
        let mut b = ProjectMetricBundle::new();
        b.insert(names::OPENRANK.to_string(), series);
        b
    }

    #[test]
    fn flat_window_scores_level_plus_full_stability() {
        let b = bundle(&[10.0; 6]);
        let details = TABLE.describe(&b);
        assert_eq!(details.sub_metrics[0].score, Some(4.0));
        assert_eq!(details.sub_metrics[1].score, Some(0.0));
        assert_eq!(details.sub_metrics[2].score, Some(30.0));
        assert_eq!(details.score, Some(34.0));
    }

    #[test]
    fn single_point_only_scores_level() {
        assert_eq!(TABLE.project_score(&bundle(&[50.0])), Some(20.0));
    }

    #[test]
    fn terms_are_individually_capped() {
        let b = bundle(&[100.0, 120.0, 150.0, 200.0, 300.0, 500.0]);
        let details = TABLE.describe(&b);
        assert_eq!(details.sub_metrics[0].score, Some(40.0));
        assert_eq!(details.sub_metrics[1].score, Some(30.0));
        let stability = details.sub_metrics[2].score.unwrap();
        assert!(stability > 0.0 && stability < 30.0);
    }

    #[test]
    fn volatile_window_decays_stability() {
        let calm = TABLE.describe(&bundle(&[10.0, 11.0, 10.0, 11.0, 10.0, 11.0]));
        let wild = TABLE.describe(&bundle(&[1.0, 30.0, 2.0, 40.0, 1.0, 35.0]));
        assert!(calm.sub_metrics[2].score.unwrap() > wild.sub_metrics[2].score.unwrap());
    }

    #[test]
    fn zero_window_does_not_produce_nan() {
        let details = TABLE.describe(&bundle(&[0.0, 0.0, 0.0]));
        assert_eq!(details.score, Some(0.0));
    }

    #[test]
    fn no_openrank_series_means_no_score() {
        assert_eq!(TABLE.project_score(&ProjectMetricBundle::new()), None);
        assert_eq!(TABLE.project_score(&bundle(&[])), None);
    }
}
