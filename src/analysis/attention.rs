use crate::analysis::reducer::{CategoryTable, Reduction, SubMetric};
use crate::analysis::window::{growth_rate, latest, trailing_values};
use crate::models::metric::{names, ProjectMetricBundle};
use crate::models::score::Category;

pub const TABLE: CategoryTable = CategoryTable {
    category: Category::Attention,
    reduction: Reduction::Mean,
    sub_metrics: &[
        SubMetric { name: "star_growth", cap: 25.0, extract: star_growth },
        SubMetric { name: "attention_growth", cap: 25.0, extract: attention_growth },
        SubMetric { name: "issue_activity", cap: 25.0, extract: issue_activity },
        SubMetric { name: "pr_activity", cap: 25.0, extract: pr_activity },
    ],
};

fn star_growth(bundle: &ProjectMetricBundle) -> Option<f64> {
    growth_rate(&trailing_values(bundle, names::STARS))
}

fn attention_growth(bundle: &ProjectMetricBundle) -> Option<f64> {
    growth_rate(&trailing_values(bundle, names::ATTENTION))
}

fn issue_activity(bundle: &ProjectMetricBundle) -> Option<f64> {
    let opened = latest(bundle, names::ISSUES_NEW)?;
    let closed = latest(bundle, names::ISSUES_CLOSED)?;
    Some((opened + closed) / 2.0 * 5.0)
}

fn pr_activity(bundle: &ProjectMetricBundle) -> Option<f64> {
    latest(bundle, names::CHANGE_REQUESTS).map(|v| v * 5.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::metric::MetricPoint;

    fn series(values: &[f64]) -> Vec<MetricPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| MetricPoint { time: format!("2024-{:02}", i + 1), value: *v })
            .collect()
    }

    #[test]
    fn star_growth_of_a_quarter_hits_the_cap_exactly() {
        let mut b = ProjectMetricBundle::new();
        b.insert(names::STARS.to_string(), series(&[100.0, 125.0]));
        let details = TABLE.describe(&b);
        assert_eq!(details.sub_metrics[0].score, Some(25.0));
        assert_eq!(details.score, Some(25.0));
    }

    #[test]
    fn growth_uses_only_the_last_six_points() {
        let mut b = ProjectMetricBundle::new();
        b.insert(
            names::ATTENTION.to_string(),
            series(&[1.0, 1.0, 100.0, 101.0, 102.0, 103.0, 104.0, 110.0]),
        );
        assert!((TABLE.project_score(&b).unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn single_point_or_zero_baseline_does_not_contribute() {
        let mut b = ProjectMetricBundle::new();
        b.insert(names::STARS.to_string(), series(&[100.0]));
        b.insert(names::ATTENTION.to_string(), series(&[0.0, 40.0]));
        assert_eq!(TABLE.project_score(&b), None);
    }

    #[test]
    fn declining_stars_score_zero_but_still_count() {
        let mut b = ProjectMetricBundle::new();
        b.insert(names::STARS.to_string(), series(&[200.0, 100.0]));
        b.insert(names::CHANGE_REQUESTS.to_string(), series(&[4.0]));
        assert_eq!(TABLE.project_score(&b), Some(10.0));
    }

    #[test]
    fn issue_activity_needs_both_series() {
        let mut b = ProjectMetricBundle::new();
        b.insert(names::ISSUES_NEW.to_string(), series(&[4.0]));
        assert_eq!(TABLE.project_score(&b), None);

        b.insert(names::ISSUES_CLOSED.to_string(), series(&[2.0]));
        assert_eq!(TABLE.project_score(&b), Some(15.0));
    }
}
