use crate::analysis::reducer::{CategoryTable, Reduction, SubMetric};
use crate::analysis::window::latest;
use crate::models::metric::{names, ProjectMetricBundle};
use crate::models::score::Category;

const MINUTES_PER_DAY: f64 = 1440.0;
const MINUTES_PER_WEEK: f64 = 10080.0;

pub const TABLE: CategoryTable = CategoryTable {
    category: Category::Sustainability,
    reduction: Reduction::Mean,
    sub_metrics: &[
        SubMetric { name: "contributor_diversity", cap: 25.0, extract: contributor_diversity },
        SubMetric { name: "new_contributor_growth", cap: 25.0, extract: new_contributor_growth },
        SubMetric { name: "issue_responsiveness", cap: 25.0, extract: issue_responsiveness },
        SubMetric { name: "pr_resolution_efficiency", cap: 25.0, extract: pr_resolution_efficiency },
    ],
};

fn contributor_diversity(bundle: &ProjectMetricBundle) -> Option<f64> {
    latest(bundle, names::BUS_FACTOR).map(|v| v * 20.0)
}

fn new_contributor_growth(bundle: &ProjectMetricBundle) -> Option<f64> {
    latest(bundle, names::NEW_CONTRIBUTORS).map(|v| v * 5.0)
}

// Faster first response scores higher; a day or more scores 0
fn issue_responsiveness(bundle: &ProjectMetricBundle) -> Option<f64> {
    latest(bundle, names::ISSUE_RESPONSE_TIME).map(|minutes| 25.0 * (1.0 - minutes / MINUTES_PER_DAY))
}

fn pr_resolution_efficiency(bundle: &ProjectMetricBundle) -> Option<f64> {
    latest(bundle, names::CHANGE_REQUEST_RESOLUTION_DURATION)
        .map(|minutes| 25.0 * (1.0 - minutes / MINUTES_PER_WEEK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::metric::MetricPoint;

    fn bundle(entries: &[(&str, f64)]) -> ProjectMetricBundle {
        entries
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    vec![
                        MetricPoint { time: "2024-01".to_string(), value: 0.0 },
                        MetricPoint { time: "2024-02".to_string(), value: *value },
                    ],
                )
            })
            .collect()
    }

    #[test]
    fn bus_factor_and_new_contributors_average_to_twenty() {
        let b = bundle(&[(names::BUS_FACTOR, 2.0), (names::NEW_CONTRIBUTORS, 3.0)]);
        let breakdown = TABLE.breakdown(&b);
        assert_eq!(breakdown.count, 2);
        assert_eq!(breakdown.sum, 40.0);
        assert_eq!(TABLE.project_score(&b), Some(20.0));
    }

    #[test]
    fn slow_responses_floor_at_zero() {
        let b = bundle(&[
            (names::ISSUE_RESPONSE_TIME, 3000.0),
            (names::CHANGE_REQUEST_RESOLUTION_DURATION, 50_000.0),
        ]);
        assert_eq!(TABLE.project_score(&b), Some(0.0));
    }

    #[test]
    fn half_day_response_scores_half() {
        let b = bundle(&[(names::ISSUE_RESPONSE_TIME, 720.0)]);
        assert_eq!(TABLE.project_score(&b), Some(12.5));
    }

    #[test]
    fn uses_latest_point() {
        let b = bundle(&[(names::CHANGE_REQUEST_RESOLUTION_DURATION, 0.0)]);
        assert_eq!(TABLE.project_score(&b), Some(25.0));
    }
}
