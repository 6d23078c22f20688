use crate::analysis::reducer::{CategoryTable, Reduction, SubMetric};
use crate::analysis::window::{growth_rate, latest, trailing_values};
use crate::models::metric::{names, ProjectMetricBundle};
use crate::models::score::Category;

pub const TABLE: CategoryTable = CategoryTable {
    category: Category::Development,
    reduction: Reduction::Mean,
    sub_metrics: &[
        SubMetric { name: "code_churn", cap: 25.0, extract: code_churn },
        SubMetric { name: "pr_acceptance_rate", cap: 25.0, extract: pr_acceptance_rate },
        SubMetric { name: "issue_resolution_rate", cap: 25.0, extract: issue_resolution_rate },
        SubMetric { name: "activity_growth", cap: 25.0, extract: activity_growth },
    ],
};

fn code_churn(bundle: &ProjectMetricBundle) -> Option<f64> {
    let added = latest(bundle, names::CODE_CHANGE_LINES_ADD)?;
    let removed = latest(bundle, names::CODE_CHANGE_LINES_REMOVE)?;
    Some((added + removed) / 2.0 / 1000.0)
}

fn pr_acceptance_rate(bundle: &ProjectMetricBundle) -> Option<f64> {
    let accepted = latest(bundle, names::CHANGE_REQUESTS_ACCEPTED)?;
    let total = latest(bundle, names::CHANGE_REQUESTS)?;
    Some(ratio_score(accepted, total))
}

fn issue_resolution_rate(bundle: &ProjectMetricBundle) -> Option<f64> {
    let closed = latest(bundle, names::ISSUES_CLOSED)?;
    let opened = latest(bundle, names::ISSUES_NEW)?;
    Some(ratio_score(closed, opened))
}

fn activity_growth(bundle: &ProjectMetricBundle) -> Option<f64> {
    growth_rate(&trailing_values(bundle, names::ACTIVITY))
}

// Zero denominator still counts, as a zero
fn ratio_score(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 25.0
    } else {
        0.0
    }
}
