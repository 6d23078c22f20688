use crate::models::metric::{BundleMap, ProjectMetricBundle};
use crate::models::score::{Category, CategoryBreakdown, ScoreBreakdown, SubMetricDetail};
use std::collections::HashSet;

/// One scoring formula: returns the uncapped sub-score, or `None` when the
/// bundle lacks the data it needs.
pub type Extractor = fn(&ProjectMetricBundle) -> Option<f64>;

#[derive(Clone, Copy)]
pub struct SubMetric {
    pub name: &'static str,
    pub cap: f64,
    pub extract: Extractor,
}

impl SubMetric {
    /// Sub-score clamped into `[0, cap]`
    pub fn evaluate(&self, bundle: &ProjectMetricBundle) -> Option<f64> {
        (self.extract)(bundle)
            .filter(|v| !v.is_nan())
            .map(|v| v.clamp(0.0, self.cap))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Average over the sub-metrics that had data
    Mean,
    /// Additive total of the sub-metrics that had data
    Sum,
}

#[derive(Clone, Copy)]
pub struct CategoryTable {
    pub category: Category,
    pub reduction: Reduction,
    pub sub_metrics: &'static [SubMetric],
}

impl CategoryTable {
    pub fn breakdown(&self, bundle: &ProjectMetricBundle) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::default();
        for sub_metric in self.sub_metrics {
            if let Some(score) = sub_metric.evaluate(bundle) {
                breakdown.add(score);
            }
        }
        breakdown
    }

    /// Per-project score, `None` when no sub-metric contributed.
    pub fn project_score(&self, bundle: &ProjectMetricBundle) -> Option<f64> {
        let breakdown = self.breakdown(bundle);
        match self.reduction {
            Reduction::Mean => breakdown.mean(),
            Reduction::Sum => breakdown.total(),
        }
    }

    pub fn describe(&self, bundle: &ProjectMetricBundle) -> CategoryBreakdown {
        CategoryBreakdown {
            category: self.category,
            score: self.project_score(bundle),
            sub_metrics: self
                .sub_metrics
                .iter()
                .map(|sub_metric| SubMetricDetail {
                    name: sub_metric.name.to_string(),
                    cap: sub_metric.cap,
                    score: sub_metric.evaluate(bundle),
                })
                .collect(),
        }
    }

    /// Mean of the per-project scores over contributing projects, rounded to
    /// an integer in `[0, 100]`; 0 when nobody contributes. A project listed
    /// more than once counts once.
    pub fn composite(&self, selection: &[String], bundles: &BundleMap) -> u8 {
        let mut total = 0.0;
        let mut contributing = 0usize;
        let mut seen = HashSet::new();

        for project in selection {
            if !seen.insert(project.as_str()) {
                continue;
            }
            let Some(bundle) = bundles.get(project) else {
                continue;
            };
            if let Some(score) = self.project_score(bundle) {
                total += score;
                contributing += 1;
            }
        }

        if contributing == 0 {
            return 0;
        }
        (total / contributing as f64).round().clamp(0.0, 100.0) as u8
    }
}
