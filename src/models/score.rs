use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sustainability,
    Attention,
    Development,
    Openrank,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Sustainability,
        Category::Attention,
        Category::Development,
        Category::Openrank,
    ];

    /// Fixed text shown next to the score in the dashboard
    pub fn explanation(&self) -> &'static str {
        match self {
            Category::Sustainability => {
                "Average of up to four parts worth 25 points each: bus factor (x20), \
                 new contributors (x5), issue response time against one day, \
                 and PR resolution time against one week."
            }
            Category::Attention => {
                "Average of up to four parts worth 25 points each: star growth and \
                 attention growth over the last six periods, issue activity (x5) \
                 and PR activity (x5)."
            }
            Category::Development => {
                "Average of up to four parts worth 25 points each: code churn per \
                 thousand lines, PR acceptance rate, issue resolution rate and \
                 activity growth over the last six periods."
            }
            Category::Openrank => {
                "Sum of three parts over the last six OpenRank values: level \
                 (value / 2.5, up to 40), growth (up to 30) and stability \
                 (up to 30, lower variance scores higher)."
            }
        }
    }
}

/// Running total of the sub-metrics that had data for one project and category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub sum: f64,
    pub count: usize,
}

impl ScoreBreakdown {
    pub fn add(&mut self, score: f64) {
        self.sum += score;
        self.count += 1;
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    pub fn total(&self) -> Option<f64> {
        (self.count > 0).then_some(self.sum)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubMetricDetail {
    pub name: String,
    pub cap: f64,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub score: Option<f64>,
    pub sub_metrics: Vec<SubMetricDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectScoreBreakdown {
    pub project: String,
    pub categories: Vec<CategoryBreakdown>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreExplanation {
    pub category: Category,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeScores {
    pub sustainability: u8,
    pub attention: u8,
    pub development: u8,
    pub openrank: u8,
}

impl CompositeScores {
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::Sustainability => self.sustainability,
            Category::Attention => self.attention,
            Category::Development => self.development,
            Category::Openrank => self.openrank,
        }
    }

    pub fn explanations() -> Vec<ScoreExplanation> {
        Category::ALL
            .iter()
            .map(|category| ScoreExplanation {
                category: *category,
                text: category.explanation().to_string(),
            })
            .collect()
    }
}
