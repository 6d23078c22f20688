use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One raw record as served by the data API; `value` may be a number or a numeric string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMetricRecord {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub time: String,
    pub value: f64,
}

/// Points ordered ascending by `time`
pub type MetricSeries = Vec<MetricPoint>;

/// All series for one project, keyed by metric name
pub type ProjectMetricBundle = HashMap<String, MetricSeries>;

/// Bundles keyed by `owner/repo`
pub type BundleMap = HashMap<String, ProjectMetricBundle>;

pub mod names {
    pub const STARS: &str = "stars";
    pub const ATTENTION: &str = "attention";
    pub const ACTIVITY: &str = "activity";
    pub const OPENRANK: &str = "openrank";
    pub const BUS_FACTOR: &str = "bus_factor";
    pub const NEW_CONTRIBUTORS: &str = "new_contributors";
    pub const ISSUE_RESPONSE_TIME: &str = "issue_response_time";
    pub const ISSUES_NEW: &str = "issues_new";
    pub const ISSUES_CLOSED: &str = "issues_closed";
    pub const CHANGE_REQUESTS: &str = "change_requests";
    pub const CHANGE_REQUESTS_ACCEPTED: &str = "change_requests_accepted";
    pub const CHANGE_REQUEST_RESOLUTION_DURATION: &str = "change_request_resolution_duration";
    pub const CODE_CHANGE_LINES_ADD: &str = "code_change_lines_add";
    pub const CODE_CHANGE_LINES_REMOVE: &str = "code_change_lines_remove";
}
