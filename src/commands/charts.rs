use crate::models::dashboard::DashboardCache;
use crate::models::metric::{names, BundleMap, MetricSeries};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub name: String,
    pub metrics: Vec<String>,
}

/// Series a chart draws, keyed by project then metric name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub chart: String,
    pub projects: HashMap<String, HashMap<String, MetricSeries>>,
}

const CHARTS: &[(&str, &[&str])] = &[
    ("project attention", &[names::STARS, names::ATTENTION]),
    ("OpenRank", &[names::OPENRANK]),
    (
        "code change behavior",
        &[names::CODE_CHANGE_LINES_ADD, names::CODE_CHANGE_LINES_REMOVE],
    ),
    ("PR situation", &[names::CHANGE_REQUESTS, names::CHANGE_REQUESTS_ACCEPTED]),
    ("issue changes", &[names::ISSUES_NEW, names::ISSUES_CLOSED]),
    ("project activity", &[names::ACTIVITY]),
];

#[tauri::command]
pub async fn list_charts() -> Result<Vec<ChartDescriptor>, String> {
    Ok(chart_descriptors())
}

#[tauri::command]
pub async fn get_chart_series(
    chart: String,
    cache: tauri::State<'_, Arc<Mutex<DashboardCache>>>,
) -> Result<ChartSeries, String> {
    let cache_lock = cache.lock().map_err(|_| "Cache lock error".to_string())?;
    build_chart_series(&chart, &cache_lock.selection, &cache_lock.bundles)
}

pub fn chart_descriptors() -> Vec<ChartDescriptor> {
    CHARTS
        .iter()
        .map(|(name, metrics)| ChartDescriptor {
            name: name.to_string(),
            metrics: metrics.iter().map(|m| m.to_string()).collect(),
        })
        .collect()
}

/// Collect the normalized series `chart` needs for every selected project.
/// Projects without any of those metrics are left out.
pub fn build_chart_series(
    chart: &str,
    selection: &[String],
    bundles: &BundleMap,
) -> Result<ChartSeries, String> {
    let metrics = CHARTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(chart))
        .map(|(_, metrics)| *metrics)
        .ok_or(format!("UNKNOWN_CHART: {chart}"))?;

    let mut projects = HashMap::new();
    for project in selection {
        let Some(bundle) = bundles.get(project) else {
            continue;
        };
        let series: HashMap<String, MetricSeries> = metrics
            .iter()
            .filter_map(|metric| {
                bundle
                    .get(*metric)
                    .map(|series| (metric.to_string(), series.clone()))
            })
            .collect();
        if !series.is_empty() {
            projects.insert(project.clone(), series);
        }
    }

    Ok(ChartSeries {
        chart: chart.to_string(),
        projects,
    })
}
