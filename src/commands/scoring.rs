use crate::analysis::table_for;
use crate::commands::fetch::{fetch_bundles, parse_selection};
use crate::commands::settings::EffectiveFetchSettings;
use crate::models::dashboard::{DashboardCache, DashboardSnapshot};
use crate::models::metric::BundleMap;
use crate::models::score::{Category, CompositeScores, ProjectScoreBreakdown};
use std::sync::{Arc, Mutex};

#[tauri::command]
pub async fn load_projects(
    projects: Vec<String>,
    cache: tauri::State<'_, Arc<Mutex<DashboardCache>>>,
    app: tauri::AppHandle,
) -> Result<DashboardSnapshot, String> {
    let config_dir = crate::commands::settings::config_dir(&app)?;
    let settings = crate::commands::settings::load_effective_fetch_settings(&config_dir)?;
    load_projects_internal(&projects, &settings, cache.inner()).await
}

/// Run one fetch cycle for `projects` and install it unless a newer cycle already has.
pub async fn load_projects_internal(
    projects: &[String],
    settings: &EffectiveFetchSettings,
    cache: &Arc<Mutex<DashboardCache>>,
) -> Result<DashboardSnapshot, String> {
    let generation = cache
        .lock()
        .map_err(|_| "Cache lock error".to_string())?
        .begin_cycle();

    let selection: Vec<String> = parse_selection(projects)
        .iter()
        .map(ToString::to_string)
        .collect();
    let start = std::time::Instant::now();
    let bundles = fetch_bundles(&selection, settings).await;
    let fetched_at = chrono::Utc::now().timestamp();

    let scores = compute_composite_scores(&selection, &bundles);
    let empty_projects = selection
        .iter()
        .filter(|project| bundles.get(*project).map_or(true, |b| b.is_empty()))
        .cloned()
        .collect();

    log::info!(
        "fetch cycle {generation}: {} projects in {} ms",
        selection.len(),
        start.elapsed().as_millis()
    );

    let installed = cache
        .lock()
        .map_err(|_| "Cache lock error".to_string())?
        .install(generation, selection.clone(), bundles, fetched_at);

    Ok(DashboardSnapshot {
        generation,
        installed,
        fetched_at,
        projects: selection,
        empty_projects,
        scores,
        explanations: CompositeScores::explanations(),
    })
}

#[tauri::command]
pub async fn get_composite_scores(
    cache: tauri::State<'_, Arc<Mutex<DashboardCache>>>,
) -> Result<CompositeScores, String> {
    let cache_lock = cache.lock().map_err(|_| "Cache lock error".to_string())?;
    Ok(compute_composite_scores(&cache_lock.selection, &cache_lock.bundles))
}

#[tauri::command]
pub async fn get_project_breakdown(
    project: String,
    cache: tauri::State<'_, Arc<Mutex<DashboardCache>>>,
) -> Result<ProjectScoreBreakdown, String> {
    let cache_lock = cache.lock().map_err(|_| "Cache lock error".to_string())?;
    project_breakdown(&project, &cache_lock.bundles)
}

/// Composite scores for `selection`; pure and stateless.
pub fn compute_composite_scores(selection: &[String], bundles: &BundleMap) -> CompositeScores {
    let score = |category| table_for(category).composite(selection, bundles);
    CompositeScores {
        sustainability: score(Category::Sustainability),
        attention: score(Category::Attention),
        development: score(Category::Development),
        openrank: score(Category::Openrank),
    }
}

pub fn project_breakdown(project: &str, bundles: &BundleMap) -> Result<ProjectScoreBreakdown, String> {
    let bundle = bundles
        .get(project)
        .ok_or(format!("NO_DATA: {project} is not part of the current selection"))?;

    Ok(ProjectScoreBreakdown {
        project: project.to_string(),
        categories: Category::ALL
            .iter()
            .map(|category| table_for(*category).describe(bundle))
            .collect(),
    })
}
