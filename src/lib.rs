pub mod analysis;
pub mod commands;
pub mod models;

use commands::{
    charts::{get_chart_series, list_charts},
    scoring::{get_composite_scores, get_project_breakdown, load_projects},
    settings::{get_settings, save_settings},
};
use models::dashboard::DashboardCache;
use std::sync::{Arc, Mutex};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(Arc::new(Mutex::new(DashboardCache::default())))
        .invoke_handler(tauri::generate_handler![
            load_projects,
            get_composite_scores,
            get_project_breakdown,
            list_charts,
            get_chart_series,
            get_settings,
            save_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
