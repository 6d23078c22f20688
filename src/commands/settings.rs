use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tauri::Manager;

const SETTINGS_SCHEMA_VERSION: i64 = 2;
const DEFAULT_API_BASE_URL: &str = "https://oss.x-lab.info/open_digger/github";

#[derive(Debug, Clone)]
pub struct EffectiveFetchSettings {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub max_concurrent_requests: usize,
    pub user_agent: String,
}

impl Default for EffectiveFetchSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(20),
            max_concurrent_requests: 4,
            user_agent: default_user_agent(),
        }
    }
}

#[tauri::command]
pub async fn get_settings(app: tauri::AppHandle) -> Result<Value, String> {
    load_settings_from_disk(&config_dir(&app)?)
}

#[tauri::command]
pub async fn save_settings(app: tauri::AppHandle, settings: Value) -> Result<Value, String> {
    save_settings_to_disk(&config_dir(&app)?, settings)
}

pub fn config_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    app.path()
        .app_config_dir()
        .map_err(|e| format!("SETTINGS_IO: Could not resolve config directory: {e}"))
}

pub fn load_effective_fetch_settings(config_dir: &Path) -> Result<EffectiveFetchSettings, String> {
    let settings = load_settings_from_disk(config_dir)?;
    let defaults = EffectiveFetchSettings::default();

    Ok(EffectiveFetchSettings {
        api_base_url: settings
            .get("apiBaseUrl")
            .and_then(Value::as_str)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url),
        request_timeout: settings
            .get("requestTimeoutSecs")
            .and_then(Value::as_u64)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout),
        max_concurrent_requests: settings
            .get("maxConcurrentRequests")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(defaults.max_concurrent_requests),
        user_agent: settings
            .get("userAgent")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(defaults.user_agent),
    })
}

pub fn load_settings_from_disk(config_dir: &Path) -> Result<Value, String> {
    let path = settings_path(config_dir);
    ensure_config_dir(config_dir)?;

    let original = if path.exists() {
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("SETTINGS_IO: Failed to read settings.json: {e}"))?;
        serde_json::from_str::<Value>(&raw).unwrap_or_else(|e| {
            log::warn!("settings.json is not valid JSON, falling back to defaults: {e}");
            json!({})
        })
    } else {
        json!({})
    };

    let migrated = migrate_settings(original.clone());
    if migrated != original || !path.exists() {
        write_settings_file(&path, &migrated)?;
    }

    Ok(migrated)
}

pub fn save_settings_to_disk(config_dir: &Path, settings: Value) -> Result<Value, String> {
    let path = settings_path(config_dir);
    ensure_config_dir(config_dir)?;

    let mut merged = load_settings_from_disk(config_dir).unwrap_or_else(|_| default_settings());
    merge_settings(&mut merged, &settings);

    let migrated = migrate_settings(merged);
    write_settings_file(&path, &migrated)?;
    log::info!("saved settings to {}", path.display());
    Ok(migrated)
}

fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join("settings.json")
}

fn ensure_config_dir(config_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(config_dir)
        .map_err(|e| format!("SETTINGS_IO: Failed to create config directory: {e}"))
}

fn write_settings_file(path: &Path, settings: &Value) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("SETTINGS_IO: Failed to serialize settings: {e}"))?;
    fs::write(path, raw).map_err(|e| format!("SETTINGS_IO: Failed to write settings.json: {e}"))
}

fn default_user_agent() -> String {
    format!("opendash/{}", env!("CARGO_PKG_VERSION"))
}

fn migrate_settings(input: Value) -> Value {
    let mut out = match input {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    let version = out
        .get("schema_version")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    if version < 2 {
        // V1 stored the endpoint as `baseUrl`.
        if let Some(obj) = out.as_object_mut() {
            if let Some(legacy) = obj.remove("baseUrl") {
                obj.entry("apiBaseUrl".to_string()).or_insert(legacy);
            }
        }
    }

    fill_defaults(&mut out, &default_settings());
    sanitize_settings(&mut out);
    if let Some(obj) = out.as_object_mut() {
        obj.insert("schema_version".to_string(), json!(SETTINGS_SCHEMA_VERSION));
    }

    out
}

fn default_settings() -> Value {
    json!({
        "schema_version": SETTINGS_SCHEMA_VERSION,
        "apiBaseUrl": DEFAULT_API_BASE_URL,
        "requestTimeoutSecs": 20,
        "maxConcurrentRequests": 4,
        "userAgent": default_user_agent()
    })
}

fn fill_defaults(target: &mut Value, defaults: &Value) {
    let (Some(target_obj), Some(default_obj)) = (target.as_object_mut(), defaults.as_object()) else {
        return;
    };

    for (key, default_value) in default_obj {
        target_obj
            .entry(key.clone())
            .or_insert_with(|| default_value.clone());
    }
}

fn merge_settings(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(target_obj), Value::Object(incoming_obj)) => {
            for (key, value) in incoming_obj {
                if let Some(existing) = target_obj.get_mut(key) {
                    merge_settings(existing, value);
                } else {
                    target_obj.insert(key.clone(), value.clone());
                }
            }
        }
        (target_slot, incoming_value) => {
            *target_slot = incoming_value.clone();
        }
    }
}

fn sanitize_settings(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };

    clamp_u64(obj, "requestTimeoutSecs", 1, 120, 20);
    clamp_u64(obj, "maxConcurrentRequests", 1, 16, 4);

    let base_url_ok = obj
        .get("apiBaseUrl")
        .and_then(Value::as_str)
        .is_some_and(|url| url.starts_with("http://") || url.starts_with("https://"));
    if !base_url_ok {
        obj.insert("apiBaseUrl".to_string(), json!(DEFAULT_API_BASE_URL));
    }

    let agent_ok = obj
        .get("userAgent")
        .and_then(Value::as_str)
        .is_some_and(|agent| !agent.trim().is_empty());
    if !agent_ok {
        obj.insert("userAgent".to_string(), json!(default_user_agent()));
    }
}

fn clamp_u64(map: &mut Map<String, Value>, key: &str, min: u64, max: u64, default: u64) {
    let raw = map.get(key).and_then(Value::as_u64).unwrap_or(default);
    map.insert(key.to_string(), json!(raw.clamp(min, max)));
}
