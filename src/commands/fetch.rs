use crate::analysis::normalize::normalize_bundle;
use crate::commands::settings::EffectiveFetchSettings;
use crate::models::metric::{BundleMap, ProjectMetricBundle};
use crate::models::project::ProjectId;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use reqwest::Url;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Valid, de-duplicated identifiers in selection order. Invalid ones are logged and dropped.
pub fn parse_selection(projects: &[String]) -> Vec<ProjectId> {
    let mut seen = HashSet::new();
    let mut ids = Vec::with_capacity(projects.len());

    for raw in projects {
        match ProjectId::parse(raw) {
            Ok(id) => {
                if seen.insert(id.clone()) {
                    ids.push(id);
                }
            }
            Err(e) => log::warn!("skipping project: {e}"),
        }
    }

    ids
}

/// Fetch and normalize the metric bundle of every valid project.
///
/// The map has one entry per valid identifier; a project whose request fails
/// maps to an empty bundle.
pub async fn fetch_bundles(projects: &[String], settings: &EffectiveFetchSettings) -> BundleMap {
    let ids = parse_selection(projects);
    let mut bundles: BundleMap = ids
        .iter()
        .map(|id| (id.to_string(), ProjectMetricBundle::new()))
        .collect();

    if ids.is_empty() {
        return bundles;
    }

    let client = match reqwest::Client::builder()
        .timeout(settings.request_timeout)
        .user_agent(settings.user_agent.clone())
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build HTTP client: {e}");
            return bundles;
        }
    };

    let permits = Arc::new(Semaphore::new(settings.max_concurrent_requests.max(1)));
    let mut tasks = JoinSet::new();

    for id in ids {
        let client = client.clone();
        let permits = Arc::clone(&permits);
        let url = match project_url(&settings.api_base_url, &id) {
            Ok(url) => url,
            Err(e) => {
                log::error!("{e}");
                continue;
            }
        };
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await.ok();
            let bundle = fetch_bundle(&client, url).await;
            (id.to_string(), bundle)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((project, bundle)) => {
                log::debug!("{project}: {} metrics", bundle.len());
                bundles.insert(project, bundle);
            }
            Err(e) => log::error!("fetch task failed: {e}"),
        }
    }

    bundles
}

/// `{api_base_url}/{owner}/{repo}` with owner and repo percent-encoded as separate segments
pub fn project_url(api_base_url: &str, id: &ProjectId) -> Result<Url, String> {
    let mut url = Url::parse(api_base_url)
        .map_err(|e| format!("INVALID_API_URL: {api_base_url}: {e}"))?;
    url.path_segments_mut()
        .map_err(|_| format!("INVALID_API_URL: {api_base_url} cannot carry a path"))?
        .pop_if_empty()
        .push(&id.owner)
        .push(&id.repo);
    Ok(url)
}

async fn fetch_bundle(client: &reqwest::Client, url: Url) -> ProjectMetricBundle {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("GET {url} failed: {e}");
            return ProjectMetricBundle::new();
        }
    };

    let status = response.status();
    if !status.is_success() {
        log::warn!("GET {url} returned {status}; no data for this project");
        return ProjectMetricBundle::new();
    }

    match response.json::<Value>().await {
        Ok(raw) => normalize_bundle(&raw),
        Err(e) => {
            log::warn!("GET {url} returned an unreadable body: {e}");
            ProjectMetricBundle::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn drops_invalid_and_duplicate_identifiers() {
        let ids = parse_selection(&selection(&["a/b", "nope", "a/b", "c/d", "x/"]));
        let names: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["a/b", "c/d"]);
    }

    #[test]
    fn builds_encoded_project_url() {
        let id = ProjectId::parse("my org/repo#1").unwrap();
        assert_eq!(
            project_url("http://localhost:8080/api/", &id).unwrap().as_str(),
            "http://localhost:8080/api/my%20org/repo%231"
        );
        assert_eq!(
            project_url("http://localhost:8080", &id).unwrap().as_str(),
            "http://localhost:8080/my%20org/repo%231"
        );
    }

    #[test]
    fn rejects_unusable_api_base() {
        let id = ProjectId::parse("a/b").unwrap();
        assert!(project_url("not a url", &id).unwrap_err().starts_with("INVALID_API_URL"));
        assert!(project_url("mailto:someone@example.com", &id).is_err());
    }

    #[tokio::test]
    async fn empty_selection_makes_no_requests() {
        let settings = EffectiveFetchSettings {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..EffectiveFetchSettings::default()
        };
        let bundles = fetch_bundles(&selection(&["invalid"]), &settings).await;
        assert!(bundles.is_empty());
    }
}
