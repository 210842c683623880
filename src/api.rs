//! Thin fetch layer over the public f1api.dev JSON endpoints.
//!
//! Every call is a plain GET with an `Accept: application/json` header, no
//! auth, no timeout, no retry. A non-2xx status or a body that is not JSON
//! fails the calling view's initialization outright.

use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

use crate::models::error::AppError;
use crate::models::standings::DetailKind;
use crate::utils::state::AppState;

pub async fn fetch_json(state: &AppState, url: &str) -> Result<Value, AppError> {
    debug!(%url, "issuing API request");
    let response = state
        .http_client
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|source| AppError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Api {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|source| AppError::Transport {
            url: url.to_string(),
            source,
        })
}

pub async fn next_race(state: &AppState) -> Result<Value, AppError> {
    let url = format!("{}/current/next", state.config.api_base_url);
    fetch_json(state, &url).await
}

pub async fn last_race(state: &AppState) -> Result<Value, AppError> {
    let url = format!("{}/current/last/race", state.config.api_base_url);
    fetch_json(state, &url).await
}

pub async fn season_races(state: &AppState, year: i32) -> Result<Value, AppError> {
    let url = format!("{}/{year}", state.config.api_base_url);
    fetch_json(state, &url).await
}

pub async fn drivers_championship(state: &AppState, year: Option<i32>) -> Result<Value, AppError> {
    let url = championship_url(state, "drivers-championship", year);
    fetch_json(state, &url).await
}

pub async fn constructors_championship(
    state: &AppState,
    year: Option<i32>,
) -> Result<Value, AppError> {
    let url = championship_url(state, "constructors-championship", year);
    fetch_json(state, &url).await
}

fn championship_url(state: &AppState, table: &str, year: Option<i32>) -> String {
    match year {
        Some(year) => format!("{}/{year}/{table}", state.config.api_base_url),
        None => format!("{}/current/{table}", state.config.api_base_url),
    }
}

/// Fetch one driver/constructor profile, memoized by (kind, id) for the
/// process lifetime. A hit skips the network entirely; a failure is not
/// cached and leaves other entries untouched.
pub async fn detail_profile(
    state: &AppState,
    kind: DetailKind,
    id: &str,
) -> Result<Value, AppError> {
    let key = (kind, id.to_string());
    if let Some(hit) = state.detail_cache.get(&key) {
        debug!(kind = kind.path_segment(), id, "detail cache hit");
        return Ok(hit.clone());
    }

    let url = format!(
        "{}/{}/{id}",
        state.config.api_base_url,
        kind.path_segment()
    );
    let payload = fetch_json(state, &url).await?;
    state.detail_cache.insert(key, payload.clone());
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Nothing listens here, so any attempt to hit the network fails fast.
    const DEAD_END: &str = "http://127.0.0.1:9";

    #[tokio::test]
    async fn detail_failure_is_not_cached() {
        let state = AppState::with_base_url(DEAD_END);
        let result = detail_profile(&state, DetailKind::Drivers, "alonso").await;
        assert!(result.is_err());
        assert!(state.detail_cache.is_empty());
    }

    #[tokio::test]
    async fn detail_hit_skips_the_network() {
        let state = AppState::with_base_url(DEAD_END);
        let profile = json!({ "driver": [{ "name": "Fernando", "surname": "Alonso" }] });
        state
            .detail_cache
            .insert((DetailKind::Drivers, "alonso".to_string()), profile.clone());

        // The base URL is unroutable, so success proves no call was made.
        let fetched = detail_profile(&state, DetailKind::Drivers, "alonso")
            .await
            .expect("cache hit should not touch the network");
        assert_eq!(fetched, profile);
    }

    #[tokio::test]
    async fn failures_leave_other_keys_untouched() {
        let state = AppState::with_base_url(DEAD_END);
        let profile = json!({ "team": [{ "teamName": "McLaren" }] });
        state
            .detail_cache
            .insert((DetailKind::Teams, "mclaren".to_string()), profile.clone());

        let result = detail_profile(&state, DetailKind::Drivers, "alonso").await;
        assert!(result.is_err());
        let kept = detail_profile(&state, DetailKind::Teams, "mclaren")
            .await
            .expect("cached entry should survive an unrelated failure");
        assert_eq!(kept, profile);
    }
}
