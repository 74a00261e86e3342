use dioxus::prelude::*;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub emulator_url: String,
    pub whiteboard_url: String,
    pub community_url: String,
    pub vidfast_base_url: String,
    pub soundcloud_api_url: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            emulator_url: "/emulator/index.html".to_string(),
            whiteboard_url: "https://excalidraw.com".to_string(),
            community_url: "https://x.com/i/communities/1983062242292822298".to_string(),
            vidfast_base_url: "https://vidfast.pro".to_string(),
            soundcloud_api_url: "https://w.soundcloud.com/player/api.js".to_string(),
        }
    }
}

pub fn use_runtime_config() -> Resource<RuntimeConfig> {
    use_resource(|| async move {
        match fetch_runtime_config().await {
            Ok(config) => config,
            Err(message) => {
                tracing::warn!("runtime config unavailable, using defaults: {message}");
                RuntimeConfig::default()
            }
        }
    })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Result<RuntimeConfig, String> {
    match fetch_config_from("/config.json").await {
        Ok(config) => Ok(config),
        Err(_) => fetch_config_from("/assets/config.json").await,
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_config_from(path: &str) -> Result<RuntimeConfig, String> {
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|err| format!("config fetch failed: {err}"))?;
    if !response.ok() {
        return Err(format!("config fetch failed: status {}", response.status()));
    }
    response
        .json::<RuntimeConfig>()
        .await
        .map_err(|err| format!("config decode failed: {err}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Result<RuntimeConfig, String> {
    Ok(config_from_lookup(|key| std::env::var(key).ok()))
}

#[cfg(not(target_arch = "wasm32"))]
fn config_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RuntimeConfig {
    let defaults = RuntimeConfig::default();
    RuntimeConfig {
        emulator_url: lookup("EMULATOR_URL").unwrap_or(defaults.emulator_url),
        whiteboard_url: lookup("WHITEBOARD_URL").unwrap_or(defaults.whiteboard_url),
        community_url: lookup("COMMUNITY_URL").unwrap_or(defaults.community_url),
        vidfast_base_url: lookup("VIDFAST_BASE_URL").unwrap_or(defaults.vidfast_base_url),
        soundcloud_api_url: lookup("SOUNDCLOUD_API_URL").unwrap_or(defaults.soundcloud_api_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: RuntimeConfig =
            serde_json::from_str(r#"{"emulator_url":"/retro/index.html"}"#).unwrap();
        assert_eq!(config.emulator_url, "/retro/index.html");
        assert_eq!(config.whiteboard_url, RuntimeConfig::default().whiteboard_url);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn env_lookup_overrides_single_field() {
        let config = config_from_lookup(|key| {
            (key == "VIDFAST_BASE_URL").then(|| "https://vidfast.example".to_string())
        });
        assert_eq!(config.vidfast_base_url, "https://vidfast.example");
        assert_eq!(config.emulator_url, "/emulator/index.html");
    }
}
