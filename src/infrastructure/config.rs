use crate::domain::view::{NavBinding, ViewId};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[serde(default)]
    pub endpoints: EndpointSettings,
    #[serde(default)]
    pub render: RenderSettings,
    pub navigation: NavigationSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl RefreshSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EndpointSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_streams_path")]
    pub streams_path: String,
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            streams_path: default_streams_path(),
            metrics_path: default_metrics_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RenderSettings {
    #[serde(default = "default_container_id")]
    pub container_id: String,
    /// View whose region holds the container
    #[serde(default = "default_host_view")]
    pub host_view: ViewId,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            host_view: default_host_view(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NavigationSettings {
    pub default_view: ViewId,
    pub bindings: Vec<NavBinding>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

fn default_interval_ms() -> u64 {
    2000
}

fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_streams_path() -> String {
    "/streams".to_string()
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_container_id() -> String {
    "stream-tiles".to_string()
}

fn default_host_view() -> ViewId {
    ViewId::new("dashboard-page")
}

fn default_bind() -> String {
    "0.0.0.0:8090".to_string()
}

/// Load `config/console.*`, with `QSTREAMS__SECTION__KEY` environment
/// variables taking precedence
pub fn load_console_config() -> anyhow::Result<ConsoleConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/console"))
        .add_source(
            config::Environment::with_prefix("QSTREAMS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let console: ConsoleConfig = settings.try_deserialize()?;
    console.validate()?;
    Ok(console)
}

impl ConsoleConfig {
    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.refresh.interval_ms > 0, "refresh.interval_ms must be greater than 0");
        anyhow::ensure!(
            self.refresh.request_timeout_ms > 0,
            "refresh.request_timeout_ms must be greater than 0"
        );
        anyhow::ensure!(!self.endpoints.base_url.is_empty(), "endpoints.base_url is required");
        anyhow::ensure!(
            self.navigation
                .bindings
                .iter()
                .any(|b| b.view_id == self.render.host_view),
            "render.host_view {} is not a configured view",
            self.render.host_view
        );
        Ok(())
    }
}
