use aphrodite_core::chart::ChartSettings;
use aphrodite_core::EngineConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Which ephemeris backs chart assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EphemerisBackend {
    Analytic,
    Swiss { path: Option<PathBuf> },
}

/// Everything loaded from `engine.toml`
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub engine: EngineConfig,
    pub ephemeris: EphemerisBackend,
    pub chart: ChartSettings,
}

#[derive(Debug, Clone, Deserialize)]
struct EphemerisToml {
    #[serde(default = "default_backend")]
    backend: String,
    #[serde(default)]
    path: Option<PathBuf>,
}

fn default_backend() -> String {
    "analytic".to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    engine: Option<EngineConfig>,
    #[serde(default)]
    ephemeris: Option<EphemerisToml>,
    #[serde(default)]
    chart: Option<ChartSettings>,
}

/// Try common relative paths for `configs/engine.toml`.
pub fn read_engine_toml_text() -> anyhow::Result<String> {
    let paths = ["configs/engine.toml", "../../configs/engine.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load engine.toml from {:?}", paths);
}

fn parse_backend(cfg: Option<EphemerisToml>) -> anyhow::Result<EphemerisBackend> {
    let Some(EphemerisToml { backend, path }) = cfg else {
        return Ok(EphemerisBackend::Analytic);
    };
    match backend.to_lowercase().as_str() {
        "analytic" => Ok(EphemerisBackend::Analytic),
        "swiss" | "swisseph" => {
            if let Some(p) = &path {
                if !p.exists() {
                    anyhow::bail!("ephemeris.path does not exist: {}", p.display());
                }
            }
            Ok(EphemerisBackend::Swiss { path })
        }
        other => anyhow::bail!("Unknown ephemeris.backend {other:?} (expected \"analytic\" or \"swiss\")"),
    }
}

/// Parse settings from TOML text; missing tables fall back to defaults
pub fn parse_engine_settings(text: &str) -> anyhow::Result<EngineSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse engine.toml: {e}"))?;
    let engine = root.engine.unwrap_or_default();
    engine
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [engine] config: {e}"))?;
    Ok(EngineSettings {
        engine,
        ephemeris: parse_backend(root.ephemeris)?,
        chart: root.chart.unwrap_or_default(),
    })
}

pub fn load_engine_settings_from(path: &Path) -> anyhow::Result<EngineSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    parse_engine_settings(&text)
}

/// Load `configs/engine.toml` from the usual places
pub fn load_engine_settings() -> anyhow::Result<EngineSettings> {
    parse_engine_settings(&read_engine_toml_text()?)
}

/// Only the `[engine]` table
pub fn load_engine_config() -> anyhow::Result<EngineConfig> {
    Ok(load_engine_settings()?.engine)
}
