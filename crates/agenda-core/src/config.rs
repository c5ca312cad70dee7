use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::conflict::Strategy;
use crate::loader::DEFAULT_RESOURCE;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub conflicts: ConflictConfig,
    #[serde(default)]
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConflictConfig {
    #[serde(default)]
    pub strategy: Strategy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Events file, relative to the project root unless absolute.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub strategy: Option<Strategy>,
}

/// Where the events come from once every layer has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum EventSource {
    File(PathBuf),
    Bundled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub strategy: Strategy,
    pub source: EventSource,
    pub output: Option<String>,
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".agenda/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("agenda/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Merge CLI flags, environment, user and project config.
///
/// Precedence for the strategy: `cli_strategy`, then `AGENDA_STRATEGY`,
/// then the user file, then the project file. The events source is
/// `cli_file`, then `[events] path`, then `<root>/upcoming_events.json` if it
/// exists, then the bundled sample.
pub fn resolve_config(
    project_root: &Path,
    cli_strategy: Option<Strategy>,
    cli_file: Option<&Path>,
) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_strategy = env::var("AGENDA_STRATEGY").ok();
    let strategy = resolve_strategy(cli_strategy, env_strategy.as_deref(), user.strategy, project.conflicts.strategy)?;
    let source = resolve_source(project_root, cli_file, project.events.path.as_deref());
    let output = env::var("FORMAT").ok().or_else(|| user.output.clone());

    debug!(%strategy, ?source, "resolved configuration");

    Ok(EffectiveConfig {
        project,
        user,
        strategy,
        source,
        output,
    })
}

fn resolve_strategy(
    cli: Option<Strategy>,
    env_value: Option<&str>,
    user: Option<Strategy>,
    project: Strategy,
) -> Result<Strategy> {
    if let Some(strategy) = cli {
        return Ok(strategy);
    }
    if let Some(raw) = env_value {
        return raw
            .parse::<Strategy>()
            .with_context(|| "Invalid AGENDA_STRATEGY value".to_string());
    }
    Ok(user.unwrap_or(project))
}

fn resolve_source(project_root: &Path, cli_file: Option<&Path>, configured: Option<&Path>) -> EventSource {
    let anchor = |path: &Path| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_root.join(path)
        }
    };

    if let Some(path) = cli_file {
        return EventSource::File(path.to_path_buf());
    }
    if let Some(path) = configured {
        return EventSource::File(anchor(path));
    }
    let default = project_root.join(DEFAULT_RESOURCE);
    if default.exists() {
        EventSource::File(default)
    } else {
        EventSource::Bundled
    }
}
