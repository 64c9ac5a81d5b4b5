use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::branch::BranchName;
use crate::domain::remote::RemotePair;
use crate::error::{AppError, AppResult};

const APP_DIR_NAME: &str = "dualpush";
const CONFIG_FILE_NAME: &str = "config.json";

pub const CONFIG_DIR_ENV: &str = "DUALPUSH_CONFIG_DIR";
pub const GITEE_URL_ENV: &str = "DUALPUSH_GITEE_URL";
pub const GITHUB_URL_ENV: &str = "DUALPUSH_GITHUB_URL";
pub const BRANCH_ENV: &str = "DUALPUSH_BRANCH";

pub fn config_directory() -> AppResult<PathBuf> {
    if let Some(dir) = non_empty_env(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration(format!(
                "could not determine a config directory; set {CONFIG_DIR_ENV}"
            ))
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Settings persisted by `dualpush config init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitee_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loaded stored config");
                Ok(serde_json::from_str(&contents)?)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gitee_url: Option<String>,
    pub github_url: Option<String>,
    pub branch: BranchName,
    pub workspace_root: PathBuf,
}

impl AppConfig {
    pub fn load(workspace_hint: &Path) -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Self::resolve(stored, non_empty_env, workspace_hint)
    }

    /// Layers environment overrides from `lookup` on top of `stored`.
    pub fn resolve(
        stored: StoredConfig,
        lookup: impl Fn(&str) -> Option<String>,
        workspace_hint: &Path,
    ) -> AppResult<Self> {
        let gitee_url = lookup(GITEE_URL_ENV).or(stored.gitee_url);
        let github_url = lookup(GITHUB_URL_ENV).or(stored.github_url);
        let branch = match lookup(BRANCH_ENV).or(stored.branch) {
            Some(value) => BranchName::parse(&value)?,
            None => BranchName::default(),
        };

        Ok(Self {
            gitee_url: gitee_url.filter(|url| !url.trim().is_empty()),
            github_url: github_url.filter(|url| !url.trim().is_empty()),
            branch,
            workspace_root: workspace_hint.to_path_buf(),
        })
    }

    pub fn remotes(&self) -> AppResult<RemotePair> {
        let gitee = remote_url(self.gitee_url.as_deref(), "Gitee", GITEE_URL_ENV)?;
        let github = remote_url(self.github_url.as_deref(), "GitHub", GITHUB_URL_ENV)?;
        Ok(RemotePair::new(gitee, github))
    }
}

fn remote_url<'a>(value: Option<&'a str>, name: &str, env_key: &str) -> AppResult<&'a str> {
    let url = value.map(str::trim).ok_or_else(|| {
        AppError::Configuration(format!(
            "{name} remote URL not configured; run `dualpush config init` or set {env_key}"
        ))
    })?;
    // git would parse a leading '-' as an option.
    if url.starts_with('-') {
        return Err(AppError::Configuration(format!(
            "{name} remote URL '{url}' must not start with '-'"
        )));
    }
    Ok(url)
}
