use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::{ensure, Context as _};
use rust_embed::RustEmbed;
use serde::Deserialize;
use serdable::{DurationSpec, GlobPattern};

use crate::testing::Invocation;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    /// Relative paths in the config are resolved against this dir.
    #[serde(skip)]
    pub root_dir: PathBuf,
    pub layout: LayoutConfig,
    pub check: CheckConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayoutConfig {
    pub solutions_dir: PathBuf,
    pub problems_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckConfig {
    pub timeout: DurationSpec,
    pub watch_include: GlobPattern,
    pub runner: Vec<RunnerConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunnerConfig {
    pub pattern: GlobPattern,
    pub command: Vec<String>,
}

/// `KATA_TIMEOUT`, `KATA_SOLUTIONS_DIR`, `KATA_PROBLEMS_DIR`
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    timeout: Option<DurationSpec>,
    solutions_dir: Option<PathBuf>,
    problems_dir: Option<PathBuf>,
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "kata.toml";
    pub const ENV_PREFIX: &str = "KATA_";

    pub fn example_toml() -> String {
        let file = Asset::get(Self::FILENAME).expect("kata.toml is embedded at build time");
        String::from_utf8_lossy(file.data.as_ref()).into_owned()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let filepath = filepath.into();
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a config file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.root_dir = filepath
            .parent()
            .map(Path::to_owned)
            .unwrap_or_else(|| PathBuf::from("."));
        cfg.source_config_file = Some(filepath);
        cfg.validate()?;
        Ok(cfg)
    }

    /// The embedded example config, rooted at `root_dir`.
    pub fn builtin(root_dir: impl Into<PathBuf>) -> Self {
        let mut cfg = Self::from_toml(&Self::example_toml()).expect("embedded kata.toml is valid");
        cfg.root_dir = root_dir.into();
        cfg
    }

    /// Find config file ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let cur_dir = cur_dir.as_ref();
        cur_dir
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
            .with_context(|| format!("Cannot find '{}' in {:?} or its ancestors", Self::FILENAME, cur_dir))
    }

    /// Resolution order: `explicit_file`, then `kata.toml` in `cur_dir` or its ancestors,
    /// then the built-in defaults. Environment overrides are applied last.
    pub fn load(cur_dir: impl AsRef<Path>, explicit_file: Option<&Path>) -> anyhow::Result<Self> {
        let cur_dir = cur_dir.as_ref();
        let cfg = match explicit_file {
            Some(path) => Self::from_toml_file(path)?,
            None => match Self::find_file_in_ancestors(cur_dir) {
                Ok(path) => Self::from_toml_file(path)?,
                Err(e) => {
                    log::debug!("{:#}; using built-in config", e);
                    Self::builtin(cur_dir)
                }
            },
        };
        cfg.with_env_overrides(std::env::vars())
    }

    pub fn with_env_overrides<I>(mut self, vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env: EnvOverrides = envy::prefixed(Self::ENV_PREFIX)
            .from_iter(vars)
            .with_context(|| format!("Invalid {}* environment variable", Self::ENV_PREFIX))?;

        if let Some(timeout) = env.timeout {
            self.check.timeout = timeout;
        }
        if let Some(dir) = env.solutions_dir {
            self.layout.solutions_dir = dir;
        }
        if let Some(dir) = env.problems_dir {
            self.layout.problems_dir = dir;
        }
        Ok(self)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (i, r) in self.check.runner.iter().enumerate() {
            ensure!(
                !r.command.is_empty(),
                "Empty command in check.runner[{}] (pattern = '{}')",
                i,
                r.pattern
            );
        }
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            fsutil::normalize_path(path)
        } else {
            fsutil::normalize_path(self.root_dir.join(path))
        }
    }

    pub fn solutions_dir(&self) -> PathBuf {
        self.resolve(&self.layout.solutions_dir)
    }

    pub fn problems_dir(&self) -> PathBuf {
        self.resolve(&self.layout.problems_dir)
    }
}

impl CheckConfig {
    pub fn find_invocation(&self, filename: impl AsRef<str>) -> Option<Invocation> {
        self.runner
            .iter()
            .find(|entry| entry.pattern.matches(filename.as_ref()))
            .and_then(|entry| Invocation::from_argv(entry.command.iter().cloned()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout.as_duration()
    }
}
