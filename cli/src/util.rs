use std::{
    path::{Path, PathBuf},
    process::exit,
};

use kata_core::Config;

use crate::cmd::GlobalArgs;

pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        eprintln!("Failed to get current dir: {}", e);
        exit(1);
    })
}

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

pub fn load_config(global_args: &GlobalArgs) -> anyhow::Result<Config> {
    let cfg = Config::load(current_dir(), global_args.config.as_deref())?;
    match &cfg.source_config_file {
        Some(path) => log::debug!("Config: {:?}", replace_homedir_to_tilde(path)),
        None => log::debug!("Config: built-in defaults"),
    }
    Ok(cfg)
}
