pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;
use error::*;

use crate::config::Config;
use crate::locate::{locate_problem_file, ProblemLocation};
use crate::problem::ProblemSpec;
use crate::style::{self, ConsoleReporter};
use crate::testing::{CaseResult, Harness, Reporter};

pub fn init_kata_repository(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    if let Ok(config_filepath) = Config::find_file_in_ancestors(dir) {
        bail!(
            "Already in a kata repository.\nIf it's intentional, remove {:?} and then try again.",
            config_filepath
        );
    }

    let config_filepath = dir.join(Config::FILENAME);
    fsutil::write_with_mkdir(&config_filepath, Config::example_toml())
        .context("Failed to init kata repository")?;
    Ok(config_filepath)
}

/// A missing problem file is not an error: the script is then run without judging.
pub fn load_problem(loc: &ProblemLocation) -> Result<ProblemSpec> {
    if !loc.exists() {
        log::info!(
            "No problem file {:?}; the output will be shown without judging",
            loc.display_path
        );
        return Ok(ProblemSpec::informational(&loc.display_path));
    }
    let text = fsutil::read_to_string(&loc.path)?;
    Ok(ProblemSpec::parse(&text, &loc.display_path))
}

/// Builds the harness for `script`: the runner from `check.runner[]` and the configured timeout.
pub fn prepare_harness(script: impl AsRef<Path>, cfg: &Config) -> Result<Harness> {
    let script = script.as_ref();
    fsutil::ensure_regular_file(script)?;

    let filename = script
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let invocation = cfg.check.find_invocation(&filename).with_context(|| {
        format!(
            "Don't know how to run {:?} (No entry matched glob in `check.runner[]`)",
            script
        )
    })?;
    Ok(Harness::new(invocation, script).timeout(cfg.check.timeout()))
}

pub async fn check_with_reporter<R>(
    script: impl AsRef<Path>,
    cfg: &Config,
    reporter: &mut R,
) -> Result<(ProblemSpec, Vec<CaseResult>)>
where
    R: Reporter + ?Sized,
{
    let script = script.as_ref();
    let harness = prepare_harness(script, cfg)?;
    let loc = locate_problem_file(script, cfg)?;
    let spec = load_problem(&loc)?;

    log::debug!("Running {:?} with '{}'", script, harness.get_invocation());
    let results = harness.run_all(&spec, reporter).await?;
    Ok((spec, results))
}

pub async fn check(script: impl AsRef<Path>, cfg: &Config) -> Result<Vec<CaseResult>> {
    let mut reporter = ConsoleReporter::new(cfg.check.timeout());
    let (_, results) = check_with_reporter(script, cfg, &mut reporter).await?;
    style::print_summary(&results);
    Ok(results)
}

pub async fn watch(dir: Option<PathBuf>, cfg: &Config) -> Result<()> {
    let dir = dir.unwrap_or_else(|| cfg.solutions_dir());
    ensure!(dir.is_dir(), "Not a directory: {:?}", dir);

    crate::watch::watch(&dir, &cfg.check.watch_include, |path| async move {
        println!(
            "\n{}",
            format!("[{}] {}", Local::now().format("%H:%M:%S"), path.to_string_lossy()).dimmed()
        );
        self::check(&path, cfg).await.map(|_| ())
    })
    .await
}

pub fn show_problem(problem_file: impl AsRef<Path>, json: bool) -> Result<()> {
    let spec = ProblemSpec::from_file(&problem_file)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&spec)?);
        return Ok(());
    }

    style::print_intro(&spec);
    if !spec.bare_answer.is_empty() {
        println!("{} {}", "Answer:".cyan().bold(), spec.bare_answer);
    }
    for (i, c) in spec.cases.iter().enumerate() {
        println!("{}", format!("Case {}", i + 1).cyan().bold());
        println!("{} {}", "Given:".yellow(), c.params.join(", "));
        println!("{}\n", c.expected);
    }
    if !spec.has_expectation() {
        println!("{}", "No answer defined".dimmed());
    }
    Ok(())
}
