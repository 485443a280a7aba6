use std::path::PathBuf;

use kata_core::action;
use serdable::DurationSpec;

use crate::util;

use super::{GlobalArgs, SubcmdResult};

/// Check every solution script as soon as it is saved
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Defaults to the solutions dir
    #[arg()] // positional argument
    pub dir: Option<PathBuf>,

    /// Kill scripts after this long, e.g. 10s, 500ms
    #[arg(short, long)]
    pub timeout: Option<DurationSpec>,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let mut cfg = util::load_config(global_args)?;
    if let Some(timeout) = args.timeout {
        cfg.check.timeout = timeout;
    }

    action::watch(args.dir.clone(), &cfg).await
}
