use std::path::PathBuf;

use kata_core::action;
use serdable::DurationSpec;

use crate::util;

use super::{GlobalArgs, SubcmdResult};

/// Run a solution script against the cases of its problem file
#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub script: PathBuf,

    /// Kill the script after this long, e.g. 10s, 500ms
    #[arg(short, long)]
    pub timeout: Option<DurationSpec>,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let mut cfg = util::load_config(global_args)?;
    if let Some(timeout) = args.timeout {
        cfg.check.timeout = timeout;
    }

    let _ = action::check(&args.script, &cfg).await?;
    Ok(())
}
