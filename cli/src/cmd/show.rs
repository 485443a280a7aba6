use std::path::PathBuf;

use kata_core::action;

use super::{GlobalArgs, SubcmdResult};

/// Print a problem file the way kata understands it
#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub problem_file: PathBuf,

    #[arg(short, long)]
    pub json: bool,
}

pub fn exec(args: &Args, _global_args: &GlobalArgs) -> SubcmdResult {
    action::show_problem(&args.problem_file, args.json)
}
