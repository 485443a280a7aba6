use kata_core::{action, print_success};
use std::path::PathBuf;

use crate::util;

use super::{GlobalArgs, SubcmdResult};

/// Create kata.toml with the default layout and runners
#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(default_value = "./")]
    dir: PathBuf,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let path = action::init_kata_repository(&args.dir)?;
    print_success!(
        "Successfully initialized kata repository. (config: {})",
        util::replace_homedir_to_tilde(path).to_string_lossy()
    );
    Ok(())
}
