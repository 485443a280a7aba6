pub mod check;
pub mod init;
pub mod show;
pub mod watch;

use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Use this config file instead of searching for kata.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    #[command(alias("c"))]
    Check(check::Args),

    Init(init::Args),
    Show(show::Args),

    #[command(alias("w"))]
    Watch(watch::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Check(args) => check::exec(args, self).await,
            Init(args) => init::exec(args, self),
            Show(args) => show::exec(args, self),
            Watch(args) => watch::exec(args, self).await,
        }
    }
}
