use std::io::Write as _;

use colored::Colorize as _;
use kata_core::style::ColorTheme as _;

/// `RUST_LOG` decides the level; `info` by default.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let level = record.level();
            writeln!(
                buf,
                "{} {}",
                format!("[{}]", level).color(level.color()).bold(),
                record.args()
            )
        })
        .init();
}
