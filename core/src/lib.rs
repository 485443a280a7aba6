pub mod action;
pub mod config;
pub mod locate;
pub mod problem;
pub mod style;
pub mod testing;
pub mod watch;

pub use crate::config::Config;
pub use crate::problem::{Case, ProblemSpec};
