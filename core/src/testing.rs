pub mod diff;
pub mod reporter;
pub mod result;
pub mod runner;
pub mod testcase;

pub use diff::*;
pub use reporter::*;
pub use result::*;
pub use runner::*;
pub use testcase::*;
