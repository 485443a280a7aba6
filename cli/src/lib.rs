pub mod cmd;
pub mod logger;
pub mod util;
