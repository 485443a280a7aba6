pub mod duration;
pub mod glob;

pub use self::duration::{DurationSpec, DurationSpecError};
pub use self::glob::GlobPattern;
